use std::fmt::{self, Write};

use crate::{
    atom::{Add, Atom, Coefficient, Constant, Fun, Mul, Pow, Symbol},
    series::SeriesExpansion,
};

/// The dialect in which expressions are printed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrintMode {
    Symbolica,
    Mathematica,
    Latex,
}

/// Options that control the printing of atoms and series expansions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub mode: PrintMode,
    pub multiplication_operator: char,
    /// Restrict the output to ASCII characters.
    pub ascii: bool,
}

impl PrintOptions {
    pub const fn new() -> PrintOptions {
        PrintOptions {
            mode: PrintMode::Symbolica,
            multiplication_operator: '*',
            ascii: false,
        }
    }

    /// Print output in LaTeX.
    pub const fn latex() -> PrintOptions {
        PrintOptions {
            mode: PrintMode::Latex,
            multiplication_operator: ' ',
            ascii: true,
        }
    }

    /// Print output that is suitable for a file, using only ASCII.
    pub const fn file() -> PrintOptions {
        PrintOptions {
            mode: PrintMode::Symbolica,
            multiplication_operator: '*',
            ascii: true,
        }
    }

    /// Print output in Mathematica input form.
    pub const fn mathematica() -> PrintOptions {
        PrintOptions {
            mode: PrintMode::Mathematica,
            multiplication_operator: '*',
            ascii: true,
        }
    }

    #[inline]
    fn latex_mode(&self) -> bool {
        self.mode == PrintMode::Latex
    }

    /// The symbol used for the big-O remainder of a series.
    pub fn order_symbol(&self) -> &'static str {
        match self.mode {
            PrintMode::Latex => "\\mathcal{O}",
            PrintMode::Mathematica => "O",
            PrintMode::Symbolica if self.ascii => "O",
            PrintMode::Symbolica => "𝒪",
        }
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! define_formatters {
    ($($a:ident),*) => {
        $(
        trait $a {
            fn fmt_output(
                &self,
                f: &mut fmt::Formatter,
                opts: &PrintOptions,
            ) -> fmt::Result;
        })+
    };
}

define_formatters!(
    FormattedPrintVar,
    FormattedPrintNum,
    FormattedPrintConst,
    FormattedPrintFn,
    FormattedPrintPow,
    FormattedPrintMul,
    FormattedPrintAdd
);

/// A printer for atoms, with configurable options.
///
/// ```
/// use fastseries::atom::Atom;
/// use fastseries::printer::{AtomPrinter, PrintOptions};
///
/// let x = Atom::new_var("x");
/// let a = x.npow((1, 2)) * Atom::new_num((3, 4));
/// assert_eq!(a.to_string(), "3/4*x^(1/2)");
/// assert_eq!(
///     AtomPrinter::new_with_options(&a, PrintOptions::latex()).to_string(),
///     "\\frac{3}{4} x^{\\frac{1}{2}}"
/// );
/// ```
pub struct AtomPrinter<'a> {
    pub atom: &'a Atom,
    pub opts: PrintOptions,
}

impl<'a> AtomPrinter<'a> {
    pub fn new(atom: &'a Atom) -> AtomPrinter<'a> {
        AtomPrinter {
            atom,
            opts: PrintOptions::default(),
        }
    }

    pub fn new_with_options(atom: &'a Atom, opts: PrintOptions) -> AtomPrinter<'a> {
        AtomPrinter { atom, opts }
    }
}

impl fmt::Display for AtomPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.atom.fmt_output(f, &self.opts)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        AtomPrinter::new(self).fmt(f)
    }
}

impl Atom {
    pub(crate) fn fmt_output(&self, f: &mut fmt::Formatter, opts: &PrintOptions) -> fmt::Result {
        match self {
            Atom::Num(n) => n.fmt_output(f, opts),
            Atom::Var(v) => v.fmt_output(f, opts),
            Atom::Const(c) => c.fmt_output(f, opts),
            Atom::Fun(fun) => fun.fmt_output(f, opts),
            Atom::Pow(p) => p.fmt_output(f, opts),
            Atom::Mul(m) => m.fmt_output(f, opts),
            Atom::Add(a) => a.fmt_output(f, opts),
        }
    }

    /// Print the atom, surrounded by parentheses if `paren` is true.
    fn fmt_grouped(&self, f: &mut fmt::Formatter, opts: &PrintOptions, paren: bool) -> fmt::Result {
        if !paren {
            return self.fmt_output(f, opts);
        }

        if opts.latex_mode() {
            f.write_str("\\left(")?;
            self.fmt_output(f, opts)?;
            f.write_str("\\right)")
        } else {
            f.write_char('(')?;
            self.fmt_output(f, opts)?;
            f.write_char(')')
        }
    }
}

/// Print an atom into a string, so that its sign can be inspected.
fn to_string_with(a: &Atom, opts: &PrintOptions) -> String {
    AtomPrinter::new_with_options(a, *opts).to_string()
}

impl FormattedPrintVar for Symbol {
    fn fmt_output(&self, f: &mut fmt::Formatter, _opts: &PrintOptions) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FormattedPrintNum for Coefficient {
    fn fmt_output(&self, f: &mut fmt::Formatter, opts: &PrintOptions) -> fmt::Result {
        match self {
            Coefficient::Rational(r) => {
                if opts.latex_mode() && *r.denom() != 1 {
                    if *r < 0 {
                        f.write_char('-')?;
                    }
                    write!(f, "\\frac{{{}}}{{{}}}", r.numer().clone().abs(), r.denom())
                } else {
                    write!(f, "{}", r)
                }
            }
            Coefficient::Float(_) => write!(f, "{}", self),
            Coefficient::Complex(re, im) => {
                let i = match opts.mode {
                    PrintMode::Mathematica => "I",
                    _ if opts.ascii => "i",
                    _ => "𝑖",
                };

                if *re != 0 {
                    Coefficient::Rational(re.clone()).fmt_output(f, opts)?;
                    if *im > 0 {
                        f.write_char('+')?;
                    }
                }

                if *im == -1 {
                    f.write_char('-')?;
                } else if *im != 1 {
                    Coefficient::Rational(im.clone()).fmt_output(f, opts)?;
                    if opts.mode == PrintMode::Mathematica {
                        f.write_char(opts.multiplication_operator)?;
                    }
                }
                f.write_str(i)
            }
        }
    }
}

impl FormattedPrintConst for Constant {
    fn fmt_output(&self, f: &mut fmt::Formatter, opts: &PrintOptions) -> fmt::Result {
        let name = match (opts.mode, self) {
            (PrintMode::Latex, Constant::Pi) => "\\pi",
            (PrintMode::Latex, Constant::E) => "e",
            (PrintMode::Latex, Constant::EulerGamma) => "\\gamma",
            (PrintMode::Latex, Constant::Catalan) => "G",
            (PrintMode::Mathematica, Constant::Pi) => "Pi",
            (PrintMode::Mathematica, Constant::E) => "E",
            (_, Constant::EulerGamma) if opts.ascii => "EulerGamma",
            (_, Constant::Catalan) if opts.ascii => "Catalan",
            (_, Constant::Pi) if opts.ascii => "pi",
            (_, Constant::E) if opts.ascii => "e",
            _ => self.name(),
        };
        f.write_str(name)
    }
}

impl FormattedPrintFn for Fun {
    fn fmt_output(&self, f: &mut fmt::Formatter, opts: &PrintOptions) -> fmt::Result {
        let name = self.name().name();
        let (open, close) = match opts.mode {
            PrintMode::Symbolica => ("(", ")"),
            PrintMode::Mathematica => ("[", "]"),
            PrintMode::Latex => ("\\left(", "\\right)"),
        };

        match opts.mode {
            PrintMode::Symbolica => f.write_str(name)?,
            PrintMode::Latex => write!(f, "\\operatorname{{{}}}", name)?,
            PrintMode::Mathematica => match name {
                "asin" => f.write_str("ArcSin")?,
                "atan" => f.write_str("ArcTan")?,
                "asinh" => f.write_str("ArcSinh")?,
                "atanh" => f.write_str("ArcTanh")?,
                _ => {
                    let mut chars = name.chars();
                    if let Some(c) = chars.next() {
                        f.write_char(c.to_ascii_uppercase())?;
                    }
                    f.write_str(chars.as_str())?;
                }
            },
        }

        f.write_str(open)?;
        let mut first = true;
        for x in self.args() {
            if !first {
                f.write_char(',')?;
            }
            first = false;

            x.fmt_output(f, opts)?;
        }
        f.write_str(close)
    }
}

impl FormattedPrintPow for Pow {
    fn fmt_output(&self, f: &mut fmt::Formatter, opts: &PrintOptions) -> fmt::Result {
        let b = self.base();
        let paren = match b {
            Atom::Add(_) | Atom::Mul(_) | Atom::Pow(_) => true,
            Atom::Num(n) => match n {
                Coefficient::Rational(r) => *r < 0 || *r.denom() != 1,
                Coefficient::Float(x) => *x < 0.,
                Coefficient::Complex(..) => true,
            },
            _ => false,
        };
        b.fmt_grouped(f, opts, paren)?;

        f.write_char('^')?;

        let e = self.exp();
        if opts.latex_mode() {
            f.write_char('{')?;
            e.fmt_output(f, opts)?;
            return f.write_char('}');
        }

        let paren = match e {
            Atom::Add(_) | Atom::Mul(_) | Atom::Pow(_) => true,
            Atom::Num(n) => match n {
                Coefficient::Rational(r) => *r.denom() != 1,
                Coefficient::Float(_) => false,
                Coefficient::Complex(..) => true,
            },
            _ => false,
        };
        e.fmt_grouped(f, opts, paren)
    }
}

impl FormattedPrintMul for Mul {
    fn fmt_output(&self, f: &mut fmt::Formatter, opts: &PrintOptions) -> fmt::Result {
        let mut first = true;
        match self.coeff() {
            Atom::Num(n) if n.is_one() => {}
            Atom::Num(Coefficient::Rational(r)) if *r == -1 => f.write_char('-')?,
            c => {
                let paren = !matches!(c, Atom::Num(Coefficient::Rational(_)));
                c.fmt_grouped(f, opts, paren)?;
                first = false;
            }
        }

        for x in self.factors() {
            if !first {
                f.write_char(opts.multiplication_operator)?;
            }
            first = false;

            let paren = match x {
                Atom::Add(_) => true,
                Atom::Num(n) => n.is_negative() || matches!(n, Coefficient::Complex(..)),
                _ => false,
            };
            x.fmt_grouped(f, opts, paren)?;
        }
        Ok(())
    }
}

impl FormattedPrintAdd for Add {
    fn fmt_output(&self, f: &mut fmt::Formatter, opts: &PrintOptions) -> fmt::Result {
        let mut first = true;
        let c = self.coeff();
        let terms = self
            .terms()
            .iter()
            .chain(std::iter::once(c).filter(|c| !c.is_zero()));

        for x in terms {
            let s = to_string_with(x, opts);
            if !first && !s.starts_with('-') {
                f.write_char('+')?;
            }
            first = false;

            f.write_str(&s)?;
        }

        if first {
            f.write_char('0')?;
        }
        Ok(())
    }
}

/// A printer for series expansions, with configurable options.
pub struct SeriesPrinter<'a> {
    pub series: &'a SeriesExpansion,
    pub opts: PrintOptions,
}

impl<'a> SeriesPrinter<'a> {
    pub fn new(series: &'a SeriesExpansion) -> SeriesPrinter<'a> {
        SeriesPrinter {
            series,
            opts: PrintOptions::default(),
        }
    }

    pub fn new_with_options(series: &'a SeriesExpansion, opts: PrintOptions) -> SeriesPrinter<'a> {
        SeriesPrinter { series, opts }
    }

    fn fmt_order(&self, f: &mut fmt::Formatter, base: &Atom) -> fmt::Result {
        let opts = &self.opts;
        let order = self.series.order();

        if opts.mode == PrintMode::Mathematica {
            f.write_str("O[")?;
            self.series.variable().fmt_output(f, opts)?;
            if *self.series.point() != 0 {
                f.write_char(',')?;
                Coefficient::Rational(self.series.point().clone()).fmt_output(f, opts)?;
            }
            return write!(f, "]^{}", order);
        }

        let b = base.npow(order);
        f.write_str(opts.order_symbol())?;
        b.fmt_grouped(f, opts, true)
    }
}

impl fmt::Display for SeriesPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let opts = &self.opts;
        let base = self.series.base();

        let mut first = true;
        for (c, e) in self.series.terms() {
            let t = Atom::new_num(c.clone()) * base.npow(*e);
            let s = to_string_with(&t, opts);
            let s = match (&t, opts.latex_mode()) {
                (Atom::Add(_), true) => format!("\\left({}\\right)", s),
                (Atom::Add(_), false) => format!("({})", s),
                _ => s,
            };

            if !first && !s.starts_with('-') {
                f.write_char('+')?;
            }
            first = false;
            f.write_str(&s)?;
        }

        if !first {
            f.write_char('+')?;
        }
        self.fmt_order(f, &base)
    }
}

impl fmt::Display for SeriesExpansion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        SeriesPrinter::new(self).fmt(f)
    }
}

#[cfg(test)]
mod test {
    use crate::atom::{Add, Atom, Constant, ElementaryFunction, Mul};

    use super::{AtomPrinter, PrintOptions};

    #[test]
    fn sums_and_products() {
        let x = Atom::new_var("x");
        let y = Atom::new_var("y");

        assert_eq!((&x - &y * 2 + 3).to_string(), "x-2*y+3");
        assert_eq!(((&x + 1) * &y).to_string(), "(x+1)*y");
        assert_eq!((-(&x * &y)).to_string(), "-x*y");
        assert_eq!((&x + 1).npow(-2).to_string(), "(x+1)^-2");
        assert_eq!(Atom::new_num((-1, 2)).to_string(), "-1/2");
    }

    #[test]
    fn malformed_trees() {
        let x = Atom::new_var("x");
        let a = Atom::Add(Add::new(vec![x.clone()], Atom::new_var("c")));
        assert_eq!(a.to_string(), "x+c");

        let m = Atom::Mul(Mul::new(vec![x.clone()], Atom::new_var("c") + 1));
        assert_eq!(m.to_string(), "(c+1)*x");
    }

    #[test]
    fn modes() {
        let x = Atom::new_var("x");
        let a = ElementaryFunction::Asin.apply(Atom::new_const(Constant::Pi) * &x);

        assert_eq!(a.to_string(), "asin(𝜋*x)");
        assert_eq!(
            AtomPrinter::new_with_options(&a, PrintOptions::mathematica()).to_string(),
            "ArcSin[Pi*x]"
        );
        assert_eq!(
            AtomPrinter::new_with_options(&a, PrintOptions::file()).to_string(),
            "asin(pi*x)"
        );
        assert_eq!(
            AtomPrinter::new_with_options(&a, PrintOptions::latex()).to_string(),
            "\\operatorname{asin}\\left(\\pi x\\right)"
        );
    }
}
