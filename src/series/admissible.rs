use crate::atom::{Atom, Coefficient, ElementaryFunction, Symbol};

/// State of a single admissibility check.
#[derive(Clone, Debug, Default)]
pub struct AdmissibilityContext {
    /// The first variable that was encountered.
    pub seen_symbol: Option<Symbol>,
}

impl AdmissibilityContext {
    pub fn new() -> AdmissibilityContext {
        AdmissibilityContext { seen_symbol: None }
    }

    /// Returns true if `a` only contains exact rational numbers, a single
    /// variable and elementary functions of one argument.
    pub fn check(&mut self, a: &Atom) -> bool {
        match a {
            Atom::Num(n) => is_exact(n),
            Atom::Const(_) => false,
            Atom::Var(s) => match &self.seen_symbol {
                Some(seen) => seen == s,
                None => {
                    self.seen_symbol = Some(s.clone());
                    true
                }
            },
            Atom::Fun(f) => {
                ElementaryFunction::from_symbol(f.name()).is_some()
                    && f.args().len() == 1
                    && self.check(&f.args()[0])
            }
            Atom::Pow(p) => self.check(p.base()) && self.check(p.exp()),
            Atom::Mul(m) => m.factors().iter().all(|x| self.check(x)) && self.check_coeff(m.coeff()),
            Atom::Add(s) => s.terms().iter().all(|x| self.check(x)) && self.check_coeff(s.coeff()),
        }
    }

    fn check_coeff(&self, c: &Atom) -> bool {
        matches!(c, Atom::Num(n) if is_exact(n))
    }
}

#[inline]
fn is_exact(n: &Coefficient) -> bool {
    n.to_rational().is_some()
}
