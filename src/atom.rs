//! Defines a small owned expression tree.
//!
//! An [Atom] is a number, a variable, a named constant, a function call, a
//! power, a product or a sum. Products and sums carry an overall numeric
//! coefficient next to their factors or terms, so that `2*x*y` is stored as
//! the factors `x, y` with coefficient `2`.
//!
//! # Examples
//!
//! ```
//! use fastseries::atom::{Atom, ElementaryFunction};
//!
//! let x = Atom::new_var("x");
//! let e = ElementaryFunction::Exp.apply(x.clone()) / (Atom::new_num(1) - &x);
//! assert_eq!(e.to_string(), "exp(x)*(-x+1)^-1");
//! ```
mod coefficient;
mod function;
mod ops;

use smartstring::alias::String;

use crate::rings::rational::Rational;

pub use self::coefficient::Coefficient;
pub use self::function::ElementaryFunction;

/// A named symbol, used for variables and function names.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: &str) -> Symbol {
        Symbol(name.into())
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::new(value)
    }
}

/// A named mathematical constant. Constants have no exact rational value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
    EulerGamma,
    Catalan,
}

impl Constant {
    pub fn name(&self) -> &'static str {
        match self {
            Constant::Pi => "𝜋",
            Constant::E => "𝑒",
            Constant::EulerGamma => "γ",
            Constant::Catalan => "𝐺",
        }
    }
}

impl std::fmt::Display for Constant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A function call `name(args...)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Fun {
    name: Symbol,
    args: Vec<Atom>,
}

impl Fun {
    pub fn new(name: Symbol, args: Vec<Atom>) -> Fun {
        Fun { name, args }
    }

    #[inline]
    pub fn name(&self) -> &Symbol {
        &self.name
    }

    #[inline]
    pub fn args(&self) -> &[Atom] {
        &self.args
    }
}

/// A power `base^exp`.
#[derive(Clone, Debug, PartialEq)]
pub struct Pow {
    base: Box<Atom>,
    exp: Box<Atom>,
}

impl Pow {
    /// Create a power without any simplification.
    pub fn new(base: Atom, exp: Atom) -> Pow {
        Pow {
            base: Box::new(base),
            exp: Box::new(exp),
        }
    }

    #[inline]
    pub fn base(&self) -> &Atom {
        &self.base
    }

    #[inline]
    pub fn exp(&self) -> &Atom {
        &self.exp
    }
}

/// A product `coeff * factors[0] * factors[1] * ...`.
#[derive(Clone, Debug, PartialEq)]
pub struct Mul {
    factors: Vec<Atom>,
    coeff: Box<Atom>,
}

impl Mul {
    /// Create a product from its factors and its overall coefficient,
    /// without any normalization. The coefficient of a well-formed product
    /// is a number.
    pub fn new(factors: Vec<Atom>, coeff: Atom) -> Mul {
        Mul {
            factors,
            coeff: Box::new(coeff),
        }
    }

    #[inline]
    pub fn factors(&self) -> &[Atom] {
        &self.factors
    }

    #[inline]
    pub fn coeff(&self) -> &Atom {
        &self.coeff
    }
}

/// A sum `terms[0] + terms[1] + ... + coeff`.
#[derive(Clone, Debug, PartialEq)]
pub struct Add {
    terms: Vec<Atom>,
    coeff: Box<Atom>,
}

impl Add {
    /// Create a sum from its terms and its overall constant, without any
    /// normalization. The constant of a well-formed sum is a number.
    pub fn new(terms: Vec<Atom>, coeff: Atom) -> Add {
        Add {
            terms,
            coeff: Box::new(coeff),
        }
    }

    #[inline]
    pub fn terms(&self) -> &[Atom] {
        &self.terms
    }

    #[inline]
    pub fn coeff(&self) -> &Atom {
        &self.coeff
    }
}

/// A mathematical expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Atom {
    Num(Coefficient),
    Var(Symbol),
    Const(Constant),
    Fun(Fun),
    Pow(Pow),
    Mul(Mul),
    Add(Add),
}

impl Atom {
    /// Create a new atom that represents a number.
    #[inline]
    pub fn new_num<T: Into<Coefficient>>(num: T) -> Atom {
        Atom::Num(num.into())
    }

    /// Create a new atom that represents the variable `name`.
    #[inline]
    pub fn new_var<T: Into<Symbol>>(name: T) -> Atom {
        Atom::Var(name.into())
    }

    #[inline]
    pub fn new_const(c: Constant) -> Atom {
        Atom::Const(c)
    }

    /// Create the power `base^exp`. Powers of rational numbers with an
    /// integer exponent are evaluated.
    pub fn new_pow(base: Atom, exp: Atom) -> Atom {
        ops::pow(base, exp)
    }

    /// Raise the atom to a numeric power.
    pub fn npow<T: Into<Coefficient>>(&self, exp: T) -> Atom {
        ops::pow(self.clone(), Atom::new_num(exp))
    }

    /// Raise the atom to the power `exp`.
    pub fn pow(&self, exp: &Atom) -> Atom {
        ops::pow(self.clone(), exp.clone())
    }

    /// Take the square root of the atom, represented as the power `1/2`.
    pub fn sqrt(&self) -> Atom {
        self.npow((1, 2))
    }

    /// Take the exponential of the atom.
    pub fn exp(&self) -> Atom {
        ElementaryFunction::Exp.apply(self.clone())
    }

    /// Take the logarithm of the atom.
    pub fn log(&self) -> Atom {
        ElementaryFunction::Log.apply(self.clone())
    }

    /// Take the sine of the atom.
    pub fn sin(&self) -> Atom {
        ElementaryFunction::Sin.apply(self.clone())
    }

    /// Take the cosine of the atom.
    pub fn cos(&self) -> Atom {
        ElementaryFunction::Cos.apply(self.clone())
    }

    /// Get the numeric value of the atom, if it is a number.
    #[inline]
    pub fn as_num(&self) -> Option<&Coefficient> {
        match self {
            Atom::Num(n) => Some(n),
            _ => None,
        }
    }

    /// Get the exact rational value of the atom, if it has one.
    #[inline]
    pub fn as_rational(&self) -> Option<&Rational> {
        self.as_num().and_then(|n| n.to_rational())
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Atom::Num(n) if n.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Atom::Num(n) if n.is_one())
    }
}

impl Default for Atom {
    /// Create an atom that represents the number 0.
    #[inline]
    fn default() -> Self {
        Atom::Num(Coefficient::zero())
    }
}

impl From<Symbol> for Atom {
    fn from(s: Symbol) -> Atom {
        Atom::Var(s)
    }
}

impl From<Coefficient> for Atom {
    fn from(c: Coefficient) -> Atom {
        Atom::Num(c)
    }
}

impl From<Constant> for Atom {
    fn from(c: Constant) -> Atom {
        Atom::Const(c)
    }
}

/// A function builder, which adds arguments one by one.
///
/// ```
/// use fastseries::atom::{Atom, FunctionBuilder, Symbol};
///
/// let f = FunctionBuilder::new(Symbol::new("f"))
///     .add_arg(Atom::new_num(3))
///     .add_arg(Atom::new_var("x"))
///     .finish();
/// assert_eq!(f.to_string(), "f(3,x)");
/// ```
#[derive(Clone)]
pub struct FunctionBuilder {
    name: Symbol,
    args: Vec<Atom>,
}

impl FunctionBuilder {
    pub fn new(name: Symbol) -> FunctionBuilder {
        FunctionBuilder { name, args: vec![] }
    }

    /// Add an argument to the function.
    pub fn add_arg(mut self, arg: Atom) -> FunctionBuilder {
        self.args.push(arg);
        self
    }

    pub fn finish(self) -> Atom {
        Atom::Fun(Fun::new(self.name, self.args))
    }
}

/// An equation `lhs = rhs`, used to specify an expansion point such as `x = 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Equation {
    lhs: Atom,
    rhs: Atom,
}

impl Equation {
    pub fn new(lhs: Atom, rhs: Atom) -> Equation {
        Equation { lhs, rhs }
    }

    #[inline]
    pub fn lhs(&self) -> &Atom {
        &self.lhs
    }

    #[inline]
    pub fn rhs(&self) -> &Atom {
        &self.rhs
    }
}

impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.lhs, self.rhs)
    }
}
