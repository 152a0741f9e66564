use rug::{ops::Pow, Integer};

use crate::rings::rational::Rational;

/// A numeric coefficient in an expression.
///
/// Only [Coefficient::Rational] is exact. Floating-point and complex values
/// can be represented so that they can be printed and rejected, but they are
/// never folded into exact arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub enum Coefficient {
    Rational(Rational),
    Float(f64),
    Complex(Rational, Rational),
}

impl Coefficient {
    /// Create a complex coefficient `re + im*𝑖`. A zero imaginary part
    /// yields a rational coefficient.
    pub fn complex(re: Rational, im: Rational) -> Coefficient {
        if im == 0 {
            Coefficient::Rational(re)
        } else {
            Coefficient::Complex(re, im)
        }
    }

    #[inline]
    pub fn zero() -> Coefficient {
        Coefficient::Rational(Rational::new())
    }

    #[inline]
    pub fn one() -> Coefficient {
        Coefficient::Rational(Rational::from(1))
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Coefficient::Rational(r) => *r == 0,
            Coefficient::Float(f) => *f == 0.,
            Coefficient::Complex(re, im) => *re == 0 && *im == 0,
        }
    }

    pub fn is_one(&self) -> bool {
        match self {
            Coefficient::Rational(r) => *r == 1,
            Coefficient::Float(f) => *f == 1.,
            Coefficient::Complex(re, im) => *re == 1 && *im == 0,
        }
    }

    /// Returns true if the coefficient is a rational number.
    #[inline]
    pub fn is_rational(&self) -> bool {
        matches!(self, Coefficient::Rational(_))
    }

    /// Get the exact rational value of the coefficient, if it has one.
    /// A complex number with a zero imaginary part counts as rational.
    pub fn to_rational(&self) -> Option<&Rational> {
        match self {
            Coefficient::Rational(r) => Some(r),
            Coefficient::Complex(re, im) if *im == 0 => Some(re),
            _ => None,
        }
    }

    /// Returns true if the coefficient is negative, used for printing.
    pub(crate) fn is_negative(&self) -> bool {
        match self {
            Coefficient::Rational(r) => *r < 0,
            Coefficient::Float(f) => *f < 0.,
            Coefficient::Complex(..) => false,
        }
    }

    /// Add two rational coefficients. Returns `None` if either is inexact.
    pub(crate) fn add_exact(&self, other: &Coefficient) -> Option<Coefficient> {
        match (self, other) {
            (Coefficient::Rational(a), Coefficient::Rational(b)) => {
                Some(Coefficient::Rational(Rational::from(a + b)))
            }
            _ => None,
        }
    }

    /// Multiply two rational coefficients. Returns `None` if either is inexact.
    pub(crate) fn mul_exact(&self, other: &Coefficient) -> Option<Coefficient> {
        match (self, other) {
            (Coefficient::Rational(a), Coefficient::Rational(b)) => {
                Some(Coefficient::Rational(Rational::from(a * b)))
            }
            _ => None,
        }
    }

    /// Raise a rational coefficient to an integer power. Returns `None` when
    /// the result is undefined or the exponent is too large.
    pub(crate) fn pow_exact(&self, exp: &Rational) -> Option<Coefficient> {
        let Coefficient::Rational(b) = self else {
            return None;
        };

        if *exp.denom() != 1 {
            return None;
        }

        let e = exp.numer().to_i32()?;
        if *b == 0 && e < 0 {
            return None;
        }

        if e >= 0 {
            Some(Coefficient::Rational(b.clone().pow(e as u32)))
        } else {
            Some(Coefficient::Rational(
                b.clone().recip().pow(e.unsigned_abs()),
            ))
        }
    }
}

impl Default for Coefficient {
    fn default() -> Self {
        Coefficient::zero()
    }
}

impl From<i32> for Coefficient {
    fn from(value: i32) -> Self {
        Coefficient::Rational(Rational::from(value))
    }
}

impl From<i64> for Coefficient {
    fn from(value: i64) -> Self {
        Coefficient::Rational(Rational::from(value))
    }
}

impl From<(i32, i32)> for Coefficient {
    /// Create the fraction `num/den`.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero.
    fn from((num, den): (i32, i32)) -> Self {
        Coefficient::Rational(Rational::from((num, den)))
    }
}

impl From<(i64, i64)> for Coefficient {
    /// Create the fraction `num/den`.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero.
    fn from((num, den): (i64, i64)) -> Self {
        Coefficient::Rational(Rational::from((num, den)))
    }
}

impl From<Integer> for Coefficient {
    fn from(value: Integer) -> Self {
        Coefficient::Rational(Rational::from(value))
    }
}

impl From<Rational> for Coefficient {
    fn from(value: Rational) -> Self {
        Coefficient::Rational(value)
    }
}

impl From<f64> for Coefficient {
    fn from(value: f64) -> Self {
        Coefficient::Float(value)
    }
}

impl std::fmt::Display for Coefficient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coefficient::Rational(r) => write!(f, "{}", r),
            Coefficient::Float(x) => {
                if x.fract() == 0. && x.is_finite() {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            Coefficient::Complex(re, im) => {
                if *re != 0 {
                    write!(f, "{}", re)?;
                    if *im > 0 {
                        write!(f, "+")?;
                    }
                }
                if *im == 1 {
                    write!(f, "𝑖")
                } else if *im == -1 {
                    write!(f, "-𝑖")
                } else {
                    write!(f, "{}𝑖", im)
                }
            }
        }
    }
}
