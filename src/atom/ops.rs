//! Arithmetic on atoms.
//!
//! Sums and products are flattened and their exact rational parts are folded
//! into the overall coefficient. No other simplification takes place, so
//! `x+x` stays a sum of two terms.

use crate::rings::rational::Rational;

use super::{Add, Atom, Coefficient, Mul, Pow};

fn push_term(terms: &mut Vec<Atom>, coeff: &mut Coefficient, a: Atom) {
    match a {
        Atom::Num(n) => match coeff.add_exact(&n) {
            Some(s) => *coeff = s,
            None => terms.push(Atom::Num(n)),
        },
        Atom::Add(a) => {
            for t in a.terms {
                push_term(terms, coeff, t);
            }
            push_term(terms, coeff, *a.coeff);
        }
        _ => terms.push(a),
    }
}

fn push_factor(factors: &mut Vec<Atom>, coeff: &mut Coefficient, a: Atom) {
    match a {
        Atom::Num(n) => match coeff.mul_exact(&n) {
            Some(s) => *coeff = s,
            None => factors.push(Atom::Num(n)),
        },
        Atom::Mul(m) => {
            for t in m.factors {
                push_factor(factors, coeff, t);
            }
            push_factor(factors, coeff, *m.coeff);
        }
        _ => factors.push(a),
    }
}

pub(crate) fn add(a: Atom, b: Atom) -> Atom {
    let mut terms = vec![];
    let mut coeff = Coefficient::zero();
    push_term(&mut terms, &mut coeff, a);
    push_term(&mut terms, &mut coeff, b);

    if terms.is_empty() {
        Atom::Num(coeff)
    } else if terms.len() == 1 && coeff.is_zero() {
        terms.swap_remove(0)
    } else {
        Atom::Add(Add::new(terms, Atom::Num(coeff)))
    }
}

pub(crate) fn mul(a: Atom, b: Atom) -> Atom {
    let mut factors = vec![];
    let mut coeff = Coefficient::one();
    push_factor(&mut factors, &mut coeff, a);
    push_factor(&mut factors, &mut coeff, b);

    if factors.is_empty() || (coeff.is_rational() && coeff.is_zero()) {
        Atom::Num(coeff)
    } else if factors.len() == 1 && coeff.is_one() {
        factors.swap_remove(0)
    } else {
        Atom::Mul(Mul::new(factors, Atom::Num(coeff)))
    }
}

pub(crate) fn pow(base: Atom, exp: Atom) -> Atom {
    if exp.is_one() {
        return base;
    }

    if let Some(e) = exp.as_rational() {
        if *e == 0 {
            return Atom::new_num(1);
        }

        if let Some(r) = base.as_num().and_then(|b| b.pow_exact(e)) {
            return Atom::Num(r);
        }
    }

    Atom::Pow(Pow::new(base, exp))
}

pub(crate) fn neg(a: Atom) -> Atom {
    mul(a, Atom::new_num(-1))
}

pub(crate) fn div(a: Atom, b: Atom) -> Atom {
    mul(a, pow(b, Atom::new_num(-1)))
}

macro_rules! impl_binary_op {
    ($tr:ident, $method:ident, $f:path) => {
        impl std::ops::$tr<Atom> for Atom {
            type Output = Atom;

            fn $method(self, rhs: Atom) -> Atom {
                $f(self, rhs)
            }
        }

        impl std::ops::$tr<&Atom> for Atom {
            type Output = Atom;

            fn $method(self, rhs: &Atom) -> Atom {
                $f(self, rhs.clone())
            }
        }

        impl std::ops::$tr<Atom> for &Atom {
            type Output = Atom;

            fn $method(self, rhs: Atom) -> Atom {
                $f(self.clone(), rhs)
            }
        }

        impl std::ops::$tr<&Atom> for &Atom {
            type Output = Atom;

            fn $method(self, rhs: &Atom) -> Atom {
                $f(self.clone(), rhs.clone())
            }
        }

        impl std::ops::$tr<i64> for Atom {
            type Output = Atom;

            fn $method(self, rhs: i64) -> Atom {
                $f(self, Atom::new_num(rhs))
            }
        }

        impl std::ops::$tr<i64> for &Atom {
            type Output = Atom;

            fn $method(self, rhs: i64) -> Atom {
                $f(self.clone(), Atom::new_num(rhs))
            }
        }

        impl std::ops::$tr<Rational> for Atom {
            type Output = Atom;

            fn $method(self, rhs: Rational) -> Atom {
                $f(self, Atom::new_num(rhs))
            }
        }
    };
}

fn sub(a: Atom, b: Atom) -> Atom {
    add(a, neg(b))
}

impl_binary_op!(Add, add, add);
impl_binary_op!(Sub, sub, sub);
impl_binary_op!(Mul, mul, mul);
impl_binary_op!(Div, div, div);

impl std::ops::Neg for Atom {
    type Output = Atom;

    fn neg(self) -> Atom {
        neg(self)
    }
}

impl std::ops::Neg for &Atom {
    type Output = Atom;

    fn neg(self) -> Atom {
        neg(self.clone())
    }
}

#[cfg(test)]
mod test {
    use crate::atom::{Atom, Coefficient, Constant};

    #[test]
    fn flattening() {
        let x = Atom::new_var("x");
        let y = Atom::new_var("y");

        let a = (&x + 1) + (&y + 2);
        let Atom::Add(s) = &a else {
            panic!("Expected a sum, got {}", a);
        };
        assert_eq!(s.terms(), &[x.clone(), y.clone()]);
        assert_eq!(s.coeff(), &Atom::new_num(3));

        let m = (&x * 2) * (&y * 3);
        let Atom::Mul(p) = &m else {
            panic!("Expected a product, got {}", m);
        };
        assert_eq!(p.factors(), &[x.clone(), y]);
        assert_eq!(p.coeff(), &Atom::new_num(6));
    }

    #[test]
    fn numbers_fold() {
        let x = Atom::new_var("x");
        assert_eq!(Atom::new_num(2) * Atom::new_num((1, 4)), Atom::new_num((1, 2)));
        assert_eq!(&x * 0, Atom::new_num(0));
        assert_eq!(&x * 1, x);
        assert_eq!(&x + 0, x);
        assert_eq!(Atom::new_num(3).npow(-2), Atom::new_num((1, 9)));
        assert_eq!(x.npow(1), x);
        assert_eq!(x.npow(0), Atom::new_num(1));
        assert_eq!(Atom::new_num(1) / Atom::new_num(4), Atom::new_num((1, 4)));
    }

    #[test]
    fn inexact_numbers_stay_separate() {
        let x = Atom::new_var("x");
        let a = &x + Atom::new_num(0.5) + 1;
        let Atom::Add(s) = &a else {
            panic!("Expected a sum, got {}", a);
        };
        assert_eq!(s.terms(), &[x, Atom::Num(Coefficient::Float(0.5))]);
        assert_eq!(s.coeff(), &Atom::new_num(1));

        let p = Atom::new_const(Constant::Pi) * 2;
        assert!(matches!(p, Atom::Mul(_)));
    }

    #[test]
    fn division() {
        let x = Atom::new_var("x");
        let a = Atom::new_num(1) / &x;
        assert_eq!(a, x.npow(-1));
        assert!(matches!(Atom::new_num(1) / Atom::new_num(0), Atom::Pow(_)));
    }
}
