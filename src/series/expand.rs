//! Recursive construction of the series of an expression.
//!
//! Every call receives an absolute precision `prec` and returns a series
//! whose coefficients are exact for all exponents below `prec`. Terms at or
//! above `prec` are dropped. Since `prec` is an exponent and not a length,
//! it may be zero or negative, for example for a factor that multiplies a
//! pole.
//!
//! Results are cached per node, so that a subtree that is requested again at
//! the same or a lower precision is not expanded a second time.

use std::cell::RefCell;

use ahash::{HashMap, HashMapExt};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    atom::{Atom, Coefficient, ElementaryFunction, Fun, Pow, Symbol},
    poly::UnivariatePolynomial,
    rings::rational::{exact_sqrt, Rational, RationalField},
};

use super::{
    error::{DeclineReason, InternalError, SeriesError},
    functions::{Construction, FunctionDescriptor, Precondition, SeriesPrimitive},
    shifted::ShiftedSeries,
};

/// The number of times the precision of a series that vanishes is increased
/// before it is considered to be zero.
pub const MAX_ZERO_PROBES: usize = 4;
/// The number of times the precision of the complete expansion may be raised.
pub const MAX_REFINEMENTS: usize = 8;

type Poly = UnivariatePolynomial<RationalField>;
type Factor<'b> = &'b dyn Fn(i64) -> Result<ShiftedSeries, SeriesError>;

#[inline]
fn backend(e: &'static str) -> SeriesError {
    SeriesError::Internal(InternalError::Backend(e))
}

#[inline]
fn decline(r: DeclineReason) -> SeriesError {
    debug!("Declining: {}", r);
    SeriesError::Decline(r)
}

/// The length of a series that is exact below `prec`, with offset zero.
#[inline]
fn len(prec: i64) -> usize {
    prec.max(0) as usize
}

/// Expands expressions in the variable `variable` around `point`.
///
/// Expressions passed to one expander must outlive it, since the
/// expansions are cached by the address of their nodes.
pub struct SeriesExpander<'a> {
    variable: &'a Symbol,
    point: &'a Rational,
    cache: RefCell<HashMap<*const Atom, (i64, ShiftedSeries)>>,
}

impl<'a> SeriesExpander<'a> {
    pub fn new(variable: &'a Symbol, point: &'a Rational) -> SeriesExpander<'a> {
        SeriesExpander {
            variable,
            point,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Expand `a` in powers of `variable - point`, exact below `prec`.
    pub fn expand(&self, a: &'a Atom, prec: i64) -> Result<ShiftedSeries, SeriesError> {
        let key = a as *const Atom;
        if let Some((p, s)) = self.cache.borrow().get(&key) {
            if *p >= prec {
                trace!("Reusing {} expanded below exponent {}", a, p);
                return Ok(s.clone().truncate(prec));
            }
        }

        trace!("Expanding {} below exponent {}", a, prec);
        let s = self.expand_node(a, prec)?.truncate(prec);
        self.cache.borrow_mut().insert(key, (prec, s.clone()));
        Ok(s)
    }

    fn expand_node(&self, a: &'a Atom, prec: i64) -> Result<ShiftedSeries, SeriesError> {
        match a {
            Atom::Num(n) => Ok(ShiftedSeries::constant(exact(n)?.clone())),
            Atom::Var(s) => {
                if s != self.variable {
                    Err(decline(DeclineReason::ForeignVariable(s.clone())))
                } else if *self.point == 0 {
                    Ok(ShiftedSeries::variable())
                } else {
                    Ok(ShiftedSeries::shifted_variable(self.point))
                }
            }
            Atom::Const(c) => Err(decline(DeclineReason::SymbolicConstant(*c))),
            Atom::Fun(f) => self.function(f, prec),
            Atom::Pow(p) => self.power(p, prec),
            Atom::Mul(m) => {
                let c = coefficient(m.coeff())?;
                if *c == 0 {
                    return Ok(ShiftedSeries::zero());
                }

                let closures: SmallVec<[_; 4]> = m
                    .factors()
                    .iter()
                    .map(|f| move |p: i64| self.expand(f, p))
                    .collect();
                let factors: SmallVec<[Factor; 4]> =
                    closures.iter().map(|c| c as Factor).collect();

                let r = self.product(&factors, prec)?;
                if *c == 1 {
                    Ok(r)
                } else {
                    Ok(r.scale(c))
                }
            }
            Atom::Add(s) => {
                let c = coefficient(s.coeff())?;

                let mut terms = s.terms().iter();
                let mut r = match terms.next() {
                    Some(t) => self.expand(t, prec)?,
                    None => ShiftedSeries::zero(),
                };

                for t in terms {
                    r = r.add(&self.expand(t, prec)?);
                }

                if *c != 0 {
                    r = r.add(&ShiftedSeries::constant(c.clone()));
                }

                Ok(r)
            }
        }
    }

    /// Multiply the series produced by `factors`. Each factor gets enough
    /// precision to compensate for the valuations of the other factors.
    fn product(&self, factors: &[Factor], prec: i64) -> Result<ShiftedSeries, SeriesError> {
        let mut series: SmallVec<[ShiftedSeries; 4]> = SmallVec::with_capacity(factors.len());
        for f in factors {
            series.push(f(prec)?);
        }

        let bounds: SmallVec<[i64; 4]> = series.iter().map(|s| s.valuation_bound(prec)).collect();
        let total: i64 = bounds.iter().sum();

        for (i, f) in factors.iter().enumerate() {
            let needed = prec - (total - bounds[i]);
            if needed > prec {
                debug!("Raising the precision of factor {} to {}", i, needed);
                series[i] = f(needed)?;
            }
        }

        let mut it = series.into_iter().zip(bounds);
        let Some((first, b)) = it.next() else {
            return Ok(ShiftedSeries::one());
        };

        let mut remaining = total - b;
        let mut r = first.truncate(prec - remaining);
        for (s, b) in it {
            remaining -= b;
            r = r.mul(&s, prec - remaining);
        }

        Ok(r)
    }

    /// Compute `f^-k`, where `f` produces a series at a requested precision.
    fn invert(&self, f: Factor, prec: i64, k: i64) -> Result<ShiftedSeries, SeriesError> {
        let mut p = prec;
        let mut s = f(p)?;

        let mut probes = 0;
        let v = loop {
            if let Some(v) = s.valuation() {
                break v;
            }

            if probes == MAX_ZERO_PROBES {
                return Err(decline(DeclineReason::ZeroDivisor));
            }
            probes += 1;

            p = p.max(1) * 2;
            debug!("Series to invert vanishes, probing precision {}", p);
            s = f(p)?;
        };

        let needed = prec + (k + 1) * v;
        if needed > p {
            s = f(needed)?;
        }

        let s = s.strip();
        let n = prec + k * s.offset;
        let offset = -k * s.offset;
        if n <= 0 {
            return Ok(ShiftedSeries::new(s.poly.zero(), offset));
        }

        let inv = s
            .poly
            .inv_series(n as usize)
            .map_err(backend)?
            .pow_trunc(k as usize, n as usize);
        Ok(ShiftedSeries::new(inv, offset))
    }

    /// Expand `a` with offset zero, so that its constant term is known.
    fn regular(&self, a: &'a Atom, prec: i64) -> Result<Poly, SeriesError> {
        self.expand(a, prec.max(1))?
            .into_offset_zero()
            .map_err(decline)
    }

    /// Expand the argument of a function and check its value at the
    /// expansion point.
    fn argument(&self, a: &'a Atom, pre: Precondition, prec: i64) -> Result<Poly, SeriesError> {
        let arg = self.regular(a, prec)?;
        let c = arg.get_constant();
        match pre {
            Precondition::ArgumentVanishes if c != 0 => {
                Err(decline(DeclineReason::ConstantTermNotZero))
            }
            Precondition::ArgumentIsOne if c != 1 => Err(decline(DeclineReason::ConstantTermNotOne)),
            _ => Ok(arg),
        }
    }

    fn apply(
        &self,
        primitive: SeriesPrimitive,
        arg: &'a Atom,
        pre: Precondition,
        prec: i64,
    ) -> Result<ShiftedSeries, SeriesError> {
        let a = self.argument(arg, pre, prec)?;
        let r = primitive(&a, len(prec)).map_err(backend)?;
        Ok(ShiftedSeries::new(r, 0))
    }

    fn function(&self, f: &'a Fun, prec: i64) -> Result<ShiftedSeries, SeriesError> {
        let Some(function) = ElementaryFunction::from_symbol(f.name()) else {
            return Err(InternalError::UnknownFunction(f.name().clone()).into());
        };

        let [arg] = f.args() else {
            return Err(InternalError::WrongArity {
                function,
                args: f.args().len(),
            }
            .into());
        };

        let d = FunctionDescriptor::get(function);
        match d.construction {
            Construction::Direct(primitive) => self.apply(primitive, arg, d.precondition, prec),
            Construction::Reciprocal(paired) => self.invert(
                &|p| self.apply(paired, arg, d.precondition, p),
                prec,
                1,
            ),
        }
    }

    fn power(&self, p: &'a Pow, prec: i64) -> Result<ShiftedSeries, SeriesError> {
        let (base, exp) = (p.base(), p.exp());

        let Atom::Num(n) = exp else {
            return self.symbolic_power(base, exp, prec);
        };

        let r = exact(n)?;
        if *r.denom() == 1 {
            let Some(k) = r.numer().to_i32() else {
                return Err(decline(DeclineReason::ExponentOutOfRange));
            };

            match k {
                0 => Ok(ShiftedSeries::one()),
                k if k > 0 => self.positive_power(base, k as i64, prec),
                k => self.invert(&|p| self.expand(base, p), prec, -(k as i64)),
            }
        } else if *r.denom() == 2 {
            let Some(k) = r.numer().to_i32() else {
                return Err(decline(DeclineReason::ExponentOutOfRange));
            };
            self.half_integer_power(base, k as i64, prec)
        } else {
            self.rational_power(base, r, prec)
        }
    }

    fn positive_power(&self, base: &'a Atom, k: i64, prec: i64) -> Result<ShiftedSeries, SeriesError> {
        let mut b = self.expand(base, prec)?;
        let needed = prec - (k - 1) * b.valuation_bound(prec);
        if needed > prec {
            debug!("Raising the precision of the base to {}", needed);
            b = self.expand(base, needed)?;
        }

        let b = b.strip();
        if b.is_zero() {
            return Ok(ShiftedSeries::zero());
        }

        let offset = k * b.offset;
        let n = prec - offset;
        if n <= 0 {
            return Ok(ShiftedSeries::new(b.poly.zero(), offset));
        }

        Ok(ShiftedSeries::new(
            b.poly.pow_trunc(k as usize, n as usize),
            offset,
        ))
    }

    /// Compute `base^(k/2)` for odd `k` as a power of `sqrt(c) * sqrt(base/c)`,
    /// where `c` is the constant term of the base.
    fn half_integer_power(&self, base: &'a Atom, k: i64, prec: i64) -> Result<ShiftedSeries, SeriesError> {
        let b = self.regular(base, prec)?;
        let c = b.get_constant();
        if c == 0 {
            return Err(decline(DeclineReason::NotPerfectSquare));
        }

        let Some(sqrt_c) = exact_sqrt(&c) else {
            return Err(decline(DeclineReason::NotPerfectSquare));
        };

        let n = len(prec);
        let root = b
            .div_coeff(&c)
            .sqrt_series(n)
            .map_err(backend)?
            .mul_coeff(&sqrt_c);

        let r = if k > 0 {
            root.pow_trunc(k as usize, n)
        } else {
            root.inv_series(n)
                .map_err(backend)?
                .pow_trunc(k.unsigned_abs() as usize, n)
        };

        Ok(ShiftedSeries::new(r, 0))
    }

    /// Compute `base^r = exp(r*log(base))` for a base that is one at the
    /// expansion point.
    fn rational_power(&self, base: &'a Atom, r: &Rational, prec: i64) -> Result<ShiftedSeries, SeriesError> {
        let b = self.argument(base, Precondition::ArgumentIsOne, prec)?;
        let n = len(prec);
        let e = b
            .log_series(n)
            .map_err(backend)?
            .mul_coeff(r)
            .exp_series(n)
            .map_err(backend)?;
        Ok(ShiftedSeries::new(e, 0))
    }

    /// Compute `base^exp = exp(exp*log(base))` for a non-numeric exponent.
    fn symbolic_power(&self, base: &'a Atom, exp: &'a Atom, prec: i64) -> Result<ShiftedSeries, SeriesError> {
        let log_base = |p: i64| -> Result<ShiftedSeries, SeriesError> {
            let b = self.argument(base, Precondition::ArgumentIsOne, p)?;
            Ok(ShiftedSeries::new(b.log_series(len(p)).map_err(backend)?, 0))
        };
        let exponent = |p: i64| self.expand(exp, p);
        let factors: [Factor; 2] = [&exponent, &log_base];

        let arg = self
            .product(&factors, prec.max(1))?
            .into_offset_zero()
            .map_err(decline)?;

        if arg.get_constant() != 0 {
            return Err(decline(DeclineReason::ConstantTermNotZero));
        }

        Ok(ShiftedSeries::new(
            arg.exp_series(len(prec)).map_err(backend)?,
            0,
        ))
    }
}

/// Get the exact value of a number.
fn exact(n: &Coefficient) -> Result<&Rational, SeriesError> {
    n.to_rational()
        .ok_or_else(|| decline(DeclineReason::InexactNumber))
}

/// Get the exact value of the overall coefficient of a sum or product.
fn coefficient(c: &Atom) -> Result<&Rational, SeriesError> {
    match c {
        Atom::Num(n) => exact(n),
        _ => Err(InternalError::NonNumericCoefficient.into()),
    }
}

#[cfg(test)]
mod test {
    use crate::{
        atom::{Atom, Symbol},
        rings::rational::Rational,
        series::{
            error::{DeclineReason, SeriesError},
            shifted::ShiftedSeries,
        },
    };

    use super::SeriesExpander;

    fn expand(a: &Atom, prec: i64) -> Result<ShiftedSeries, SeriesError> {
        let x = Symbol::new("x");
        let zero = Rational::new();
        let e = SeriesExpander::new(&x, &zero);
        e.expand(a, prec)
    }

    fn coefficients(s: &ShiftedSeries, range: std::ops::Range<i64>) -> Vec<Rational> {
        range.map(|e| s.coefficient(e)).collect()
    }

    fn q(n: i64, d: i64) -> Rational {
        Rational::from((n, d))
    }

    #[test]
    fn pole_times_regular() {
        let x = Atom::new_var("x");
        // x^-2 * sin(x)^2 = 1 - x^2/3 + ...
        let a = x.npow(-2) * x.sin().npow(2);
        let s = expand(&a, 3).unwrap();
        assert_eq!(
            coefficients(&s, 0..3),
            vec![q(1, 1), q(0, 1), q(-1, 3)]
        );
    }

    #[test]
    fn cancellation_in_divisor() {
        let x = Atom::new_var("x");
        // 1/(sin(x) - x) = -6/x^3 - 3/(10 x) + ...
        let a = (x.sin() - &x).npow(-1);
        let s = expand(&a, 0).unwrap();
        assert_eq!(s.valuation(), Some(-3));
        assert_eq!(
            coefficients(&s, -3..0),
            vec![q(-6, 1), q(0, 1), q(-3, 10)]
        );
    }

    #[test]
    fn vanishing_divisor() {
        let x = Atom::new_var("x");
        let a = (&x - &x).npow(-1);
        assert_eq!(
            expand(&a, 2),
            Err(SeriesError::Decline(DeclineReason::ZeroDivisor))
        );
    }

    #[test]
    fn negative_precision() {
        let x = Atom::new_var("x");
        let s = expand(&x.npow(-3), -1).unwrap();
        assert_eq!(s.valuation(), Some(-3));
        assert_eq!(coefficients(&s, -3..-1), vec![q(1, 1), q(0, 1)]);

        let s = expand(&x.exp(), -1).unwrap();
        assert!(s.is_zero());
    }

    #[test]
    fn shifted_point() {
        let x = Symbol::new("x");
        let one = Rational::from(1);
        let log = Atom::new_var("x").log();
        let e = SeriesExpander::new(&x, &one);

        // log(x) around x = 1
        let s = e.expand(&log, 4).unwrap();
        assert_eq!(
            coefficients(&s, 0..4),
            vec![q(0, 1), q(1, 1), q(-1, 2), q(1, 3)]
        );
    }

    #[test]
    fn cached_expansions() {
        let x = Symbol::new("x");
        let zero = Rational::new();
        let a = Atom::new_var("x").sin() * Atom::new_var("x").npow(-1);

        let e = SeriesExpander::new(&x, &zero);
        let high = e.expand(&a, 6).unwrap();
        assert_eq!(
            coefficients(&high, 0..6),
            vec![q(1, 1), q(0, 1), q(-1, 6), q(0, 1), q(1, 120), q(0, 1)]
        );

        // a lower precision is served from the cache
        let low = e.expand(&a, 2).unwrap();
        assert_eq!(coefficients(&low, 0..3), vec![q(1, 1), q(0, 1), q(0, 1)]);
        assert_eq!(low, expand(&a, 2).unwrap());
    }

    #[test]
    fn nested_poles() {
        // x^-1*(1 + x^-1*(1 + ...)) = x^-1 + x^-2 + ... + x^-25
        let x = Atom::new_var("x");
        let mut a = x.npow(-1);
        for _ in 0..24 {
            a = x.npow(-1) * (a + 1);
        }

        let s = expand(&a, 2).unwrap();
        assert_eq!(s.valuation(), Some(-25));
        let mut expected = vec![q(1, 1); 25];
        expected.extend([q(0, 1), q(0, 1)]);
        assert_eq!(coefficients(&s, -25..2), expected);
    }

    #[test]
    fn symbolic_exponent() {
        let x = Atom::new_var("x");
        // (1+x)^x = 1 + x^2 - x^3/2 + ...
        let a = (&x + 1).pow(&x);
        let s = expand(&a, 4).unwrap();
        assert_eq!(
            coefficients(&s, 0..4),
            vec![q(1, 1), q(0, 1), q(1, 1), q(-1, 2)]
        );
    }

    #[test]
    fn rational_exponents() {
        let x = Atom::new_var("x");

        // (4+x)^(-1/2) = 1/2 - x/16 + 3x^2/256
        let a = (&x + 4).npow((-1, 2));
        let s = expand(&a, 3).unwrap();
        assert_eq!(coefficients(&s, 0..3), vec![q(1, 2), q(-1, 16), q(3, 256)]);

        // (1+x)^(1/3) = 1 + x/3 - x^2/9
        let a = (&x + 1).npow((1, 3));
        let s = expand(&a, 3).unwrap();
        assert_eq!(coefficients(&s, 0..3), vec![q(1, 1), q(1, 3), q(-1, 9)]);

        assert_eq!(
            expand(&(&x + 2).npow((1, 2)), 3),
            Err(SeriesError::Decline(DeclineReason::NotPerfectSquare))
        );
        assert_eq!(
            expand(&(&x + 2).npow((1, 3)), 3),
            Err(SeriesError::Decline(DeclineReason::ConstantTermNotOne))
        );
    }
}
