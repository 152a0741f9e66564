use crate::{
    poly::UnivariatePolynomial,
    rings::rational::{Rational, RationalField, Q},
};

use super::error::DeclineReason;

/// A truncated power series `Σ_n c_n x^(n + offset)`, where the `c_n` are the
/// coefficients of `poly`.
///
/// A series on its own carries no precision. The expansion code keeps track
/// of the exponent below which every coefficient is exact.
#[derive(Clone, Debug, PartialEq)]
pub struct ShiftedSeries {
    pub poly: UnivariatePolynomial<RationalField>,
    pub offset: i64,
}

impl ShiftedSeries {
    pub fn new(poly: UnivariatePolynomial<RationalField>, offset: i64) -> ShiftedSeries {
        ShiftedSeries { poly, offset }
    }

    pub fn zero() -> ShiftedSeries {
        ShiftedSeries::new(UnivariatePolynomial::new(&Q, None), 0)
    }

    pub fn one() -> ShiftedSeries {
        ShiftedSeries::constant(Rational::from(1))
    }

    pub fn constant(c: Rational) -> ShiftedSeries {
        ShiftedSeries::new(UnivariatePolynomial::new(&Q, None).constant(c), 0)
    }

    /// The expansion variable `x` around `x = 0`.
    pub fn variable() -> ShiftedSeries {
        ShiftedSeries::new(UnivariatePolynomial::new(&Q, None).one(), 1)
    }

    /// The expansion variable `x = point + t` in terms of `t = x - point`.
    pub fn shifted_variable(point: &Rational) -> ShiftedSeries {
        ShiftedSeries::new(
            UnivariatePolynomial::from_coefficients(&Q, vec![point.clone(), Rational::from(1)]),
            0,
        )
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.poly.is_zero()
    }

    /// The exponent of the first non-zero term.
    pub fn valuation(&self) -> Option<i64> {
        self.poly.ldegree().map(|d| d as i64 + self.offset)
    }

    /// A lower bound on the valuation of the series that is known to be
    /// exact below `prec`.
    #[inline]
    pub fn valuation_bound(&self, prec: i64) -> i64 {
        self.valuation().map_or(prec, |v| v.min(prec))
    }

    /// The coefficient of `x^exp`.
    pub fn coefficient(&self, exp: i64) -> Rational {
        if exp < self.offset {
            return Rational::new();
        }

        self.poly.coefficient((exp - self.offset) as usize)
    }

    /// Drop all terms with an exponent of at least `prec`.
    pub fn truncate(self, prec: i64) -> ShiftedSeries {
        let n = prec - self.offset;
        if n <= 0 {
            return ShiftedSeries::new(self.poly.zero(), self.offset);
        }

        ShiftedSeries::new(self.poly.truncate_len(n as usize), self.offset)
    }

    /// Move leading zero coefficients into the offset, so that the constant
    /// term of the polynomial is non-zero unless the series is zero.
    pub fn strip(self) -> ShiftedSeries {
        match self.poly.ldegree() {
            Some(d) if d > 0 => ShiftedSeries::new(self.poly.div_exp(d), self.offset + d as i64),
            _ => self,
        }
    }

    /// Move leading zero coefficients into a negative offset, up to offset
    /// zero. A zero series gets offset zero.
    pub fn strip_pole(self) -> ShiftedSeries {
        if self.offset >= 0 {
            return self;
        }

        let target = self.valuation().map_or(0, |v| v.min(0));
        ShiftedSeries::new(self.poly.div_exp((target - self.offset) as usize), target)
    }

    /// Get the polynomial that represents the series with offset zero.
    /// A non-zero term with a negative exponent is a pole.
    pub fn into_offset_zero(self) -> Result<UnivariatePolynomial<RationalField>, DeclineReason> {
        if self.offset >= 0 {
            return Ok(self.poly.mul_exp(self.offset as usize));
        }

        let shift = self.offset.unsigned_abs() as usize;
        match self.poly.ldegree() {
            None => Ok(self.poly),
            Some(d) if d >= shift => Ok(self.poly.div_exp(shift)),
            Some(_) => Err(DeclineReason::Pole),
        }
    }

    /// Add two series, aligning them to the smaller offset.
    pub fn add(&self, other: &ShiftedSeries) -> ShiftedSeries {
        let offset = self.offset.min(other.offset);
        let a = self.poly.mul_exp((self.offset - offset) as usize);
        let b = other.poly.mul_exp((other.offset - offset) as usize);
        ShiftedSeries::new(a + b, offset)
    }

    /// Multiply two series, keeping the terms with an exponent below `prec`.
    pub fn mul(&self, other: &ShiftedSeries, prec: i64) -> ShiftedSeries {
        let offset = self.offset + other.offset;
        let n = prec - offset;
        if n <= 0 {
            return ShiftedSeries::new(self.poly.zero(), offset);
        }

        ShiftedSeries::new(self.poly.mul_trunc(&other.poly, n as usize), offset)
    }

    /// Multiply the series by a constant.
    pub fn scale(self, c: &Rational) -> ShiftedSeries {
        ShiftedSeries::new(self.poly.mul_coeff(c), self.offset)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        poly::UnivariatePolynomial,
        rings::rational::{Rational, Q},
        series::error::DeclineReason,
    };

    use super::ShiftedSeries;

    fn series(c: &[i64], offset: i64) -> ShiftedSeries {
        ShiftedSeries::new(
            UnivariatePolynomial::from_coefficients(&Q, c.iter().map(|x| Rational::from(*x)).collect()),
            offset,
        )
    }

    #[test]
    fn valuation_and_strip() {
        let s = series(&[0, 0, 3, 1], -1);
        assert_eq!(s.valuation(), Some(1));
        assert_eq!(s.coefficient(1), Rational::from(3));
        assert_eq!(s.coefficient(-5), Rational::new());

        let t = s.clone().strip();
        assert_eq!(t, series(&[3, 1], 1));
        assert_eq!(t.valuation(), s.valuation());

        assert_eq!(ShiftedSeries::zero().valuation_bound(7), 7);
    }

    #[test]
    fn cancelled_pole() {
        // 0*x^-2 + 0*x^-1 + 3 + x
        assert_eq!(series(&[0, 0, 3, 1], -2).strip_pole(), series(&[3, 1], 0));
        // the leading zeros at positive exponents stay in the polynomial
        assert_eq!(series(&[0, 0, 0, 1], -1).strip_pole(), series(&[0, 0, 1], 0));
        assert_eq!(series(&[0, 1], -3).strip_pole(), series(&[1], -2));
        assert_eq!(series(&[], -3).strip_pole(), series(&[], 0));
        assert_eq!(series(&[0, 1], 2).strip_pole(), series(&[0, 1], 2));
    }

    #[test]
    fn alignment() {
        // x^-1 + 2 + x
        let a = series(&[1, 2, 1], -1);
        // 1 + 3x
        let b = series(&[1, 3], 0);
        assert_eq!(a.add(&b), series(&[1, 3, 4], -1));

        // (x^-1 + 2 + x)(1 + 3x) = x^-1 + 5 + 7x + 3x^2
        assert_eq!(a.mul(&b, 2), series(&[1, 5, 7], -1));
        assert_eq!(a.mul(&b, -1), series(&[], -1));
        assert_eq!(a.truncate(1), series(&[1, 2], -1));
    }

    #[test]
    fn offset_zero() {
        assert_eq!(
            series(&[1, 1], 2).into_offset_zero(),
            Ok(UnivariatePolynomial::from_coefficients(
                &Q,
                vec![Rational::new(), Rational::new(), Rational::from(1), Rational::from(1)]
            ))
        );
        assert_eq!(
            series(&[0, 0, 5], -2).into_offset_zero().map(|p| p.get_constant()),
            Ok(Rational::from(5))
        );
        assert_eq!(
            series(&[0, 1], -2).into_offset_zero(),
            Err(DeclineReason::Pole)
        );
    }
}
