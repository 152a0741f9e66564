use rug::{ops::Pow, Integer};

use super::{Field, Ring};

pub use rug::Rational;

/// The field of rational numbers, backed by arbitrary-precision integers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RationalField;

/// The rational field.
pub const Q: RationalField = RationalField;

impl RationalField {
    pub fn new() -> RationalField {
        RationalField
    }
}

impl Default for RationalField {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RationalField {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

impl Ring for RationalField {
    type Element = Rational;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a + b)
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a - b)
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a * b)
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a += Rational::from(b * c);
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= Rational::from(b * c);
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        Rational::from(-a)
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Rational::new()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Rational::from(1)
    }

    #[inline]
    fn nth(&self, n: i64) -> Self::Element {
        Rational::from(n)
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        if e > u32::MAX as u64 {
            panic!("Power of exponentation is larger than 2^32: {}", e);
        }

        b.clone().pow(e as u32)
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        *a == 0
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        *a == 1
    }
}

impl Field for RationalField {
    #[inline]
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a / b)
    }

    #[inline]
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a /= b;
    }

    #[inline]
    fn inv(&self, a: &Self::Element) -> Self::Element {
        a.clone().recip()
    }
}

/// Compute the square root of `r` if both its numerator and denominator
/// are perfect squares.
pub fn exact_sqrt(r: &Rational) -> Option<Rational> {
    let (num, den) = (r.numer(), r.denom());
    if !num.is_perfect_square() || !den.is_perfect_square() {
        return None;
    }

    Some(Rational::from((
        Integer::from(num.sqrt_ref()),
        Integer::from(den.sqrt_ref()),
    )))
}

#[cfg(test)]
mod test {
    use super::{exact_sqrt, Rational, RationalField, Q};
    use crate::rings::{Field, Ring};

    #[test]
    fn arithmetic() {
        let a = Rational::from((1, 2));
        let b = Rational::from((1, 3));

        assert_eq!(Q.add(&a, &b), Rational::from((5, 6)));
        assert_eq!(Q.sub(&a, &b), Rational::from((1, 6)));
        assert_eq!(Q.div(&a, &b), Rational::from((3, 2)));

        let mut c = Q.one();
        Q.sub_mul_assign(&mut c, &a, &b);
        assert_eq!(c, Rational::from((5, 6)));
        assert_eq!(Q.pow(&a, 3), Rational::from((1, 8)));
        assert!(RationalField::is_zero(&Q.zero()));
    }

    #[test]
    fn square_roots() {
        assert_eq!(
            exact_sqrt(&Rational::from((9, 4))),
            Some(Rational::from((3, 2)))
        );
        assert_eq!(exact_sqrt(&Rational::from(0)), Some(Rational::new()));
        assert_eq!(exact_sqrt(&Rational::from(2)), None);
        assert_eq!(exact_sqrt(&Rational::from(-4)), None);
    }
}
