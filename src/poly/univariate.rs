use std::ops::{Add, Neg, Sub};

use crate::rings::{Field, Ring};

/// A dense univariate polynomial. The coefficient at index `i` belongs to `x^i`.
/// Trailing zeros are never stored, so the zero polynomial has no coefficients.
#[derive(Clone)]
pub struct UnivariatePolynomial<F: Ring> {
    pub coefficients: Vec<F::Element>,
    pub field: F,
}

impl<F: Ring> std::fmt::Debug for UnivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for c in self.coefficients.iter() {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{{ {:?} }}", c)?;
        }
        write!(f, " ]")
    }
}

impl<F: Ring> std::fmt::Display for UnivariatePolynomial<F>
where
    F::Element: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (e, c) in self.coefficients.iter().enumerate() {
            if F::is_zero(c) {
                continue;
            }

            if first {
                first = false;
            } else {
                write!(f, "+")?;
            }

            write!(f, "{}*x^{}", c, e)?;
        }
        Ok(())
    }
}

impl<F: Ring> UnivariatePolynomial<F> {
    /// Constructs a zero polynomial. Instead of using this constructor,
    /// prefer to create new polynomials from existing ones, so that the
    /// field is inherited.
    #[inline]
    pub fn new(field: &F, cap: Option<usize>) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap.unwrap_or(0)),
            field: field.clone(),
        }
    }

    /// Constructs a polynomial from its coefficients, starting with the constant term.
    pub fn from_coefficients(field: &F, coefficients: Vec<F::Element>) -> Self {
        let mut p = Self {
            coefficients,
            field: field.clone(),
        };
        p.truncate();
        p
    }

    /// Constructs a zero polynomial, inheriting the field from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            field: self.field.clone(),
        }
    }

    /// Constructs a constant polynomial, inheriting the field from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            field: self.field.clone(),
        }
    }

    /// Constructs a polynomial that is one, inheriting the field from `self`.
    #[inline]
    pub fn one(&self) -> Self {
        Self {
            coefficients: vec![self.field.one()],
            field: self.field.clone(),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.coefficients.len() == 1 && self.field.is_one(&self.coefficients[0])
    }

    /// The number of stored coefficients, i.e. the degree plus one.
    #[inline]
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn degree(&self) -> usize {
        if self.is_zero() {
            return 0;
        }

        self.coefficients.len() - 1
    }

    /// The exponent of the lowest non-zero term, or `None` for the zero polynomial.
    pub fn ldegree(&self) -> Option<usize> {
        self.coefficients.iter().position(|c| !F::is_zero(c))
    }

    /// Get the constant term of the polynomial.
    #[inline]
    pub fn get_constant(&self) -> F::Element {
        self.coefficient(0)
    }

    /// Get the coefficient of `x^n`.
    #[inline]
    pub fn coefficient(&self, n: usize) -> F::Element {
        self.coefficients
            .get(n)
            .cloned()
            .unwrap_or_else(|| self.field.zero())
    }

    /// Get the first `n` coefficients, padded with zeros.
    pub(crate) fn padded(&self, n: usize) -> Vec<F::Element> {
        let mut c: Vec<_> = self.coefficients.iter().take(n).cloned().collect();
        c.resize(n, self.field.zero());
        c
    }

    /// Multiply by `x^exp`.
    pub fn mul_exp(&self, exp: usize) -> Self {
        if exp == 0 || self.is_zero() {
            return self.clone();
        }

        let mut a = self.zero();
        a.coefficients = vec![self.field.zero(); self.degree() + exp + 1];

        for (cn, c) in a.coefficients.iter_mut().skip(exp).zip(&self.coefficients) {
            *cn = c.clone();
        }

        a
    }

    /// Divide by `x^exp`, dropping the terms of degree lower than `exp`.
    pub fn div_exp(&self, exp: usize) -> Self {
        if exp == 0 {
            return self.clone();
        }

        let mut a = self.zero();
        a.coefficients = self.coefficients.iter().skip(exp).cloned().collect();
        a
    }

    /// Keep only the terms with exponent lower than `n`.
    pub fn truncate_len(mut self, n: usize) -> Self {
        self.coefficients.truncate(n);
        self.truncate();
        self
    }

    pub fn mul_coeff(mut self, coeff: &F::Element) -> Self {
        for c in &mut self.coefficients {
            if !F::is_zero(c) {
                self.field.mul_assign(c, coeff);
            }
        }

        self.truncate();
        self
    }

    /// Compute `self * other mod x^n`.
    pub fn mul_trunc(&self, other: &Self, n: usize) -> Self {
        if self.is_zero() || other.is_zero() || n == 0 {
            return self.zero();
        }

        let len = (self.coefficients.len() + other.coefficients.len() - 1).min(n);
        let mut res = self.zero();
        res.coefficients = vec![self.field.zero(); len];

        for (e1, c1) in self.coefficients.iter().enumerate().take(len) {
            if F::is_zero(c1) {
                continue;
            }

            for (e2, c2) in other.coefficients.iter().enumerate().take(len - e1) {
                if !F::is_zero(c2) {
                    self.field
                        .add_mul_assign(&mut res.coefficients[e1 + e2], c1, c2);
                }
            }
        }

        res.truncate();
        res
    }

    /// Compute `self^pow mod x^n`.
    pub fn pow_trunc(&self, mut pow: usize, n: usize) -> Self {
        if n == 0 {
            return self.zero();
        }

        if pow == 0 {
            return self.one();
        }

        let mut x = self.clone().truncate_len(n);
        let mut y = self.one();
        while pow != 1 {
            if pow % 2 == 1 {
                y = y.mul_trunc(&x, n);
                pow -= 1;
            }

            x = x.mul_trunc(&x, n);
            pow /= 2;
        }

        x.mul_trunc(&y, n)
    }

    /// Remove trailing zeros.
    fn truncate(&mut self) {
        let d = self
            .coefficients
            .iter()
            .rev()
            .position(|c| !F::is_zero(c))
            .unwrap_or(self.coefficients.len());

        self.coefficients.truncate(self.coefficients.len() - d);
    }
}

impl<F: Field> UnivariatePolynomial<F> {
    /// Divide every coefficient by `coeff`.
    pub fn div_coeff(mut self, coeff: &F::Element) -> Self {
        for c in &mut self.coefficients {
            if !F::is_zero(c) {
                self.field.div_assign(c, coeff);
            }
        }
        self
    }
}

impl<F: Ring> PartialEq for UnivariatePolynomial<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.coefficients.eq(&other.coefficients)
    }
}

impl<F: Ring> Add for UnivariatePolynomial<F> {
    type Output = Self;

    fn add(mut self, mut other: Self) -> Self::Output {
        assert_eq!(self.field, other.field);

        if self.is_zero() {
            return other;
        }
        if other.is_zero() {
            return self;
        }

        if self.coefficients.len() < other.coefficients.len() {
            std::mem::swap(&mut self, &mut other);
        }

        for (i, c) in other.coefficients.iter().enumerate() {
            self.field.add_assign(&mut self.coefficients[i], c);
        }

        self.truncate();

        self
    }
}

impl<'a, 'b, F: Ring> Add<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn add(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        (self.clone()).add(other.clone())
    }
}

impl<F: Ring> Sub for UnivariatePolynomial<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.add(other.neg())
    }
}

impl<'a, 'b, F: Ring> Sub<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn sub(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        (self.clone()).add(other.clone().neg())
    }
}

impl<F: Ring> Neg for UnivariatePolynomial<F> {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        // Negate coefficients of all terms.
        for c in &mut self.coefficients {
            *c = self.field.neg(c);
        }
        self
    }
}
