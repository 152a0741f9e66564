//! Truncated power-series primitives on dense polynomials.
//!
//! Every routine takes the number of coefficients `n` to compute and returns
//! the series modulo `x^n`. Transcendental functions are only defined for
//! arguments that are centered at the expansion point (constant term zero),
//! except for `log` and `sqrt`, which require a constant term of one.
//!
//! The coefficients follow from the differential equation that the function
//! satisfies, for example `f = exp(a)` obeys `f' = a' f`, which gives
//! `f_k = 1/k * Σ_{j=1}^{k} j a_j f_{k-j}`.
use crate::rings::Field;

use super::univariate::UnivariatePolynomial;

impl<F: Field> UnivariatePolynomial<F> {
    fn from_series(&self, coefficients: Vec<F::Element>) -> Self {
        Self::from_coefficients(&self.field, coefficients)
    }

    /// The highest exponent of `self` that can be non-zero modulo `x^n`.
    #[inline]
    fn last_index(&self, n: usize) -> usize {
        self.len().min(n).saturating_sub(1)
    }

    /// Compute `c_k = 1/k * Σ_{j=1}^{k} j a_j g_{k-j}` with `c_0 = 0`, the
    /// integral of `a' g`.
    fn integrate_derivative_product(&self, a: &[F::Element], g: &[F::Element]) -> Vec<F::Element> {
        let n = a.len();
        let last = self.last_index(n);
        let mut c = vec![self.field.zero(); n];
        for k in 1..n {
            let mut sum = self.field.zero();
            for j in 1..=k.min(last) {
                if F::is_zero(&a[j]) {
                    continue;
                }

                let ja = self.field.mul(&self.field.nth(j as i64), &a[j]);
                self.field.add_mul_assign(&mut sum, &ja, &g[k - j]);
            }
            c[k] = self.field.div(&sum, &self.field.nth(k as i64));
        }
        c
    }

    fn require_constant_zero(&self, name: &'static str) -> Result<(), &'static str> {
        if F::is_zero(&self.get_constant()) {
            Ok(())
        } else {
            Err(name)
        }
    }

    fn require_constant_one(&self, name: &'static str) -> Result<(), &'static str> {
        if self.field.is_one(&self.get_constant()) {
            Ok(())
        } else {
            Err(name)
        }
    }

    /// Compute `1/self mod x^n`. The constant term must be non-zero.
    pub fn inv_series(&self, n: usize) -> Result<Self, &'static str> {
        if F::is_zero(&self.get_constant()) {
            return Err("Cannot invert a series with a zero constant term");
        }

        if n == 0 {
            return Ok(self.zero());
        }

        let a = self.padded(n);
        let last = self.last_index(n);
        let c0 = self.field.inv(&a[0]);
        let mut c = vec![self.field.zero(); n];
        c[0] = c0.clone();
        for k in 1..n {
            let mut sum = self.field.zero();
            for j in 1..=k.min(last) {
                if !F::is_zero(&a[j]) {
                    self.field.add_mul_assign(&mut sum, &a[j], &c[k - j]);
                }
            }
            c[k] = self.field.neg(&self.field.mul(&sum, &c0));
        }

        Ok(self.from_series(c))
    }

    /// Compute `exp(self) mod x^n`.
    pub fn exp_series(&self, n: usize) -> Result<Self, &'static str> {
        self.require_constant_zero("The argument of exp must have a zero constant term")?;

        if n == 0 {
            return Ok(self.zero());
        }

        let a = self.padded(n);
        let last = self.last_index(n);
        let mut c = vec![self.field.zero(); n];
        c[0] = self.field.one();
        for k in 1..n {
            let mut sum = self.field.zero();
            for j in 1..=k.min(last) {
                if F::is_zero(&a[j]) {
                    continue;
                }

                let ja = self.field.mul(&self.field.nth(j as i64), &a[j]);
                self.field.add_mul_assign(&mut sum, &ja, &c[k - j]);
            }
            c[k] = self.field.div(&sum, &self.field.nth(k as i64));
        }

        Ok(self.from_series(c))
    }

    /// Compute `log(self) mod x^n`.
    pub fn log_series(&self, n: usize) -> Result<Self, &'static str> {
        self.require_constant_one("The argument of log must have a constant term of one")?;

        if n == 0 {
            return Ok(self.zero());
        }

        let a = self.padded(n);
        let last = self.last_index(n);
        let mut c = vec![self.field.zero(); n];
        for k in 1..n {
            // a_{k-j} vanishes for k - j > last
            let mut sum = self.field.zero();
            for j in k.saturating_sub(last).max(1)..k {
                if F::is_zero(&c[j]) {
                    continue;
                }

                let jc = self.field.mul(&self.field.nth(j as i64), &c[j]);
                self.field.add_mul_assign(&mut sum, &jc, &a[k - j]);
            }
            c[k] = self
                .field
                .sub(&a[k], &self.field.div(&sum, &self.field.nth(k as i64)));
        }

        Ok(self.from_series(c))
    }

    /// Compute `sqrt(self) mod x^n`.
    pub fn sqrt_series(&self, n: usize) -> Result<Self, &'static str> {
        self.require_constant_one("The argument of sqrt must have a constant term of one")?;

        if n == 0 {
            return Ok(self.zero());
        }

        let a = self.padded(n);
        let two = self.field.nth(2);
        let mut c = vec![self.field.zero(); n];
        c[0] = self.field.one();
        for k in 1..n {
            let mut sum = a[k].clone();
            for j in 1..k {
                self.field.sub_mul_assign(&mut sum, &c[j], &c[k - j]);
            }
            c[k] = self.field.div(&sum, &two);
        }

        Ok(self.from_series(c))
    }

    /// Compute `sin(self)` and `cos(self)` modulo `x^n` with the coupled recurrence
    /// `s' = a' c`, `c' = -a' s`. With `hyperbolic` set, compute `sinh` and `cosh` instead.
    fn sin_cos_series_impl(&self, n: usize, hyperbolic: bool) -> (Self, Self) {
        let a = self.padded(n);
        let last = self.last_index(n);
        let mut s = vec![self.field.zero(); n];
        let mut c = vec![self.field.zero(); n];
        c[0] = self.field.one();
        for k in 1..n {
            let mut sum_s = self.field.zero();
            let mut sum_c = self.field.zero();
            for j in 1..=k.min(last) {
                if F::is_zero(&a[j]) {
                    continue;
                }

                let ja = self.field.mul(&self.field.nth(j as i64), &a[j]);
                self.field.add_mul_assign(&mut sum_s, &ja, &c[k - j]);
                self.field.add_mul_assign(&mut sum_c, &ja, &s[k - j]);
            }

            let kk = self.field.nth(k as i64);
            s[k] = self.field.div(&sum_s, &kk);
            let ck = self.field.div(&sum_c, &kk);
            c[k] = if hyperbolic { ck } else { self.field.neg(&ck) };
        }

        (self.from_series(s), self.from_series(c))
    }

    /// Compute `sin(self)` and `cos(self)` modulo `x^n`.
    pub fn sin_cos_series(&self, n: usize) -> Result<(Self, Self), &'static str> {
        self.require_constant_zero("The argument of sin and cos must have a zero constant term")?;
        if n == 0 {
            return Ok((self.zero(), self.zero()));
        }
        Ok(self.sin_cos_series_impl(n, false))
    }

    /// Compute `sinh(self)` and `cosh(self)` modulo `x^n`.
    pub fn sinh_cosh_series(&self, n: usize) -> Result<(Self, Self), &'static str> {
        self.require_constant_zero(
            "The argument of sinh and cosh must have a zero constant term",
        )?;
        if n == 0 {
            return Ok((self.zero(), self.zero()));
        }
        Ok(self.sin_cos_series_impl(n, true))
    }

    pub fn sin_series(&self, n: usize) -> Result<Self, &'static str> {
        Ok(self.sin_cos_series(n)?.0)
    }

    pub fn cos_series(&self, n: usize) -> Result<Self, &'static str> {
        Ok(self.sin_cos_series(n)?.1)
    }

    pub fn sinh_series(&self, n: usize) -> Result<Self, &'static str> {
        Ok(self.sinh_cosh_series(n)?.0)
    }

    pub fn cosh_series(&self, n: usize) -> Result<Self, &'static str> {
        Ok(self.sinh_cosh_series(n)?.1)
    }

    /// Compute `tan(self)` or `tanh(self)` modulo `x^n` using `c' = a' (1 ± c^2)`.
    fn tan_series_impl(&self, n: usize, hyperbolic: bool) -> Self {
        if n == 0 {
            return self.zero();
        }

        let a = self.padded(n);
        let last = self.last_index(n);
        let mut c = vec![self.field.zero(); n];
        // s = 1 + c^2 for tan and 1 - c^2 for tanh
        let mut s = vec![self.field.zero(); n];
        s[0] = self.field.one();
        for k in 1..n {
            let mut sum = self.field.zero();
            for j in 1..=k.min(last) {
                if F::is_zero(&a[j]) {
                    continue;
                }

                let ja = self.field.mul(&self.field.nth(j as i64), &a[j]);
                self.field.add_mul_assign(&mut sum, &ja, &s[k - j]);
            }
            c[k] = self.field.div(&sum, &self.field.nth(k as i64));

            let mut sq = self.field.zero();
            for j in 1..k {
                self.field.add_mul_assign(&mut sq, &c[j], &c[k - j]);
            }
            s[k] = if hyperbolic { self.field.neg(&sq) } else { sq };
        }

        self.from_series(c)
    }

    pub fn tan_series(&self, n: usize) -> Result<Self, &'static str> {
        self.require_constant_zero("The argument of tan must have a zero constant term")?;
        Ok(self.tan_series_impl(n, false))
    }

    pub fn tanh_series(&self, n: usize) -> Result<Self, &'static str> {
        self.require_constant_zero("The argument of tanh must have a zero constant term")?;
        Ok(self.tan_series_impl(n, true))
    }

    /// Compute `1 + sign * self^2 mod x^n`.
    fn one_plus_square(&self, n: usize, negate: bool) -> Self {
        let sq = self.mul_trunc(self, n);
        let sq = if negate { -sq } else { sq };
        self.one() + sq
    }

    pub fn atan_series(&self, n: usize) -> Result<Self, &'static str> {
        self.require_constant_zero("The argument of atan must have a zero constant term")?;
        if n == 0 {
            return Ok(self.zero());
        }

        let g = self.one_plus_square(n, false).inv_series(n)?;
        Ok(self.from_series(self.integrate_derivative_product(&self.padded(n), &g.padded(n))))
    }

    pub fn atanh_series(&self, n: usize) -> Result<Self, &'static str> {
        self.require_constant_zero("The argument of atanh must have a zero constant term")?;
        if n == 0 {
            return Ok(self.zero());
        }

        let g = self.one_plus_square(n, true).inv_series(n)?;
        Ok(self.from_series(self.integrate_derivative_product(&self.padded(n), &g.padded(n))))
    }

    pub fn asin_series(&self, n: usize) -> Result<Self, &'static str> {
        self.require_constant_zero("The argument of asin must have a zero constant term")?;
        if n == 0 {
            return Ok(self.zero());
        }

        let g = self
            .one_plus_square(n, true)
            .sqrt_series(n)?
            .inv_series(n)?;
        Ok(self.from_series(self.integrate_derivative_product(&self.padded(n), &g.padded(n))))
    }

    pub fn asinh_series(&self, n: usize) -> Result<Self, &'static str> {
        self.require_constant_zero("The argument of asinh must have a zero constant term")?;
        if n == 0 {
            return Ok(self.zero());
        }

        let g = self
            .one_plus_square(n, false)
            .sqrt_series(n)?
            .inv_series(n)?;
        Ok(self.from_series(self.integrate_derivative_product(&self.padded(n), &g.padded(n))))
    }
}
