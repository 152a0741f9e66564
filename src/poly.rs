//! Dense univariate polynomials and the truncated power-series
//! primitives that operate on them.

pub mod series;
pub mod univariate;

pub use univariate::UnivariatePolynomial;
