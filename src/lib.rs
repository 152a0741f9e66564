//! Fastseries computes truncated power series of elementary expressions
//! with exact rational coefficients.
//!
//! It is meant as the fast path of a series expansion in a computer algebra
//! system: expressions in one variable made of rational numbers, sums,
//! products, powers and elementary functions are expanded with dense
//! polynomial arithmetic, while everything else is declined so that a more
//! general algorithm can take over.
//!
//! For example:
//!
//! ```
//! use fastseries::{
//!     atom::{Atom, Equation},
//!     series::{expand_series, SeriesOptions},
//! };
//!
//! let x = Atom::new_var("x");
//! let e = x.sin() / &x;
//! let s = expand_series(&e, &Equation::new(x, Atom::new_num(0)), 5, SeriesOptions::default())
//!     .unwrap();
//! assert_eq!(s.to_string(), "1-1/6*x^2+1/120*x^4+𝒪(x^5)");
//! ```

pub mod atom;
pub mod poly;
pub mod printer;
pub mod rings;
pub mod series;
