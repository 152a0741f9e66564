//! Fast truncated power-series expansion of elementary expressions.
//!
//! The fast path handles expressions in a single variable that are built
//! from exact rational numbers, sums, products, powers and the elementary
//! functions in [ElementaryFunction](crate::atom::ElementaryFunction).
//! Expressions outside of this class are either rejected by
//! [is_fast_path_eligible] or make [expand_series] return a
//! [SeriesError::Decline], so that the caller can fall back to a more
//! general algorithm.
//!
//! # Examples
//!
//! ```
//! use fastseries::atom::{Atom, Equation};
//! use fastseries::series::{expand_series, is_fast_path_eligible, SeriesOptions};
//!
//! let x = Atom::new_var("x");
//! let e = (&x + 1).npow((1, 2));
//! assert!(is_fast_path_eligible(&e));
//!
//! let point = Equation::new(x.clone(), Atom::new_num(0));
//! let s = expand_series(&e, &point, 3, SeriesOptions::default()).unwrap();
//! assert_eq!(s.to_string(), "1+1/2*x-1/8*x^2+𝒪(x^3)");
//! ```
mod admissible;
mod error;
mod expand;
mod functions;
mod shifted;

use tracing::{debug, instrument};

use crate::{
    atom::{Atom, Equation, Symbol},
    rings::rational::Rational,
};

pub use self::admissible::AdmissibilityContext;
pub use self::error::{DeclineReason, InternalError, SeriesError};
pub use self::expand::{SeriesExpander, MAX_REFINEMENTS, MAX_ZERO_PROBES};
pub use self::functions::{
    Construction, FunctionDescriptor, Precondition, SeriesPrimitive, FUNCTION_TABLE,
};
pub use self::shifted::ShiftedSeries;

/// Options that are passed through by the expansion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SeriesOptions(pub u32);

/// Returns true if `a` only contains exact rational numbers, at most one
/// variable and elementary functions of one argument. An expression that is
/// accepted either expands or declines, but never causes an internal error.
pub fn is_fast_path_eligible(a: &Atom) -> bool {
    AdmissibilityContext::new().check(a)
}

/// Expand `a` around the point `point`, for example `x = 0`, up to and
/// excluding `order` terms after the leading exponent of the internal
/// representation.
#[instrument(level = "debug", skip_all, fields(%a, %point, order))]
pub fn expand_series(
    a: &Atom,
    point: &Equation,
    order: u32,
    options: SeriesOptions,
) -> Result<SeriesExpansion, SeriesError> {
    debug!("Series options: {:?}", options);

    if order == 0 {
        debug!("Declining: {}", DeclineReason::ZeroOrder);
        return Err(SeriesError::Decline(DeclineReason::ZeroOrder));
    }

    let (Atom::Var(variable), Some(at)) = (point.lhs(), point.rhs().as_rational()) else {
        debug!("Declining: {}", DeclineReason::UnsupportedExpansionPoint);
        return Err(SeriesError::Decline(
            DeclineReason::UnsupportedExpansionPoint,
        ));
    };

    let expander = SeriesExpander::new(variable, at);
    let order = order as i64;

    let mut prec = order;
    let mut s = expander.expand(a, prec)?.strip_pole();
    let mut refinements = 0;
    while s.offset + order > prec {
        if refinements == MAX_REFINEMENTS {
            debug!("Declining: {}", DeclineReason::PrecisionExhausted);
            return Err(SeriesError::Decline(DeclineReason::PrecisionExhausted));
        }
        refinements += 1;

        prec = s.offset + order;
        debug!("Refining the precision to {}", prec);
        s = expander.expand(a, prec)?.strip_pole();
    }

    let terms = s
        .poly
        .coefficients
        .iter()
        .take(order as usize)
        .enumerate()
        .filter(|(_, c)| **c != 0)
        .map(|(i, c)| (c.clone(), i as i64 + s.offset))
        .collect();

    Ok(SeriesExpansion {
        variable: variable.clone(),
        point: at.clone(),
        terms,
        order: order + s.offset,
    })
}

/// A truncated series `Σ c_i (x-a)^e_i + 𝒪((x-a)^order)`.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesExpansion {
    variable: Symbol,
    point: Rational,
    terms: Vec<(Rational, i64)>,
    order: i64,
}

impl SeriesExpansion {
    /// The non-zero coefficients and their exponents, in increasing order.
    #[inline]
    pub fn terms(&self) -> &[(Rational, i64)] {
        &self.terms
    }

    /// The exponent of the remainder term.
    #[inline]
    pub fn order(&self) -> i64 {
        self.order
    }

    #[inline]
    pub fn variable(&self) -> &Symbol {
        &self.variable
    }

    /// The point around which the series is expanded.
    #[inline]
    pub fn point(&self) -> &Rational {
        &self.point
    }

    /// Get the coefficient of `(x-a)^exp`. Exponents at or beyond the order
    /// are unknown and yield `None`.
    pub fn coefficient(&self, exp: i64) -> Option<Rational> {
        if exp >= self.order {
            return None;
        }

        match self.terms.binary_search_by_key(&exp, |(_, e)| *e) {
            Ok(i) => Some(self.terms[i].0.clone()),
            Err(_) => Some(Rational::new()),
        }
    }

    /// The expansion variable shifted by the expansion point, `x-a`.
    pub fn base(&self) -> Atom {
        let x = Atom::new_var(self.variable.clone());
        if self.point == 0 {
            x
        } else {
            x - Atom::new_num(self.point.clone())
        }
    }

    /// Convert the series without its remainder to an expression.
    pub fn to_atom(&self) -> Atom {
        let base = self.base();
        let mut r = Atom::new_num(0);
        for (c, e) in &self.terms {
            r = r + Atom::new_num(c.clone()) * base.npow(*e);
        }
        r
    }
}
