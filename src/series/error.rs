use crate::atom::{Constant, ElementaryFunction, Symbol};

/// A reason for which the fast expansion declines an expression.
/// The expression may still have a series expansion that a more general
/// algorithm can find.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclineReason {
    ZeroOrder,
    UnsupportedExpansionPoint,
    ForeignVariable(Symbol),
    InexactNumber,
    SymbolicConstant(Constant),
    ConstantTermNotZero,
    ConstantTermNotOne,
    Pole,
    NotPerfectSquare,
    ExponentOutOfRange,
    ZeroDivisor,
    PrecisionExhausted,
}

impl std::fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclineReason::ZeroOrder => write!(f, "The expansion order is zero"),
            DeclineReason::UnsupportedExpansionPoint => {
                write!(f, "The expansion point is not a variable at a rational number")
            }
            DeclineReason::ForeignVariable(s) => {
                write!(f, "The expression depends on {}, which is not the expansion variable", s)
            }
            DeclineReason::InexactNumber => write!(f, "The expression contains an inexact number"),
            DeclineReason::SymbolicConstant(c) => {
                write!(f, "The expression contains the constant {}", c)
            }
            DeclineReason::ConstantTermNotZero => {
                write!(f, "The argument series does not vanish at the expansion point")
            }
            DeclineReason::ConstantTermNotOne => {
                write!(f, "The argument series is not one at the expansion point")
            }
            DeclineReason::Pole => write!(f, "The argument series has a pole"),
            DeclineReason::NotPerfectSquare => {
                write!(f, "The constant term of the base is not a non-zero perfect square")
            }
            DeclineReason::ExponentOutOfRange => write!(f, "The exponent is too large"),
            DeclineReason::ZeroDivisor => write!(f, "The series to invert is zero"),
            DeclineReason::PrecisionExhausted => {
                write!(f, "The required precision could not be determined")
            }
        }
    }
}

/// A violation of an assumption of the expansion, for example an expression
/// that should have been rejected by the admissibility check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InternalError {
    NonNumericCoefficient,
    UnknownFunction(Symbol),
    WrongArity {
        function: ElementaryFunction,
        args: usize,
    },
    Backend(&'static str),
}

impl std::fmt::Display for InternalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternalError::NonNumericCoefficient => {
                write!(f, "The overall coefficient of a sum or product is not a number")
            }
            InternalError::UnknownFunction(s) => write!(f, "Unknown function {}", s),
            InternalError::WrongArity { function, args } => write!(
                f,
                "The function {} takes one argument, but {} were given",
                function, args
            ),
            InternalError::Backend(e) => write!(f, "Polynomial backend error: {}", e),
        }
    }
}

/// An error of the series expansion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeriesError {
    /// The expression is not suitable for the fast expansion.
    Decline(DeclineReason),
    Internal(InternalError),
}

impl SeriesError {
    /// Returns true if a more general expansion algorithm should be tried.
    #[inline]
    pub fn is_decline(&self) -> bool {
        matches!(self, SeriesError::Decline(_))
    }
}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::Decline(r) => write!(f, "Series expansion declined: {}", r),
            SeriesError::Internal(e) => write!(f, "Internal series expansion error: {}", e),
        }
    }
}

impl std::error::Error for SeriesError {}

impl From<DeclineReason> for SeriesError {
    fn from(r: DeclineReason) -> Self {
        SeriesError::Decline(r)
    }
}

impl From<InternalError> for SeriesError {
    fn from(e: InternalError) -> Self {
        SeriesError::Internal(e)
    }
}
