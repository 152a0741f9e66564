//! The series construction of every elementary function.

use crate::{
    atom::ElementaryFunction,
    poly::UnivariatePolynomial,
    rings::rational::RationalField,
};

type Poly = UnivariatePolynomial<RationalField>;

/// A truncated series primitive `(argument, n) -> f(argument) mod x^n`.
pub type SeriesPrimitive = fn(&Poly, usize) -> Result<Poly, &'static str>;

/// The value the argument must take at the expansion point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precondition {
    ArgumentVanishes,
    ArgumentIsOne,
}

/// How the series of a function is built from its argument series.
#[derive(Clone, Copy)]
pub enum Construction {
    /// Apply the primitive to the argument.
    Direct(SeriesPrimitive),
    /// Invert the series of the paired function, such as `cos` for `sec`.
    Reciprocal(SeriesPrimitive),
}

impl std::fmt::Debug for Construction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Construction::Direct(_) => write!(f, "Direct"),
            Construction::Reciprocal(_) => write!(f, "Reciprocal"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FunctionDescriptor {
    pub function: ElementaryFunction,
    pub precondition: Precondition,
    pub construction: Construction,
}

impl FunctionDescriptor {
    /// Get the descriptor of `f`.
    #[inline]
    pub fn get(f: ElementaryFunction) -> &'static FunctionDescriptor {
        &FUNCTION_TABLE[f.index()]
    }
}

const fn direct(function: ElementaryFunction, primitive: SeriesPrimitive) -> FunctionDescriptor {
    FunctionDescriptor {
        function,
        precondition: Precondition::ArgumentVanishes,
        construction: Construction::Direct(primitive),
    }
}

const fn reciprocal(function: ElementaryFunction, paired: SeriesPrimitive) -> FunctionDescriptor {
    FunctionDescriptor {
        function,
        precondition: Precondition::ArgumentVanishes,
        construction: Construction::Reciprocal(paired),
    }
}

/// The descriptors, in the order of [ElementaryFunction::ALL].
pub static FUNCTION_TABLE: [FunctionDescriptor; 18] = [
    direct(ElementaryFunction::Exp, Poly::exp_series),
    FunctionDescriptor {
        function: ElementaryFunction::Log,
        precondition: Precondition::ArgumentIsOne,
        construction: Construction::Direct(Poly::log_series),
    },
    direct(ElementaryFunction::Sin, Poly::sin_series),
    direct(ElementaryFunction::Cos, Poly::cos_series),
    direct(ElementaryFunction::Tan, Poly::tan_series),
    reciprocal(ElementaryFunction::Cot, Poly::tan_series),
    reciprocal(ElementaryFunction::Sec, Poly::cos_series),
    reciprocal(ElementaryFunction::Csc, Poly::sin_series),
    direct(ElementaryFunction::Asin, Poly::asin_series),
    direct(ElementaryFunction::Atan, Poly::atan_series),
    direct(ElementaryFunction::Sinh, Poly::sinh_series),
    direct(ElementaryFunction::Cosh, Poly::cosh_series),
    direct(ElementaryFunction::Tanh, Poly::tanh_series),
    reciprocal(ElementaryFunction::Coth, Poly::tanh_series),
    reciprocal(ElementaryFunction::Sech, Poly::cosh_series),
    reciprocal(ElementaryFunction::Csch, Poly::sinh_series),
    direct(ElementaryFunction::Asinh, Poly::asinh_series),
    direct(ElementaryFunction::Atanh, Poly::atanh_series),
];

#[cfg(test)]
mod test {
    use crate::atom::ElementaryFunction;

    use super::{Construction, FunctionDescriptor, Precondition};

    #[test]
    fn table_order() {
        for f in ElementaryFunction::ALL {
            let d = FunctionDescriptor::get(f);
            assert_eq!(d.function, f);

            let expected = if f == ElementaryFunction::Log {
                Precondition::ArgumentIsOne
            } else {
                Precondition::ArgumentVanishes
            };
            assert_eq!(d.precondition, expected);
        }

        let reciprocal = ElementaryFunction::ALL
            .iter()
            .filter(|f| matches!(FunctionDescriptor::get(**f).construction, Construction::Reciprocal(_)))
            .count();
        assert_eq!(reciprocal, 6);
    }
}
