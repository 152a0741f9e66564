use super::{Atom, FunctionBuilder, Symbol};

/// The elementary functions that have a built-in series expansion.
///
/// The discriminant of each variant is its position in [ElementaryFunction::ALL],
/// which is used to index per-function tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ElementaryFunction {
    Exp,
    Log,
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Asin,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Coth,
    Sech,
    Csch,
    Asinh,
    Atanh,
}

impl ElementaryFunction {
    pub const ALL: [ElementaryFunction; 18] = [
        ElementaryFunction::Exp,
        ElementaryFunction::Log,
        ElementaryFunction::Sin,
        ElementaryFunction::Cos,
        ElementaryFunction::Tan,
        ElementaryFunction::Cot,
        ElementaryFunction::Sec,
        ElementaryFunction::Csc,
        ElementaryFunction::Asin,
        ElementaryFunction::Atan,
        ElementaryFunction::Sinh,
        ElementaryFunction::Cosh,
        ElementaryFunction::Tanh,
        ElementaryFunction::Coth,
        ElementaryFunction::Sech,
        ElementaryFunction::Csch,
        ElementaryFunction::Asinh,
        ElementaryFunction::Atanh,
    ];

    /// The position of the function in [ElementaryFunction::ALL].
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            ElementaryFunction::Exp => "exp",
            ElementaryFunction::Log => "log",
            ElementaryFunction::Sin => "sin",
            ElementaryFunction::Cos => "cos",
            ElementaryFunction::Tan => "tan",
            ElementaryFunction::Cot => "cot",
            ElementaryFunction::Sec => "sec",
            ElementaryFunction::Csc => "csc",
            ElementaryFunction::Asin => "asin",
            ElementaryFunction::Atan => "atan",
            ElementaryFunction::Sinh => "sinh",
            ElementaryFunction::Cosh => "cosh",
            ElementaryFunction::Tanh => "tanh",
            ElementaryFunction::Coth => "coth",
            ElementaryFunction::Sech => "sech",
            ElementaryFunction::Csch => "csch",
            ElementaryFunction::Asinh => "asinh",
            ElementaryFunction::Atanh => "atanh",
        }
    }

    pub fn from_name(name: &str) -> Option<ElementaryFunction> {
        ElementaryFunction::ALL
            .iter()
            .find(|f| f.name() == name)
            .copied()
    }

    /// Get the elementary function with the symbol `s` as its name.
    #[inline]
    pub fn from_symbol(s: &Symbol) -> Option<ElementaryFunction> {
        Self::from_name(s.name())
    }

    pub fn symbol(&self) -> Symbol {
        Symbol::new(self.name())
    }

    /// Create the function call `f(arg)`.
    pub fn apply(&self, arg: Atom) -> Atom {
        FunctionBuilder::new(self.symbol()).add_arg(arg).finish()
    }
}

impl std::fmt::Display for ElementaryFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::ElementaryFunction;
    use crate::atom::{Atom, Symbol};

    #[test]
    fn lookup() {
        for (i, f) in ElementaryFunction::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
            assert_eq!(ElementaryFunction::from_name(f.name()), Some(*f));
        }

        assert_eq!(
            ElementaryFunction::from_symbol(&Symbol::new("atanh")),
            Some(ElementaryFunction::Atanh)
        );
        assert_eq!(ElementaryFunction::from_name("acos"), None);
    }

    #[test]
    fn application() {
        let x = Atom::new_var("x");
        let a = ElementaryFunction::Sech.apply(x.clone());

        let Atom::Fun(f) = &a else {
            panic!("Expected a function, got {}", a);
        };
        assert_eq!(f.name().name(), "sech");
        assert_eq!(f.args(), &[x]);
    }
}
