use fastseries::{
    atom::{Atom, Constant, ElementaryFunction, Equation, FunctionBuilder, Mul, Symbol},
    printer::{PrintOptions, SeriesPrinter},
    rings::rational::Rational,
    series::{
        expand_series, is_fast_path_eligible, DeclineReason, InternalError, SeriesError,
        SeriesExpansion, SeriesOptions,
    },
};

fn around_zero(a: &Atom, order: u32) -> Result<SeriesExpansion, SeriesError> {
    let x = Atom::new_var("x");
    expand_series(
        a,
        &Equation::new(x, Atom::new_num(0)),
        order,
        SeriesOptions::default(),
    )
}

fn q(n: i64, d: i64) -> Rational {
    Rational::from((n, d))
}

#[test]
fn multivariate_is_rejected() {
    let x = Atom::new_var("x");
    let y = Atom::new_var("y");
    let a = &x + &y;

    assert!(!is_fast_path_eligible(&a));
    assert_eq!(
        around_zero(&a, 3),
        Err(SeriesError::Decline(DeclineReason::ForeignVariable(
            Symbol::new("y")
        )))
    );
}

#[test]
fn pole() {
    let x = Atom::new_var("x");
    let s = around_zero(&x.npow(-1), 3).unwrap();
    assert_eq!(s.terms(), &[(q(1, 1), -1)]);
    assert_eq!(s.order(), 2);
    assert_eq!(s.to_string(), "x^-1+𝒪(x^2)");
}

#[test]
fn exponential() {
    let x = Atom::new_var("x");
    let s = around_zero(&x.exp(), 4).unwrap();
    assert_eq!(
        s.terms(),
        &[(q(1, 1), 0), (q(1, 1), 1), (q(1, 2), 2), (q(1, 6), 3)]
    );
    assert_eq!(s.order(), 4);
    assert_eq!(s.to_string(), "1+x+1/2*x^2+1/6*x^3+𝒪(x^4)");
}

#[test]
fn reciprocal_functions() {
    let x = Atom::new_var("x");

    let sec = around_zero(&ElementaryFunction::Sec.apply(x.clone()), 6).unwrap();
    let inv_cos = around_zero(&x.cos().npow(-1), 6).unwrap();
    assert_eq!(sec, inv_cos);
    assert_eq!(
        sec.terms(),
        &[(q(1, 1), 0), (q(1, 2), 2), (q(5, 24), 4)]
    );

    // cot(x) = 1/x - x/3 - x^3/45
    let cot = around_zero(&ElementaryFunction::Cot.apply(x.clone()), 3).unwrap();
    assert_eq!(cot.terms(), &[(q(1, 1), -1), (q(-1, 3), 1)]);
    assert_eq!(cot.order(), 2);

    let tan = around_zero(&ElementaryFunction::Tan.apply(x.clone()), 6).unwrap();
    assert_eq!(
        tan.terms(),
        &[(q(1, 1), 1), (q(1, 3), 3), (q(2, 15), 5)]
    );
    assert_eq!(tan.order(), 6);
}

#[test]
fn square_root() {
    let x = Atom::new_var("x");
    let s = around_zero(&(&x + 1).sqrt(), 4).unwrap();
    assert_eq!(
        s.terms(),
        &[(q(1, 1), 0), (q(1, 2), 1), (q(-1, 8), 2), (q(1, 16), 3)]
    );

    // sqrt(9+x) = 3 + x/6 - x^2/216
    let s = around_zero(&(&x + 9).sqrt(), 3).unwrap();
    assert_eq!(s.terms(), &[(q(3, 1), 0), (q(1, 6), 1), (q(-1, 216), 2)]);
}

#[test]
fn expansion_is_repeatable() {
    let x = Atom::new_var("x");
    let a = x.sin().exp() * (&x + 1).npow(-2) + x.cos().log();

    let first = around_zero(&a, 6).unwrap();
    let second = around_zero(&a, 6).unwrap();
    assert_eq!(first, second);
}

#[test]
fn zero_order() {
    let x = Atom::new_var("x");
    let expressions = [
        x.clone(),
        Atom::new_num(5),
        x.npow(-2),
        x.sin(),
        ElementaryFunction::Cot.apply(x.clone()),
        &x + x.exp() + 1,
        (&x + 1).npow((1, 2)) * x.cos(),
        (&x - &x).npow(-1),
    ];

    for a in &expressions {
        assert_eq!(
            around_zero(a, 0),
            Err(SeriesError::Decline(DeclineReason::ZeroOrder)),
            "Unexpected result for {}",
            a
        );
    }
}

#[test]
fn filter_checks_are_independent() {
    let x = Atom::new_var("x");
    let y = Atom::new_var("y");

    assert!(is_fast_path_eligible(&x));
    assert!(is_fast_path_eligible(&y));
    assert!(is_fast_path_eligible(&y.sin()));
    assert!(!is_fast_path_eligible(&(&x * &y)));
    assert!(is_fast_path_eligible(&x.exp()));
}

#[test]
fn deep_nesting() {
    // x^-1*(1 + x^-1*(1 + ...)) with 30 levels
    let x = Atom::new_var("x");
    let mut a = Atom::new_num(1);
    for _ in 0..30 {
        a = x.npow(-1) * (a + 1);
    }

    let s = around_zero(&a, 2).unwrap();
    assert_eq!(s.terms(), &[(q(2, 1), -30), (q(1, 1), -29)]);
    assert_eq!(s.order(), -28);
}

#[test]
fn high_order_pole() {
    let x = Atom::new_var("x");
    let s = around_zero(&x.npow(-16000), 3).unwrap();
    assert_eq!(s.terms(), &[(q(1, 1), -16000)]);
    assert_eq!(s.order(), -15997);
}

#[test]
fn declines() {
    let x = Atom::new_var("x");

    let cases = [
        (x.log(), DeclineReason::ConstantTermNotOne),
        (x.sqrt(), DeclineReason::NotPerfectSquare),
        ((&x + 2).sqrt(), DeclineReason::NotPerfectSquare),
        ((&x - &x).npow(-1), DeclineReason::ZeroDivisor),
        (x.npow(-1).exp(), DeclineReason::Pole),
        (
            ElementaryFunction::Asin.apply(&x + 1),
            DeclineReason::ConstantTermNotZero,
        ),
        (
            x.pow(&Atom::new_num(i64::MAX)),
            DeclineReason::ExponentOutOfRange,
        ),
        (
            Atom::new_const(Constant::Pi) * &x,
            DeclineReason::SymbolicConstant(Constant::Pi),
        ),
        (&x + Atom::new_num(0.5), DeclineReason::InexactNumber),
    ];

    for (a, reason) in cases {
        assert_eq!(
            around_zero(&a, 4),
            Err(SeriesError::Decline(reason)),
            "Unexpected result for {}",
            a
        );
    }
}

#[test]
fn admissible_expressions_never_fail_internally() {
    let x = Atom::new_var("x");
    let y = Atom::new_var("y");
    let f = FunctionBuilder::new(Symbol::new("f")).add_arg(x.clone()).finish();

    let expressions = [
        x.clone(),
        x.npow(-3) * x.sin().npow(3),
        (x.sin() - &x).npow(-2),
        x.log(),
        (&x + 1).log() / &x,
        (&x + 4).npow((3, 2)),
        (&x + 4).npow((-5, 2)),
        (&x + 1).npow((2, 7)),
        (&x + 1).pow(&x.sin()),
        x.pow(&x),
        ElementaryFunction::Atanh.apply(x.npow(2)),
        ElementaryFunction::Csch.apply(x.clone()) - x.npow(-1),
        ElementaryFunction::Asinh.apply(x.sin()) * ElementaryFunction::Coth.apply(x.clone()),
        x.exp().npow(-1) + x.npow(-1),
        (&x - &x).npow(-1),
        &x + &y,
        x.sin() * Atom::new_const(Constant::E),
        &x * Atom::new_num(0.25),
        f,
    ];

    for a in &expressions {
        if !is_fast_path_eligible(a) {
            continue;
        }

        for order in 1..5 {
            match around_zero(a, order) {
                Ok(_) => {}
                Err(e) => assert!(e.is_decline(), "Unexpected error for {}: {}", a, e),
            }
        }
    }
}

#[test]
fn internal_errors() {
    let x = Atom::new_var("x");

    let f = FunctionBuilder::new(Symbol::new("f")).add_arg(x.clone()).finish();
    assert!(!is_fast_path_eligible(&f));
    assert_eq!(
        around_zero(&f, 3),
        Err(SeriesError::Internal(InternalError::UnknownFunction(
            Symbol::new("f")
        )))
    );

    let sin2 = FunctionBuilder::new(Symbol::new("sin"))
        .add_arg(x.clone())
        .add_arg(x.clone())
        .finish();
    assert!(!is_fast_path_eligible(&sin2));
    assert_eq!(
        around_zero(&sin2, 3),
        Err(SeriesError::Internal(InternalError::WrongArity {
            function: ElementaryFunction::Sin,
            args: 2
        }))
    );

    let m = Atom::Mul(Mul::new(vec![x.clone()], Atom::new_var("c")));
    assert!(!is_fast_path_eligible(&m));
    let e = around_zero(&m, 3).unwrap_err();
    assert!(!e.is_decline());
    assert_eq!(e, SeriesError::Internal(InternalError::NonNumericCoefficient));
}

#[test]
fn printing() {
    let x = Atom::new_var("x");
    let s = around_zero(&x.exp(), 3).unwrap();

    assert_eq!(
        SeriesPrinter::new_with_options(&s, PrintOptions::latex()).to_string(),
        "1+x+\\frac{1}{2} x^{2}+\\mathcal{O}\\left(x^{3}\\right)"
    );
    assert_eq!(
        SeriesPrinter::new_with_options(&s, PrintOptions::mathematica()).to_string(),
        "1+x+1/2*x^2+O[x]^3"
    );
    assert_eq!(
        SeriesPrinter::new_with_options(&s, PrintOptions::file()).to_string(),
        "1+x+1/2*x^2+O(x^3)"
    );

    let p = Equation::new(x.clone(), Atom::new_num(1));
    let s = expand_series(&x.log(), &p, 3, SeriesOptions::default()).unwrap();
    assert_eq!(s.to_string(), "(x-1)-1/2*(x-1)^2+𝒪((x-1)^3)");
    assert_eq!(
        SeriesPrinter::new_with_options(&s, PrintOptions::mathematica()).to_string(),
        "(x-1)-1/2*(x-1)^2+O[x,1]^3"
    );
}
