use crate::*;

fn eval(src: &str, v: f64) -> f64 {
    Expr::parse(src).unwrap().eval(v)
}

#[test]
fn expr_arithmetic_follows_usual_precedence() {
    assert_eq!(eval("1 + 2 * 3", 0.0), 7.0);
    assert_eq!(eval("(1 + 2) * 3", 0.0), 9.0);
    assert_eq!(eval("8 / 4 / 2", 0.0), 1.0);
    assert_eq!(eval("2^3^2", 0.0), 512.0);
    assert_eq!(eval("2**3", 0.0), 8.0);
}

#[test]
fn expr_unary_minus_binds_looser_than_power() {
    assert_eq!(eval("-x^2", 3.0), -9.0);
    assert_eq!(eval("(-x)^2", 3.0), 9.0);
    assert_eq!(eval("2^-1", 0.0), 0.5);
    assert_eq!(eval("x − 1", 3.0), 2.0);
}

#[test]
fn expr_implicit_multiplication() {
    assert_eq!(eval("2x + 1", 1.0), 3.0);
    assert_eq!(eval("3(x + 1)", 1.0), 6.0);
    assert_eq!(eval("x^2 - 4x + 3", 2.0), -1.0);
    assert!((eval("x sin(x)", 1.0) - 1.0f64.sin()).abs() < 1e-12);
    assert!((eval("2pi", 0.0) - std::f64::consts::TAU).abs() < 1e-12);
}

#[test]
fn expr_functions_and_constants() {
    assert!((eval("sin(pi/2)", 0.0) - 1.0).abs() < 1e-12);
    assert!((eval("ln(e)", 0.0) - 1.0).abs() < 1e-12);
    assert!((eval("log(e)", 0.0) - 1.0).abs() < 1e-12);
    assert!((eval("log10(1000)", 0.0) - 3.0).abs() < 1e-12);
    assert_eq!(eval("abs(x - 3)", 1.0), 2.0);
    assert_eq!(eval("sqrt(16)", 0.0), 4.0);
    assert!((eval("cos(rad(60))", 0.0) - 0.5).abs() < 1e-12);
    assert!((eval("deg(π)", 0.0) - 180.0).abs() < 1e-12);
}

#[test]
fn expr_division_by_zero_is_not_finite() {
    assert!(!eval("1/(x - 2)", 2.0).is_finite());
    assert!(eval("ln(x)", -1.0).is_nan());
}

#[test]
fn expr_tracks_its_variable() {
    assert_eq!(Expr::parse("cos(t)").unwrap().variable(), Some("t"));
    assert_eq!(Expr::parse("sin(θ)").unwrap().variable(), Some("theta"));
    assert_eq!(Expr::parse("42").unwrap().variable(), None);
}

#[test]
fn expr_rejects_mixed_variables() {
    assert_eq!(
        Expr::parse("x + t").unwrap_err(),
        ExprError::MixedVariables {
            first: "x".to_string(),
            second: "t".to_string(),
        }
    );
}

#[test]
fn expr_reports_syntax_errors() {
    assert_eq!(Expr::parse("  ").unwrap_err(), ExprError::Empty);
    assert_eq!(Expr::parse("1 +").unwrap_err(), ExprError::UnexpectedEnd);
    assert_eq!(
        Expr::parse("foo(x)").unwrap_err(),
        ExprError::UnknownFunction {
            name: "foo".to_string()
        }
    );
    assert_eq!(
        Expr::parse("y + 1").unwrap_err(),
        ExprError::UnknownIdentifier {
            name: "y".to_string()
        }
    );
    assert!(matches!(
        Expr::parse("(x + 1").unwrap_err(),
        ExprError::UnexpectedEnd
    ));
    assert!(matches!(
        Expr::parse("x $ 2").unwrap_err(),
        ExprError::InvalidCharacter { offset: 2 }
    ));
}

#[test]
fn expr_serializes_as_its_source_text() {
    let e: Expr = serde_json::from_str("\"x^2 + 1\"").unwrap();
    assert_eq!(e.eval(2.0), 5.0);
    assert_eq!(serde_json::to_string(&e).unwrap(), "\"x^2 + 1\"");
}
