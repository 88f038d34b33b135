//! Property-based tests for the evaluation pipeline
//!
//! These cover literal handling, operator precedence against native Rust
//! arithmetic, and robustness against arbitrary input.

use proptest::prelude::*;
use rpn_rs::engine::{eval, eval_with, evaluate};

/// Generate short expressions from the operator alphabet
fn expression_strategy() -> impl Strategy<Value = String> {
    "[0-9xy+*/%^()-]{0,16}".prop_map(|s| s.to_string())
}

/// Generate small operands so products stay in range
fn small_int() -> impl Strategy<Value = i64> {
    -100i64..100
}

proptest! {
    /// A bare literal evaluates to exactly what the standard parser returns
    #[test]
    fn prop_integer_literal_round_trip(n in any::<i32>()) {
        prop_assert_eq!(evaluate::<i32>(&n.to_string()), (true, n));
        prop_assert_eq!(eval::<i64>(&n.to_string()), Ok(n as i64));
    }

    #[test]
    fn prop_float_literal_round_trip(x in -1.0e12..1.0e12f64) {
        prop_assert_eq!(eval::<f64>(&x.to_string()), Ok(x));
    }

    /// Multiplication binds tighter than addition
    #[test]
    fn prop_precedence(a in small_int(), b in small_int(), c in small_int()) {
        prop_assert_eq!(eval::<i64>(&format!("{}+{}*{}", a, b, c)), Ok(a + b * c));
        prop_assert_eq!(eval::<i64>(&format!("{}*{}+{}", a, b, c)), Ok(a * b + c));
        prop_assert_eq!(eval::<i64>(&format!("({}+{})*{}", a, b, c)), Ok((a + b) * c));
    }

    /// Subtraction groups left to right
    #[test]
    fn prop_left_associative_subtraction(a in small_int(), b in small_int(), c in small_int()) {
        prop_assert_eq!(eval::<i64>(&format!("{}-{}-{}", a, b, c)), Ok(a - b - c));
    }

    /// Integer division and remainder agree with Rust's truncating semantics
    #[test]
    fn prop_integer_division(a in -10_000i32..10_000, b in -100i32..100) {
        prop_assume!(b != 0);
        prop_assert_eq!(eval::<i32>(&format!("{}/{}", a, b)), Ok(a / b));
        prop_assert_eq!(eval::<i32>(&format!("{}%{}", a, b)), Ok(a % b));
    }

    /// Variables behave like their literal values
    #[test]
    fn prop_variables_match_literals(x in small_int(), y in small_int()) {
        let vars = [("x", x), ("y", y)];
        let with_vars = eval_with::<i64, _>("x*y-(x+y)", &vars);
        let inline = eval::<i64>(&format!("{}*{}-({}+{})", x, y, x, y));
        prop_assert_eq!(with_vars, inline);
    }

    /// Evaluation never panics and is deterministic in every kind
    #[test]
    fn prop_never_panics_and_is_idempotent(expr in expression_strategy(), x in small_int()) {
        let vars = [("x", x), ("y", 3)];
        let first = eval_with::<i64, _>(&expr, &vars);
        prop_assert_eq!(eval_with::<i64, _>(&expr, &vars), first);

        let _ = eval::<i32>(&expr);
        let _ = eval::<f32>(&expr);
        let (ok, value) = evaluate::<f64>(&expr);
        if !ok {
            prop_assert_eq!(value, 0.0);
        }
    }

    /// Arbitrary text never panics
    #[test]
    fn prop_arbitrary_text(expr in "\\PC{0,24}") {
        let _ = eval::<i32>(&expr);
        let _ = eval::<i64>(&expr);
        let _ = eval::<f32>(&expr);
        let _ = eval::<f64>(&expr);
    }
}
