//! Expression conversion and the public evaluation entry points.
//!
//! Evaluation runs in fixed stages: a literal fast path, tokenization, unary
//! resolution, shunting-yard conversion to postfix, variable substitution and
//! finally the RPN evaluator. Each stage hands the next one an owned sequence,
//! and the first error ends the call.

extern crate alloc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::context::{EvalOptions, NoVariables, Variables, substitute};
use crate::error::{EvalError, Result};
use crate::eval::RpnEvaluator;
use crate::lexer::{resolve_unary, tokenize};
use crate::numeric::Numeric;
use crate::types::{Operator, Token, TokenKind};

/// Initial capacity for the operator stack (tuned for typical expressions)
const INITIAL_OPERATOR_CAPACITY: usize = 8;

/// Converts infix tokens (with unary minus already resolved) to postfix.
///
/// Operators of equal precedence are popped before pushing a left-associative
/// operator, and kept for a right-associative one. An unmatched `)` is skipped
/// and an unmatched `(` is passed through to the output, unless
/// `options.strict_parentheses` is set, in which case both are errors.
pub fn infix_to_postfix<'a>(
    tokens: Vec<Token<'a>>,
    options: &EvalOptions,
) -> Result<Vec<Token<'a>>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token<'a>> = Vec::with_capacity(INITIAL_OPERATOR_CAPACITY);

    for token in tokens {
        match token.kind {
            TokenKind::Operand => output.push(token),
            TokenKind::Open => stack.push(token),
            TokenKind::Close => {
                let mut matched = false;
                while let Some(top) = stack.pop() {
                    if top.kind == TokenKind::Open {
                        matched = true;
                        break;
                    }
                    output.push(top);
                }
                if !matched && options.strict_parentheses {
                    return Err(EvalError::UnmatchedParenthesis {
                        position: token.position,
                        found: ')',
                    });
                }
            }
            TokenKind::Operator(op) => {
                while stack.last().is_some_and(|top| blocks(op, top)) {
                    if let Some(top) = stack.pop() {
                        output.push(top);
                    }
                }
                stack.push(token);
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top.kind == TokenKind::Open && options.strict_parentheses {
            return Err(EvalError::UnmatchedParenthesis {
                position: top.position,
                found: '(',
            });
        }
        output.push(top);
    }

    Ok(output)
}

/// Tokenizes, resolves unary minus and converts an expression to postfix.
///
/// ```
/// use rpn_rs::context::EvalOptions;
/// use rpn_rs::engine::to_postfix;
///
/// let postfix = to_postfix("2+3*4", &EvalOptions::default()).unwrap();
/// let texts: Vec<_> = postfix.iter().map(|t| t.to_string()).collect();
/// assert_eq!(texts, ["2", "3", "4", "*", "+"]);
/// ```
pub fn to_postfix<'a>(expression: &'a str, options: &EvalOptions) -> Result<Vec<Token<'a>>> {
    let mut tokens = tokenize(expression, options);
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }
    resolve_unary(&mut tokens, options);
    log::trace!("tokens of {:?}: {}", expression, join(&tokens));

    let postfix = infix_to_postfix(tokens, options)?;
    log::trace!("postfix of {:?}: {}", expression, join(&postfix));
    Ok(postfix)
}

/// The postfix form of an expression as space-separated text, with unary
/// negation written as [`NEGATE_SYMBOL`](crate::types::NEGATE_SYMBOL).
///
/// ```
/// use rpn_rs::engine::postfix_string;
///
/// assert_eq!(postfix_string("-3+5").unwrap(), "3 ~ 5 +");
/// assert_eq!(postfix_string("2^3^2").unwrap(), "2 3 2 ^ ^");
/// ```
pub fn postfix_string(expression: &str) -> Result<String> {
    let postfix = to_postfix(expression, &EvalOptions::default())?;
    Ok(join(&postfix))
}

fn join(tokens: &[Token<'_>]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Evaluates an expression in the numeric kind `T`.
///
/// # Examples
///
/// ```
/// use rpn_rs::engine::eval;
///
/// assert_eq!(eval::<i32>("2+3*4"), Ok(14));
/// assert_eq!(eval::<i64>("7/2"), Ok(3));
/// assert_eq!(eval::<f64>("7/2"), Ok(3.5));
/// ```
///
/// Failures carry the stage and position:
///
/// ```
/// use rpn_rs::engine::eval;
/// use rpn_rs::error::EvalError;
///
/// match eval::<i32>("2+*3") {
///     Err(EvalError::MissingOperand { operator, .. }) => assert_eq!(operator, '+'),
///     other => panic!("unexpected result: {:?}", other),
/// }
/// ```
pub fn eval<T: Numeric>(expression: &str) -> Result<T> {
    eval_with_options(expression, &NoVariables, &EvalOptions::default())
}

/// Evaluates an expression, replacing operands that name a variable with its
/// value.
///
/// ```
/// use std::collections::HashMap;
/// use rpn_rs::engine::eval_with;
///
/// let mut vars = HashMap::new();
/// vars.insert("x", 10);
/// assert_eq!(eval_with::<i32, _>("x*2", &vars), Ok(20));
/// ```
pub fn eval_with<T, V>(expression: &str, variables: &V) -> Result<T>
where
    T: Numeric,
    V: Variables<T> + ?Sized,
{
    eval_with_options(expression, variables, &EvalOptions::default())
}

/// Evaluates an expression with explicit [`EvalOptions`].
pub fn eval_with_options<T, V>(expression: &str, variables: &V, options: &EvalOptions) -> Result<T>
where
    T: Numeric,
    V: Variables<T> + ?Sized,
{
    // Bare literals skip the pipeline. This is also the only way an exponent
    // with a sign ("1e-5") is read, since '-' splits operands.
    if let Some(value) = T::parse_literal(expression) {
        return Ok(value);
    }

    let result = to_postfix(expression, options).and_then(|postfix| {
        let terms = substitute::<T, V>(postfix, variables);
        RpnEvaluator::new().eval(terms)
    });

    if let Err(err) = &result {
        log::debug!("{} evaluation of {:?} failed: {}", T::KIND, expression, err);
    }
    result
}

/// Evaluates an expression and reports success as a flag.
///
/// On failure the value is `T::default()`, i.e. zero.
///
/// ```
/// use rpn_rs::engine::evaluate;
///
/// assert_eq!(evaluate::<i32>("(2+3)*4"), (true, 20));
/// assert_eq!(evaluate::<i32>(""), (false, 0));
/// ```
pub fn evaluate<T: Numeric>(expression: &str) -> (bool, T) {
    into_flag(eval(expression))
}

/// Flag form of [`eval_with`].
pub fn evaluate_with<T, V>(expression: &str, variables: &V) -> (bool, T)
where
    T: Numeric,
    V: Variables<T> + ?Sized,
{
    into_flag(eval_with(expression, variables))
}

fn into_flag<T: Numeric>(result: Result<T>) -> (bool, T) {
    match result {
        Ok(value) => (true, value),
        Err(_) => (false, T::default()),
    }
}

/// Whether `top` is an operator that must be output before `op` is pushed.
fn blocks(op: &Operator, top: &Token<'_>) -> bool {
    top.operator().is_some_and(|top| op.yields_to(top))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;
    use alloc::collections::BTreeMap;

    fn postfix(expression: &str) -> String {
        postfix_string(expression).unwrap()
    }

    #[test]
    fn test_precedence_and_grouping() {
        assert_eq!(postfix("2+3*4"), "2 3 4 * +");
        assert_eq!(postfix("(2+3)*4"), "2 3 + 4 *");
        assert_eq!(postfix("8-3-2"), "8 3 - 2 -");
        assert_eq!(postfix("2^3^2"), "2 3 2 ^ ^");
        assert_eq!(postfix("6/2%4*x"), "6 2 / 4 % x *");
    }

    #[test]
    fn test_unary_in_postfix() {
        assert_eq!(postfix("-3+5"), "3 ~ 5 +");
        assert_eq!(postfix("5*-2"), "5 2 ~ *");
        assert_eq!(postfix("-(1+2)"), "1 2 + ~");
    }

    #[test]
    fn test_tolerant_parentheses() {
        assert_eq!(postfix("2)+3"), "2 3 +");
        assert_eq!(postfix("(2+3"), "2 3 + (");
    }

    #[test]
    fn test_strict_parentheses() {
        let strict = EvalOptions {
            strict_parentheses: true,
            ..EvalOptions::default()
        };
        assert_eq!(
            to_postfix("2)+3", &strict),
            Err(EvalError::UnmatchedParenthesis {
                position: 1,
                found: ')'
            })
        );
        assert_eq!(
            to_postfix("1+(2+3", &strict),
            Err(EvalError::UnmatchedParenthesis {
                position: 2,
                found: '('
            })
        );
        assert!(to_postfix("(1+(2))*3", &strict).is_ok());
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(postfix_string(""), Err(EvalError::Empty));
        assert_eq!(eval::<i32>("   "), Err(EvalError::Empty));
        assert_eq!(evaluate::<f64>(""), (false, 0.0));
    }

    #[test]
    fn test_eval_kinds() {
        assert_eq!(eval::<i32>("2+3*4"), Ok(14));
        assert_eq!(eval::<i64>("(2+3)*4"), Ok(20));
        assert_eq!(eval::<i32>("2^3^2"), Ok(512));
        assert_eq!(eval::<i32>("-3+5"), Ok(2));
        assert_eq!(eval::<i32>("5*-2"), Ok(-10));
        assert_eq!(eval::<i32>("7/2"), Ok(3));
        assert_eq!(eval::<f32>("7/2"), Ok(3.5));
        assert_eq!(eval::<i32>("-7%3"), Ok(-1));
        assert_approx_eq!(eval::<f64>("1.5*2,5").unwrap(), 3.75f64);
    }

    #[test]
    fn test_minus_after_close_paren() {
        assert_eq!(postfix("(2)-3"), "2 3 ~");
        assert_eq!(
            eval::<i32>("(2)-3"),
            Err(EvalError::LeftoverOperands { count: 2 })
        );
        assert_eq!(
            eval::<i32>("(1+2)-3"),
            Err(EvalError::LeftoverOperands { count: 2 })
        );
        assert_eq!(evaluate::<i64>("(2)-3"), (false, 0));

        let options = EvalOptions {
            binary_minus_after_close: true,
            ..EvalOptions::default()
        };
        assert_eq!(eval_with_options::<i32, _>("(2)-3", &NoVariables, &options), Ok(-1));
        assert_eq!(eval_with_options::<i32, _>("(1+2)-3", &NoVariables, &options), Ok(0));
        assert_eq!(eval_with_options::<i32, _>("(5)-(-3)", &NoVariables, &options), Ok(8));
        assert_eq!(eval_with_options::<i32, _>("-(2)-3", &NoVariables, &options), Ok(-5));
    }

    #[test]
    fn test_literal_fast_path() {
        assert_eq!(eval::<i32>("-5"), Ok(-5));
        assert_eq!(eval::<f64>("1e-5"), Ok(1e-5));
        assert_eq!(eval::<f32>("2.5f"), Ok(2.5));
        assert!(eval::<f64>("inf").unwrap().is_infinite());
    }

    #[test]
    fn test_trailing_operator() {
        assert_eq!(eval::<i32>("3+"), Ok(3));
        let keep = EvalOptions {
            trim_trailing_operator: false,
            ..EvalOptions::default()
        };
        assert!(matches!(
            eval_with_options::<i32, _>("3+", &NoVariables, &keep),
            Err(EvalError::MissingOperand { operator: '+', .. })
        ));
    }

    #[test]
    fn test_malformed_expressions() {
        assert!(matches!(
            eval::<i32>("2+*3"),
            Err(EvalError::MissingOperand { .. })
        ));
        assert_eq!(evaluate::<i32>("2+*3"), (false, 0));
        assert!(matches!(
            eval::<i32>("(2+3"),
            Err(EvalError::UnmatchedParenthesis { found: '(', .. })
        ));
        assert_eq!(
            eval::<i32>("3.5+1"),
            Err(EvalError::InvalidOperand {
                text: "3.5".to_string(),
                position: 0
            })
        );
    }

    #[test]
    fn test_equal_precedence_unary_chains_fail() {
        assert!(eval::<i32>("--3").is_err());
        assert!(eval::<f64>("2^-1").is_err());
        assert_eq!(eval::<f64>("2^(-1)"), Ok(0.5));
    }

    #[test]
    fn test_integer_faults() {
        assert_eq!(
            eval::<i32>("1/(2-2)"),
            Err(EvalError::DivideByZero { position: 1 })
        );
        assert_eq!(
            eval::<i32>("2147483647+1"),
            Err(EvalError::Overflow {
                operator: '+',
                position: 10
            })
        );
        assert_eq!(eval::<i64>("2147483647+1"), Ok(2_147_483_648));
    }

    #[test]
    fn test_variables() {
        let mut vars = BTreeMap::new();
        vars.insert("x", 10);
        vars.insert("rate", 3);
        assert_eq!(eval_with::<i32, _>("x*2", &vars), Ok(20));
        assert_eq!(evaluate_with::<i32, _>("(x - rate) * -rate", &vars), (true, -21));
        assert_eq!(evaluate_with::<i32, _>("y+1", &vars), (false, 0));

        let floats = [("pi", core::f64::consts::PI)];
        assert_approx_eq!(
            eval_with::<f64, _>("2*pi", &floats).unwrap(),
            core::f64::consts::TAU
        );
    }

    #[test]
    fn test_idempotent() {
        let first = evaluate::<f64>("3.5*(2-7)^2/4");
        for _ in 0..3 {
            assert_eq!(evaluate::<f64>("3.5*(2-7)^2/4"), first);
        }
    }
}
