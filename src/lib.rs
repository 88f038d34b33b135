#![cfg_attr(not(feature = "std"), no_std)]
#![doc = r#"
# rpn-rs

A small, no_std-friendly arithmetic expression evaluator built on the
shunting-yard algorithm and a reverse Polish notation (RPN) stack machine.

## Overview

rpn-rs evaluates expressions such as `(x - 3) * -2 ^ 2` in one of four
numeric kinds: `i32`, `i64`, `f32` or `f64`. The result is either a typed
value or a structured [`EvalError`](error::EvalError); malformed input never
panics.

Key features:
- Integer and floating evaluation from the same expression text
- Binary `+ - * / % ^`, unary negation and parentheses
- Named variables from any map type via the [`Variables`](context::Variables) trait
- Checked integer arithmetic: division by zero and overflow are errors
- Stage access (tokens, postfix form) for inspection
- No_std compatibility with the `alloc` crate
- Optional C FFI for calling from non-Rust code

## Quick Start

```rust
use rpn_rs::engine::{eval, evaluate};

fn main() {
    let result = eval::<i32>("2 + 3 * 4").unwrap();
    assert_eq!(result, 14); // 2 + (3 * 4) = 14

    // Integer division truncates, float division does not
    assert_eq!(eval::<i64>("7/2"), Ok(3));
    assert_eq!(eval::<f64>("7/2"), Ok(3.5));

    // Flag form: failure yields (false, 0)
    assert_eq!(evaluate::<i32>("2+*3"), (false, 0));
}
```

## Using Variables

Operands that exactly match a variable name are replaced with its value
before evaluation. Anything implementing [`Variables`](context::Variables)
works: `HashMap`, `BTreeMap`, `heapless::IndexMap`, or a slice of pairs.

```rust
use rpn_rs::engine::eval_with;
use std::collections::HashMap;

fn main() {
    let mut vars = HashMap::new();
    vars.insert("width", 12.5);
    vars.insert("height", 4.0);

    let area = eval_with::<f64, _>("width * height", &vars).unwrap();
    assert_eq!(area, 50.0);

    let pairs = [("x", 10)];
    assert_eq!(eval_with::<i32, _>("x*2", &pairs), Ok(20));
}
```

## Literals

Operand text is read with the standard parser of the requested kind after
normalization: a trailing `f` suffix is dropped and `,` is accepted as the
decimal point, so `2,5f` is `2.5`. A whole expression that is a literal is
returned without tokenizing, which is also how `1e-5` is read.

## Operator Precedence and Associativity

From lowest to highest precedence:

| Precedence | Operators      | Associativity |
|------------|----------------|---------------|
| 2          | `+` `-`        | Left          |
| 3          | `*` `/` `%`    | Left          |
| 4          | `^`            | Right         |
| 4          | unary `-`      | Left          |

A `-` is unary at the start of the expression and after an operator or a
parenthesis, so `(2)-3` does not evaluate unless
`EvalOptions::binary_minus_after_close` is set.
Because unary negation shares the precedence of `^`, `2^-1` does not
evaluate; write `2^(-1)`.

## Error Handling

```rust
use rpn_rs::engine::eval;
use rpn_rs::error::EvalError;

fn main() {
    match eval::<i32>("10 / (5 - 5)") {
        Err(EvalError::DivideByZero { position }) => println!("division by zero at {}", position),
        other => println!("unexpected: {:?}", other),
    }

    match eval::<i32>("3.5 + 1") {
        Err(EvalError::InvalidOperand { text, .. }) => assert_eq!(text, "3.5"),
        other => panic!("unexpected: {:?}", other),
    }
}
```

Parentheses are permissive by default: an unmatched `)` is skipped. Set
[`EvalOptions::strict_parentheses`](context::EvalOptions) to reject it.

## Feature Flags

- `std` (default): `HashMap` support for variables. Without it the crate is
  `no_std` and needs only `alloc`.

Logging goes through the `log` facade; install any logger to see token and
postfix traces.
"#]

extern crate alloc;

pub mod context;
pub mod engine;
pub mod error;
pub mod eval;
pub mod ffi;
pub mod lexer;
pub mod numeric;
pub mod types;

pub use context::*;
pub use engine::*;
pub use error::{EvalError, Result};
pub use numeric::{Numeric, NumericKind};
pub use types::*;

pub use ffi::*;

pub mod constants {
    pub const TEST_PRECISION_F32: f32 = 1e-6;
    pub const TEST_PRECISION_F64: f64 = 1e-10;
}

/// Utility macro to check if two floating point values are approximately equal
/// within a specified epsilon. Supports optional format arguments like assert_eq!.
///
/// The two-argument form compares `f64` values; pass an epsilon such as
/// [`constants::TEST_PRECISION_F32`] for `f32`.
#[macro_export]
macro_rules! assert_approx_eq {
    // Case 1: assert_approx_eq!(left, right) -> use default epsilon
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, $crate::constants::TEST_PRECISION_F64)
    };
    // Case 2: assert_approx_eq!(left, right, epsilon) -> use specified epsilon
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {{
        let left_val = $left;
        let right_val = $right;
        let eps = $epsilon;

        if left_val.is_nan() && right_val.is_nan() {
            // NaN == NaN for our purposes
        } else if left_val.is_infinite()
            && right_val.is_infinite()
            && left_val.signum() == right_val.signum()
        {
            // Same-signed infinities are equal
        } else {
            assert!(
                (left_val - right_val).abs() < eps,
                "assertion failed: `(left ≈ right)` (left: `{}`, right: `{}`, epsilon: `{}`)",
                left_val,
                right_val,
                eps
            );
        }
    }};
    // Case 3: assert_approx_eq!(left, right, epsilon, "format message with args", args...)
    ($left:expr, $right:expr, $epsilon:expr, $($arg:tt)+) => {{
        let left_val = $left;
        let right_val = $right;
        let eps = $epsilon;

        if left_val.is_nan() && right_val.is_nan() {
            // NaN == NaN for our purposes
        } else if left_val.is_infinite()
            && right_val.is_infinite()
            && left_val.signum() == right_val.signum()
        {
            // Same-signed infinities are equal
        } else {
            assert!((left_val - right_val).abs() < eps, $($arg)+);
        }
    }};
}
