//! Error types and handling for the rpn-rs crate.
//!
//! Every pipeline stage reports failure through [`EvalError`]. Nothing in the
//! evaluator panics on malformed input; the first error ends the call and is
//! propagated unchanged to the caller.

extern crate alloc;
use alloc::string::String;
use core::fmt;
use core::result;

use serde::Serialize;

/// Result type used throughout the crate.
pub type Result<T> = result::Result<T, EvalError>;

/// Error type for expression evaluation.
///
/// Positions are char offsets into the expression after surrounding
/// whitespace and a dangling trailing operator have been removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EvalError {
    /// The expression contained no tokens, or evaluation left nothing on the
    /// stack.
    Empty,

    /// An operand could not be parsed as the requested numeric kind and did
    /// not name a variable.
    ///
    /// For example `3.5` is not a valid `i32`, and `x` is not a number unless
    /// a variable map supplies it.
    InvalidOperand {
        /// The offending token text
        text: String,
        /// Position of the token
        position: usize,
    },

    /// An operator found fewer operands on the stack than its arity.
    ///
    /// This is how `2+*3` and other malformed sequences surface.
    MissingOperand {
        /// Operator symbol (`~` for unary negation)
        operator: char,
        /// Position of the operator
        position: usize,
        /// Operands the operator needs
        expected: usize,
        /// Operands that were available
        found: usize,
    },

    /// A parenthesis without its partner.
    ///
    /// An unmatched `(` always fails. An unmatched `)` only fails when
    /// [`EvalOptions::strict_parentheses`](crate::context::EvalOptions) is set.
    UnmatchedParenthesis { position: usize, found: char },

    /// Integer division or remainder with a zero divisor.
    ///
    /// Float kinds follow IEEE 754 and never report this.
    DivideByZero { position: usize },

    /// Integer arithmetic left the range of the requested kind.
    Overflow { operator: char, position: usize },

    /// Evaluation finished with more than one value on the stack, e.g. `2 3`
    /// after an operator went missing.
    LeftoverOperands { count: usize },
}

impl EvalError {
    /// Stable status code used by the C API. Always positive.
    pub fn error_code(&self) -> i32 {
        match self {
            EvalError::Empty => 1,
            EvalError::InvalidOperand { .. } => 2,
            EvalError::MissingOperand { .. } => 3,
            EvalError::UnmatchedParenthesis { .. } => 4,
            EvalError::DivideByZero { .. } => 5,
            EvalError::Overflow { .. } => 6,
            EvalError::LeftoverOperands { .. } => 7,
        }
    }

    /// Position of the token the error refers to, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            EvalError::InvalidOperand { position, .. }
            | EvalError::MissingOperand { position, .. }
            | EvalError::UnmatchedParenthesis { position, .. }
            | EvalError::DivideByZero { position }
            | EvalError::Overflow { position, .. } => Some(*position),
            EvalError::Empty | EvalError::LeftoverOperands { .. } => None,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Empty => write!(f, "Empty expression"),
            EvalError::InvalidOperand { text, position } => {
                write!(f, "Invalid operand '{}' at position {}", text, position)
            }
            EvalError::MissingOperand {
                operator,
                position,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Operator '{}' at position {} expects {} operands, found {}",
                    operator, position, expected, found
                )
            }
            EvalError::UnmatchedParenthesis { position, found } => {
                write!(
                    f,
                    "Unmatched parenthesis at position {}: found '{}'",
                    position, found
                )
            }
            EvalError::DivideByZero { position } => {
                write!(f, "Division by zero at position {}", position)
            }
            EvalError::Overflow { operator, position } => {
                write!(
                    f,
                    "Integer overflow in '{}' at position {}",
                    operator, position
                )
            }
            EvalError::LeftoverOperands { count } => {
                write!(f, "Expression left {} values on the stack", count)
            }
        }
    }
}

impl core::error::Error for EvalError {}

/// Fault raised by a single arithmetic operation.
///
/// [`Numeric`](crate::numeric::Numeric) implementations return this; the
/// evaluator attaches the operator position and turns it into an
/// [`EvalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    DivideByZero,
    Overflow,
}

impl ArithmeticError {
    pub(crate) fn at(self, operator: char, position: usize) -> EvalError {
        match self {
            ArithmeticError::DivideByZero => EvalError::DivideByZero { position },
            ArithmeticError::Overflow => EvalError::Overflow { operator, position },
        }
    }
}
