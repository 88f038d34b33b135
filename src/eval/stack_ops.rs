//! Operations applied by the RPN evaluator.
//!
//! Each table operator maps to a [`StackOp`], which pops its operands off
//! the value stack and applies the matching [`Numeric`] method.

use crate::error::ArithmeticError;
use crate::numeric::Numeric;
use crate::types::{NEGATE_SYMBOL, Operator};

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

/// An operation the evaluator can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOp {
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl UnaryOp {
    /// Apply a unary operation to a value
    pub fn apply<T: Numeric>(self, operand: T) -> Result<T, ArithmeticError> {
        match self {
            UnaryOp::Negate => operand.neg(),
        }
    }
}

impl BinaryOp {
    /// Apply a binary operation to two values in source order
    pub fn apply<T: Numeric>(self, left: T, right: T) -> Result<T, ArithmeticError> {
        match self {
            BinaryOp::Add => left.add(right),
            BinaryOp::Subtract => left.sub(right),
            BinaryOp::Multiply => left.mul(right),
            BinaryOp::Divide => left.div(right),
            BinaryOp::Modulo => left.rem(right),
            BinaryOp::Power => left.pow(right),
        }
    }
}

impl StackOp {
    /// Maps a table operator to its operation.
    pub fn from_operator(op: &Operator) -> Option<StackOp> {
        let stack_op = match op.symbol {
            NEGATE_SYMBOL => StackOp::Unary(UnaryOp::Negate),
            '+' => StackOp::Binary(BinaryOp::Add),
            '-' => StackOp::Binary(BinaryOp::Subtract),
            '*' => StackOp::Binary(BinaryOp::Multiply),
            '/' => StackOp::Binary(BinaryOp::Divide),
            '%' => StackOp::Binary(BinaryOp::Modulo),
            '^' => StackOp::Binary(BinaryOp::Power),
            _ => return None,
        };
        Some(stack_op)
    }

    pub fn arity(self) -> usize {
        match self {
            StackOp::Unary(_) => 1,
            StackOp::Binary(_) => 2,
        }
    }
}
