//! Stack machine over postfix terms.

extern crate alloc;
use alloc::string::ToString;
use alloc::vec::Vec;

use crate::error::{EvalError, Result};
use crate::eval::stack_ops::StackOp;
use crate::numeric::Numeric;
use crate::types::{Operator, Term, TokenKind};

/// Initial capacity for the value stack (tuned for typical expressions)
const INITIAL_VALUE_CAPACITY: usize = 16;

/// Evaluates postfix terms to a single value of one numeric kind.
///
/// The value stack keeps its allocation between calls to [`RpnEvaluator::eval`].
pub struct RpnEvaluator<T> {
    stack: Vec<T>,
}

impl<T: Numeric> Default for RpnEvaluator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> RpnEvaluator<T> {
    pub fn new() -> Self {
        Self {
            stack: Vec::with_capacity(INITIAL_VALUE_CAPACITY),
        }
    }

    /// Runs the machine over `terms`. Stops at the first error.
    pub fn eval<'a, I>(&mut self, terms: I) -> Result<T>
    where
        I: IntoIterator<Item = Term<'a, T>>,
    {
        self.stack.clear();
        for term in terms {
            self.step(term)?;
        }
        self.finish()
    }

    fn step(&mut self, term: Term<'_, T>) -> Result<()> {
        let token = match term {
            Term::Value { value, .. } => {
                self.stack.push(value);
                return Ok(());
            }
            Term::Token(token) => token,
        };

        match token.kind {
            TokenKind::Operand => {
                let value = T::parse_literal(&token.text).ok_or_else(|| {
                    EvalError::InvalidOperand {
                        text: token.text.into_owned(),
                        position: token.position,
                    }
                })?;
                self.stack.push(value);
                Ok(())
            }
            // Only an unmatched '(' survives conversion
            TokenKind::Open => Err(EvalError::UnmatchedParenthesis {
                position: token.position,
                found: '(',
            }),
            TokenKind::Close => Err(EvalError::UnmatchedParenthesis {
                position: token.position,
                found: ')',
            }),
            TokenKind::Operator(op) => self.apply(op, token.position),
        }
    }

    fn apply(&mut self, op: &Operator, position: usize) -> Result<()> {
        let stack_op = StackOp::from_operator(op).ok_or_else(|| EvalError::InvalidOperand {
            text: op.symbol.to_string(),
            position,
        })?;

        let found = self.stack.len();
        if found < stack_op.arity() {
            return Err(EvalError::MissingOperand {
                operator: op.symbol,
                position,
                expected: stack_op.arity(),
                found,
            });
        }

        let result = match stack_op {
            StackOp::Unary(unary) => {
                let operand = self.pop();
                unary.apply(operand)
            }
            StackOp::Binary(binary) => {
                let right = self.pop();
                let left = self.pop();
                binary.apply(left, right)
            }
        };
        let value = result.map_err(|fault| fault.at(op.symbol, position))?;
        self.stack.push(value);
        Ok(())
    }

    // Callers check the depth first.
    fn pop(&mut self) -> T {
        self.stack.pop().unwrap_or_default()
    }

    fn finish(&mut self) -> Result<T> {
        match self.stack.len() {
            0 => Err(EvalError::Empty),
            1 => Ok(self.pop()),
            count => Err(EvalError::LeftoverOperands { count }),
        }
    }
}

/// Evaluates a postfix sequence with a fresh evaluator.
pub fn eval_postfix<'a, T, I>(terms: I) -> Result<T>
where
    T: Numeric,
    I: IntoIterator<Item = Term<'a, T>>,
{
    RpnEvaluator::new().eval(terms)
}
