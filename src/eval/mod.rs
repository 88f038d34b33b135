//! Postfix evaluation for rpn-rs
//!
//! This module contains the stack machine that turns a postfix sequence into
//! one value, and the operator semantics it applies.

pub mod evaluator;
pub mod stack_ops;

pub use evaluator::*;
pub use stack_ops::*;
