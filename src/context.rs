//! Evaluation settings and variable sources.
//!
//! [`EvalOptions`] controls the permissive parts of the pipeline.
//! [`Variables`] abstracts over the caller-owned name to value mapping used
//! for substitution; it is implemented for the common map types so callers
//! can pass what they already have.

extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

use serde::{Deserialize, Serialize};

use crate::numeric::Numeric;
use crate::types::{Term, Token, TokenKind};

/// Settings for a single evaluation.
///
/// The defaults reproduce the permissive behaviour of the evaluator: a
/// dangling trailing operator is ignored, an unmatched `)` is skipped and a
/// `-` after any parenthesis is negation.
///
/// Options can be loaded from configuration; missing fields take their
/// default values.
///
/// ```
/// use rpn_rs::context::EvalOptions;
///
/// let options = EvalOptions {
///     strict_parentheses: true,
///     ..EvalOptions::default()
/// };
/// assert!(options.trim_trailing_operator);
/// assert!(!options.binary_minus_after_close);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    /// Reject an unmatched `)` (and report an unmatched `(` during
    /// conversion) instead of skipping it.
    pub strict_parentheses: bool,
    /// Strip a dangling operator at the end of the expression, so `"3+"`
    /// evaluates as `"3"`.
    pub trim_trailing_operator: bool,
    /// Treat `)` as the end of an operand, so a `-` after it subtracts and
    /// `"(2)-3"` evaluates to `-1`. Off by default, where that `-` negates.
    pub binary_minus_after_close: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            strict_parentheses: false,
            trim_trailing_operator: true,
            binary_minus_after_close: false,
        }
    }
}

/// A read-only source of variable values for one numeric kind.
pub trait Variables<T> {
    /// Value of the variable called `name`, if there is one.
    fn get_value(&self, name: &str) -> Option<T>;
}

/// An empty variable source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariables;

impl<T> Variables<T> for NoVariables {
    fn get_value(&self, _name: &str) -> Option<T> {
        None
    }
}

#[cfg(feature = "std")]
impl<K, T, S> Variables<T> for std::collections::HashMap<K, T, S>
where
    K: Borrow<str> + Eq + Hash,
    T: Copy,
    S: BuildHasher,
{
    fn get_value(&self, name: &str) -> Option<T> {
        self.get(name).copied()
    }
}

impl<K, T> Variables<T> for BTreeMap<K, T>
where
    K: Borrow<str> + Ord,
    T: Copy,
{
    fn get_value(&self, name: &str) -> Option<T> {
        self.get(name).copied()
    }
}

/// Fixed-capacity maps, e.g. `FnvIndexMap<heapless::String<16>, i32, 8>`.
impl<K, T, S, const N: usize> Variables<T> for heapless::IndexMap<K, T, S, N>
where
    K: AsRef<str> + Eq + Hash,
    T: Copy,
    S: BuildHasher,
{
    fn get_value(&self, name: &str) -> Option<T> {
        self.iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| *value)
    }
}

impl<K, T> Variables<T> for [(K, T)]
where
    K: AsRef<str>,
    T: Copy,
{
    fn get_value(&self, name: &str) -> Option<T> {
        self.iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| *value)
    }
}

impl<K, T, const N: usize> Variables<T> for [(K, T); N]
where
    K: AsRef<str>,
    T: Copy,
{
    fn get_value(&self, name: &str) -> Option<T> {
        self.as_slice().get_value(name)
    }
}

impl<K, T> Variables<T> for Vec<(K, T)>
where
    K: AsRef<str>,
    T: Copy,
{
    fn get_value(&self, name: &str) -> Option<T> {
        self.as_slice().get_value(name)
    }
}

/// Replaces every operand token that names a variable with its value.
///
/// Substitution runs before literal parsing, so a variable named like a
/// literal takes precedence over it. Other tokens pass through unchanged.
pub fn substitute<'a, T, V>(postfix: Vec<Token<'a>>, variables: &V) -> Vec<Term<'a, T>>
where
    T: Numeric,
    V: Variables<T> + ?Sized,
{
    postfix
        .into_iter()
        .map(|token| {
            if token.kind == TokenKind::Operand {
                if let Some(value) = variables.get_value(&token.text) {
                    log::trace!("substituted {} = {}", token.text, value);
                    return Term::Value {
                        value,
                        position: token.position,
                    };
                }
            }
            Term::Token(token)
        })
        .collect()
}
