//! Type definitions for the tokenizer, converter and evaluator.
//!
//! This module holds the fixed operator table, the character classes the
//! tokenizer splits on, and the token types that flow through the pipeline.

extern crate alloc;
use alloc::borrow::Cow;

use bitflags::bitflags;
use core::fmt;
use serde::Serialize;

/// Tie-break direction for operators of equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Associativity {
    Left,
    Right,
}

/// An entry of the operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Operator {
    /// Character the operator is written with.
    pub symbol: char,
    /// Rank; higher binds tighter.
    pub precedence: u8,
    /// Number of operands consumed.
    pub arity: usize,
    pub associativity: Associativity,
}

/// Symbol of the unary negation entry. It is never a control character of
/// the input, so no input text can produce it directly.
pub const NEGATE_SYMBOL: char = '~';

const fn op(symbol: char, precedence: u8, arity: usize, associativity: Associativity) -> Operator {
    Operator {
        symbol,
        precedence,
        arity,
        associativity,
    }
}

/// The operator table. One entry per symbol.
pub static OPERATORS: [Operator; 7] = [
    op('-', 2, 2, Associativity::Left),
    op('+', 2, 2, Associativity::Left),
    op('/', 3, 2, Associativity::Left),
    op('*', 3, 2, Associativity::Left),
    op('%', 3, 2, Associativity::Left),
    op('^', 4, 2, Associativity::Right),
    op(NEGATE_SYMBOL, 4, 1, Associativity::Left),
];

impl Operator {
    /// Finds the table entry for `symbol`.
    pub fn lookup(symbol: char) -> Option<&'static Operator> {
        OPERATORS.iter().find(|op| op.symbol == symbol)
    }

    /// Finds a binary operator, i.e. one that can appear in input text.
    pub fn binary(symbol: char) -> Option<&'static Operator> {
        Self::lookup(symbol).filter(|op| op.arity == 2)
    }

    /// The unary negation entry.
    pub fn negate() -> &'static Operator {
        &OPERATORS[6]
    }

    pub fn is_unary(&self) -> bool {
        self.arity == 1
    }

    /// Whether `top`, sitting on the operator stack, must be moved to the
    /// output before `self` is pushed.
    ///
    /// Left-associative operators pop on `<=`, right-associative ones only on
    /// strict `<`. This is what makes `2^3^2` group as `2^(3^2)`.
    pub fn yields_to(&self, top: &Operator) -> bool {
        match self.associativity {
            Associativity::Left => self.precedence <= top.precedence,
            Associativity::Right => self.precedence < top.precedence,
        }
    }
}

bitflags! {
    /// Classification of a single input character.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CharClass: u8 {
        const OPEN = 0b0001;
        const CLOSE = 0b0010;
        const BINARY = 0b0100;
        const PAREN = Self::OPEN.bits() | Self::CLOSE.bits();
        const CONTROL = Self::PAREN.bits() | Self::BINARY.bits();
    }
}

impl CharClass {
    pub fn of(c: char) -> CharClass {
        match c {
            '(' => CharClass::OPEN,
            ')' => CharClass::CLOSE,
            c if Operator::binary(c).is_some() => CharClass::BINARY,
            _ => CharClass::empty(),
        }
    }

    /// Control characters end the pending operand and form a token of their
    /// own.
    pub fn is_control(self) -> bool {
        self.intersects(CharClass::CONTROL)
    }
}

/// Classifies a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A number or identifier; its meaning is decided at evaluation time.
    Operand,
    Open,
    Close,
    Operator(&'static Operator),
}

/// A token produced by the tokenizer.
///
/// The text borrows from the expression unless whitespace had to be removed
/// from inside an operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: Cow<'a, str>,
    /// Char offset of the token in the pre-formatted expression.
    pub position: usize,
}

impl<'a> Token<'a> {
    pub fn operand(text: impl Into<Cow<'a, str>>, position: usize) -> Self {
        Token {
            kind: TokenKind::Operand,
            text: text.into(),
            position,
        }
    }

    pub fn is_operand(&self) -> bool {
        self.kind == TokenKind::Operand
    }

    pub fn operator(&self) -> Option<&'static Operator> {
        match self.kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// Whether this is the binary `-` (before unary resolution rewrites it).
    pub fn is_minus(&self) -> bool {
        matches!(self.kind, TokenKind::Operator(op) if op.symbol == '-')
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Operand => f.write_str(&self.text),
            TokenKind::Open => f.write_str("("),
            TokenKind::Close => f.write_str(")"),
            TokenKind::Operator(op) => write!(f, "{}", op.symbol),
        }
    }
}

/// A postfix item after variable substitution.
#[derive(Debug, Clone, PartialEq)]
pub enum Term<'a, T> {
    Token(Token<'a>),
    /// A variable already resolved to its value.
    Value { value: T, position: usize },
}

impl<'a, T> From<Token<'a>> for Term<'a, T> {
    fn from(token: Token<'a>) -> Self {
        Term::Token(token)
    }
}
