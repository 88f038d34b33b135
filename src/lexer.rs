//! Tokenizer and unary-minus resolution.
//!
//! The lexer splits an expression into operand runs and single-character
//! control tokens (`(`, `)` and the binary operators). It does not decide
//! what an operand means: numbers and identifiers are both plain operand
//! text until evaluation.

extern crate alloc;
use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::context::EvalOptions;
use crate::types::{CharClass, Operator, Token, TokenKind};

/// The lexer struct, which produces tokens from a pre-formatted expression.
#[derive(Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset into `input`.
    pos: usize,
    /// Char offset into `input`, reported as token position.
    char_pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            char_pos: 0,
        }
    }

    /// Peek at the current character.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advance the position by one character.
    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
            self.char_pos += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Get the next token from the input.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        self.skip_whitespace();
        let c = self.peek()?;
        let start = self.pos;
        let position = self.char_pos;

        let class = CharClass::of(c);
        if class.is_control() {
            self.advance();
            let kind = if class == CharClass::OPEN {
                TokenKind::Open
            } else if class == CharClass::CLOSE {
                TokenKind::Close
            } else {
                // BINARY only comes from a table symbol
                TokenKind::Operator(Operator::binary(c)?)
            };
            return Some(Token {
                kind,
                text: Cow::Borrowed(&self.input[start..self.pos]),
                position,
            });
        }

        // Operand: everything up to the next control character. Whitespace
        // inside the run is dropped, so "1 2" reads as "12".
        let mut end = start;
        while let Some(nc) = self.peek() {
            if CharClass::of(nc).is_control() {
                break;
            }
            self.advance();
            if !nc.is_whitespace() {
                end = self.pos;
            }
        }

        let span = &self.input[start..end];
        let text = if span.contains(char::is_whitespace) {
            Cow::Owned(span.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        } else {
            Cow::Borrowed(span)
        };
        Some(Token::operand(text, position))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.next_token()
    }
}

/// Trims the expression and, if enabled, drops a dangling trailing operator
/// (every trailing occurrence of that symbol), so `"3+"` reads as `"3"`.
pub fn preformat<'a>(expression: &'a str, options: &EvalOptions) -> &'a str {
    let trimmed = expression.trim();
    if !options.trim_trailing_operator {
        return trimmed;
    }
    match trimmed.chars().last() {
        Some(c) if CharClass::of(c).contains(CharClass::BINARY) => trimmed.trim_end_matches(c),
        _ => trimmed,
    }
}

/// Pre-formats and splits an expression into infix tokens.
///
/// Every `-` is still the binary operator here; see [`resolve_unary`].
pub fn tokenize<'a>(expression: &'a str, options: &EvalOptions) -> Vec<Token<'a>> {
    Lexer::new(preformat(expression, options)).collect()
}

/// Rewrites each `-` that has no left operand into unary negation.
///
/// A `-` is unary when it is the first token or follows an operator or a
/// parenthesis. With [`EvalOptions::binary_minus_after_close`] set, a `-`
/// after `)` stays binary.
pub fn resolve_unary(tokens: &mut [Token<'_>], options: &EvalOptions) {
    for i in 0..tokens.len() {
        if !tokens[i].is_minus() {
            continue;
        }
        let unary = match i.checked_sub(1).map(|j| tokens[j].kind) {
            None => true,
            Some(TokenKind::Operator(_)) | Some(TokenKind::Open) => true,
            Some(TokenKind::Close) => !options.binary_minus_after_close,
            Some(TokenKind::Operand) => false,
        };
        if unary {
            tokens[i].kind = TokenKind::Operator(Operator::negate());
        }
    }
}
