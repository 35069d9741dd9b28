//! Normalization of the raw token stream.
//!
//! Raw input is forgiving: operators may be accidentally doubled (`a ++ b`), multiplication is
//! frequently implied by adjacency (`2x`, `3(a + b)`), and `-` means two different things
//! depending on what precedes it. This module rewrites the token stream into an explicit infix
//! form that the postfix converter can process mechanically.

use crate::error::{InvalidLiteral, UnexpectedCharacter};
use crate::tokenizer::{Token, TokenKind};
use std::ops::Range;
use symba_error::Error;

/// An arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,

    /// Unary negation, produced by [`normalize`] from a `-` in prefix position.
    Neg,
}

impl Op {
    /// The binding strength used by the shunting-yard conversion.
    pub fn precedence(self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
            Op::Pow => 3,
            Op::Neg => 5,
        }
    }
}

/// The kind of a normalized infix token.
#[derive(Debug, Clone, PartialEq)]
pub enum InfixKind {
    Integer(i64),
    Float(f64),
    Symbol(String),
    Op(Op),
    OpenParen,
    CloseParen,
}

/// A normalized infix token.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixToken {
    /// The region of the source code that this token originated from. Inserted multiplication
    /// signs span the (empty) gap between the two operands.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: InfixKind,
}

/// Rewrites the raw token stream into explicit infix form:
///
/// 1. runs of identical, source-adjacent operator characters collapse to one (`a ++ b` → `a + b`);
/// 2. a `*` is inserted wherever multiplication is implied by adjacency;
/// 3. a `-` in prefix position becomes [`Op::Neg`].
///
/// Numeric literals are materialized here, so an oversized literal is reported against its span
/// instead of surfacing later as a malformed tree.
pub fn normalize(tokens: &[Token]) -> Result<Vec<InfixToken>, Error> {
    let mut deduped: Vec<&Token> = Vec::new();
    let mut last: Option<&Token> = None;
    for token in tokens.iter().filter(|token| !token.is_whitespace()) {
        let repeat = matches!(
            last,
            Some(prev) if token.kind.is_operator()
                && prev.kind == token.kind
                && prev.span.end == token.span.start
        );
        last = Some(token);
        if !repeat {
            deduped.push(token);
        }
    }

    let mut infix: Vec<InfixToken> = Vec::with_capacity(deduped.len());
    for token in deduped {
        let kind = match token.kind {
            TokenKind::Int => InfixKind::Integer(
                token.lexeme.parse().map_err(|_| invalid_literal(token))?,
            ),
            TokenKind::Float => InfixKind::Float(
                token.lexeme.parse().map_err(|_| invalid_literal(token))?,
            ),
            TokenKind::Name => InfixKind::Symbol(token.lexeme.to_string()),
            TokenKind::Add => InfixKind::Op(Op::Add),
            TokenKind::Sub => InfixKind::Op(Op::Sub),
            TokenKind::Mul => InfixKind::Op(Op::Mul),
            TokenKind::Div => InfixKind::Op(Op::Div),
            TokenKind::Exp => InfixKind::Op(Op::Pow),
            TokenKind::OpenParen => InfixKind::OpenParen,
            TokenKind::CloseParen => InfixKind::CloseParen,
            TokenKind::Unknown => {
                return Err(Error::new(
                    vec![token.span.clone()],
                    UnexpectedCharacter {
                        character: token.lexeme.chars().next().unwrap_or(' '),
                    },
                ));
            },
            TokenKind::Whitespace => continue,
        };
        infix.push(InfixToken { span: token.span.clone(), kind });
    }

    let mut out: Vec<InfixToken> = Vec::with_capacity(infix.len());
    for token in infix {
        if let Some(prev) = out.last() {
            if implied_multiplication(&prev.kind, &token.kind) {
                out.push(InfixToken {
                    span: prev.span.end..token.span.start,
                    kind: InfixKind::Op(Op::Mul),
                });
            }
        }
        out.push(token);
    }

    for i in 0..out.len() {
        if !matches!(out[i].kind, InfixKind::Op(Op::Sub)) {
            continue;
        }
        let unary = match i.checked_sub(1).map(|prev| &out[prev].kind) {
            None | Some(InfixKind::Op(_)) | Some(InfixKind::OpenParen) => true,
            _ => false,
        };
        if unary {
            out[i].kind = InfixKind::Op(Op::Neg);
        }
    }

    Ok(out)
}

/// Returns true if a multiplication sign belongs between the two adjacent tokens.
fn implied_multiplication(prev: &InfixKind, next: &InfixKind) -> bool {
    match (prev, next) {
        // `a b`, `a 2`, `a (`
        (InfixKind::Symbol(_), InfixKind::Symbol(_))
        | (InfixKind::Symbol(_), InfixKind::Integer(_))
        | (InfixKind::Symbol(_), InfixKind::Float(_))
        | (InfixKind::Symbol(_), InfixKind::OpenParen) => true,
        // `2 a`, `2 (`
        (InfixKind::Integer(_) | InfixKind::Float(_), InfixKind::Symbol(_))
        | (InfixKind::Integer(_) | InfixKind::Float(_), InfixKind::OpenParen) => true,
        // `) a`, `) 2`, `) (`
        (InfixKind::CloseParen, InfixKind::Symbol(_))
        | (InfixKind::CloseParen, InfixKind::Integer(_))
        | (InfixKind::CloseParen, InfixKind::Float(_))
        | (InfixKind::CloseParen, InfixKind::OpenParen) => true,
        _ => false,
    }
}

fn invalid_literal(token: &Token) -> Error {
    Error::new(vec![token.span.clone()], InvalidLiteral)
}
