//! Building expression trees from postfix token streams.
//!
//! The builder folds the postfix stream over a stack, producing a fully binary tree over the
//! closed operator set `{+, *, ^}`: subtraction, division and unary minus are desugared here so
//! that no later pass ever has to know about them.

use super::{Expr, Primary};
use crate::error::MalformedExpression;
use std::ops::Range;
use symba_error::Error;
use symba_parser::{Op, PostfixKind, PostfixToken};

/// Builds an [`Expr`] tree from a postfix token stream.
///
/// Desugarings applied during construction:
///
/// - `a - b` becomes `a + (-b)`;
/// - `a / b` becomes `a * b^-1`;
/// - unary minus negates a numeric literal in place, and becomes `-1 * a` otherwise.
///
/// A stream that does not assemble into exactly one tree (a stray operator, two operands with
/// nothing to combine them) is reported as a [`MalformedExpression`].
pub fn from_postfix(tokens: Vec<PostfixToken>) -> Result<Expr, Error> {
    let full_span = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => first.span.start..last.span.end,
        _ => 0..0,
    };

    let mut stack: Vec<Expr> = Vec::new();
    for token in tokens {
        match token.kind {
            PostfixKind::Integer(n) => stack.push(Expr::Primary(Primary::Integer(n))),
            PostfixKind::Float(x) => stack.push(Expr::Primary(Primary::Float(x))),
            PostfixKind::Symbol(name) => stack.push(Expr::Primary(Primary::Symbol(name))),
            PostfixKind::Op(Op::Neg) => {
                let operand = pop(&mut stack, &token.span)?;
                stack.push(negate(operand));
            },
            PostfixKind::Op(op) => {
                let rhs = pop(&mut stack, &token.span)?;
                let lhs = pop(&mut stack, &token.span)?;
                stack.push(combine(op, lhs, rhs));
            },
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(expr), true) => Ok(expr),
        _ => Err(malformed(full_span)),
    }
}

fn combine(op: Op, lhs: Expr, rhs: Expr) -> Expr {
    match op {
        Op::Add => Expr::Add(Box::new(lhs), Box::new(rhs)),
        Op::Sub => Expr::Add(Box::new(lhs), Box::new(negate(rhs))),
        Op::Mul => Expr::Mul(Box::new(lhs), Box::new(rhs)),
        Op::Div => Expr::Mul(
            Box::new(lhs),
            Box::new(Expr::Pow(Box::new(rhs), Box::new(Expr::integer(-1)))),
        ),
        Op::Pow => Expr::Pow(Box::new(lhs), Box::new(rhs)),
        Op::Neg => unreachable!("unary negation is handled before binary operators"),
    }
}

/// `-expr`: numeric literals negate in place; anything else becomes `-1 * expr`.
fn negate(expr: Expr) -> Expr {
    match expr {
        Expr::Primary(Primary::Integer(n)) => Expr::Primary(Primary::Integer(-n)),
        Expr::Primary(Primary::Float(x)) => Expr::Primary(Primary::Float(-x)),
        expr => Expr::Mul(Box::new(Expr::integer(-1)), Box::new(expr)),
    }
}

fn pop(stack: &mut Vec<Expr>, span: &Range<usize>) -> Result<Expr, Error> {
    stack.pop().ok_or_else(|| malformed(span.clone()))
}

fn malformed(span: Range<usize>) -> Error {
    Error::new(vec![span], MalformedExpression)
}
