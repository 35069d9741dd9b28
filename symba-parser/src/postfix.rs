//! Shunting-yard conversion from normalized infix to postfix.

use crate::normalize::{InfixKind, InfixToken, Op};
use std::ops::Range;

/// The kind of a postfix token. Parentheses do not survive the conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum PostfixKind {
    Integer(i64),
    Float(f64),
    Symbol(String),
    Op(Op),
}

/// A token in the postfix output stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PostfixToken {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: PostfixKind,
}

/// Converts a normalized infix token stream to postfix order.
///
/// Operators pop while their precedence does not exceed the stack top's, so all operators
/// (including `^`) associate to the left. Parentheses must already be balanced; stray ones are
/// dropped rather than reported here.
pub fn to_postfix(tokens: Vec<InfixToken>) -> Vec<PostfixToken> {
    let mut output: Vec<PostfixToken> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<InfixToken> = Vec::new();

    for token in tokens {
        match token.kind {
            InfixKind::Integer(_) | InfixKind::Float(_) | InfixKind::Symbol(_) => {
                output.push(demote(token));
            },
            InfixKind::OpenParen => stack.push(token),
            InfixKind::CloseParen => {
                while let Some(top) = stack.pop() {
                    if matches!(top.kind, InfixKind::OpenParen) {
                        break;
                    }
                    output.push(demote(top));
                }
            },
            InfixKind::Op(op) => {
                while stack.last().is_some_and(
                    |top| matches!(&top.kind, InfixKind::Op(p) if op.precedence() <= p.precedence()),
                ) {
                    if let Some(top) = stack.pop() {
                        output.push(demote(top));
                    }
                }
                stack.push(token);
            },
        }
    }

    while let Some(top) = stack.pop() {
        if !matches!(top.kind, InfixKind::OpenParen) {
            output.push(demote(top));
        }
    }

    output
}

/// Converts an infix token into its postfix form. Parentheses never reach this point.
fn demote(token: InfixToken) -> PostfixToken {
    let kind = match token.kind {
        InfixKind::Integer(n) => PostfixKind::Integer(n),
        InfixKind::Float(f) => PostfixKind::Float(f),
        InfixKind::Symbol(name) => PostfixKind::Symbol(name),
        InfixKind::Op(op) => PostfixKind::Op(op),
        InfixKind::OpenParen | InfixKind::CloseParen => unreachable!("parentheses are filtered by the conversion"),
    };
    PostfixToken { span: token.span, kind }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::tokenizer::tokenize_complete;
    use pretty_assertions::assert_eq;

    fn postfix(input: &str) -> Vec<PostfixKind> {
        let tokens = tokenize_complete(input);
        to_postfix(normalize(&tokens).unwrap())
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn sym(name: &str) -> PostfixKind {
        PostfixKind::Symbol(String::from(name))
    }

    #[test]
    fn precedence_orders_operators() {
        assert_eq!(postfix("a+b*c"), vec![
            sym("a"),
            sym("b"),
            sym("c"),
            PostfixKind::Op(Op::Mul),
            PostfixKind::Op(Op::Add),
        ]);
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(postfix("(a+b)*c"), vec![
            sym("a"),
            sym("b"),
            PostfixKind::Op(Op::Add),
            sym("c"),
            PostfixKind::Op(Op::Mul),
        ]);
    }

    #[test]
    fn exponentiation_associates_left() {
        assert_eq!(postfix("a^b^c"), vec![
            sym("a"),
            sym("b"),
            PostfixKind::Op(Op::Pow),
            sym("c"),
            PostfixKind::Op(Op::Pow),
        ]);
    }

    #[test]
    fn unary_minus_binds_tightest() {
        assert_eq!(postfix("-a+b"), vec![
            sym("a"),
            PostfixKind::Op(Op::Neg),
            sym("b"),
            PostfixKind::Op(Op::Add),
        ]);
        assert_eq!(postfix("-a^2"), vec![
            sym("a"),
            PostfixKind::Op(Op::Neg),
            PostfixKind::Integer(2),
            PostfixKind::Op(Op::Pow),
        ]);
    }

    #[test]
    fn implicit_multiplication_round_trip() {
        assert_eq!(postfix("a2a"), vec![
            sym("a"),
            PostfixKind::Integer(2),
            PostfixKind::Op(Op::Mul),
            sym("a"),
            PostfixKind::Op(Op::Mul),
        ]);
    }
}
