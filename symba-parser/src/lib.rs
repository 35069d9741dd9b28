//! Tokenizer and infix→postfix converter for symba expressions.
//!
//! This crate turns a raw input line into a postfix stream of spanned
//! [`PostfixToken`]s, ready for tree construction:
//!
//! 1. [`tokenizer`] splits the input into spanned tokens with `logos`;
//! 2. [`normalize`] collapses doubled operators, inserts implied multiplication
//!    signs and distinguishes unary from binary minus;
//! 3. [`postfix`] runs shunting-yard conversion with the precedence table
//!    `+ -` < `* /` < `^` < unary minus.
//!
//! Malformed input (unbalanced parentheses, oversized literals, stray
//! characters) is reported here, with spans, before any tree exists.
//!
//! ```
//! use symba_parser::{parse, Op, PostfixKind};
//!
//! let tokens = parse("2x + 1").unwrap();
//! let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, vec![
//!     PostfixKind::Integer(2),
//!     PostfixKind::Symbol(String::from("x")),
//!     PostfixKind::Op(Op::Mul),
//!     PostfixKind::Integer(1),
//!     PostfixKind::Op(Op::Add),
//! ]);
//! ```

pub mod error;
pub mod normalize;
pub mod postfix;
pub mod tokenizer;

use error::UnbalancedParenthesis;
use symba_error::Error;
use tokenizer::TokenKind;

pub use normalize::{InfixKind, InfixToken, Op};
pub use postfix::{PostfixKind, PostfixToken};

/// Tokenizes, normalizes and converts the given input line to a postfix token stream.
pub fn parse(input: &str) -> Result<Vec<PostfixToken>, Error> {
    let tokens = tokenizer::tokenize_complete(input);

    let open = tokens.iter().filter(|token| token.kind == TokenKind::OpenParen).count();
    let close = tokens.iter().filter(|token| token.kind == TokenKind::CloseParen).count();
    if open != close {
        return Err(Error::new(vec![0..input.len()], UnbalancedParenthesis));
    }

    let infix = normalize::normalize(&tokens)?;
    Ok(postfix::to_postfix(infix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbalanced_parentheses_are_rejected() {
        assert!(parse("(a + b").is_err());
        assert!(parse("a + b)").is_err());
        assert!(parse("(a + b)").is_ok());
    }

    #[test]
    fn empty_input_produces_no_tokens() {
        assert!(parse("").unwrap().is_empty());
    }
}
