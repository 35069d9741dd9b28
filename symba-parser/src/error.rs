//! Errors reported while preparing input for tree construction.

use ariadne::Fmt;
use symba_attrs::ErrorKind;
use symba_error::{ErrorKind, EXPR};

/// The input does not contain the same number of opening and closing parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unbalanced parentheses",
    labels = ["this expression is missing at least one parenthesis"],
    help = format!("make sure every {} has a matching one", "parenthesis".fg(EXPR)),
)]
pub struct UnbalancedParenthesis;

/// A numeric literal too large to be represented was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid numeric literal",
    labels = ["this literal does not fit in a machine number"],
)]
pub struct InvalidLiteral;

/// A character with no meaning in expressions was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected character `{}`", character),
    labels = ["here"],
)]
pub struct UnexpectedCharacter {
    /// The character that was found.
    pub character: char,
}
