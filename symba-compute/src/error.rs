//! Errors reported while building expression trees.

use symba_attrs::ErrorKind;
use symba_error::ErrorKind;

/// The postfix stream did not assemble into a single expression tree.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "malformed expression",
    labels = ["this expression is incomplete"],
)]
pub struct MalformedExpression;
