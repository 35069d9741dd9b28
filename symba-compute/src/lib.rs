//! Expression tree model and simplification engine for symba.
//!
//! The [`expr`] module defines the owned [`Expr`] tree, its canonical sibling ordering and the
//! builder that assembles trees from the postfix streams produced by `symba-parser`. The
//! [`simplify`] module drives a fixed pipeline of rewriting passes over the tree until it
//! reaches a fixed point.
//!
//! ```
//! use symba_compute::expr::builder::from_postfix;
//! use symba_compute::{simplify, Expr, Primary};
//!
//! let tokens = symba_parser::parse("x + x + x").unwrap();
//! let tree = from_postfix(tokens).unwrap();
//!
//! // `x + x + x = 3x`
//! assert_eq!(simplify(tree), Expr::Mul(
//!     Box::new(Expr::Primary(Primary::Integer(3))),
//!     Box::new(Expr::Primary(Primary::Symbol(String::from("x")))),
//! ));
//! ```

pub mod error;
pub mod expr;
pub mod simplify;

pub use expr::{Expr, Primary};
pub use simplify::{fold::fold_constants, simplify, simplify_bounded, Simplified, DEFAULT_MAX_ROUNDS};
