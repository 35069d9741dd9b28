//! Implementation of the simplification passes.
//!
//! Each pass walks the tree in post-order and rewrites nodes in place where its applicability
//! predicate matches; every other node is left untouched. A pass that finds nothing to do is a
//! silent no-op, never an error.

pub mod add;
pub mod canonize;
pub mod distribute;
pub mod flatten;
pub mod identity;
pub mod power;

use crate::expr::Expr;

/// Applies `f` to every child of the node.
pub(crate) fn recurse(expr: &mut Expr, f: fn(&mut Expr)) {
    match expr {
        Expr::Primary(_) => {},
        Expr::Add(l, r) | Expr::Mul(l, r) | Expr::Pow(l, r) => {
            f(l);
            f(r);
        },
        Expr::Sum(children) | Expr::Product(children) => children.iter_mut().for_each(f),
    }
}
