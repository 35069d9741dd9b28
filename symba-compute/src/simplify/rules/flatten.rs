//! Flattening nested associative chains into generic nodes.
//!
//! ```text
//!      *          *
//!     / \       / | \
//!    *   c --> a  b  c
//!   / \
//!  a   b
//! ```
//!
//! The recursion threads the would-be parent's operator explicitly, together with the queue of
//! children collected for the enclosing chain. A node of the same operator as its parent
//! dissolves into that queue instead of remaining itself; at the chain's top — a node whose
//! parent is absent or a power — the queue is drained into a freshly built, sorted generic node.
//! Crossing into a chain of the *other* operator, or into either side of a power, restarts with
//! an empty context, so unrelated chains are never merged.

use crate::expr::Expr;

/// The operator of the enclosing node, threaded through the recursion.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ParentOp {
    Add,
    Mul,
    Pow,
}

/// Post-order flattening pass.
pub fn flatten(expr: &mut Expr) {
    to_generic(expr, None, &mut Vec::new());
}

fn to_generic(expr: &mut Expr, parent: Option<ParentOp>, queue: &mut Vec<Expr>) {
    match expr {
        Expr::Primary(_) => return,
        Expr::Pow(base, exponent) => {
            // chains on either side of a power are their own flattening roots
            to_generic(base, Some(ParentOp::Pow), &mut Vec::new());
            to_generic(exponent, Some(ParentOp::Pow), &mut Vec::new());
            return;
        },
        _ => {},
    }

    let node_op = if expr.is_add() { ParentOp::Add } else { ParentOp::Mul };

    if let Some(parent_op) = parent {
        if parent_op != ParentOp::Pow && parent_op != node_op {
            // joint between the two chain kinds: restart with an unlinked context
            to_generic(expr, None, &mut Vec::new());
            return;
        }
    }

    if let Expr::Add(l, r) | Expr::Mul(l, r) = expr {
        to_generic(l, Some(node_op), queue);
        to_generic(r, Some(node_op), queue);
    }

    if parent == Some(node_op) {
        // dissolve into the enclosing chain
        match expr {
            Expr::Add(l, r) | Expr::Mul(l, r) => {
                if operator_of(l) != Some(node_op) {
                    queue.push(l.take());
                }
                if operator_of(r) != Some(node_op) {
                    queue.push(r.take());
                }
            },
            Expr::Sum(children) | Expr::Product(children) => queue.append(children),
            _ => {},
        }
        return;
    }

    // chain top: this node's own stray children join the queue before it drains
    if let Expr::Add(l, r) | Expr::Mul(l, r) = expr {
        if operator_of(l) != Some(node_op) && !queue.is_empty() {
            queue.push(l.take());
        } else if operator_of(r) != Some(node_op) && !queue.is_empty() {
            queue.push(r.take());
        }
    }

    if !queue.is_empty() {
        let children = std::mem::take(queue);
        let mut flat = match node_op {
            ParentOp::Add => Expr::Sum(children),
            ParentOp::Mul => Expr::Product(children),
            ParentOp::Pow => unreachable!("powers are handled before the chain logic"),
        };
        flat.sort_children();
        *expr = flat;
    }
}

/// The operator class of a node; both the binary and the generic form count.
fn operator_of(expr: &Expr) -> Option<ParentOp> {
    match expr {
        Expr::Add(..) | Expr::Sum(_) => Some(ParentOp::Add),
        Expr::Mul(..) | Expr::Product(_) => Some(ParentOp::Mul),
        Expr::Pow(..) => Some(ParentOp::Pow),
        Expr::Primary(_) => None,
    }
}
