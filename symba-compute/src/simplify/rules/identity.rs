//! Zero and one eliminations.
//!
//! Small independent rules, each its own post-order pass. Literal recognition means the integer
//! literal: `0.0` is not treated as an additive zero.

use super::recurse;
use crate::expr::Expr;

/// `0*a → 0`, `a*0 → 0` (binary or generic), and `0^a → 0`.
pub fn reduce_to_zero(expr: &mut Expr) {
    recurse(expr, reduce_to_zero);

    match expr {
        Expr::Mul(l, r) if l.is_zero() || r.is_zero() => *expr = Expr::integer(0),
        Expr::Product(factors) if factors.iter().any(Expr::is_zero) => *expr = Expr::integer(0),
        Expr::Pow(base, _) if base.is_zero() => *expr = Expr::integer(0),
        _ => {},
    }
}

/// `1^a → 1`.
pub fn reduce_to_one(expr: &mut Expr) {
    recurse(expr, reduce_to_one);

    if let Expr::Pow(base, _) = expr {
        if base.is_one() {
            *expr = Expr::integer(1);
        }
    }
}

/// `a+0 → a`, `0+a → a`. A generic sum drops at most one zero per pass, found by scanning, and
/// never the one at index zero.
pub fn remove_additive_zeros(expr: &mut Expr) {
    recurse(expr, remove_additive_zeros);

    match expr {
        Expr::Add(l, r) => {
            if r.is_zero() && !l.is_zero() {
                *expr = l.take();
            } else if l.is_zero() && !r.is_zero() {
                *expr = r.take();
            }
        },
        Expr::Sum(terms) => {
            let mut index_zero = 0;
            for (i, term) in terms.iter().enumerate() {
                if term.is_zero() {
                    index_zero = i;
                }
            }
            if index_zero != 0 {
                terms.remove(index_zero);
            }
            if terms.len() < 2 {
                *expr = expr.take().downgrade();
            }
        },
        _ => {},
    }
}

/// `1*a → a`, `a*1 → a`, for binary products only; generic products leave their ones to the
/// constant folder's identity accumulator.
pub fn remove_mul_one(expr: &mut Expr) {
    recurse(expr, remove_mul_one);

    if let Expr::Mul(l, r) = expr {
        if l.is_one() {
            *expr = r.take();
        } else if r.is_one() {
            *expr = l.take();
        }
    }
}
