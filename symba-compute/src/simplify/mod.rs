//! Fixpoint simplification driver.
//!
//! Each round runs a fixed pipeline of passes — canonicalization, distribution, like-term
//! collection, the exponent rules, constant folding, the zero/one reductions, flattening — and
//! compares the result against a clone taken before the round. Structural equality means the
//! tree has reached a fixed point; one final `a^1 → a` cleanup then runs over the settled tree.
//!
//! The loop is bounded: pathological inputs that never settle stop after
//! [`DEFAULT_MAX_ROUNDS`] rounds and report `converged: false` instead of spinning forever.

pub mod fold;
pub mod rules;

use self::fold::fold_constants;
use self::rules::{add, canonize, distribute, flatten, identity, power};
use crate::expr::Expr;

/// Default bound on simplification rounds.
pub const DEFAULT_MAX_ROUNDS: usize = 100;

/// Result of a bounded simplification run.
#[derive(Debug, Clone, PartialEq)]
pub struct Simplified {
    /// The simplified tree.
    pub expr: Expr,

    /// Number of pipeline rounds that ran, including the one that detected the fixed point.
    /// Diagnostic only.
    pub rounds: usize,

    /// False when the round bound was hit before a fixed point was reached.
    pub converged: bool,
}

/// Simplifies an expression, returning the (best-effort) simplified tree.
pub fn simplify(expr: Expr) -> Expr {
    simplify_bounded(expr, DEFAULT_MAX_ROUNDS).expr
}

/// Runs the pass pipeline until the tree reaches a fixed point, or until `max_rounds` rounds
/// have run. The returned tree is valid either way; `converged` tells which case occurred.
pub fn simplify_bounded(mut expr: Expr, max_rounds: usize) -> Simplified {
    let mut rounds = 0;
    let mut converged = false;

    while rounds < max_rounds {
        let before = expr.clone();
        run_round(&mut expr);
        rounds += 1;

        if expr == before {
            converged = true;
            break;
        }
    }

    // `a^1 → a` only once the tree has settled
    power::simplify_exponents(&mut expr, true);

    Simplified { expr, rounds, converged }
}

fn run_round(expr: &mut Expr) {
    canonize::canonize(expr);
    distribute::distribute(expr);
    add::collect_terms(expr);
    power::exponent_rule_parenthesis(expr);
    power::exponent_rule_power(expr);
    power::exponent_rule_product(expr);
    power::simplify_exponents(expr, false);
    fold_constants(expr);
    identity::reduce_to_zero(expr);
    identity::reduce_to_one(expr);
    identity::remove_additive_zeros(expr);
    identity::remove_mul_one(expr);
    flatten::flatten(expr);
}
