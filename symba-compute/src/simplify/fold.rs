//! Constant folding: evaluating fully-numeric subtrees into literals.

use crate::expr::{Expr, Primary};

/// Folded generic literals within this distance of their floor are snapped back to integers.
const SNAP_EPSILON: f64 = 1e-6;

/// Evaluates every subtree whose operands are numeric literals, in post-order.
///
/// Binary nodes use integer arithmetic when both operands are integer literals and float
/// arithmetic otherwise, with one exception: `^` always computes through floats and always
/// produces a float literal, even over two integers.
///
/// A generic node folds a *contiguous* run of numeric children into one literal, accumulating
/// onto the operator's identity element. The scan stops at the first non-numeric child seen after
/// the accumulator has left the identity, even if more numeric children follow; the fold fires
/// only when it consumed at least two literals. The folded value is snapped to an integer when
/// within [`SNAP_EPSILON`] of its floor, and the node is re-sorted.
///
/// Usable on its own as well as inside [`simplify`](crate::simplify::simplify).
pub fn fold_constants(expr: &mut Expr) {
    match expr {
        Expr::Primary(_) => return,
        Expr::Add(l, r) | Expr::Mul(l, r) | Expr::Pow(l, r) => {
            fold_constants(l);
            fold_constants(r);
        },
        Expr::Sum(children) | Expr::Product(children) => {
            for child in children.iter_mut() {
                fold_constants(child);
            }
        },
    }

    if expr.is_generic() {
        fold_generic(expr);
    } else {
        fold_binary(expr);
    }
}

fn fold_binary(expr: &mut Expr) {
    enum Kind {
        Add,
        Mul,
        Pow,
    }

    let (kind, l, r) = match expr {
        Expr::Add(l, r) => (Kind::Add, &**l, &**r),
        Expr::Mul(l, r) => (Kind::Mul, &**l, &**r),
        Expr::Pow(l, r) => (Kind::Pow, &**l, &**r),
        _ => return,
    };

    let (Some(lv), Some(rv)) = (l.as_number(), r.as_number()) else {
        return;
    };

    let folded = match (kind, l.as_integer(), r.as_integer()) {
        (Kind::Add, Some(x), Some(y)) => Primary::Integer(x + y),
        (Kind::Mul, Some(x), Some(y)) => Primary::Integer(x * y),
        (Kind::Add, _, _) => Primary::Float(lv + rv),
        (Kind::Mul, _, _) => Primary::Float(lv * rv),
        // integer exponentiation computes through floats and stays a float
        (Kind::Pow, _, _) => Primary::Float(lv.powf(rv)),
    };
    *expr = Expr::Primary(folded);
}

fn fold_generic(expr: &mut Expr) {
    let (children, is_mul) = match expr {
        Expr::Sum(children) => (children, false),
        Expr::Product(children) => (children, true),
        _ => return,
    };
    let identity = if is_mul { 1.0 } else { 0.0 };

    let mut value = identity;
    let mut first = 0;
    let mut last = 0;
    let mut consumed = 0;
    for (i, child) in children.iter().enumerate() {
        if let Some(n) = child.as_number() {
            // the run starts wherever the accumulator last sat on the identity
            if value == identity {
                first = i;
            }
            if is_mul {
                value *= n;
            } else {
                value += n;
            }
            consumed += 1;
            last = if i == children.len() - 1 { i + 1 } else { i };
        } else if value != identity {
            last = i;
            break;
        }
    }

    if consumed < 2 {
        return;
    }

    children.drain(first..last);
    children.push(snap(value));
    expr.sort_children();

    if matches!(expr, Expr::Sum(c) | Expr::Product(c) if c.len() < 2) {
        *expr = expr.take().downgrade();
    }
}

/// Materializes a folded value, snapping near-integers back to integer literals.
fn snap(value: f64) -> Expr {
    if (value - value.floor()).abs() < SNAP_EPSILON {
        Expr::Primary(Primary::Integer(value as i64))
    } else {
        Expr::Primary(Primary::Float(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;

    fn folded(mut expr: Expr) -> Expr {
        fold_constants(&mut expr);
        expr
    }

    fn mul(l: Expr, r: Expr) -> Expr {
        Expr::Mul(Box::new(l), Box::new(r))
    }

    fn float(x: f64) -> Expr {
        Expr::Primary(Primary::Float(x))
    }

    #[test]
    fn binary_integer_arithmetic_stays_integer() {
        let expr = Expr::Add(
            Box::new(Expr::integer(2)),
            Box::new(mul(Expr::integer(3), Expr::integer(4))),
        );
        assert_eq!(folded(expr), Expr::integer(14));
    }

    #[test]
    fn floats_promote_the_result() {
        assert_eq!(folded(mul(float(2.5), Expr::integer(2))), float(5.0));
    }

    #[test]
    fn integer_exponentiation_produces_a_float() {
        let expr = Expr::Pow(Box::new(Expr::integer(2)), Box::new(Expr::integer(3)));
        let Expr::Primary(Primary::Float(result)) = folded(expr) else {
            panic!("2^3 must fold to a float literal");
        };
        assert_float_absolute_eq!(result, 8.0);
    }

    #[test]
    fn generic_runs_fold_and_resort() {
        let expr = Expr::Sum(vec![Expr::integer(2), Expr::integer(3), Expr::symbol("a")]);
        assert_eq!(folded(expr), Expr::Sum(vec![Expr::integer(5), Expr::symbol("a")]));

        let expr = Expr::Product(vec![Expr::symbol("a"), Expr::integer(2), Expr::integer(3)]);
        assert_eq!(folded(expr), Expr::Product(vec![Expr::integer(6), Expr::symbol("a")]));
    }

    #[test]
    fn non_adjacent_runs_do_not_merge() {
        let expr = Expr::Sum(vec![Expr::integer(2), Expr::symbol("a"), Expr::integer(3)]);
        assert_eq!(
            folded(expr),
            Expr::Sum(vec![Expr::integer(2), Expr::symbol("a"), Expr::integer(3)]),
        );
    }

    #[test]
    fn folded_generic_values_snap_to_integers() {
        let expr = Expr::Product(vec![float(2.5), Expr::integer(2), Expr::symbol("a")]);
        assert_eq!(folded(expr), Expr::Product(vec![Expr::integer(5), Expr::symbol("a")]));
    }

    #[test]
    fn fully_numeric_generic_nodes_collapse_to_a_literal() {
        let expr = Expr::Sum(vec![Expr::integer(1), Expr::integer(2), Expr::integer(3)]);
        assert_eq!(folded(expr), Expr::integer(6));
    }
}
