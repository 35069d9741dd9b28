//! Exponent laws and power cleanup.
//!
//! Three rules applied in a fixed order by the driver:
//!
//! 1. [`exponent_rule_parenthesis`]: `(ab)^n → a^n * b^n`;
//! 2. [`exponent_rule_power`]: `(a^n)^m → a^(nm)`;
//! 3. [`exponent_rule_product`]: `a^n * a^m → a^(n+m)`;
//!
//! plus [`simplify_exponents`], which folds `a^0 → 1` every round and `a^1 → a` only as the final
//! cleanup, once the tree has settled.

use super::recurse;
use crate::expr::Expr;

/// `(ab)^n → a^n * b^n`, for a terminal exponent.
///
/// A generic product base raises every factor independently and re-sorts. A binary base fires
/// only when both factors are already powers; their exponents are multiplied in place by the
/// outer exponent.
pub fn exponent_rule_parenthesis(expr: &mut Expr) {
    recurse(expr, exponent_rule_parenthesis);

    let Expr::Pow(base, exponent) = expr else {
        return;
    };
    if !exponent.is_terminal() {
        return;
    }

    match &mut **base {
        Expr::Product(factors) => {
            for factor in factors.iter_mut() {
                let inner = factor.take();
                *factor = Expr::Pow(Box::new(inner), Box::new((**exponent).clone()));
            }
            let mut product = base.take();
            product.sort_children();
            *expr = product;
        },
        Expr::Mul(l, r) if l.is_pow() && r.is_pow() => {
            for factor in [l, r] {
                if let Expr::Pow(_, factor_exponent) = &mut **factor {
                    let inner = factor_exponent.take();
                    **factor_exponent = Expr::Mul(Box::new(inner), Box::new((**exponent).clone()));
                }
            }
            let product = base.take();
            *expr = product;
        },
        _ => {},
    }
}

/// `(a^n)^m → a^(nm)`, for a variable base and integer literal exponents.
pub fn exponent_rule_power(expr: &mut Expr) {
    recurse(expr, exponent_rule_power);

    let Expr::Pow(base, exponent) = expr else {
        return;
    };
    let Some(m) = exponent.as_integer() else {
        return;
    };
    let Expr::Pow(inner_base, inner_exponent) = &mut **base else {
        return;
    };
    if inner_base.as_symbol().is_none() {
        return;
    }
    let Some(n) = inner_exponent.as_integer() else {
        return;
    };

    let variable = inner_base.take();
    *expr = Expr::Pow(Box::new(variable), Box::new(Expr::integer(n * m)));
}

/// `a^n * a^m → a^(n+m)`.
///
/// The binary case requires a shared variable base and integer exponents. The generic case scans
/// adjacent pairs of powers with equal bases and integer exponents, accumulating a run's
/// exponents the way like-term collection accumulates coefficients; non-matching factors pass
/// through untouched, and the result is re-sorted.
pub fn exponent_rule_product(expr: &mut Expr) {
    recurse(expr, exponent_rule_product);

    match expr {
        Expr::Mul(..) => product_binary(expr),
        Expr::Product(_) => product_generic(expr),
        _ => {},
    }
}

fn product_binary(expr: &mut Expr) {
    let Expr::Mul(left, right) = expr else {
        return;
    };
    let (Expr::Pow(lb, le), Expr::Pow(rb, re)) = (&mut **left, &**right) else {
        return;
    };
    let (Some(a), Some(b)) = (lb.as_symbol(), rb.as_symbol()) else {
        return;
    };
    if a != b {
        return;
    }
    let (Some(n), Some(m)) = (le.as_integer(), re.as_integer()) else {
        return;
    };

    let base = lb.take();
    *expr = Expr::Pow(Box::new(base), Box::new(Expr::integer(n + m)));
}

fn product_generic(expr: &mut Expr) {
    let Expr::Product(factors) = expr else {
        return;
    };
    let mut children = std::mem::take(factors);
    let len = children.len();

    let mut out: Vec<Expr> = Vec::with_capacity(len);
    let mut exponent: i64 = 0;

    for i in 0..len {
        if i + 1 == len {
            if exponent != 0 {
                out.push(close_run(children[i].take(), exponent));
            } else {
                out.push(children[i].take());
            }
            continue;
        }

        match pow_pair(&children[i], &children[i + 1]) {
            Some((n, m)) => {
                if exponent == 0 {
                    exponent = n + m;
                } else {
                    exponent += m;
                }
            },
            None if exponent != 0 => {
                out.push(close_run(children[i].take(), exponent));
                exponent = 0;
            },
            None => out.push(children[i].take()),
        }
    }

    let mut combined = Expr::Product(out);
    combined.sort_children();
    *expr = combined.downgrade();
}

/// Two powers with structurally equal bases and integer literal exponents.
fn pow_pair(a: &Expr, b: &Expr) -> Option<(i64, i64)> {
    let (Expr::Pow(ab, ae), Expr::Pow(bb, be)) = (a, b) else {
        return None;
    };
    let (n, m) = (ae.as_integer()?, be.as_integer()?);
    if ab == bb {
        Some((n, m))
    } else {
        None
    }
}

/// Rebuilds the final power of a run with the accumulated exponent.
fn close_run(last: Expr, exponent: i64) -> Expr {
    match last {
        Expr::Pow(base, _) => Expr::Pow(base, Box::new(Expr::integer(exponent))),
        other => other,
    }
}

/// Folds `a^0 → 1` everywhere. With `final_cleanup` set, also folds `a^1 → a`; that rewrite only
/// runs after the fixpoint loop, so intermediate rounds can still match on the explicit exponent.
pub fn simplify_exponents(expr: &mut Expr, final_cleanup: bool) {
    match expr {
        Expr::Primary(_) => return,
        Expr::Add(l, r) | Expr::Mul(l, r) | Expr::Pow(l, r) => {
            simplify_exponents(l, final_cleanup);
            simplify_exponents(r, final_cleanup);
        },
        Expr::Sum(children) | Expr::Product(children) => {
            for child in children.iter_mut() {
                simplify_exponents(child, final_cleanup);
            }
        },
    }

    if let Expr::Pow(base, exponent) = expr {
        if exponent.is_zero() {
            *expr = Expr::integer(1);
        } else if final_cleanup && exponent.is_one() {
            let inner = base.take();
            *expr = inner;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pow(base: Expr, exponent: Expr) -> Expr {
        Expr::Pow(Box::new(base), Box::new(exponent))
    }

    fn ipow(name: &str, exponent: i64) -> Expr {
        pow(Expr::symbol(name), Expr::integer(exponent))
    }

    fn mul(l: Expr, r: Expr) -> Expr {
        Expr::Mul(Box::new(l), Box::new(r))
    }

    #[test]
    fn generic_product_base_distributes_the_exponent() {
        let base = Expr::Product(vec![Expr::symbol("a"), Expr::symbol("b"), Expr::symbol("c")]);
        let mut expr = pow(base, Expr::integer(2));
        exponent_rule_parenthesis(&mut expr);
        assert_eq!(expr, Expr::Product(vec![
            ipow("a", 2),
            ipow("b", 2),
            ipow("c", 2),
        ]));
    }

    #[test]
    fn binary_power_base_multiplies_exponents_in_place() {
        let base = mul(ipow("a", 2), ipow("b", 3));
        let mut expr = pow(base, Expr::integer(4));
        exponent_rule_parenthesis(&mut expr);
        assert_eq!(expr, mul(
            pow(Expr::symbol("a"), mul(Expr::integer(2), Expr::integer(4))),
            pow(Expr::symbol("b"), mul(Expr::integer(3), Expr::integer(4))),
        ));
    }

    #[test]
    fn binary_base_of_bare_factors_is_untouched() {
        let base = mul(Expr::symbol("a"), Expr::symbol("b"));
        let mut expr = pow(base.clone(), Expr::integer(2));
        exponent_rule_parenthesis(&mut expr);
        assert_eq!(expr, pow(base, Expr::integer(2)));
    }

    #[test]
    fn power_of_power_multiplies_exponents() {
        let mut expr = pow(ipow("x", 2), Expr::integer(3));
        exponent_rule_power(&mut expr);
        assert_eq!(expr, ipow("x", 6));
    }

    #[test]
    fn power_of_power_requires_integer_exponents() {
        let mut expr = pow(pow(Expr::symbol("x"), Expr::symbol("n")), Expr::integer(3));
        let expected = expr.clone();
        exponent_rule_power(&mut expr);
        assert_eq!(expr, expected);
    }

    #[test]
    fn product_of_powers_sums_exponents() {
        let mut expr = mul(ipow("x", 2), ipow("x", 3));
        exponent_rule_product(&mut expr);
        assert_eq!(expr, ipow("x", 5));
    }

    #[test]
    fn product_of_powers_requires_equal_bases() {
        let mut expr = mul(ipow("x", 2), ipow("y", 3));
        let expected = expr.clone();
        exponent_rule_product(&mut expr);
        assert_eq!(expr, expected);
    }

    #[test]
    fn generic_run_of_powers_combines() {
        let mut expr = Expr::Product(vec![ipow("x", 2), ipow("x", 3), Expr::symbol("y")]);
        exponent_rule_product(&mut expr);
        assert_eq!(expr, Expr::Product(vec![ipow("x", 5), Expr::symbol("y")]));
    }

    #[test]
    fn generic_run_covering_the_whole_product_downgrades() {
        let mut expr = Expr::Product(vec![ipow("x", 2), ipow("x", 3), ipow("x", 4)]);
        exponent_rule_product(&mut expr);
        assert_eq!(expr, ipow("x", 9));
    }

    #[test]
    fn non_matching_factors_pass_through() {
        let mut expr = Expr::Product(vec![
            ipow("x", 2),
            pow(Expr::symbol("x"), Expr::symbol("n")),
            Expr::symbol("y"),
        ]);
        exponent_rule_product(&mut expr);
        // nothing combines; the re-sort puts the symbolic exponent (degree one) first
        assert_eq!(expr, Expr::Product(vec![
            pow(Expr::symbol("x"), Expr::symbol("n")),
            ipow("x", 2),
            Expr::symbol("y"),
        ]));
    }

    #[test]
    fn zero_exponents_fold_every_round() {
        let mut expr = pow(Expr::Add(
            Box::new(Expr::symbol("a")),
            Box::new(Expr::symbol("b")),
        ), Expr::integer(0));
        simplify_exponents(&mut expr, false);
        assert_eq!(expr, Expr::integer(1));
    }

    #[test]
    fn unit_exponents_fold_only_in_the_final_cleanup() {
        let mut expr = ipow("a", 1);
        simplify_exponents(&mut expr, false);
        assert_eq!(expr, ipow("a", 1));

        simplify_exponents(&mut expr, true);
        assert_eq!(expr, Expr::symbol("a"));
    }
}
