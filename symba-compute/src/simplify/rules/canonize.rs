//! Canonical rearrangement of products.
//!
//! Rearranges the tree so that later pattern matches can be local: `a2 → 2a` and
//! `(b^2)(a^2) → (a^2)(b^2)`. Also collapses generic nodes that are down to two children back
//! into their binary form.

use super::recurse;
use crate::expr::Expr;

/// Post-order canonicalization pass.
pub fn canonize(expr: &mut Expr) {
    recurse(expr, canonize);

    if expr.is_generic() {
        collapse_pair(expr);
    } else {
        canonize_binary(expr);
    }
}

fn canonize_binary(expr: &mut Expr) {
    let Expr::Mul(left, right) = expr else {
        return;
    };

    // numeric factors bubble to the left: a2 → 2a
    if right.is_number() {
        std::mem::swap(left, right);
    }

    // (n*x)*y → n*(x*y), so the numeric factor sits at the outermost position; sums stay where
    // they are so distribution still sees them
    if !right.is_number() && !right.is_add() {
        let pulled = match &**left {
            Expr::Mul(ll, lr) if ll.is_number() && !lr.is_number() => Some(true),
            Expr::Mul(ll, lr) if lr.is_number() && !ll.is_number() => Some(false),
            _ => None,
        };
        if let Some(number_first) = pulled {
            if let Expr::Mul(ll, lr) = left.take() {
                let y = right.take();
                let (number, x) = if number_first { (ll, lr) } else { (lr, ll) };
                *expr = Expr::Mul(number, Box::new(Expr::Mul(x, Box::new(y))));
            }
        }
    }

    // powers of lexicographically ordered variable bases: (b^2)(a^2) → (a^2)(b^2)
    if let Expr::Mul(left, right) = expr {
        if let (Expr::Pow(lb, _), Expr::Pow(rb, _)) = (&**left, &**right) {
            if let (Some(a), Some(b)) = (lb.as_symbol(), rb.as_symbol()) {
                if a > b {
                    std::mem::swap(left, right);
                }
            }
        }
    }
}

/// A generic node with exactly two children goes back to its binary form.
fn collapse_pair(expr: &mut Expr) {
    if !matches!(expr, Expr::Sum(c) | Expr::Product(c) if c.len() == 2) {
        return;
    }

    match expr.take() {
        Expr::Sum(children) => {
            let mut iter = children.into_iter();
            if let (Some(l), Some(r)) = (iter.next(), iter.next()) {
                *expr = Expr::Add(Box::new(l), Box::new(r));
            }
        },
        Expr::Product(children) => {
            let mut iter = children.into_iter();
            if let (Some(l), Some(r)) = (iter.next(), iter.next()) {
                *expr = Expr::Mul(Box::new(l), Box::new(r));
            }
        },
        other => *expr = other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mul(l: Expr, r: Expr) -> Expr {
        Expr::Mul(Box::new(l), Box::new(r))
    }

    fn pow(base: &str, exponent: i64) -> Expr {
        Expr::Pow(Box::new(Expr::symbol(base)), Box::new(Expr::integer(exponent)))
    }

    #[test]
    fn numeric_factor_moves_left() {
        let mut expr = mul(Expr::symbol("a"), Expr::integer(2));
        canonize(&mut expr);
        assert_eq!(expr, mul(Expr::integer(2), Expr::symbol("a")));
    }

    #[test]
    fn numeric_factor_bubbles_out_of_nested_products() {
        // (2x)y → 2(xy)
        let mut expr = mul(mul(Expr::integer(2), Expr::symbol("x")), Expr::symbol("y"));
        canonize(&mut expr);
        assert_eq!(expr, mul(
            Expr::integer(2),
            mul(Expr::symbol("x"), Expr::symbol("y")),
        ));

        // (x2)y → 2(xy), via the inner swap
        let mut expr = mul(mul(Expr::symbol("x"), Expr::integer(2)), Expr::symbol("y"));
        canonize(&mut expr);
        assert_eq!(expr, mul(
            Expr::integer(2),
            mul(Expr::symbol("x"), Expr::symbol("y")),
        ));
    }

    #[test]
    fn sums_are_not_pulled_apart() {
        let sum = Expr::Add(Box::new(Expr::symbol("b")), Box::new(Expr::symbol("c")));
        let mut expr = mul(mul(Expr::integer(2), Expr::symbol("x")), sum.clone());
        canonize(&mut expr);
        assert_eq!(expr, mul(mul(Expr::integer(2), Expr::symbol("x")), sum));
    }

    #[test]
    fn power_bases_order_lexicographically() {
        let mut expr = mul(pow("b", 2), pow("a", 2));
        canonize(&mut expr);
        assert_eq!(expr, mul(pow("a", 2), pow("b", 2)));

        let mut expr = mul(pow("a", 2), pow("b", 2));
        canonize(&mut expr);
        assert_eq!(expr, mul(pow("a", 2), pow("b", 2)));
    }

    #[test]
    fn generic_pairs_collapse_to_binary() {
        let mut expr = Expr::Sum(vec![Expr::symbol("a"), Expr::symbol("b")]);
        canonize(&mut expr);
        assert_eq!(expr, Expr::Add(Box::new(Expr::symbol("a")), Box::new(Expr::symbol("b"))));

        let mut expr = Expr::Product(vec![Expr::symbol("a"), Expr::symbol("b"), Expr::symbol("c")]);
        canonize(&mut expr);
        assert_eq!(expr, Expr::Product(vec![
            Expr::symbol("a"),
            Expr::symbol("b"),
            Expr::symbol("c"),
        ]));
    }
}
