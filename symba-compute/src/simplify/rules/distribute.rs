//! Distributing multiplication over addition: `a(b+c+d) → ab+ac+ad`.

use super::recurse;
use crate::expr::Expr;

/// Post-order distribution pass. Fires only on products with a sum among their factors.
pub fn distribute(expr: &mut Expr) {
    recurse(expr, distribute);

    match expr {
        Expr::Mul(..) => distribute_binary(expr),
        Expr::Product(_) => distribute_generic(expr),
        _ => {},
    }
}

fn distribute_binary(expr: &mut Expr) {
    let Expr::Mul(left, right) = expr else {
        return;
    };

    let (factor, sum) = if right.is_add() {
        (left.take(), right.take())
    } else if left.is_add() {
        (right.take(), left.take())
    } else {
        return;
    };

    *expr = distribute_over(factor, sum);
}

/// Multiplies `factor` onto every addend of `sum`, cloning the factor for each addend beyond the
/// first use.
fn distribute_over(factor: Expr, sum: Expr) -> Expr {
    match sum {
        Expr::Add(l, r) => Expr::Add(
            Box::new(Expr::Mul(Box::new(factor.clone()), l)),
            Box::new(Expr::Mul(Box::new(factor), r)),
        ),
        Expr::Sum(mut terms) => {
            for term in terms.iter_mut() {
                let addend = term.take();
                *term = Expr::Mul(Box::new(factor.clone()), Box::new(addend));
            }
            Expr::Sum(terms)
        },
        _ => unreachable!("is_add guarantees a sum"),
    }
}

fn distribute_generic(expr: &mut Expr) {
    let Expr::Product(factors) = expr else {
        return;
    };
    let Some(position) = factors.iter().position(Expr::is_add) else {
        return;
    };
    let sum = factors.remove(position);
    let remaining = std::mem::take(factors);

    *expr = match sum {
        Expr::Add(l, r) => {
            let mut left_product = remaining.clone();
            left_product.push(*l);
            let mut right_product = remaining;
            right_product.push(*r);
            Expr::Add(
                Box::new(Expr::Product(left_product)),
                Box::new(Expr::Product(right_product)),
            )
        },
        Expr::Sum(mut addends) => {
            for addend in addends.iter_mut() {
                let term = addend.take();
                let mut product = remaining.clone();
                product.push(term);
                *addend = Expr::Product(product);
            }
            Expr::Sum(addends)
        },
        _ => unreachable!("is_add guarantees a sum"),
    };
}
