//! Canonical sibling ordering.
//!
//! The scans that merge like terms and combine powers only look at *adjacent* siblings, so the
//! order produced here is a correctness requirement, not a cosmetic choice: numeric literals sort
//! first (where constant folding accumulates them), and terms that are related — equal up to a
//! leading numeric coefficient, or powers of the same base — must end up next to each other.

use super::{Expr, Primary};
use std::cmp::Ordering;

/// Total order over sibling expressions, used by every
/// [`sort_children`](super::Expr::sort_children) call.
pub fn canonical_cmp(a: &Expr, b: &Expr) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| number_rank(a).cmp(&number_rank(b))),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => term_key(a)
            .cmp(&term_key(b))
            .then_with(|| degree(a).cmp(&degree(b)))
            .then_with(|| coefficient_rank(a).cmp(&coefficient_rank(b)))
            .then_with(|| structural_cmp(a, b)),
    }
}

/// Integer literals sort before float literals of the same value.
fn number_rank(expr: &Expr) -> u8 {
    match expr {
        Expr::Primary(Primary::Integer(_)) => 0,
        _ => 1,
    }
}

/// The skeleton of a term with leading numeric coefficients stripped. Terms with equal keys are
/// exactly the ones the adjacent-pair scans may merge, so equal keys must sort together.
fn term_key(expr: &Expr) -> String {
    match expr {
        Expr::Primary(Primary::Symbol(name)) => name.clone(),
        Expr::Primary(_) => String::new(),
        Expr::Pow(base, _) => term_key(base),
        Expr::Mul(l, r) => {
            if l.is_number() {
                term_key(r)
            } else {
                format!("{}{}", term_key(l), term_key(r))
            }
        },
        Expr::Product(factors) => factors
            .iter()
            .filter(|factor| !factor.is_number())
            .map(term_key)
            .collect(),
        Expr::Add(l, r) => format!("({}+{})", term_key(l), term_key(r)),
        Expr::Sum(terms) => {
            let keys: Vec<String> = terms.iter().map(term_key).collect();
            format!("({})", keys.join("+"))
        },
    }
}

/// The integer exponent of a power, looking through a leading coefficient; anything else counts
/// as degree one. Keeps `x`, `2x^2` and `x^2` grouped by degree.
fn degree(expr: &Expr) -> i64 {
    match expr {
        Expr::Pow(_, exponent) => exponent.as_integer().unwrap_or(1),
        Expr::Mul(l, r) if l.is_number() => degree(r),
        _ => 1,
    }
}

/// Terms carrying an explicit numeric coefficient sort before their bare form, so a run of
/// mergeable terms ends on the bare one.
fn coefficient_rank(expr: &Expr) -> u8 {
    match expr {
        _ if expr.is_mul_by_number() => 0,
        Expr::Product(factors) if factors.first().is_some_and(Expr::is_number) => 0,
        _ => 1,
    }
}

/// Deterministic structural tie-break: variant rank first, then contents.
fn structural_cmp(a: &Expr, b: &Expr) -> Ordering {
    fn rank(expr: &Expr) -> u8 {
        match expr {
            Expr::Primary(_) => 0,
            Expr::Add(..) => 1,
            Expr::Mul(..) => 2,
            Expr::Pow(..) => 3,
            Expr::Sum(_) => 4,
            Expr::Product(_) => 5,
        }
    }

    match (a, b) {
        (Expr::Primary(x), Expr::Primary(y)) => primary_cmp(x, y),
        (Expr::Add(al, ar), Expr::Add(bl, br))
        | (Expr::Mul(al, ar), Expr::Mul(bl, br))
        | (Expr::Pow(al, ar), Expr::Pow(bl, br)) => {
            structural_cmp(al, bl).then_with(|| structural_cmp(ar, br))
        },
        (Expr::Sum(xs), Expr::Sum(ys)) | (Expr::Product(xs), Expr::Product(ys)) => {
            xs.len().cmp(&ys.len()).then_with(|| {
                for (x, y) in xs.iter().zip(ys) {
                    let ord = structural_cmp(x, y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            })
        },
        _ => rank(a).cmp(&rank(b)),
    }
}

fn primary_cmp(a: &Primary, b: &Primary) -> Ordering {
    fn rank(primary: &Primary) -> u8 {
        match primary {
            Primary::Integer(_) => 0,
            Primary::Float(_) => 1,
            Primary::Symbol(_) => 2,
        }
    }

    match (a, b) {
        (Primary::Integer(x), Primary::Integer(y)) => x.cmp(y),
        (Primary::Float(x), Primary::Float(y)) => x.total_cmp(y),
        (Primary::Symbol(x), Primary::Symbol(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mul(l: Expr, r: Expr) -> Expr {
        Expr::Mul(Box::new(l), Box::new(r))
    }

    fn pow(base: Expr, exponent: i64) -> Expr {
        Expr::Pow(Box::new(base), Box::new(Expr::integer(exponent)))
    }

    fn sorted(mut children: Vec<Expr>) -> Vec<Expr> {
        children.sort_by(canonical_cmp);
        children
    }

    #[test]
    fn numbers_sort_first() {
        let children = sorted(vec![
            Expr::symbol("b"),
            Expr::integer(3),
            Expr::symbol("a"),
            Expr::Primary(Primary::Float(0.5)),
        ]);
        assert_eq!(children, vec![
            Expr::Primary(Primary::Float(0.5)),
            Expr::integer(3),
            Expr::symbol("a"),
            Expr::symbol("b"),
        ]);
    }

    #[test]
    fn like_terms_are_adjacent() {
        let children = sorted(vec![
            Expr::symbol("b"),
            mul(Expr::integer(2), Expr::symbol("a")),
            Expr::symbol("a"),
            Expr::integer(3),
        ]);
        assert_eq!(children, vec![
            Expr::integer(3),
            mul(Expr::integer(2), Expr::symbol("a")),
            Expr::symbol("a"),
            Expr::symbol("b"),
        ]);
    }

    #[test]
    fn powers_of_the_same_base_are_adjacent() {
        let children = sorted(vec![
            pow(Expr::symbol("y"), 3),
            pow(Expr::symbol("x"), 5),
            pow(Expr::symbol("x"), 2),
        ]);
        assert_eq!(children, vec![
            pow(Expr::symbol("x"), 2),
            pow(Expr::symbol("x"), 5),
            pow(Expr::symbol("y"), 3),
        ]);
    }

    #[test]
    fn degree_groups_terms_of_one_base() {
        let children = sorted(vec![
            pow(Expr::symbol("x"), 2),
            mul(Expr::integer(2), pow(Expr::symbol("x"), 2)),
            Expr::symbol("x"),
        ]);
        assert_eq!(children, vec![
            Expr::symbol("x"),
            mul(Expr::integer(2), pow(Expr::symbol("x"), 2)),
            pow(Expr::symbol("x"), 2),
        ]);
    }
}
