//! Combining like terms in sums: `a+2a+3a → 6a`.

use super::recurse;
use crate::expr::Expr;

/// Post-order like-term collection pass.
pub fn collect_terms(expr: &mut Expr) {
    recurse(expr, collect_terms);

    match expr {
        Expr::Add(..) => collect_binary(expr),
        Expr::Sum(_) => collect_generic(expr),
        _ => {},
    }
}

/// The four binary shapes, tried in order: `a+a`, `na+ma`, `na+a`, `a+na`. Each folds to a
/// product of the summed integer coefficient and the shared term.
fn collect_binary(expr: &mut Expr) {
    let Expr::Add(left, right) = expr else {
        return;
    };

    if left == right {
        let term = left.take();
        *expr = with_coefficient(2, term);
        return;
    }

    enum Shape {
        /// Both sides carry a coefficient; the term is taken from the left.
        Both(i64),
        /// Only the left side carries a coefficient; the bare term is on the right.
        Left(i64),
        /// Only the right side carries a coefficient; the bare term is on the left.
        Right(i64),
    }

    let shape = match (left.as_integer_coeff(), right.as_integer_coeff()) {
        (Some((ln, lt)), Some((rn, rt))) if lt == rt => Some(Shape::Both(ln + rn)),
        (Some((ln, lt)), _) if lt == &**right => Some(Shape::Left(ln + 1)),
        (_, Some((rn, rt))) if rt == &**left => Some(Shape::Right(rn + 1)),
        _ => None,
    };

    match shape {
        Some(Shape::Both(n)) => {
            if let Expr::Mul(_, term) = left.take() {
                *expr = with_coefficient(n, *term);
            }
        },
        Some(Shape::Left(n)) => {
            let term = right.take();
            *expr = with_coefficient(n, term);
        },
        Some(Shape::Right(n)) => {
            let term = left.take();
            *expr = with_coefficient(n, term);
        },
        None => {},
    }
}

/// Single left-to-right scan over adjacent siblings, carrying a running multiplier; zero means no
/// run is pending. Matched elements are consumed into the multiplier; when a run breaks, the
/// multiplier is applied to the run's final term (its own coefficient folded away), and the tail
/// of the child list closes any still-pending run as-is.
fn collect_generic(expr: &mut Expr) {
    let Expr::Sum(terms) = expr else {
        return;
    };
    let mut children = std::mem::take(terms);
    let len = children.len();

    let mut out: Vec<Expr> = Vec::with_capacity(len);
    let mut multiplier: i64 = 0;

    for i in 0..len {
        if i + 1 == len {
            if multiplier != 0 {
                out.push(with_coefficient(multiplier, children[i].take()));
            } else {
                out.push(children[i].take());
            }
            continue;
        }

        match pair_match(&children[i], &children[i + 1]) {
            PairMatch::Identical => {
                multiplier = if multiplier == 0 { 2 } else { multiplier + 1 };
            },
            PairMatch::BothCoeff(a, b) => {
                if multiplier == 0 {
                    multiplier += a;
                }
                multiplier += b;
            },
            PairMatch::CoeffBare(a) => {
                if multiplier == 0 {
                    multiplier += a;
                }
                multiplier += 1;
            },
            PairMatch::BareCoeff(b) => {
                if multiplier == 0 {
                    multiplier += 1;
                }
                multiplier += b;
            },
            PairMatch::GenericBoth(a, b) => {
                if multiplier == 0 {
                    multiplier += a;
                }
                multiplier += b;
                // the consumed coefficient is dropped so the run continues over the bare
                // product, except on the very last pair, which keeps its own
                if i + 2 < len {
                    if let Expr::Product(factors) = &mut children[i + 1] {
                        factors.remove(0);
                    }
                    if matches!(&children[i + 1], Expr::Product(f) if f.len() < 2) {
                        let degenerate = children[i + 1].take();
                        children[i + 1] = degenerate.downgrade();
                    }
                }
            },
            PairMatch::GenericCoeffBare(a) => {
                if multiplier == 0 {
                    multiplier += a;
                }
                multiplier += 1;
            },
            PairMatch::GenericBareCoeff(b) => {
                if multiplier == 0 {
                    multiplier += 1;
                }
                multiplier += b;
            },
            PairMatch::None if multiplier != 0 => {
                // close the pending run on its final term, folding away the coefficient it
                // already contributed
                let term = match children[i].take() {
                    Expr::Mul(n, term) if n.is_number() && !term.is_number() => *term,
                    other => other,
                };
                out.push(with_coefficient(multiplier, term));
                multiplier = 0;
            },
            PairMatch::None => out.push(children[i].take()),
        }
    }

    let mut collected = Expr::Sum(out);
    collected.sort_children();
    *expr = collected.downgrade();
}

enum PairMatch {
    /// Structurally equal subtrees.
    Identical,
    /// `na + ma` with equal terms.
    BothCoeff(i64, i64),
    /// `na + a`.
    CoeffBare(i64),
    /// `a + na`.
    BareCoeff(i64),
    /// Two generic products equal past their leading integer factors.
    GenericBoth(i64, i64),
    /// A generic product with a leading integer factor, followed by its bare form.
    GenericCoeffBare(i64),
    /// A bare generic product, followed by its coefficiented form.
    GenericBareCoeff(i64),
    None,
}

fn pair_match(a: &Expr, b: &Expr) -> PairMatch {
    if a == b {
        return PairMatch::Identical;
    }

    if let (Some((an, at)), Some((bn, bt))) = (a.as_integer_coeff(), b.as_integer_coeff()) {
        if at == bt {
            return PairMatch::BothCoeff(an, bn);
        }
    }
    if let Some((an, at)) = a.as_integer_coeff() {
        if at == b {
            return PairMatch::CoeffBare(an);
        }
    }
    if let Some((bn, bt)) = b.as_integer_coeff() {
        if bt == a {
            return PairMatch::BareCoeff(bn);
        }
    }

    if let (Expr::Product(af), Expr::Product(bf)) = (a, b) {
        if af.len() == bf.len() && af.len() >= 2 {
            if let (Some(an), Some(bn)) = (
                af.first().and_then(Expr::as_integer),
                bf.first().and_then(Expr::as_integer),
            ) {
                if af[1..] == bf[1..] {
                    return PairMatch::GenericBoth(an, bn);
                }
            }
        }
        if af.len() == bf.len() + 1 {
            if let Some(an) = af.first().and_then(Expr::as_integer) {
                if af[1..] == bf[..] {
                    return PairMatch::GenericCoeffBare(an);
                }
            }
        }
        if bf.len() == af.len() + 1 {
            if let Some(bn) = bf.first().and_then(Expr::as_integer) {
                if bf[1..] == af[..] {
                    return PairMatch::GenericBareCoeff(bn);
                }
            }
        }
    }

    PairMatch::None
}

fn with_coefficient(n: i64, term: Expr) -> Expr {
    Expr::Mul(Box::new(Expr::integer(n)), Box::new(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn add(l: Expr, r: Expr) -> Expr {
        Expr::Add(Box::new(l), Box::new(r))
    }

    fn mul(l: Expr, r: Expr) -> Expr {
        Expr::Mul(Box::new(l), Box::new(r))
    }

    fn coeff(n: i64, name: &str) -> Expr {
        mul(Expr::integer(n), Expr::symbol(name))
    }

    #[test]
    fn identical_terms_double() {
        let mut expr = add(Expr::symbol("a"), Expr::symbol("a"));
        collect_terms(&mut expr);
        assert_eq!(expr, coeff(2, "a"));
    }

    #[test]
    fn coefficients_sum() {
        let mut expr = add(coeff(2, "a"), coeff(3, "a"));
        collect_terms(&mut expr);
        assert_eq!(expr, coeff(5, "a"));
    }

    #[test]
    fn coefficient_and_bare_term_sum() {
        let mut expr = add(coeff(2, "a"), Expr::symbol("a"));
        collect_terms(&mut expr);
        assert_eq!(expr, coeff(3, "a"));

        let mut expr = add(Expr::symbol("a"), coeff(2, "a"));
        collect_terms(&mut expr);
        assert_eq!(expr, coeff(3, "a"));
    }

    #[test]
    fn unrelated_terms_stay() {
        let mut expr = add(Expr::symbol("a"), Expr::symbol("b"));
        collect_terms(&mut expr);
        assert_eq!(expr, add(Expr::symbol("a"), Expr::symbol("b")));

        let mut expr = add(coeff(2, "a"), coeff(3, "b"));
        collect_terms(&mut expr);
        assert_eq!(expr, add(coeff(2, "a"), coeff(3, "b")));
    }

    #[test]
    fn nested_binary_chains_collect_bottom_up() {
        // (a + a) + a → 2a + a → 3a
        let mut expr = add(add(Expr::symbol("a"), Expr::symbol("a")), Expr::symbol("a"));
        collect_terms(&mut expr);
        assert_eq!(expr, coeff(3, "a"));
    }

    #[test]
    fn generic_adjacent_run_collects() {
        let mut expr = Expr::Sum(vec![
            Expr::integer(3),
            coeff(2, "a"),
            Expr::symbol("a"),
        ]);
        collect_terms(&mut expr);
        assert_eq!(expr, Expr::Sum(vec![Expr::integer(3), coeff(3, "a")]));
    }

    #[test]
    fn generic_run_breaks_apply_the_pending_multiplier() {
        let mut expr = Expr::Sum(vec![
            Expr::symbol("a"),
            Expr::symbol("a"),
            Expr::symbol("b"),
            Expr::symbol("c"),
        ]);
        collect_terms(&mut expr);
        assert_eq!(expr, Expr::Sum(vec![
            coeff(2, "a"),
            Expr::symbol("b"),
            Expr::symbol("c"),
        ]));
    }

    #[test]
    fn generic_products_combine_their_coefficients() {
        let two_xy = Expr::Product(vec![Expr::integer(2), Expr::symbol("x"), Expr::symbol("y")]);
        let three_xy = Expr::Product(vec![Expr::integer(3), Expr::symbol("x"), Expr::symbol("y")]);
        let mut expr = Expr::Sum(vec![two_xy, three_xy.clone(), Expr::symbol("z")]);
        collect_terms(&mut expr);

        // the pending multiplier closes on the bare product once its coefficient was consumed
        assert_eq!(expr, Expr::Sum(vec![
            mul(
                Expr::integer(5),
                Expr::Product(vec![Expr::symbol("x"), Expr::symbol("y")]),
            ),
            Expr::symbol("z"),
        ]));
    }

    #[test]
    fn bare_generic_product_joins_its_coefficiented_form() {
        let two_xy = Expr::Product(vec![Expr::integer(2), Expr::symbol("x"), Expr::symbol("y")]);
        let xy = Expr::Product(vec![Expr::symbol("x"), Expr::symbol("y")]);
        let mut expr = Expr::Sum(vec![two_xy, xy.clone(), Expr::symbol("z")]);
        collect_terms(&mut expr);
        assert_eq!(expr, Expr::Sum(vec![
            mul(Expr::integer(3), xy),
            Expr::symbol("z"),
        ]));
    }

    #[test]
    fn whole_sum_collapsing_downgrades() {
        let mut expr = Expr::Sum(vec![
            Expr::symbol("a"),
            Expr::symbol("a"),
            Expr::symbol("a"),
        ]);
        collect_terms(&mut expr);
        assert_eq!(expr, coeff(3, "a"));
    }
}
