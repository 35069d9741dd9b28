//! The expression tree manipulated by the simplifier.
//!
//! # Binary and generic nodes
//!
//! Interior nodes come in two shapes. Trees are *born* fully binary: the builder only produces
//! [`Expr::Add`], [`Expr::Mul`] and [`Expr::Pow`] nodes. During simplification, nested chains of
//! the same associative operator are flattened into the n-ary [`Expr::Sum`] and [`Expr::Product`]
//! forms (we call these **generic** nodes), so that rules looking for related terms can scan a
//! single child list instead of digging through a lopsided chain. A generic node always has at
//! least two children; when a rewrite leaves exactly two, canonicalization collapses it back to
//! the binary form. `^` is never generic.
//!
//! # Structural equality
//!
//! The derived [`PartialEq`] implements **structural equality**: a deep, order-sensitive,
//! value-based comparison. Two separately built subtrees denoting the same syntactic expression
//! compare equal even though they are distinct objects. This is the termination test for the
//! simplification loop and the matching primitive for every "same term" rule, which is why the
//! sibling order established by [`sort_children`](Expr::sort_children) matters: rules only look
//! at adjacent siblings.

pub mod builder;
pub mod ord;

use std::cmp::Ordering;
use std::fmt;

/// A single leaf value: a number or a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer literal, such as `2` or `144`.
    Integer(i64),

    /// A floating-point literal, such as `3.14` or `0.5`.
    Float(f64),

    /// A variable, such as `x` or `speed`.
    Symbol(String),
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{}", x),
            Self::Symbol(name) => write!(f, "{}", name),
        }
    }
}

/// A node in the expression tree. See the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A single number or variable.
    Primary(Primary),

    /// Binary addition.
    Add(Box<Expr>, Box<Expr>),

    /// Binary multiplication.
    Mul(Box<Expr>, Box<Expr>),

    /// A base raised to an exponent. Always binary.
    Pow(Box<Expr>, Box<Expr>),

    /// Flattened n-ary addition.
    Sum(Vec<Expr>),

    /// Flattened n-ary multiplication.
    Product(Vec<Expr>),
}

impl Expr {
    /// Creates an integer leaf.
    pub fn integer(n: i64) -> Self {
        Self::Primary(Primary::Integer(n))
    }

    /// Creates a variable leaf.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Returns true if the expression is a leaf.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Primary(_))
    }

    /// Returns true if the expression is a numeric literal.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)) | Self::Primary(Primary::Float(_)))
    }

    /// The value of a numeric literal, widened to a float.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Primary(Primary::Integer(n)) => Some(*n as f64),
            Self::Primary(Primary::Float(x)) => Some(*x),
            _ => None,
        }
    }

    /// If the expression is an integer literal, returns the contained value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Primary(Primary::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// If the expression is a variable, returns its name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(name)) => Some(name),
            _ => None,
        }
    }

    /// Returns true if the expression is the integer literal `0`.
    pub fn is_zero(&self) -> bool {
        self.as_integer() == Some(0)
    }

    /// Returns true if the expression is the integer literal `1`.
    pub fn is_one(&self) -> bool {
        self.as_integer() == Some(1)
    }

    /// Returns true for both the binary and the generic addition node.
    pub fn is_add(&self) -> bool {
        matches!(self, Self::Add(..) | Self::Sum(_))
    }

    /// Returns true for both the binary and the generic multiplication node.
    pub fn is_mul(&self) -> bool {
        matches!(self, Self::Mul(..) | Self::Product(_))
    }

    /// Returns true if the expression is a power.
    pub fn is_pow(&self) -> bool {
        matches!(self, Self::Pow(..))
    }

    /// Returns true if the expression is an n-ary node.
    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Sum(_) | Self::Product(_))
    }

    /// Returns true if the expression is a binary product of a numeric literal and a non-numeric
    /// term, i.e. a term with an explicit leading coefficient such as `2x`.
    pub fn is_mul_by_number(&self) -> bool {
        matches!(self, Self::Mul(l, r) if l.is_number() && !r.is_number())
    }

    /// Splits a term with an explicit integer coefficient into the coefficient and the term:
    /// `3x` → `(3, x)`. Terms whose coefficient is not an integer literal do not split.
    pub fn as_integer_coeff(&self) -> Option<(i64, &Expr)> {
        if let Self::Mul(l, r) = self {
            if !r.is_number() {
                if let Some(n) = l.as_integer() {
                    return Some((n, r));
                }
            }
        }
        None
    }

    /// Replaces the expression with a placeholder and returns the previous value, for in-place
    /// rewrites that need ownership of the node.
    pub(crate) fn take(&mut self) -> Expr {
        std::mem::replace(self, Expr::Primary(Primary::Integer(0)))
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some rewrites may leave a [`Expr::Sum`] or [`Expr::Product`] with zero or one child. This
    /// function collapses these cases into the single child, or the operator's identity element,
    /// restoring the arity invariant of generic nodes.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Sum(mut terms) => {
                if terms.is_empty() {
                    Self::integer(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Sum(terms)
                }
            },
            Self::Product(mut factors) => {
                if factors.is_empty() {
                    Self::integer(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Product(factors)
                }
            },
            _ => self,
        }
    }

    /// Sorts the children of a generic node into canonical order. Everything else is untouched.
    pub fn sort_children(&mut self) {
        if let Self::Sum(children) | Self::Product(children) = self {
            children.sort_by(ord::canonical_cmp);
        }
    }

    /// Returns the precedence of the expression's operator; leaves bind tightest.
    fn precedence(&self) -> u8 {
        match self {
            Self::Primary(_) => 4,
            Self::Pow(..) => 3,
            Self::Mul(..) | Self::Product(_) => 2,
            Self::Add(..) | Self::Sum(_) => 1,
        }
    }

    /// Compares the precedence of two expressions, used to decide whether a child needs
    /// parentheses when printing.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn operand(child: &Expr, parent: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if matches!(child.cmp_precedence(parent), Ordering::Less) {
                write!(f, "({})", child)
            } else {
                write!(f, "{}", child)
            }
        }

        fn sequence(children: &[Expr], parent: &Expr, sep: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut iter = children.iter();
            if let Some(child) = iter.next() {
                operand(child, parent, f)?;
                for child in iter {
                    write!(f, "{}", sep)?;
                    operand(child, parent, f)?;
                }
            }
            Ok(())
        }

        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(l, r) => {
                operand(l, self, f)?;
                write!(f, " + ")?;
                operand(r, self, f)
            },
            Self::Mul(l, r) => {
                operand(l, self, f)?;
                write!(f, " * ")?;
                operand(r, self, f)
            },
            Self::Pow(base, exponent) => {
                operand(base, self, f)?;
                write!(f, "^")?;
                operand(exponent, self, f)
            },
            Self::Sum(terms) => sequence(terms, self, " + ", f),
            Self::Product(factors) => sequence(factors, self, " * ", f),
        }
    }
}
