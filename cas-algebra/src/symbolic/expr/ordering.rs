//! The canonical ordering of expressions.
//!
//! This is a total order used as a sorting key when building sums and products. It is **not** a
//! mathematical order: `x < x^2` holds in this order for any `x`, for example. The rules, applied
//! in priority order, are:
//!
//! 1. Numbers sort before everything else, and are compared by value.
//! 2. Two products are compared element-wise, with the shorter product sorting first on a tie.
//!    A product compared to anything else is compared as if the other expression were a
//!    one-element product, so `x*y > x`.
//! 3. Two powers are compared by base, then exponent. A power compared to a non-power compares
//!    its base to the other expression, breaking ties by comparing its exponent to `1`, so
//!    `x^(1/2) < x < x^2`.
//! 4. Sums follow the same rules as products.
//! 5. Infinities and [`Expr::Undefined`] sort before the remaining kinds, in the order
//!    `-inf < inf < complex_inf < undefined`.
//! 6. Symbols are compared by name.
//! 7. Functions are compared by name, then by argument. A function compared to a symbol compares
//!    its name to the symbol's name, and the function is greater on a tie.

use std::cmp::Ordering;
use super::{Expr, ONE};

/// Compares two sequences element-wise, breaking ties by length.
fn compare_seq(lhs: &[Expr], rhs: &[Expr]) -> Ordering {
    lhs.iter()
        .zip(rhs)
        .map(|(l, r)| compare(l, r))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| lhs.len().cmp(&rhs.len()))
}

/// Rank of each sentinel.
fn sentinel_rank(expr: &Expr) -> Option<u8> {
    match expr {
        Expr::NegativeInfinity => Some(0),
        Expr::PositiveInfinity => Some(1),
        Expr::ComplexInfinity => Some(2),
        Expr::Undefined => Some(3),
        _ => None,
    }
}

/// Compares two expressions by the canonical ordering.
pub(super) fn compare(lhs: &Expr, rhs: &Expr) -> Ordering {
    match (lhs, rhs) {
        (Expr::Number(l), Expr::Number(r)) => l.cmp(r),
        (Expr::Number(_), _) => Ordering::Less,
        (_, Expr::Number(_)) => Ordering::Greater,

        (Expr::Product(l), Expr::Product(r)) => compare_seq(l, r),
        (Expr::Product(l), _) => compare_seq(l, std::slice::from_ref(rhs)),
        (_, Expr::Product(_)) => compare(rhs, lhs).reverse(),

        (Expr::Power(lb, le), Expr::Power(rb, re)) => compare(lb, rb).then_with(|| compare(le, re)),
        (Expr::Power(base, exp), _) => compare(base, rhs).then_with(|| compare(exp, &ONE)),
        (_, Expr::Power(..)) => compare(rhs, lhs).reverse(),

        (Expr::Sum(l), Expr::Sum(r)) => compare_seq(l, r),
        (Expr::Sum(l), _) => compare_seq(l, std::slice::from_ref(rhs)),
        (_, Expr::Sum(_)) => compare(rhs, lhs).reverse(),

        _ => match (sentinel_rank(lhs), sentinel_rank(rhs)) {
            (Some(l), Some(r)) => l.cmp(&r),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => compare_atoms(lhs, rhs),
        },
    }
}

/// Compares symbols and function calls.
fn compare_atoms(lhs: &Expr, rhs: &Expr) -> Ordering {
    match (lhs, rhs) {
        (Expr::Symbol(l), Expr::Symbol(r)) => l.cmp(r),

        (Expr::Function(lf, la), Expr::Function(rf, ra)) => lf.name()
            .cmp(rf.name())
            .then_with(|| compare(la, ra)),
        (Expr::MultiFunction(lf, la), Expr::MultiFunction(rf, ra)) => lf.name()
            .cmp(rf.name())
            .then_with(|| compare_seq(la, ra)),
        (Expr::Function(lf, la), Expr::MultiFunction(rf, ra)) => lf.name()
            .cmp(rf.name())
            .then_with(|| compare(la, &ra[0]))
            .then(Ordering::Less),
        (Expr::MultiFunction(..), Expr::Function(..)) => compare_atoms(rhs, lhs).reverse(),

        (Expr::Function(f, _), Expr::Symbol(s)) => f.name().cmp(&**s).then(Ordering::Greater),
        (Expr::MultiFunction(f, _), Expr::Symbol(s)) => f.name().cmp(&**s).then(Ordering::Greater),
        (Expr::Symbol(_), Expr::Function(..) | Expr::MultiFunction(..)) => compare_atoms(rhs, lhs).reverse(),

        // every other kind was handled by `compare`
        _ => Ordering::Equal,
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The canonical ordering. See the [module-level documentation](self) for the rules.
impl Ord for Expr {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::Func;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn numbers_first() {
        let x = sym("x");
        assert!(Expr::int(100) < x);
        assert!(Expr::int(-1) < Expr::rational(1, 2));
        assert!(Expr::int(3) < Expr::Undefined);
        assert!(Expr::int(1) < Expr::float(1.0));
    }

    #[test]
    fn powers_against_bases() {
        let x = sym("x");
        assert!(x.sqrt() < x);
        assert!(x < x.pow(&Expr::int(2)));
        assert!(x.pow(&Expr::int(2)) < x.pow(&Expr::int(3)));
        assert!(x.pow(&Expr::int(5)) < sym("y"));
    }

    #[test]
    fn products_against_factors() {
        let (x, y) = (sym("x"), sym("y"));
        assert!(x < &x * &y);
        assert!(&x * &y < y);
        assert!(Expr::int(2) * &y < x);
    }

    #[test]
    fn functions_against_symbols() {
        let x = sym("x");
        let sin = Expr::call(Func::Sin, x.clone());
        assert!(sin > sym("sin"));
        assert!(sin < sym("t"));
        assert!(sin > sym("a"));
        assert!(Expr::call(Func::Cos, x.clone()) < sin);
    }

    #[test]
    fn total_and_antisymmetric() {
        let (x, y) = (sym("x"), sym("y"));
        let samples = vec![
            Expr::int(2),
            Expr::float(0.5),
            x.clone(),
            y.clone(),
            &x + &y,
            &x * &y,
            x.pow(&Expr::int(2)),
            x.sqrt(),
            (&x + Expr::int(1)).pow(&Expr::int(2)),
            x.sin(),
            y.exp(),
            Expr::PositiveInfinity,
            Expr::Undefined,
        ];

        for a in &samples {
            for b in &samples {
                assert_eq!(a.cmp(b), b.cmp(a).reverse(), "{a} vs {b}");
                assert_eq!(a.cmp(b) == Ordering::Equal, a == b, "{a} vs {b}");
                for c in &samples {
                    if a < b && b < c {
                        assert!(a < c, "{a} < {b} < {c}");
                    }
                }
            }
        }
    }
}
