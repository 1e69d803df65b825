//! Builders that accumulate terms / factors and freeze them into canonical sums and products.

use crate::number::Number;
use std::{cmp::Ordering, sync::Arc};
use super::{Expr, ONE};

/// Combines two sentinels that are added together.
fn add_sentinels(lhs: Option<Expr>, rhs: Expr) -> Expr {
    match (lhs, rhs) {
        (None, rhs) => rhs,
        (Some(Expr::Undefined), _) | (_, Expr::Undefined) => Expr::Undefined,
        (Some(Expr::PositiveInfinity), Expr::PositiveInfinity) => Expr::PositiveInfinity,
        (Some(Expr::NegativeInfinity), Expr::NegativeInfinity) => Expr::NegativeInfinity,
        // inf - inf, inf + complex_inf, complex_inf + complex_inf
        _ => Expr::Undefined,
    }
}

/// Combines two sentinels that are multiplied together.
fn mul_sentinels(lhs: Option<Expr>, rhs: Expr) -> Expr {
    match (lhs, rhs) {
        (None, rhs) => rhs,
        (Some(Expr::Undefined), _) | (_, Expr::Undefined) => Expr::Undefined,
        (Some(Expr::ComplexInfinity), _) | (_, Expr::ComplexInfinity) => Expr::ComplexInfinity,
        (Some(lhs), rhs) if lhs == rhs => Expr::PositiveInfinity,
        _ => Expr::NegativeInfinity,
    }
}

/// Multiplies a numeric coefficient back onto the remaining factors of a term.
pub(super) fn with_coefficient(coefficient: Number, rest: Expr) -> Expr {
    if coefficient.is_one() {
        return rest;
    }

    // `rest` never contains a number, so the coefficient sorts first
    let coefficient = Expr::Number(coefficient);
    match rest {
        Expr::Product(factors) => {
            let mut children = Vec::with_capacity(factors.len() + 1);
            children.push(coefficient);
            children.extend(factors.iter().cloned());
            Expr::Product(children.into())
        },
        Expr::Number(n) if n.is_one() => coefficient,
        rest => Expr::Product(Arc::from([coefficient, rest])),
    }
}

/// Builds a product from factors that are already canonical and sorted with respect to each
/// other, such as a tail slice of a canonical product.
pub(super) fn product_from_sorted(factors: &[Expr]) -> Expr {
    match factors {
        [] => ONE.clone(),
        [single] => single.clone(),
        factors => Expr::Product(factors.into()),
    }
}

/// Accumulates terms of a sum, merging terms that share the same non-numeric part.
#[derive(Debug)]
pub(super) struct SumBuilder {
    /// The sum of every numeric term.
    constant: Number,

    /// `(coefficient, rest)` pairs with distinct `rest`.
    terms: Vec<(Number, Expr)>,

    /// Set if an infinity or [`Expr::Undefined`] was added.
    sentinel: Option<Expr>,
}

impl Default for SumBuilder {
    fn default() -> Self {
        Self {
            constant: Number::int(0),
            terms: Vec::new(),
            sentinel: None,
        }
    }
}

impl SumBuilder {
    /// Adds a term to the sum.
    pub(super) fn push(&mut self, term: Expr) {
        match term {
            Expr::PositiveInfinity | Expr::NegativeInfinity | Expr::ComplexInfinity | Expr::Undefined => {
                self.sentinel = Some(add_sentinels(self.sentinel.take(), term));
            },
            Expr::Number(n) => self.constant = self.constant.add(&n),
            Expr::Sum(terms) => {
                for term in terms.iter() {
                    self.push(term.clone());
                }
            },
            term => {
                let (coefficient, rest) = term.split_coefficient();
                match self.terms.iter_mut().find(|(_, existing)| *existing == rest) {
                    Some((existing, _)) => *existing = existing.add(&coefficient),
                    None => self.terms.push((coefficient, rest)),
                }
            },
        }
    }

    /// Freezes the accumulated terms into a canonical expression.
    pub(super) fn build(self) -> Expr {
        // an infinity absorbs every finite term
        if let Some(sentinel) = self.sentinel {
            return sentinel;
        }

        let mut children = self.terms
            .into_iter()
            .filter(|(coefficient, _)| !coefficient.is_zero())
            .map(|(coefficient, rest)| with_coefficient(coefficient, rest))
            .collect::<Vec<_>>();

        if !self.constant.is_zero() {
            let constant = Expr::from(self.constant);
            if constant.is_sentinel() {
                return constant;
            }
            children.push(constant);
        }

        children.sort();
        match children.len() {
            0 => Expr::int(0),
            1 => children.remove(0),
            _ => Expr::Sum(children.into()),
        }
    }
}

/// Accumulates factors of a product, merging factors that share the same base.
#[derive(Debug)]
pub(super) struct ProductBuilder {
    /// The product of every numeric factor.
    coefficient: Number,

    /// `(base, exponent)` pairs with distinct bases.
    factors: Vec<(Expr, Expr)>,

    /// Set if a zero factor was multiplied in.
    zero: bool,

    /// Set if an infinity or [`Expr::Undefined`] was multiplied in.
    sentinel: Option<Expr>,
}

impl Default for ProductBuilder {
    fn default() -> Self {
        Self {
            coefficient: Number::int(1),
            factors: Vec::new(),
            zero: false,
            sentinel: None,
        }
    }
}

impl ProductBuilder {
    /// Multiplies a factor into the product.
    pub(super) fn push(&mut self, factor: Expr) {
        match factor {
            Expr::PositiveInfinity | Expr::NegativeInfinity | Expr::ComplexInfinity | Expr::Undefined => {
                self.sentinel = Some(mul_sentinels(self.sentinel.take(), factor));
            },
            Expr::Number(n) if n.is_zero() => self.zero = true,
            Expr::Number(n) => self.coefficient = self.coefficient.mul(&n),
            Expr::Product(factors) => {
                for factor in factors.iter() {
                    self.push(factor.clone());
                }
            },
            factor => {
                let (base, exp) = factor.as_base_exp();
                match self.factors.iter().position(|(existing, _)| existing == base) {
                    Some(index) => {
                        // x^a * x^b = x^(a + b), which can collapse into a number or a new power
                        let (base, existing) = self.factors.swap_remove(index);
                        let exp = Expr::sum([existing, exp.clone()]);
                        self.push(power(base, exp));
                    },
                    None => self.factors.push((base.clone(), exp.clone())),
                }
            },
        }
    }

    /// Freezes the accumulated factors into a canonical expression.
    pub(super) fn build(self) -> Expr {
        match self.sentinel {
            Some(Expr::Undefined) => return Expr::Undefined,
            Some(_) if self.zero => return Expr::Undefined,
            Some(infinity) => {
                // the sign of a signed infinity follows the sign of the coefficient
                return match (infinity, self.coefficient.signum()) {
                    (Expr::PositiveInfinity, Ordering::Less) => Expr::NegativeInfinity,
                    (Expr::NegativeInfinity, Ordering::Less) => Expr::PositiveInfinity,
                    (infinity, _) => infinity,
                };
            },
            None if self.zero => return Expr::int(0),
            None => {},
        }

        let mut children = self.factors
            .into_iter()
            .map(|(base, exp)| if exp.is_one() {
                base
            } else {
                Expr::Power(Arc::new(base), Arc::new(exp))
            })
            .collect::<Vec<_>>();

        if !self.coefficient.is_one() {
            let coefficient = Expr::from(self.coefficient);
            if coefficient.is_sentinel() {
                return coefficient;
            }
            children.push(coefficient);
        }

        children.sort();
        match children.len() {
            0 => Expr::int(1),
            1 => children.remove(0),
            _ => Expr::Product(children.into()),
        }
    }
}

/// Sign of a power of a signed infinity with a positive numeric exponent.
fn infinity_power(base: &Expr, exp: &Number) -> Expr {
    match base {
        Expr::NegativeInfinity => match exp.to_integer() {
            Some(n) if n.is_even() => Expr::PositiveInfinity,
            Some(_) => Expr::NegativeInfinity,
            None => Expr::ComplexInfinity,
        },
        base => base.clone(),
    }
}

/// Raises `base` to `exp`, producing a canonical expression.
pub(super) fn power(base: Expr, exp: Expr) -> Expr {
    match (&base, &exp) {
        (Expr::Undefined, _) | (_, Expr::Undefined) => Expr::Undefined,
        (_, Expr::PositiveInfinity | Expr::NegativeInfinity | Expr::ComplexInfinity) => Expr::Undefined,
        (_, Expr::Number(e)) if e.is_zero() => {
            if base.is_zero() || base.is_sentinel() {
                Expr::Undefined
            } else {
                Expr::int(1)
            }
        },
        (_, e) if e.is_one() => base,
        (b, _) if b.is_one() => base,
        (Expr::Number(b), Expr::Number(e)) if b.is_zero() => {
            if e.is_negative() {
                Expr::ComplexInfinity
            } else {
                Expr::int(0)
            }
        },
        (Expr::PositiveInfinity | Expr::NegativeInfinity | Expr::ComplexInfinity, Expr::Number(e)) => {
            if e.is_negative() {
                Expr::int(0)
            } else {
                infinity_power(&base, e)
            }
        },
        (Expr::PositiveInfinity | Expr::NegativeInfinity | Expr::ComplexInfinity, _) => Expr::Undefined,
        (Expr::Number(b), Expr::Number(e)) => match b.pow(e) {
            Some(n) => Expr::from(n),
            None => Expr::Power(Arc::new(base), Arc::new(exp)),
        },
        // (a^b)^c = a^(b*c)
        (Expr::Power(inner_base, inner_exp), _) => {
            let exp = Expr::product([(**inner_exp).clone(), exp]);
            power((**inner_base).clone(), exp)
        },
        // (a*b)^c = a^c * b^c
        (Expr::Product(factors), _) => {
            Expr::product(factors.iter().map(|factor| power(factor.clone(), exp.clone())))
        },
        _ => Expr::Power(Arc::new(base), Arc::new(exp)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn like_terms_merge() {
        let x = sym("x");
        let sum = Expr::sum([x.clone(), x.clone(), Expr::int(3) * &x]);
        assert_eq!(sum, Expr::int(5) * &x);

        let cancelled = Expr::sum([x.clone(), -&x]);
        assert_eq!(cancelled, Expr::int(0));
    }

    #[test]
    fn like_factors_merge() {
        let x = sym("x");
        let product = Expr::product([x.pow(&Expr::int(2)), x.clone(), x.pow(&Expr::int(-3))]);
        assert_eq!(product, Expr::int(1));

        let product = Expr::product([x.clone(), x.clone(), x.clone()]);
        assert_eq!(product, Expr::Power(Arc::new(x), Arc::new(Expr::int(3))));
    }

    #[test]
    fn nested_sums_flatten() {
        let (x, y, z) = (sym("x"), sym("y"), sym("z"));
        let nested = Expr::sum([x.clone(), Expr::sum([y.clone(), z.clone()])]);
        let Expr::Sum(terms) = &nested else {
            panic!("expected a sum, got {nested:?}");
        };
        assert_eq!(terms.len(), 3);
        assert!(terms.iter().all(|term| !matches!(term, Expr::Sum(_))));
    }

    #[test]
    fn identity_laws() {
        let x = sym("x");
        let y = sym("y");
        let samples = [
            x.clone(),
            &x + &y,
            x.sin() * &y,
            x.pow(&y),
            Expr::rational(3, 7),
            Expr::float(2.5),
        ];

        for e in samples {
            assert_eq!(&e + Expr::int(0), e);
            assert_eq!(&e * Expr::int(1), e);
            assert_eq!(&e * Expr::int(0), Expr::int(0));
            assert_eq!(e.pow(&Expr::int(0)), Expr::int(1));
            assert_eq!(e.pow(&Expr::int(1)), e);
        }
    }

    #[test]
    fn order_independence() {
        let (x, y, z) = (sym("x"), sym("y"), sym("z"));
        let terms = vec![
            Expr::int(3),
            x.clone(),
            Expr::int(2) * &y,
            x.pow(&Expr::int(2)),
            z.cos(),
            -&x,
            &x * &y,
            Expr::rational(1, 2),
            y.clone(),
        ];
        let expected = Expr::sum(terms.clone());
        let expected_product = Expr::product(terms.clone());

        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let mut shuffled = terms.clone();
            shuffled.shuffle(&mut rng);
            assert_eq!(Expr::sum(shuffled.clone()), expected);
            assert_eq!(Expr::product(shuffled), expected_product);
        }
    }

    #[test]
    fn power_rules() {
        let (x, y) = (sym("x"), sym("y"));
        assert_eq!(Expr::int(0).pow(&Expr::int(0)), Expr::Undefined);
        assert_eq!(Expr::int(1).pow(&x), Expr::int(1));
        assert_eq!(Expr::int(0).pow(&Expr::int(-1)), Expr::ComplexInfinity);
        assert_eq!(Expr::int(4).pow(&Expr::rational(1, 2)), Expr::int(2));

        // (x^2)^y = x^(2y)
        let nested = x.pow(&Expr::int(2)).pow(&y);
        assert_eq!(nested, x.pow(&(Expr::int(2) * &y)));

        // (2x)^3 = 8x^3
        let distributed = (Expr::int(2) * &x).pow(&Expr::int(3));
        assert_eq!(distributed, Expr::int(8) * x.pow(&Expr::int(3)));
    }

    #[test]
    fn sentinel_arithmetic() {
        let x = sym("x");
        assert_eq!(&x + Expr::Undefined, Expr::Undefined);
        assert_eq!(&x * Expr::Undefined, Expr::Undefined);
        assert_eq!(Expr::PositiveInfinity + Expr::NegativeInfinity, Expr::Undefined);
        assert_eq!(Expr::PositiveInfinity + Expr::int(5), Expr::PositiveInfinity);
        assert_eq!(Expr::int(0) * Expr::PositiveInfinity, Expr::Undefined);
        assert_eq!(Expr::int(-2) * Expr::PositiveInfinity, Expr::NegativeInfinity);
        assert_eq!(Expr::PositiveInfinity.pow(&Expr::int(0)), Expr::Undefined);
        assert_eq!(Expr::NegativeInfinity.pow(&Expr::int(2)), Expr::PositiveInfinity);
        assert_eq!(Expr::PositiveInfinity.pow(&Expr::int(-1)), Expr::int(0));
        assert_eq!(Expr::Undefined.pow(&Expr::int(0)), Expr::Undefined);
    }

    #[test]
    fn float_coefficients() {
        let x = sym("x");
        let sum = Expr::float(1.5) * &x + &x;
        assert_eq!(sum, Expr::float(2.5) * &x);
    }
}
