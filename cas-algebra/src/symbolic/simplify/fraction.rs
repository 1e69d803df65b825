//! Tools to help manipulate fractions.
//!
//! In canonical form, a fraction is a [`Expr::Product`] whose denominator factors are raised to
//! negative powers: `x / (y + 1)` is `x * (y + 1)^(-1)`. The functions in this module read an
//! expression as an explicit `numerator / denominator` pair, and [`rationalize`] rewrites sums of
//! fractions over a common denominator.

use crate::error::IterationLimit;
use crate::number::Number;
use crate::options::Options;
use crate::symbolic::expr::{Expr, ONE};
use cas_error::Error;
use tracing::trace;

/// Returns the numerator of the expression.
///
/// Factors raised to a negative number are part of the denominator; everything else is part of
/// the numerator. The numerator of a sum is the sum itself.
pub fn numerator(expr: &Expr) -> Expr {
    match expr {
        Expr::Number(n) => Expr::Number(n.numer()),
        Expr::Power(_, exp) if exp.as_number().is_some_and(Number::is_negative) => ONE.clone(),
        Expr::Product(factors) => Expr::product(factors.iter().map(numerator)),
        other => other.clone(),
    }
}

/// Returns the denominator of the expression, with positive exponents. The denominator of a sum
/// is one.
pub fn denominator(expr: &Expr) -> Expr {
    match expr {
        Expr::Number(n) => Expr::Number(n.denom()),
        Expr::Power(base, exp) if exp.as_number().is_some_and(Number::is_negative) => base.pow(&-&**exp),
        Expr::Product(factors) => Expr::product(factors.iter().map(denominator)),
        _ => ONE.clone(),
    }
}

/// Adds two rationalized expressions, bringing them over a common denominator.
fn rationalize_sum(lhs: Expr, rhs: Expr, options: &Options) -> Result<Expr, Error> {
    let mut lhs = lhs;
    let mut rhs = rhs;
    let mut common = ONE.clone();

    for step in 0..options.max_rationalize_steps {
        let (m, r) = (numerator(&lhs), denominator(&lhs));
        let (n, s) = (numerator(&rhs), denominator(&rhs));
        if r.is_one() && s.is_one() {
            return Ok((lhs + rhs) / common);
        }

        // m/r + n/s = (m*s + n*r) / (r*s)
        trace!(step, %r, %s, "cross-multiplying");
        common = common * &r * &s;
        lhs = m * s;
        rhs = n * r;
    }

    Err(IterationLimit {
        operation: "rationalization",
        limit: options.max_rationalize_steps,
    }.into())
}

/// Rewrites sums of fractions over a common denominator, at every level of the expression except
/// inside function arguments, using the default [`Options`].
///
/// ```
/// use cas_algebra::symbolic::{simplify::rationalize, Expr};
///
/// let x = Expr::symbol("x");
/// let y = Expr::symbol("y");
///
/// // 1/x + 1/y = (x + y) / (x*y)
/// let expr = x.recip() + y.recip();
/// assert_eq!(rationalize(&expr).unwrap(), (&x + &y) / (&x * &y));
/// ```
pub fn rationalize(expr: &Expr) -> Result<Expr, Error> {
    rationalize_with(expr, &Options::default())
}

/// Rewrites sums of fractions over a common denominator.
///
/// Fails with [`IterationLimit`] if a sum needs more than [`Options::max_rationalize_steps`]
/// cross-multiplications.
pub fn rationalize_with(expr: &Expr, options: &Options) -> Result<Expr, Error> {
    match expr {
        Expr::Power(base, exp) => Ok(rationalize_with(base, options)?.pow(exp)),
        Expr::Product(factors) => {
            let factors = factors.iter()
                .map(|factor| rationalize_with(factor, options))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::product(factors))
        },
        Expr::Sum(terms) => {
            let first = rationalize_with(&terms[0], options)?;
            let rest = rationalize_with(&Expr::sum(terms[1..].iter().cloned()), options)?;
            rationalize_sum(first, rest, options)
        },
        other => Ok(other.clone()),
    }
}

/// Rationalizes the expression and splits it into its numerator and denominator.
pub fn as_fraction(expr: &Expr) -> Result<(Expr, Expr), Error> {
    as_fraction_with(expr, &Options::default())
}

/// Rationalizes the expression with the given [`Options`] and splits it into its numerator and
/// denominator.
pub fn as_fraction_with(expr: &Expr, options: &Options) -> Result<(Expr, Expr), Error> {
    let rationalized = rationalize_with(expr, options)?;
    Ok((numerator(&rationalized), denominator(&rationalized)))
}
