//! Simplification of expressions.
//!
//! Every simplification in this module runs the same pipeline: the expression is
//! [rationalized](rationalize) into a single fraction, the numerator and denominator are each
//! normalized, and the two are divided again. The variants differ in how each side is normalized:
//!
//! - [`simplify`] expands both sides algebraically and cancels their polynomial GCD when the
//!   expression has exactly one free symbol.
//! - [`simplify_fraction`] does the same with an explicit pivot symbol, which also works for
//!   multivariate expressions.
//! - [`simplify_exponential`] expands then contracts exponentials and logarithms.
//! - [`simplify_trigonometric`] rewrites `tan`, `cot`, `sec`, and `csc` in terms of `sin` and
//!   `cos`, then expands and contracts.
//!
//! ```
//! use cas_algebra::symbolic::{simplify, Expr};
//!
//! let x = Expr::symbol("x");
//!
//! // (x^2 - 1) / (x - 1) = x + 1
//! let expr = (x.pow(&Expr::int(2)) - Expr::int(1)) / (&x - Expr::int(1));
//! assert_eq!(simplify(&expr).unwrap(), &x + Expr::int(1));
//! ```
//!
//! A denominator that expands to zero fails with [`DivisionByZero`].

pub mod fraction;
pub mod step;

pub use fraction::{
    as_fraction,
    as_fraction_with,
    denominator,
    numerator,
    rationalize,
    rationalize_with,
};
pub use step::Step;

use crate::error::DivisionByZero;
use crate::options::Options;
use crate::symbolic::{
    expand::{contract_exp_with, contract_trig_with, expand, expand_exp, expand_trig, trig_substitute},
    expr::Expr,
    poly,
    step_collector::StepCollector,
};
use cas_error::Error;
use tracing::debug;

/// How the numerator and denominator are normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Algebraic,
    Exponential,
    Trigonometric,
}

/// Applies `f` to `expr`, recording `step` if the expression changed.
fn apply(
    expr: Expr,
    step: Step,
    steps: &mut dyn StepCollector<Step>,
    f: impl FnOnce(&Expr) -> Expr,
) -> Expr {
    let result = f(&expr);
    if result != expr {
        steps.push(step);
    }
    result
}

/// Normalizes one side of the fraction.
fn normalize(
    part: Expr,
    strategy: Strategy,
    options: &Options,
    steps: &mut dyn StepCollector<Step>,
) -> Expr {
    match strategy {
        Strategy::Algebraic => apply(part, Step::Expand, steps, expand),
        Strategy::Exponential => {
            let part = apply(part, Step::ExpandExponential, steps, expand_exp);
            let part = apply(part, Step::Expand, steps, expand);
            apply(part, Step::ContractExponential, steps, |e| contract_exp_with(e, options))
        },
        Strategy::Trigonometric => {
            let part = apply(part, Step::ExpandTrigonometric, steps, expand_trig);
            let part = apply(part, Step::Expand, steps, expand);
            apply(part, Step::ContractTrigonometric, steps, |e| contract_trig_with(e, options))
        },
    }
}

/// Divides the numerator and denominator by their GCD with respect to `pivot`, if both are
/// polynomials in it.
fn cancel_gcd(
    numer: Expr,
    denom: Expr,
    pivot: &str,
    options: &Options,
    steps: &mut dyn StepCollector<Step>,
) -> Result<(Expr, Expr), Error> {
    if !poly::is_polynomial(&numer, pivot) || !poly::is_polynomial(&denom, pivot) {
        return Ok((numer, denom));
    }

    let gcd = poly::gcd_with(&numer, &denom, pivot, options)?;
    if gcd.is_one() || gcd.is_zero() {
        return Ok((numer, denom));
    }

    debug!(%gcd, pivot, "cancelling common factor");
    steps.push(Step::CancelGcd);
    Ok((
        poly::quotient_with(&numer, &gcd, pivot, options)?,
        poly::quotient_with(&denom, &gcd, pivot, options)?,
    ))
}

/// Divides the normalized numerator by the normalized denominator.
fn combine(numer: Expr, denom: Expr) -> Expr {
    if denom.is_one() {
        numer
    } else if denom.as_number().is_some() {
        // a numeric denominator is distributed over the terms
        expand(&(numer / denom))
    } else {
        numer / denom
    }
}

/// Runs the simplification pipeline.
fn run(
    expr: &Expr,
    strategy: Strategy,
    pivot: Option<&str>,
    options: &Options,
    steps: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    if expr.is_sentinel() {
        return Ok(expr.clone());
    }

    let input = match strategy {
        Strategy::Trigonometric => apply(expr.clone(), Step::SubstituteTrigonometric, steps, trig_substitute),
        _ => expr.clone(),
    };

    let rationalized = rationalize_with(&input, options)?;
    if rationalized != input {
        steps.push(Step::Rationalize);
    }

    let numer = normalize(numerator(&rationalized), strategy, options, steps);
    let denom = normalize(denominator(&rationalized), strategy, options, steps);
    if denom.is_zero() {
        return Err(DivisionByZero.into());
    }

    // without an explicit pivot, a univariate expression uses its only symbol
    let symbols = rationalized.free_symbols();
    let pivot = pivot.or_else(|| match (strategy, symbols.len()) {
        (Strategy::Algebraic, 1) => symbols.first().and_then(Expr::as_symbol),
        _ => None,
    });

    let (numer, denom) = match pivot {
        Some(pivot) => cancel_gcd(numer, denom, pivot, options, steps)?,
        None => (numer, denom),
    };

    debug!(%numer, %denom, ?strategy, "simplified");
    Ok(combine(numer, denom))
}

/// Simplifies the expression using the default [`Options`].
///
/// The expression is brought over a common denominator, and the numerator and denominator are
/// expanded. If the expression has exactly one free symbol, their GCD is cancelled.
pub fn simplify(expr: &Expr) -> Result<Expr, Error> {
    simplify_with(expr, &Options::default())
}

/// Simplifies the expression with the given [`Options`]. See [`simplify`].
pub fn simplify_with(expr: &Expr, options: &Options) -> Result<Expr, Error> {
    run(expr, Strategy::Algebraic, None, options, &mut ())
}

/// Simplifies the expression using the default [`Options`], recording the stages that changed the
/// expression. See [`simplify`].
pub fn simplify_with_steps(
    expr: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Expr, Error> {
    run(expr, Strategy::Algebraic, None, &Options::default(), step_collector)
}

/// Simplifies the expression as a fraction of polynomials in `pivot`, cancelling their GCD.
///
/// ```
/// use cas_algebra::symbolic::{simplify::simplify_fraction, Expr};
///
/// let x = Expr::symbol("x");
/// let y = Expr::symbol("y");
///
/// // (x*y + y) / (x + 1) = y
/// let expr = (&x * &y + &y) / (&x + Expr::int(1));
/// assert_eq!(simplify_fraction(&expr, "x").unwrap(), y);
/// ```
pub fn simplify_fraction(expr: &Expr, pivot: &str) -> Result<Expr, Error> {
    simplify_fraction_with(expr, pivot, &Options::default())
}

/// Simplifies the expression as a fraction of polynomials in `pivot`, with the given [`Options`].
pub fn simplify_fraction_with(expr: &Expr, pivot: &str, options: &Options) -> Result<Expr, Error> {
    run(expr, Strategy::Algebraic, Some(pivot), options, &mut ())
}

/// Simplifies exponentials and logarithms using the default [`Options`].
pub fn simplify_exponential(expr: &Expr) -> Result<Expr, Error> {
    simplify_exponential_with(expr, &Options::default())
}

/// Simplifies exponentials and logarithms with the given [`Options`].
pub fn simplify_exponential_with(expr: &Expr, options: &Options) -> Result<Expr, Error> {
    run(expr, Strategy::Exponential, None, options, &mut ())
}

/// Simplifies trigonometric functions using the default [`Options`].
pub fn simplify_trigonometric(expr: &Expr) -> Result<Expr, Error> {
    simplify_trigonometric_with(expr, &Options::default())
}

/// Simplifies trigonometric functions with the given [`Options`].
pub fn simplify_trigonometric_with(expr: &Expr, options: &Options) -> Result<Expr, Error> {
    run(expr, Strategy::Trigonometric, None, options, &mut ())
}
