//! Polynomials in one pivot symbol.
//!
//! Every function here reads its input as a polynomial in the pivot `x`: a sum of terms
//! `c*x^n`, where the coefficient `c` is any expression that does not contain `x`. Coefficients
//! may therefore contain other symbols, so `x*y + y` is a polynomial of degree 1 in `x` with
//! coefficients `y` and `y`.
//!
//! Inputs are [expanded](crate::symbolic::expand()) before they are classified, so `(x + 1)^2`
//! is accepted as `x^2 + 2x + 1`.

use crate::error::{DivisionByZero, IterationLimit, NotPolynomial};
use crate::number::Number;
use crate::options::Options;
use crate::symbolic::{expand::expand, expr::{Expr, ONE, ZERO}};
use cas_error::Error;
use std::slice;
use tracing::{debug, trace};

/// Returns true if the expression is the pivot symbol.
fn is_pivot(expr: &Expr, x: &str) -> bool {
    expr.as_symbol() == Some(x)
}

/// Returns the terms of the expression: the children of a sum, nothing for zero, and the
/// expression itself otherwise.
fn terms(expr: &Expr) -> &[Expr] {
    match expr {
        Expr::Sum(terms) => &terms[..],
        _ if expr.is_zero() => &[],
        _ => slice::from_ref(expr),
    }
}

/// Splits a monomial into its coefficient and its degree in `x`.
fn split_monomial(term: &Expr, x: &str) -> (Expr, u32) {
    match term {
        _ if is_pivot(term, x) => (ONE.clone(), 1),
        Expr::Power(base, exp) if is_pivot(base, x) => (ONE.clone(), exp.as_positive_integer().unwrap_or(0)),
        Expr::Product(factors) => {
            let mut coefficient = Vec::new();
            let mut degree = 0;
            for factor in factors.iter() {
                match split_monomial(factor, x) {
                    (c, 0) => coefficient.push(c),
                    (_, n) => degree += n,
                }
            }
            (Expr::product(coefficient), degree)
        },
        _ => (term.clone(), 0),
    }
}

fn not_polynomial(expr: &Expr, x: &str) -> Error {
    NotPolynomial { expr: expr.to_string(), pivot: x.to_owned() }.into()
}

/// Returns true if the expression is a monomial in `x`: a number, `x`, a positive integer power
/// of `x`, an expression free of `x`, or a product of monomials.
pub fn is_monomial(expr: &Expr, x: &str) -> bool {
    match expr {
        Expr::Number(_) => true,
        _ if is_pivot(expr, x) => true,
        Expr::Power(base, exp) if is_pivot(base, x) => exp.as_positive_integer().is_some(),
        Expr::Product(factors) => factors.iter().all(|factor| is_monomial(factor, x)),
        _ => !expr.contains_symbol(x),
    }
}

/// Returns true if the expression is a monomial in `x`, or a sum of monomials.
///
/// The expression is classified as given; call [`expand`] first to accept products of sums.
pub fn is_polynomial(expr: &Expr, x: &str) -> bool {
    terms(expr).iter().all(|term| is_monomial(term, x))
}

/// Expands the expression and checks that it is a polynomial in `x`.
fn expand_polynomial(expr: &Expr, x: &str) -> Result<Expr, Error> {
    let expanded = expand(expr);
    if is_polynomial(&expanded, x) {
        Ok(expanded)
    } else {
        Err(not_polynomial(expr, x))
    }
}

/// Returns the degree of an expanded polynomial.
fn degree_of(expr: &Expr, x: &str) -> u32 {
    terms(expr).iter()
        .map(|term| split_monomial(term, x).1)
        .max()
        .unwrap_or(0)
}

/// Returns the coefficient of `x^j` in an expanded polynomial, combining the coefficients of
/// every term of that degree.
fn coefficient_of(expr: &Expr, x: &str, j: u32) -> Expr {
    Expr::sum(terms(expr).iter().filter_map(|term| {
        let (coefficient, degree) = split_monomial(term, x);
        (degree == j).then_some(coefficient)
    }))
}

/// Returns the degree of the polynomial in `x`. The degree of zero is zero.
///
/// ```
/// use cas_algebra::symbolic::{poly::degree, Expr};
///
/// let x = Expr::symbol("x");
/// let y = Expr::symbol("y");
///
/// // x^3*y + x + 1
/// let p = x.pow(&Expr::int(3)) * &y + &x + Expr::int(1);
/// assert_eq!(degree(&p, "x").unwrap(), 3);
/// assert_eq!(degree(&p, "y").unwrap(), 1);
/// ```
pub fn degree(expr: &Expr, x: &str) -> Result<u32, Error> {
    Ok(degree_of(&expand_polynomial(expr, x)?, x))
}

/// Returns the coefficient of `x^j` in the polynomial.
pub fn coefficient(expr: &Expr, x: &str, j: u32) -> Result<Expr, Error> {
    Ok(coefficient_of(&expand_polynomial(expr, x)?, x, j))
}

/// Returns the coefficient of the highest power of `x` in the polynomial.
pub fn leading_coefficient(expr: &Expr, x: &str) -> Result<Expr, Error> {
    let expr = expand_polynomial(expr, x)?;
    Ok(coefficient_of(&expr, x, degree_of(&expr, x)))
}

/// Divides `u` by `v` as polynomials in `x`, using the default [`Options`]. Returns the quotient
/// and remainder.
///
/// ```
/// use cas_algebra::symbolic::{poly::divide, Expr};
///
/// let x = Expr::symbol("x");
///
/// // (x^2 + 3x + 2) / (x + 1) = x + 2
/// let u = x.pow(&Expr::int(2)) + Expr::int(3) * &x + Expr::int(2);
/// let v = &x + Expr::int(1);
/// assert_eq!(divide(&u, &v, "x").unwrap(), (&x + Expr::int(2), Expr::int(0)));
/// ```
pub fn divide(u: &Expr, v: &Expr, x: &str) -> Result<(Expr, Expr), Error> {
    divide_with(u, v, x, &Options::default())
}

/// Divides `u` by `v` as polynomials in `x` by long division. Returns the quotient `q` and
/// remainder `r`, such that `u = q*v + r` after expansion and the degree of `r` is less than the
/// degree of `v` (or `r` is zero).
///
/// Fails with [`DivisionByZero`] if `v` is zero, [`NotPolynomial`] if either operand is not a
/// polynomial in `x`, and [`IterationLimit`] after [`Options::max_division_steps`] steps.
pub fn divide_with(u: &Expr, v: &Expr, x: &str, options: &Options) -> Result<(Expr, Expr), Error> {
    let u = expand_polynomial(u, x)?;
    let v = expand_polynomial(v, x)?;
    if v.is_zero() {
        return Err(DivisionByZero.into());
    }

    let pivot = Expr::symbol(x);
    let n = degree_of(&v, x);
    let lcv = coefficient_of(&v, x, n);
    let v_rest = expand(&(&v - &lcv * pivot.pow(&Expr::Number(Number::int(n)))));

    let mut quotient = ZERO.clone();
    let mut remainder = u;
    for step in 0..options.max_division_steps {
        let m = degree_of(&remainder, x);
        if remainder.is_zero() || m < n {
            debug!(%quotient, %remainder, steps = step, "polynomial division");
            return Ok((quotient, remainder));
        }

        // the leading terms are removed separately so that they cancel exactly
        let lcr = coefficient_of(&remainder, x, m);
        let s = &lcr / &lcv;
        let shift = pivot.pow(&Expr::Number(Number::int(m - n)));
        quotient = expand(&(quotient + &s * &shift));
        remainder = expand(&(
            expand(&(&remainder - &lcr * pivot.pow(&Expr::Number(Number::int(m)))))
                - &v_rest * &s * &shift
        ));
        trace!(step, %quotient, %remainder, "long division step");
    }

    Err(IterationLimit {
        operation: "polynomial division",
        limit: options.max_division_steps,
    }.into())
}

/// Returns the quotient of `u / v` as polynomials in `x`. See [`divide`].
pub fn quotient(u: &Expr, v: &Expr, x: &str) -> Result<Expr, Error> {
    quotient_with(u, v, x, &Options::default())
}

/// Returns the quotient of `u / v` as polynomials in `x`, with the given [`Options`].
pub fn quotient_with(u: &Expr, v: &Expr, x: &str, options: &Options) -> Result<Expr, Error> {
    divide_with(u, v, x, options).map(|(q, _)| q)
}

/// Returns the remainder of `u / v` as polynomials in `x`. See [`divide`].
pub fn remainder(u: &Expr, v: &Expr, x: &str) -> Result<Expr, Error> {
    remainder_with(u, v, x, &Options::default())
}

/// Returns the remainder of `u / v` as polynomials in `x`, with the given [`Options`].
pub fn remainder_with(u: &Expr, v: &Expr, x: &str, options: &Options) -> Result<Expr, Error> {
    divide_with(u, v, x, options).map(|(_, r)| r)
}

/// Divides the polynomial by its leading coefficient.
fn make_monic(expr: &Expr, x: &str) -> Expr {
    let lc = coefficient_of(expr, x, degree_of(expr, x));
    expand(&(expr / lc))
}

/// Returns the monic greatest common divisor of `u` and `v` as polynomials in `x`, using the
/// default [`Options`]. See [`gcd_with`].
pub fn gcd(u: &Expr, v: &Expr, x: &str) -> Result<Expr, Error> {
    gcd_with(u, v, x, &Options::default())
}

/// Returns the monic greatest common divisor of `u` and `v` as polynomials in `x`, computed with
/// the Euclidean algorithm. The GCD of two zero polynomials is zero.
///
/// Fails with [`NotPolynomial`] if either operand is not a polynomial in `x`, and
/// [`IterationLimit`] after [`Options::max_division_steps`] remainder steps.
pub fn gcd_with(u: &Expr, v: &Expr, x: &str, options: &Options) -> Result<Expr, Error> {
    let mut a = expand_polynomial(u, x)?;
    let mut b = expand_polynomial(v, x)?;
    if a.is_zero() && b.is_zero() {
        return Ok(ZERO.clone());
    }

    for step in 0..options.max_division_steps {
        if b.is_zero() {
            let gcd = make_monic(&a, x);
            debug!(%gcd, steps = step, "polynomial gcd");
            return Ok(gcd);
        }
        let r = remainder_with(&a, &b, x, options)?;
        a = b;
        b = r;
    }

    Err(IterationLimit {
        operation: "polynomial gcd",
        limit: options.max_division_steps,
    }.into())
}

/// Returns the monic least common multiple of `u` and `v` as polynomials in `x`, using the
/// default [`Options`].
pub fn lcm(u: &Expr, v: &Expr, x: &str) -> Result<Expr, Error> {
    lcm_with(u, v, x, &Options::default())
}

/// Returns the monic least common multiple of `u` and `v` as polynomials in `x`: the product of
/// the two divided by their [GCD](gcd_with). The LCM with zero is zero.
pub fn lcm_with(u: &Expr, v: &Expr, x: &str, options: &Options) -> Result<Expr, Error> {
    let gcd = gcd_with(u, v, x, options)?;
    if gcd.is_zero() {
        return Ok(ZERO.clone());
    }

    let product = expand(&(u * v));
    if product.is_zero() {
        return Ok(ZERO.clone());
    }
    let lcm = quotient_with(&product, &gcd, x, options)?;
    Ok(make_monic(&lcm, x))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn int(n: i64) -> Expr {
        Expr::int(n)
    }

    #[test]
    fn classification() {
        let (x, y) = (sym("x"), sym("y"));
        assert!(is_monomial(&(int(3) * x.pow(&int(2)) * &y), "x"));
        assert!(is_monomial(&y.sin(), "x"));
        assert!(!is_monomial(&x.recip(), "x"));
        assert!(!is_monomial(&x.sin(), "x"));
        assert!(!is_monomial(&x.pow(&y), "x"));

        assert!(is_polynomial(&(x.pow(&int(2)) + y.sin()), "x"));
        assert!(!is_polynomial(&(&x + x.recip()), "x"));
        assert!(is_polynomial(&int(0), "x"));

        // products of sums are only accepted after expansion
        let squared = (&x + int(1)).pow(&int(2));
        assert!(!is_polynomial(&squared, "x"));
        assert_eq!(degree(&squared, "x").unwrap(), 2);
    }

    #[test]
    fn degrees() {
        let (x, y) = (sym("x"), sym("y"));
        let p = x.pow(&int(3)) + &x * &y + int(1);
        assert_eq!(degree(&p, "x").unwrap(), 3);
        assert_eq!(degree(&int(7), "x").unwrap(), 0);
        assert_eq!(degree(&int(0), "x").unwrap(), 0);

        let err = degree(&x.sin(), "x").unwrap_err();
        assert!(err.is::<NotPolynomial>());
    }

    #[test]
    fn coefficients() {
        let (x, y) = (sym("x"), sym("y"));
        // x*y + 2x + 3
        let p = &x * &y + int(2) * &x + int(3);
        assert_eq!(coefficient(&p, "x", 1).unwrap(), &y + int(2));
        assert_eq!(coefficient(&p, "x", 0).unwrap(), int(3));
        assert_eq!(coefficient(&p, "x", 5).unwrap(), int(0));

        let q = int(3) * x.pow(&int(2)) + &x;
        assert_eq!(leading_coefficient(&q, "x").unwrap(), int(3));
    }

    #[test]
    fn exact_division() {
        let x = sym("x");
        let u = x.pow(&int(2)) + int(3) * &x + int(2);
        let v = &x + int(1);
        let (q, r) = divide(&u, &v, "x").unwrap();
        assert_eq!(q, &x + int(2));
        assert_eq!(r, int(0));
    }

    #[test]
    fn division_with_remainder() {
        let x = sym("x");
        // x^2 + 1 = (x + 1)(x - 1) + 2
        let u = x.pow(&int(2)) + int(1);
        let v = &x - int(1);
        assert_eq!(divide(&u, &v, "x").unwrap(), (&x + int(1), int(2)));
        assert_eq!(remainder(&u, &x, "x").unwrap(), int(1));
    }

    #[test]
    fn division_invariant() {
        let x = sym("x");
        let samples = [
            (
                int(2) * x.pow(&int(4)) - int(3) * x.pow(&int(2)) + &x - int(5),
                x.pow(&int(2)) + &x + int(1),
            ),
            (x.pow(&int(3)) + int(4), int(2) * &x + int(1)),
            (&x + int(3), x.pow(&int(2))),
            (int(6) * x.pow(&int(2)), int(3)),
        ];
        for (u, v) in samples {
            let (q, r) = divide(&u, &v, "x").unwrap();
            assert_eq!(expand(&(&q * &v + &r)), expand(&u), "{u} / {v}");
            assert!(r.is_zero() || degree(&r, "x").unwrap() < degree(&v, "x").unwrap());
        }
    }

    #[test]
    fn multivariate_coefficients() {
        let (x, y) = (sym("x"), sym("y"));
        // (x*y + y) / (x + 1) = y
        let u = &x * &y + &y;
        assert_eq!(divide(&u, &(&x + int(1)), "x").unwrap(), (y.clone(), int(0)));
        assert_eq!(gcd(&u, &(&x + int(1)), "x").unwrap(), &x + int(1));
    }

    #[test]
    fn division_errors() {
        let x = sym("x");
        let err = divide(&x, &int(0), "x").unwrap_err();
        assert!(err.is::<DivisionByZero>());

        let err = divide(&x.exp(), &x, "x").unwrap_err();
        assert!(err.is::<NotPolynomial>());
    }

    #[test]
    fn gcds() {
        let x = sym("x");
        let p = x.pow(&int(2)) - int(1);
        let q = &x - int(1);
        assert_eq!(gcd(&p, &q, "x").unwrap(), q);

        // the gcd is monic even when both inputs have other leading coefficients
        let p = int(2) * &x + int(2);
        let q = int(4) * x.pow(&int(2)) - int(4);
        assert_eq!(gcd(&p, &q, "x").unwrap(), &x + int(1));

        assert_eq!(gcd(&(x.pow(&int(2)) + int(1)), &x, "x").unwrap(), int(1));
        assert_eq!(gcd(&int(0), &int(0), "x").unwrap(), int(0));
        assert_eq!(gcd(&int(0), &(int(3) * &x), "x").unwrap(), x);
    }

    #[test]
    fn gcd_invariant() {
        let x = sym("x");
        let samples = [
            (x.pow(&int(3)) - x.clone(), x.pow(&int(2)) + int(2) * &x + int(1)),
            (x.pow(&int(4)) - int(1), x.pow(&int(3)) + x.pow(&int(2)) + &x + int(1)),
            (int(3) * x.pow(&int(2)) + int(6) * &x, int(6) * &x),
        ];
        for (p, q) in samples {
            let g = gcd(&p, &q, "x").unwrap();
            assert_eq!(leading_coefficient(&g, "x").unwrap(), int(1), "gcd({p}, {q}) = {g}");
            assert_eq!(remainder(&p, &g, "x").unwrap(), int(0));
            assert_eq!(remainder(&q, &g, "x").unwrap(), int(0));
        }
    }

    #[test]
    fn lcms() {
        let x = sym("x");
        let expected = x.pow(&int(2)) - int(1);
        assert_eq!(lcm(&(&x - int(1)), &(&x + int(1)), "x").unwrap(), expected);
        assert_eq!(lcm(&(int(2) * &x + int(2)), &expected, "x").unwrap(), expected);
        assert_eq!(lcm(&int(0), &x, "x").unwrap(), int(0));
    }

    #[test]
    fn iteration_limit() {
        let x = sym("x");
        let options = Options { max_division_steps: 1, ..Options::default() };
        let err = divide_with(&x.pow(&int(3)), &(&x + int(1)), "x", &options).unwrap_err();
        assert!(err.is::<IterationLimit>());
    }
}
