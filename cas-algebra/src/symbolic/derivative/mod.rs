//! Symbolic differentiation.
//!
//! [`derivative`] differentiates structurally, by case on the kind of node. Every intermediate
//! result goes through the canonicalizing constructors, so the derivative is already partially
//! simplified: like terms are merged and zero terms vanish.
//!
//! ```
//! use cas_algebra::symbolic::{derivative, Expr};
//!
//! let x = Expr::symbol("x");
//!
//! // d/dx sin(x^2) = 2x cos(x^2)
//! let f = x.pow(&Expr::int(2)).sin();
//! assert_eq!(
//!     derivative(&f, "x").unwrap(),
//!     Expr::int(2) * &x * x.pow(&Expr::int(2)).cos(),
//! );
//! ```

mod function;
mod taylor;

pub use taylor::taylor;

use crate::error::Unsupported;
use crate::symbolic::expr::{Expr, MultiFunc, ONE, ZERO};
use crate::symbolic::simplify::simplify;
use cas_error::Error;

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[Expr], with: &str) -> Result<Expr, Error> {
    let terms = terms.iter()
        .map(|term| derivative(term, with))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Expr::sum(terms))
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(factors: &[Expr], with: &str) -> Result<Expr, Error> {
    let mut terms = Vec::with_capacity(factors.len());
    for (index, factor) in factors.iter().enumerate() {
        let d = derivative(factor, with)?;
        if d.is_zero() {
            continue;
        }

        let others = factors.iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, other)| other.clone());
        terms.push(Expr::product(std::iter::once(d).chain(others)));
    }
    Ok(Expr::sum(terms))
}

/// `(b^e)' = e' * ln(b) * b^e + e * b' * b^(e - 1)`
///
/// The first term vanishes when the exponent is constant, leaving the usual power rule.
fn power_rule(base: &Expr, exp: &Expr, with: &str) -> Result<Expr, Error> {
    let d_base = derivative(base, with)?;
    let d_exp = derivative(exp, with)?;

    let mut terms = Vec::with_capacity(2);
    if !d_exp.is_zero() {
        terms.push(Expr::product([d_exp, base.ln(), base.pow(exp)]));
    }
    if !d_base.is_zero() {
        terms.push(Expr::product([exp.clone(), d_base, base.pow(&(exp - &*ONE))]));
    }
    Ok(Expr::sum(terms))
}

/// Differentiates a call to a function of several arguments.
///
/// Only `log(a, b) = ln(a) / ln(b)` has a derivative.
fn multi_function_rule(func: MultiFunc, args: &[Expr], with: &str) -> Result<Expr, Error> {
    func.check_arity(args.len())?;
    match (func, args) {
        (MultiFunc::Log, [value, base]) => derivative(&(value.ln() / base.ln()), with),
        _ => Err(Unsupported { operation: "derivative", name: func.name() }.into()),
    }
}

/// Computes the derivative of the given expression with respect to the symbol named `with`.
///
/// The derivative of an infinity or [`Expr::Undefined`] is the value itself. Fails with
/// [`Unsupported`] if the expression calls a function of several arguments other than `log`.
pub fn derivative(f: &Expr, with: &str) -> Result<Expr, Error> {
    if f.is_sentinel() {
        return Ok(f.clone());
    }

    if !f.contains_symbol(with) {
        return Ok(ZERO.clone());
    }

    match f {
        Expr::Symbol(_) => Ok(ONE.clone()),
        Expr::Sum(terms) => sum_rule(terms, with),
        Expr::Product(factors) => product_rule(factors, with),
        Expr::Power(base, exp) => power_rule(base, exp, with),
        Expr::Function(func, arg) => {
            // chain rule
            let outer = function::derivative(*func, arg);
            Ok(outer * derivative(arg, with)?)
        },
        Expr::MultiFunction(func, args) => multi_function_rule(*func, args, with),

        // numbers and sentinels never contain the symbol
        _ => Ok(ZERO.clone()),
    }
}

/// Computes the `n`th derivative of the given expression. The zeroth derivative is the expression
/// itself.
pub fn nth_derivative(f: &Expr, with: &str, n: usize) -> Result<Expr, Error> {
    let mut result = f.clone();
    for _ in 0..n {
        result = derivative(&result, with)?;
    }
    Ok(result)
}

/// Computes the derivative of the given expression at `point`, and simplifies the result.
pub fn derivative_at(f: &Expr, with: &str, point: &Expr) -> Result<Expr, Error> {
    let d = derivative(f, with)?;
    simplify(&d.substitute(&Expr::symbol(with), point))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::error::{Unsupported, WrongArity};
    use crate::symbolic::expr::Func;
    use std::sync::Arc;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn polynomial() {
        let x = sym("x");
        // x^2 + 2x + 1
        let f = x.pow(&Expr::int(2)) + Expr::int(2) * &x + Expr::int(1);
        assert_eq!(derivative(&f, "x").unwrap(), Expr::int(2) * &x + Expr::int(2));
        assert_eq!(derivative(&x.pow(&Expr::int(3)), "x").unwrap(), Expr::int(3) * x.pow(&Expr::int(2)));
    }

    #[test]
    fn elementary_functions() {
        let x = sym("x");
        assert_eq!(derivative(&x.sin(), "x").unwrap(), x.cos());
        assert_eq!(derivative(&x.cos(), "x").unwrap(), -x.sin());
        assert_eq!(derivative(&x.exp(), "x").unwrap(), x.exp());
        assert_eq!(derivative(&x.ln(), "x").unwrap(), x.recip());
        assert_eq!(
            derivative(&Expr::call(Func::Abs, x.clone()), "x").unwrap(),
            Expr::call(Func::Sgn, x.clone()),
        );
        assert_eq!(derivative(&Expr::call(Func::Sgn, x.clone()), "x").unwrap(), Expr::int(0));
    }

    #[test]
    fn linearity() {
        let x = sym("x");
        let f = x.sin() * &x;
        let g = x.exp() + x.pow(&Expr::int(4));
        assert_eq!(
            derivative(&(&f + &g), "x").unwrap(),
            derivative(&f, "x").unwrap() + derivative(&g, "x").unwrap(),
        );
    }

    #[test]
    fn symbolic_exponent() {
        let x = sym("x");
        // d/dx 2^x = ln(2) * 2^x
        let f = Expr::int(2).pow(&x);
        assert_eq!(derivative(&f, "x").unwrap(), Expr::int(2).ln() * &f);

        // d/dx x^x = ln(x) * x^x + x^x
        let f = x.pow(&x);
        assert_eq!(derivative(&f, "x").unwrap(), x.ln() * &f + &f);
    }

    #[test]
    fn other_symbols_are_constant() {
        let (x, y) = (sym("x"), sym("y"));
        let f = &y * x.pow(&Expr::int(2)) + y.sin();
        assert_eq!(derivative(&f, "x").unwrap(), Expr::int(2) * &x * &y);
        assert_eq!(derivative(&f, "z").unwrap(), Expr::int(0));
    }

    #[test]
    fn sentinels_are_their_own_derivative() {
        for sentinel in [Expr::PositiveInfinity, Expr::ComplexInfinity, Expr::Undefined] {
            assert_eq!(derivative(&sentinel, "x").unwrap(), sentinel);
        }
    }

    #[test]
    fn logarithm_with_base() {
        let x = sym("x");
        let f = Expr::call_multi(MultiFunc::Log, vec![x.clone(), Expr::int(2)]).unwrap();
        // 1 / (x ln 2)
        assert_eq!(derivative(&f, "x").unwrap(), (&x * Expr::int(2).ln()).recip());
    }

    #[test]
    fn unsupported_multi_functions() {
        let (x, y) = (sym("x"), sym("y"));
        let f = Expr::call_multi(MultiFunc::Max, vec![x.clone(), y]).unwrap();
        assert!(derivative(&f, "x").unwrap_err().is::<Unsupported>());

        // a hand-built node bypasses the arity check of the constructor
        let f = Expr::MultiFunction(MultiFunc::Log, Arc::from([x.clone(), x.clone(), x]));
        assert!(derivative(&f, "x").unwrap_err().is::<WrongArity>());
    }

    #[test]
    fn higher_order() {
        let x = sym("x");
        let f = x.pow(&Expr::int(3));
        assert_eq!(nth_derivative(&f, "x", 0).unwrap(), f);
        assert_eq!(nth_derivative(&f, "x", 2).unwrap(), Expr::int(6) * &x);
        assert_eq!(nth_derivative(&f, "x", 4).unwrap(), Expr::int(0));
        assert_eq!(nth_derivative(&x.sin(), "x", 4).unwrap(), x.sin());
    }

    #[test]
    fn at_a_point() {
        let x = sym("x");
        let f = x.pow(&Expr::int(3)) + x.sin();
        assert_eq!(derivative_at(&f, "x", &Expr::int(0)).unwrap(), Expr::int(1));
        assert_eq!(derivative_at(&f, "x", &Expr::int(2)).unwrap(), Expr::int(12) + Expr::int(2).cos());
    }
}
