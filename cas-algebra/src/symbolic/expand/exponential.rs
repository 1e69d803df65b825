//! Expansion and contraction of exponentials and logarithms.
//!
//! Expansion applies the exponent laws left to right:
//!
//! - `exp(a + b) = exp(a) * exp(b)`
//! - `exp(n*a) = exp(a)^n` for an integer `n > 1`
//! - `ln(a * b) = ln(a) + ln(b)`
//! - `ln(a^b) = b * ln(a)`
//!
//! Contraction applies them right to left, and also merges sums of logarithms with integer
//! coefficients, `2*ln(a) + ln(b) = ln(a^2 * b)`.
//!
//! The logarithm rules hold for positive arguments only; they are applied without checking the
//! sign of symbolic arguments. A factor that is a negative number blocks `ln(a * b)`.

use crate::options::Options;
use crate::symbolic::expr::{Expr, Func, ZERO};
use tracing::trace;
use super::expand_main;

/// Expands `exp(arg)`.
fn expand_exp_rules(arg: &Expr) -> Expr {
    match arg {
        Expr::Sum(terms) => Expr::product(terms.iter().map(expand_exp_rules)),
        Expr::Product(_) => {
            let (coefficient, rest) = arg.split_coefficient();
            match Expr::Number(coefficient).as_positive_integer() {
                Some(n) if n > 1 => expand_exp_rules(&rest).pow(&Expr::int(n.into())),
                _ => arg.exp(),
            }
        },
        _ => arg.exp(),
    }
}

/// Expands `ln(arg)`.
fn expand_ln_rules(arg: &Expr) -> Expr {
    match arg {
        Expr::Product(factors) if !factors.iter().any(Expr::is_negative_term) => {
            Expr::sum(factors.iter().map(expand_ln_rules))
        },
        Expr::Power(base, exp) => (**exp).clone() * expand_ln_rules(base),
        _ => arg.ln(),
    }
}

/// Expands exponentials of sums and logarithms of products and powers, at every level of the
/// expression.
///
/// ```
/// use cas_algebra::symbolic::{expand::expand_exp, Expr};
///
/// let x = Expr::symbol("x");
/// let y = Expr::symbol("y");
///
/// assert_eq!(expand_exp(&(&x + &y).exp()), x.exp() * y.exp());
/// assert_eq!(expand_exp(&(&x * &y).ln()), x.ln() + y.ln());
/// ```
pub fn expand_exp(expr: &Expr) -> Expr {
    if expr.is_leaf() {
        return expr.clone();
    }

    let expr = expr.map(expand_exp);
    if let Some(arg) = expr.as_call(Func::Exp) {
        expand_exp_rules(arg)
    } else if let Some(arg) = expr.as_call(Func::Ln) {
        expand_ln_rules(arg)
    } else {
        expr
    }
}

/// Merges the terms `c*ln(a)` of a sum with integer `c` into a single logarithm, if there are at
/// least two of them.
fn merge_logarithms(terms: &[Expr]) -> Option<Expr> {
    let mut arguments = Vec::new();
    let mut others = Vec::new();
    for term in terms {
        let (coefficient, rest) = term.split_coefficient();
        match rest.as_call(Func::Ln) {
            Some(arg) if coefficient.is_integer() && coefficient.is_exact() => {
                arguments.push(arg.pow(&Expr::Number(coefficient)));
            },
            _ => others.push(term.clone()),
        }
    }

    if arguments.len() < 2 {
        return None;
    }
    others.push(Expr::product(arguments).ln());
    Some(Expr::sum(others))
}

/// Contracts a product or power whose operands are already contracted.
fn contract_exp_rules(expr: &Expr) -> Expr {
    let expr = expand_main(expr);
    match &expr {
        // exp(a)^n = exp(n*a)
        Expr::Power(base, exp) => match base.as_call(Func::Exp) {
            Some(arg) => {
                let arg = arg * &**exp;
                match arg {
                    Expr::Product(_) | Expr::Power(..) => contract_exp_rules(&arg).exp(),
                    arg => arg.exp(),
                }
            },
            None => expr,
        },
        // exp(a) * exp(b) = exp(a + b)
        Expr::Product(factors) => {
            let mut rest = Vec::new();
            let mut exponent = ZERO.clone();
            for factor in factors.iter() {
                match factor.as_call(Func::Exp) {
                    Some(arg) => exponent += arg.clone(),
                    None => rest.push(factor.clone()),
                }
            }
            if exponent.is_zero() && rest.len() == factors.len() {
                return expr;
            }
            Expr::product(rest) * exponent.exp()
        },
        Expr::Sum(terms) => Expr::sum(terms.iter().map(|term| match term {
            Expr::Product(_) | Expr::Power(..) => contract_exp_rules(term),
            _ => term.clone(),
        })),
        _ => expr,
    }
}

/// Makes a single contraction pass over every level of the expression.
fn contract_exp_pass(expr: &Expr) -> Expr {
    if expr.is_leaf() {
        return expr.clone();
    }

    let expr = expr.map(contract_exp_pass);
    match &expr {
        Expr::Product(_) | Expr::Power(..) => contract_exp_rules(&expr),
        Expr::Sum(terms) => merge_logarithms(terms).unwrap_or(expr),
        _ => expr,
    }
}

/// Contracts products and powers of exponentials, and sums of logarithms, at every level of the
/// expression, using the default [`Options`].
///
/// ```
/// use cas_algebra::symbolic::{expand::contract_exp, Expr};
///
/// let x = Expr::symbol("x");
/// let y = Expr::symbol("y");
///
/// assert_eq!(contract_exp(&(x.exp() * y.exp())), (&x + &y).exp());
/// assert_eq!(contract_exp(&x.exp().pow(&Expr::int(3))), (Expr::int(3) * &x).exp());
/// ```
pub fn contract_exp(expr: &Expr) -> Expr {
    contract_exp_with(expr, &Options::default())
}

/// Contracts exponentials and logarithms, repeating until the expression stops changing or
/// [`Options::max_contract_passes`] passes have been made.
pub fn contract_exp_with(expr: &Expr, options: &Options) -> Expr {
    let mut current = expr.clone();
    for pass in 0..options.max_contract_passes {
        let next = contract_exp_pass(&current);
        if next == current {
            trace!(pass, "exponential contraction reached a fixed point");
            break;
        }
        current = next;
    }
    current
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn exp_of_sum() {
        let (x, y) = (sym("x"), sym("y"));
        let expanded = expand_exp(&(&x + Expr::int(2) * &y).exp());
        assert_eq!(expanded, x.exp() * y.exp().pow(&Expr::int(2)));
    }

    #[test]
    fn ln_of_product_and_power() {
        let (x, y) = (sym("x"), sym("y"));
        let expr = (&x * y.pow(&Expr::int(3))).ln();
        assert_eq!(expand_exp(&expr), x.ln() + Expr::int(3) * y.ln());

        // a negative factor blocks the product rule
        let expr = (Expr::int(-2) * &x).ln();
        assert_eq!(expand_exp(&expr), expr);
    }

    #[test]
    fn nested() {
        let (x, y) = (sym("x"), sym("y"));
        let expr = (x.exp() * y.exp()).ln();
        assert_eq!(expand_exp(&expr), &x + &y);
    }

    #[test]
    fn contraction() {
        let (x, y) = (sym("x"), sym("y"));
        assert_eq!(contract_exp(&(x.exp() * y.exp() * &x)), &x * (&x + &y).exp());
        assert_eq!(contract_exp(&(x.exp().pow(&Expr::int(2)) * y.exp())), (Expr::int(2) * &x + &y).exp());
        assert_eq!(contract_exp(&(Expr::int(2) * x.ln() + y.ln())), (x.pow(&Expr::int(2)) * &y).ln());
    }

    #[test]
    fn contraction_distributes_first() {
        let x = sym("x");
        // exp(x) * (exp(x) + 1) = exp(2x) + exp(x)
        let expr = x.exp() * (x.exp() + Expr::int(1));
        assert_eq!(contract_exp(&expr), (Expr::int(2) * &x).exp() + x.exp());
    }

    #[test]
    fn contraction_is_idempotent() {
        let (x, y) = (sym("x"), sym("y"));
        let samples = [
            x.exp() * y.exp(),
            (x.exp() + y.exp()).pow(&Expr::int(2)),
            x.ln() + y.ln() + Expr::int(1),
            x.exp().pow(&y) * &x,
        ];
        for expr in samples {
            let once = contract_exp(&expr);
            assert_eq!(contract_exp(&once), once, "{expr}");
        }
    }

    #[test]
    fn round_trip() {
        let (x, y) = (sym("x"), sym("y"));
        let expr = (&x + &y).exp();
        assert_eq!(contract_exp(&expand_exp(&expr)), expr);
    }
}
