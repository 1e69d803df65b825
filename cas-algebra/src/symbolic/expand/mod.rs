//! Algebraic expansion, and the expand / contract pairs for exponential and trigonometric forms.
//!
//! [`expand`] distributes products over sums and expands positive integer powers of sums with the
//! binomial theorem, so the result is a sum of terms that contain no sums (outside of function
//! arguments and non-integer powers).
//!
//! ```
//! use cas_algebra::symbolic::{expand, Expr};
//!
//! let x = Expr::symbol("x");
//! let y = Expr::symbol("y");
//!
//! // (x + y)^2 = x^2 + 2xy + y^2
//! let expr = (&x + &y).pow(&Expr::int(2));
//! assert_eq!(
//!     expand(&expr),
//!     x.pow(&Expr::int(2)) + Expr::int(2) * &x * &y + y.pow(&Expr::int(2)),
//! );
//! ```
//!
//! The [`exponential`] and [`trigonometry`] modules push identities outward ("expand") or pull
//! them back together ("contract").

pub mod exponential;
pub mod trigonometry;

pub use exponential::{contract_exp, contract_exp_with, expand_exp};
pub use trigonometry::{contract_trig, contract_trig_with, expand_trig, trig_substitute};

use crate::number::Number;
use crate::primitive::binomial;
use crate::symbolic::expr::{Expr, ONE};

/// Returns true if the expression is a sum, or a positive integer power of a sum.
fn is_expandable_factor(expr: &Expr) -> bool {
    match expr {
        Expr::Sum(_) => true,
        Expr::Power(base, exp) => matches!(**base, Expr::Sum(_)) && exp.as_positive_integer().is_some(),
        _ => false,
    }
}

/// Multiplies two factors that are not sums. Merging the factors can bring a sum back, as in
/// `(x + 1)^(1/2) * (x + 1)^(1/2)`, which is expanded again.
fn multiply(lhs: &Expr, rhs: &Expr) -> Expr {
    let product = lhs * rhs;
    match &product {
        Expr::Product(factors) if factors.iter().any(is_expandable_factor) => expand(&product),
        Expr::Power(..) if is_expandable_factor(&product) => expand(&product),
        _ => product,
    }
}

/// Multiplies two expanded expressions, distributing over sums.
pub fn expand_product(lhs: &Expr, rhs: &Expr) -> Expr {
    match (lhs, rhs) {
        (Expr::Sum(terms), _) => Expr::sum(terms.iter().map(|term| expand_product(term, rhs))),
        (_, Expr::Sum(_)) => expand_product(rhs, lhs),
        _ => multiply(lhs, rhs),
    }
}

/// Raises an expanded expression to a non-negative integer power, expanding sums with the
/// binomial theorem.
pub fn expand_power(base: &Expr, n: u32) -> Expr {
    let Expr::Sum(terms) = base else {
        return multiply(&ONE, &base.pow(&Expr::from(Number::int(n))));
    };

    // (f + r)^n = sum of C(n, k) f^(n - k) r^k
    let first = &terms[0];
    let rest = Expr::sum(terms[1..].iter().cloned());
    let mut result = Vec::with_capacity(n as usize + 1);
    for k in 0..=n {
        let coefficient = Expr::Number(Number::int(binomial(n, k)));
        let head = coefficient * first.pow(&Expr::from(Number::int(n - k)));
        result.push(expand_product(&head, &expand_power(&rest, k)));
    }
    Expr::sum(result)
}

/// Expands only the top-level operation of the expression, assuming its operands are already
/// expanded.
pub fn expand_main(expr: &Expr) -> Expr {
    match expr {
        Expr::Product(factors) => factors.iter()
            .fold(ONE.clone(), |acc, factor| expand_product(&acc, factor)),
        Expr::Power(base, exp) => match exp.as_positive_integer() {
            Some(n) => expand_power(base, n),
            None => expr.clone(),
        },
        _ => expr.clone(),
    }
}

/// Fully expands the expression, distributing products and positive integer powers over sums at
/// every level, including inside function arguments.
pub fn expand(expr: &Expr) -> Expr {
    match expr {
        Expr::Sum(terms) => Expr::sum(terms.iter().map(expand)),
        Expr::Product(factors) => factors.iter()
            .map(expand)
            .fold(ONE.clone(), |acc, factor| expand_product(&acc, &factor)),
        Expr::Power(base, exp) => {
            let base = expand(base);
            let exp = expand(exp);
            match exp.as_positive_integer() {
                Some(n) => expand_power(&base, n),
                None => base.pow(&exp),
            }
        },
        Expr::Function(..) | Expr::MultiFunction(..) => expr.map(expand),
        leaf => leaf.clone(),
    }
}
