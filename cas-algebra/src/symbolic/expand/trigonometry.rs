//! Expansion and contraction of sines and cosines.
//!
//! Expansion rewrites `sin` / `cos` of sums and integer multiples into products of `sin` / `cos`
//! of the individual angles, using the angle addition formulas
//!
//! - `sin(a + b) = sin(a) cos(b) + cos(a) sin(b)`
//! - `cos(a + b) = cos(a) cos(b) - sin(a) sin(b)`
//!
//! and the multiple angle formulas derived from `(cos(a) + i sin(a))^n` with the binomial theorem.
//!
//! Contraction goes the other way: powers of `sin` / `cos` are reduced to sums of multiple angles,
//! and products are turned into sums with the product-to-sum formulas. The result of a full
//! contraction is a sum of terms with at most one `sin` or `cos` factor each.

use crate::number::Number;
use crate::options::Options;
use crate::primitive::binomial;
use crate::symbolic::expr::{Expr, Func, ONE_HALF};
use tracing::trace;
use super::{expand, expand_main};

/// Returns `sin(arg)`, pulling a negative sign out of the argument.
fn sin_of(arg: &Expr) -> Expr {
    if arg.is_negative_term() {
        -(-arg).sin()
    } else {
        arg.sin()
    }
}

/// Returns `cos(arg)`, dropping a negative sign from the argument.
fn cos_of(arg: &Expr) -> Expr {
    if arg.is_negative_term() {
        (-arg).cos()
    } else {
        arg.cos()
    }
}

/// Returns the exact number `C(n, k)`.
fn binomial_expr(n: u32, k: u32) -> Expr {
    Expr::Number(Number::int(binomial(n, k)))
}

/// Returns the exact number `1 / 2^n`.
fn inverse_power_of_two(n: u32) -> Expr {
    Expr::int(2).pow(&-Expr::from(Number::int(n)))
}

/// Expands `sin(n*theta)` and `cos(n*theta)` for an integer `n`.
fn multiple_angle(n: i32, theta: &Expr) -> (Expr, Expr) {
    let m = n.unsigned_abs();
    let (s, c) = expand_trig_rules(theta);

    // (c + i s)^m = sum of C(m, j) c^(m - j) (i s)^j; the real part is the cosine and the
    // imaginary part the sine, with the sign following i^j
    let mut sin_terms = Vec::new();
    let mut cos_terms = Vec::new();
    for j in 0..=m {
        let term = binomial_expr(m, j)
            * c.pow(&Expr::from(Number::int(m - j)))
            * s.pow(&Expr::from(Number::int(j)));
        match j % 4 {
            0 => cos_terms.push(term),
            1 => sin_terms.push(term),
            2 => cos_terms.push(-term),
            _ => sin_terms.push(-term),
        }
    }

    let sin = expand(&Expr::sum(sin_terms));
    let cos = expand(&Expr::sum(cos_terms));
    if n < 0 {
        (expand(&-sin), cos)
    } else {
        (sin, cos)
    }
}

/// Returns the expansions of `(sin(arg), cos(arg))`.
fn expand_trig_rules(arg: &Expr) -> (Expr, Expr) {
    match arg {
        Expr::Sum(terms) => {
            let (s1, c1) = expand_trig_rules(&terms[0]);
            let (s2, c2) = expand_trig_rules(&Expr::sum(terms[1..].iter().cloned()));
            (
                expand(&(&s1 * &c2 + &c1 * &s2)),
                expand(&(&c1 * &c2 - &s1 * &s2)),
            )
        },
        Expr::Product(_) => {
            let (coefficient, rest) = arg.split_coefficient();
            match coefficient.to_i32() {
                Some(n) if n != 1 && coefficient.is_exact() => multiple_angle(n, &rest),
                _ => (sin_of(arg), cos_of(arg)),
            }
        },
        _ => (sin_of(arg), cos_of(arg)),
    }
}

/// Expands `sin` and `cos` of sums and integer multiples at every level of the expression.
///
/// ```
/// use cas_algebra::symbolic::{expand::expand_trig, Expr};
///
/// let x = Expr::symbol("x");
///
/// // sin(2x) = 2 sin(x) cos(x)
/// let expr = (Expr::int(2) * &x).sin();
/// assert_eq!(expand_trig(&expr), Expr::int(2) * x.sin() * x.cos());
/// ```
pub fn expand_trig(expr: &Expr) -> Expr {
    if expr.is_leaf() {
        return expr.clone();
    }

    let expr = expr.map(expand_trig);
    if let Some(arg) = expr.as_call(Func::Sin) {
        expand_trig_rules(arg).0
    } else if let Some(arg) = expr.as_call(Func::Cos) {
        expand_trig_rules(arg).1
    } else {
        expr
    }
}

/// Reduces `sin(theta)^n` to a sum of multiple angles.
fn sin_power(theta: &Expr, n: u32) -> Expr {
    let angle = |j: u32| expand(&(Expr::from(Number::int(n - 2 * j)) * theta));
    let alternate = |j: u32, term: Expr| if j % 2 == 0 { term } else { -term };

    let mut terms = Vec::new();
    for j in 0..(n + 1) / 2 {
        let function = if n % 2 == 1 { sin_of(&angle(j)) } else { cos_of(&angle(j)) };
        terms.push(alternate(j, binomial_expr(n, j) * function));
    }

    // (-1)^((n - 1) / 2) for odd n, (-1)^(n / 2) for even n
    let sign = if (n / 2) % 2 == 0 { Expr::int(1) } else { Expr::int(-1) };
    let mut result = sign * inverse_power_of_two(n - 1) * Expr::sum(terms);
    if n % 2 == 0 {
        result += binomial_expr(n, n / 2) * inverse_power_of_two(n);
    }
    expand(&result)
}

/// Reduces `cos(theta)^n` to a sum of multiple angles.
fn cos_power(theta: &Expr, n: u32) -> Expr {
    let mut terms = Vec::new();
    for j in 0..(n + 1) / 2 {
        let angle = expand(&(Expr::from(Number::int(n - 2 * j)) * theta));
        terms.push(binomial_expr(n, j) * cos_of(&angle));
    }

    let mut result = inverse_power_of_two(n - 1) * Expr::sum(terms);
    if n % 2 == 0 {
        result += binomial_expr(n, n / 2) * inverse_power_of_two(n);
    }
    expand(&result)
}

/// Returns true if the expression is `sin` or `cos` of something.
fn is_sin_or_cos(expr: &Expr) -> bool {
    expr.as_call(Func::Sin).is_some() || expr.as_call(Func::Cos).is_some()
}

/// Returns true if the expression is `sin` or `cos`, or a positive integer power of one.
fn is_trig_factor(expr: &Expr) -> bool {
    match expr {
        Expr::Power(base, exp) => is_sin_or_cos(base) && exp.as_positive_integer().is_some(),
        other => is_sin_or_cos(other),
    }
}

/// Reduces a positive integer power of `sin` or `cos`. Any other expression is returned as is.
fn contract_trig_power(expr: &Expr) -> Expr {
    let Expr::Power(base, exp) = expr else {
        return expr.clone();
    };
    let Some(n) = exp.as_positive_integer() else {
        return expr.clone();
    };

    if let Some(theta) = base.as_call(Func::Sin) {
        sin_power(theta, n)
    } else if let Some(theta) = base.as_call(Func::Cos) {
        cos_power(theta, n)
    } else {
        expr.clone()
    }
}

/// Contracts a product of at least two trigonometric factors (see [`is_trig_factor`]).
fn contract_trig_product(factors: &[Expr]) -> Expr {
    let [a, b] = factors else {
        let rest = contract_trig_product(&factors[1..]);
        return contract_trig_rules(&(&factors[0] * rest));
    };

    if matches!(a, Expr::Power(..)) {
        return contract_trig_rules(&(contract_trig_power(a) * b));
    }
    if matches!(b, Expr::Power(..)) {
        return contract_trig_rules(&(a * contract_trig_power(b)));
    }

    let (a_is_sin, theta) = match a.as_call(Func::Sin) {
        Some(theta) => (true, theta),
        None => (false, a.as_call(Func::Cos).unwrap_or(a)),
    };
    let (b_is_sin, phi) = match b.as_call(Func::Sin) {
        Some(phi) => (true, phi),
        None => (false, b.as_call(Func::Cos).unwrap_or(b)),
    };

    let sum = expand(&(theta + phi));
    let difference = expand(&(theta - phi));
    let doubled = match (a_is_sin, b_is_sin) {
        // 2 sin(a) sin(b) = cos(a - b) - cos(a + b)
        (true, true) => cos_of(&difference) - cos_of(&sum),
        // 2 cos(a) cos(b) = cos(a + b) + cos(a - b)
        (false, false) => cos_of(&sum) + cos_of(&difference),
        // 2 sin(a) cos(b) = sin(a + b) + sin(a - b)
        (true, false) => sin_of(&sum) + sin_of(&difference),
        // 2 cos(a) sin(b) = sin(a + b) - sin(a - b)
        (false, true) => sin_of(&sum) - sin_of(&difference),
    };
    expand_main(&(&*ONE_HALF * doubled))
}

/// Contracts a product or power whose operands are already contracted.
fn contract_trig_rules(expr: &Expr) -> Expr {
    let expr = expand_main(expr);
    match &expr {
        Expr::Power(..) => contract_trig_power(&expr),
        Expr::Product(factors) => {
            let (trig, rest): (Vec<_>, Vec<_>) = factors.iter().cloned().partition(is_trig_factor);
            match trig.as_slice() {
                [] => expr,
                [single] if !matches!(single, Expr::Power(..)) => expr,
                [power] => expand_main(&(Expr::product(rest) * contract_trig_power(power))),
                trig => expand_main(&(Expr::product(rest) * contract_trig_product(trig))),
            }
        },
        Expr::Sum(terms) => Expr::sum(terms.iter().map(|term| match term {
            Expr::Product(_) | Expr::Power(..) => contract_trig_rules(term),
            _ => term.clone(),
        })),
        _ => expr,
    }
}

/// Makes a single contraction pass over every level of the expression.
fn contract_trig_pass(expr: &Expr) -> Expr {
    if expr.is_leaf() {
        return expr.clone();
    }

    let expr = expr.map(contract_trig_pass);
    match &expr {
        Expr::Product(_) | Expr::Power(..) => contract_trig_rules(&expr),
        _ => expr,
    }
}

/// Contracts products and powers of `sin` and `cos` at every level of the expression, using the
/// default [`Options`].
///
/// ```
/// use cas_algebra::symbolic::{expand::contract_trig, Expr};
///
/// let x = Expr::symbol("x");
///
/// // sin(x) cos(x) = sin(2x) / 2
/// let expr = x.sin() * x.cos();
/// assert_eq!(contract_trig(&expr), (Expr::int(2) * &x).sin() / Expr::int(2));
/// ```
pub fn contract_trig(expr: &Expr) -> Expr {
    contract_trig_with(expr, &Options::default())
}

/// Contracts `sin` and `cos`, repeating until the expression stops changing or
/// [`Options::max_contract_passes`] passes have been made.
pub fn contract_trig_with(expr: &Expr, options: &Options) -> Expr {
    let mut current = expr.clone();
    for pass in 0..options.max_contract_passes {
        let next = contract_trig_pass(&current);
        if next == current {
            trace!(pass, "trigonometric contraction reached a fixed point");
            break;
        }
        current = next;
    }
    current
}

/// Rewrites `tan`, `cot`, `sec`, and `csc` in terms of `sin` and `cos`, at every level of the
/// expression.
pub fn trig_substitute(expr: &Expr) -> Expr {
    if expr.is_leaf() {
        return expr.clone();
    }

    let expr = expr.map(trig_substitute);
    match &expr {
        Expr::Function(Func::Tan, arg) => arg.sin() / arg.cos(),
        Expr::Function(Func::Cot, arg) => arg.cos() / arg.sin(),
        Expr::Function(Func::Sec, arg) => arg.cos().recip(),
        Expr::Function(Func::Csc, arg) => arg.sin().recip(),
        _ => expr,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn angle_addition() {
        let (x, y) = (sym("x"), sym("y"));
        assert_eq!(expand_trig(&(&x + &y).sin()), x.sin() * y.cos() + x.cos() * y.sin());
        assert_eq!(expand_trig(&(&x + &y).cos()), x.cos() * y.cos() - x.sin() * y.sin());
    }

    #[test]
    fn multiple_angles() {
        let x = sym("x");
        let two_x = Expr::int(2) * &x;
        assert_eq!(expand_trig(&two_x.cos()), x.cos().pow(&Expr::int(2)) - x.sin().pow(&Expr::int(2)));
        assert_eq!(expand_trig(&(-&x).sin()), -x.sin());
        assert_eq!(expand_trig(&(-&x).cos()), x.cos());
        assert_eq!(expand_trig(&(-&two_x).sin()), Expr::int(-2) * x.sin() * x.cos());
    }

    #[test]
    fn power_reduction() {
        let x = sym("x");
        let two_x = Expr::int(2) * &x;
        assert_eq!(
            contract_trig(&x.sin().pow(&Expr::int(2))),
            Expr::rational(1, 2) - two_x.cos() / Expr::int(2),
        );
        assert_eq!(
            contract_trig(&x.cos().pow(&Expr::int(2))),
            Expr::rational(1, 2) + two_x.cos() / Expr::int(2),
        );

        // sin^3 = (3 sin(x) - sin(3x)) / 4
        let three_x = Expr::int(3) * &x;
        assert_eq!(
            contract_trig(&x.sin().pow(&Expr::int(3))),
            Expr::rational(3, 4) * x.sin() - Expr::rational(1, 4) * three_x.sin(),
        );
    }

    #[test]
    fn product_to_sum() {
        let (x, y) = (sym("x"), sym("y"));
        let expected = ((&x - &y).cos() - (&x + &y).cos()) / Expr::int(2);
        assert_eq!(contract_trig(&(x.sin() * y.sin())), expand(&expected));

        // sin^2(x) cos(x) = (cos(x) - cos(3x)) / 4
        let three_x = Expr::int(3) * &x;
        assert_eq!(
            contract_trig(&(x.sin().pow(&Expr::int(2)) * x.cos())),
            x.cos() / Expr::int(4) - three_x.cos() / Expr::int(4),
        );
    }

    #[test]
    fn contract_undoes_expand() {
        let x = sym("x");
        for n in 2..=4 {
            let expr = (Expr::int(n) * &x).cos();
            assert_eq!(contract_trig(&expand_trig(&expr)), expr, "cos({n}x)");
        }
    }

    #[test]
    fn contraction_is_idempotent() {
        let (x, y) = (sym("x"), sym("y"));
        let expr = x.sin() * y.cos() * x.cos() + x.cos().pow(&Expr::int(4));
        let once = contract_trig(&expr);
        assert_eq!(contract_trig(&once), once);
    }

    #[test]
    fn substitution() {
        let x = sym("x");
        assert_eq!(trig_substitute(&x.tan()), x.sin() / x.cos());
        assert_eq!(trig_substitute(&Expr::call(Func::Sec, x.clone())), x.cos().recip());
        assert_eq!(trig_substitute(&(&x + x.tan()).sin()), (&x + x.sin() / x.cos()).sin());
    }
}
