//! Symbolic derivatives of the builtin functions.

use crate::symbolic::expr::{Expr, Func, ONE_HALF, ZERO};

/// `(1 - u^2)^(-1/2)`
fn one_minus_square_rsqrt(u: &Expr) -> Expr {
    (Expr::int(1) - u.pow(&Expr::int(2))).pow(&-&*ONE_HALF)
}

/// `1 / (u^2 * (1 + sign * u^(-2))^(1/2))`, shared by the inverse secant / cosecant family.
fn reciprocal_inverse(u: &Expr, sign: i64) -> Expr {
    let inner = Expr::int(1) + Expr::int(sign) * u.pow(&Expr::int(-2));
    (u.pow(&Expr::int(2)) * inner.sqrt()).recip()
}

/// Returns the derivative of `func` evaluated at `u`, i.e. `func'(u)`. The caller multiplies by
/// the derivative of `u` to complete the chain rule.
pub(super) fn derivative(func: Func, u: &Expr) -> Expr {
    let call = |f: Func| Expr::call(f, u.clone());
    let two = Expr::int(2);
    let square = u.pow(&two);

    match func {
        Func::Exp => call(Func::Exp),
        Func::Ln => u.recip(),

        Func::Sin => call(Func::Cos),
        Func::Cos => -call(Func::Sin),
        Func::Tan => call(Func::Sec).pow(&two),
        Func::Cot => -call(Func::Csc).pow(&two),
        Func::Sec => call(Func::Sec) * call(Func::Tan),
        Func::Csc => -(call(Func::Csc) * call(Func::Cot)),

        Func::Asin => one_minus_square_rsqrt(u),
        Func::Acos => -one_minus_square_rsqrt(u),
        Func::Atan => (Expr::int(1) + &square).recip(),
        Func::Acot => -(Expr::int(1) + &square).recip(),
        Func::Asec => reciprocal_inverse(u, -1),
        Func::Acsc => -reciprocal_inverse(u, -1),

        Func::Sinh => call(Func::Cosh),
        Func::Cosh => call(Func::Sinh),
        Func::Tanh => call(Func::Sech).pow(&two),
        Func::Coth => -call(Func::Csch).pow(&two),
        Func::Sech => -(call(Func::Sech) * call(Func::Tanh)),
        Func::Csch => -(call(Func::Csch) * call(Func::Coth)),

        Func::Asinh => (&square + Expr::int(1)).pow(&-&*ONE_HALF),
        Func::Acosh => (&square - Expr::int(1)).pow(&-&*ONE_HALF),
        Func::Atanh | Func::Acoth => (Expr::int(1) - &square).recip(),
        Func::Asech => -(u * (Expr::int(1) - &square).sqrt()).recip(),
        Func::Acsch => -reciprocal_inverse(u, 1),

        Func::Abs => call(Func::Sgn),
        Func::Sgn => ZERO.clone(),
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_relative_eq;
    use crate::symbolic::derivative;
    use super::*;

    /// Evaluates a derivative numerically at `x = value`.
    fn eval_at(expr: &Expr, value: f64) -> f64 {
        let result = expr.substitute(&Expr::symbol("x"), &Expr::float(value));
        match result {
            Expr::Number(n) => n.to_f64(),
            other => panic!("`{}` did not evaluate to a number", other),
        }
    }

    /// Central difference approximation of the derivative of `func` at `value`.
    fn numeric_derivative(func: Func, value: f64) -> f64 {
        let h = 1e-6;
        let at = |v: f64| match Expr::call(func, Expr::float(v)) {
            Expr::Number(n) => n.to_f64(),
            other => panic!("`{}` did not evaluate to a number", other),
        };
        (at(value + h) - at(value - h)) / (2.0 * h)
    }

    #[test]
    fn table_matches_numeric_derivatives() {
        let x = Expr::symbol("x");
        let cases = [
            (Func::Exp, 0.7), (Func::Ln, 1.3),
            (Func::Sin, 0.4), (Func::Cos, 0.4), (Func::Tan, 0.4),
            (Func::Cot, 0.4), (Func::Sec, 0.4), (Func::Csc, 0.4),
            (Func::Asin, 0.3), (Func::Acos, 0.3), (Func::Atan, 0.3),
            (Func::Acot, 0.3), (Func::Asec, 1.7), (Func::Acsc, 1.7),
            (Func::Sinh, 0.6), (Func::Cosh, 0.6), (Func::Tanh, 0.6),
            (Func::Coth, 0.6), (Func::Sech, 0.6), (Func::Csch, 0.6),
            (Func::Asinh, 0.6), (Func::Acosh, 1.6), (Func::Atanh, 0.6),
            (Func::Acoth, 1.6), (Func::Asech, 0.6), (Func::Acsch, 0.6),
            (Func::Abs, -0.6),
        ];

        for (func, value) in cases {
            let d = derivative(&Expr::call(func, x.clone()), "x").unwrap();
            let symbolic = eval_at(&d, value);
            let numeric = numeric_derivative(func, value);
            assert_float_relative_eq!(symbolic, numeric, 1e-4);
        }
    }
}
