use crate::error::InvalidDegree;
use crate::number::Number;
use crate::primitive::factorial;
use crate::symbolic::{expand::expand, expr::Expr, simplify::simplify};
use cas_error::Error;
use tracing::debug;
use super::derivative;

/// Computes the Taylor expansion of `f` with respect to `with` about `point`, keeping the terms of
/// order `0` through `degree - 1`. The result is fully expanded.
///
/// Fails with [`InvalidDegree`] if `degree` is zero.
///
/// ```
/// use cas_algebra::symbolic::{taylor, Expr};
///
/// let x = Expr::symbol("x");
/// let series = taylor(&x.exp(), "x", &Expr::int(0), 4).unwrap();
///
/// // 1 + x + x^2/2 + x^3/6
/// let expected = Expr::int(1)
///     + &x
///     + x.pow(&Expr::int(2)) / Expr::int(2)
///     + x.pow(&Expr::int(3)) / Expr::int(6);
/// assert_eq!(series, expected);
/// ```
pub fn taylor(f: &Expr, with: &str, point: &Expr, degree: usize) -> Result<Expr, Error> {
    if degree < 1 {
        return Err(InvalidDegree { degree }.into());
    }

    let symbol = Expr::symbol(with);
    let offset = &symbol - point;
    let mut current = f.clone();
    let mut terms = Vec::with_capacity(degree);

    for order in 0..degree {
        if order > 0 {
            current = derivative(&current, with)?;
        }

        let coefficient = simplify(&current.substitute(&symbol, point))?;
        debug!(order, %coefficient, "taylor coefficient");
        if coefficient.is_zero() {
            continue;
        }

        let order = u32::try_from(order).unwrap_or(u32::MAX);
        let scale = Expr::Number(Number::int(factorial(order)));
        terms.push(coefficient / scale * offset.pow(&Expr::from(Number::int(order))));
    }

    Ok(expand(&Expr::sum(terms)))
}
