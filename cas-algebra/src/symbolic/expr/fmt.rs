//! Printing of expressions.
//!
//! The [`Display`] implementation of [`Expr`] produces a "friendly" form with as few parentheses
//! as possible, a leading `-` for negative coefficients, and `/` for factors with negative
//! exponents. [`Expr::strict`] produces a "strict" form that parenthesizes every composite child
//! instead.
//!
//! Parentheses are decided by the precedence of each node: sums bind loosest, then products, then
//! powers, and everything else binds tightest.

use crate::number::Number;
use std::fmt::{self, Display, Formatter};
use super::Expr;

/// Precedence of a node when printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Sum = 1,
    Product = 2,
    Power = 3,
    Atom = 4,
}

/// Returns true if the number prints with a sign or a fraction bar, and so must be parenthesized
/// inside a power or a strict product.
fn number_needs_parens(n: &Number) -> bool {
    n.is_negative() || (n.is_exact() && !n.is_integer())
}

/// Returns the precedence of the expression in its friendly form.
fn precedence(expr: &Expr) -> Precedence {
    match expr {
        Expr::Sum(_) => Precedence::Sum,
        Expr::Product(_) => Precedence::Product,
        Expr::Power(_, exp) if exp.is_negative_term() => Precedence::Product,
        Expr::Power(..) => Precedence::Power,
        Expr::Number(n) if number_needs_parens(n) => Precedence::Product,
        Expr::NegativeInfinity => Precedence::Product,
        _ => Precedence::Atom,
    }
}

/// Writes the expression, wrapping it in parentheses if its precedence is not above `min`.
fn write_wrapped(f: &mut Formatter<'_>, expr: &Expr, min: Precedence) -> fmt::Result {
    if precedence(expr) <= min {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Writes `factors` joined with `*`.
fn write_factors(f: &mut Formatter<'_>, factors: &[Expr]) -> fmt::Result {
    let mut iter = factors.iter();
    if let Some(first) = iter.next() {
        write_wrapped(f, first, Precedence::Sum)?;
        for factor in iter {
            write!(f, "*")?;
            write_wrapped(f, factor, Precedence::Sum)?;
        }
    }
    Ok(())
}

/// Writes a product or power as `[-]numerator[/denominator]`.
fn write_fraction(f: &mut Formatter<'_>, expr: &Expr) -> fmt::Result {
    let (coefficient, rest) = expr.split_coefficient();
    let factors = match &rest {
        Expr::Product(factors) => factors.to_vec(),
        other if other.is_one() => Vec::new(),
        other => vec![other.clone()],
    };

    let mut numer = Vec::new();
    let mut denom = Vec::new();

    if coefficient.is_negative() {
        write!(f, "-")?;
    }
    let coefficient = coefficient.abs();
    if !coefficient.numer().is_one() {
        numer.push(Expr::Number(coefficient.numer()));
    }
    if !coefficient.denom().is_one() {
        denom.push(Expr::Number(coefficient.denom()));
    }

    for factor in factors {
        match &factor {
            Expr::Power(base, exp) if exp.is_negative_term() => denom.push(base.pow(&-&**exp)),
            _ => numer.push(factor),
        }
    }

    if numer.is_empty() {
        write!(f, "1")?;
    } else {
        write_factors(f, &numer)?;
    }

    match denom.as_slice() {
        [] => Ok(()),
        [single] if precedence(single) > Precedence::Product => write!(f, "/{}", single),
        denom => {
            write!(f, "/(")?;
            write_factors(f, denom)?;
            write!(f, ")")
        },
    }
}

/// Writes a list of function arguments.
fn write_args<T: Display>(f: &mut Formatter<'_>, args: impl IntoIterator<Item = T>) -> fmt::Result {
    let mut iter = args.into_iter();
    if let Some(arg) = iter.next() {
        write!(f, "{}", arg)?;
        for arg in iter {
            write!(f, ", {}", arg)?;
        }
    }
    Ok(())
}

/// Writes the leaf variants, which print the same in both forms.
fn write_leaf(f: &mut Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Number(n) => write!(f, "{}", n),
        Expr::Symbol(name) => write!(f, "{}", name),
        Expr::PositiveInfinity => write!(f, "inf"),
        Expr::NegativeInfinity => write!(f, "-inf"),
        Expr::ComplexInfinity => write!(f, "complex_inf"),
        Expr::Undefined => write!(f, "undefined"),
        _ => Ok(()),
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum(terms) => {
                let mut iter = terms.iter();
                if let Some(first) = iter.next() {
                    write!(f, "{}", first)?;
                }
                for term in iter {
                    if term.is_negative_term() {
                        write!(f, " - {}", -term)?;
                    } else {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            Self::Product(_) => write_fraction(f, self),
            Self::Power(_, exp) if exp.is_negative_term() => write_fraction(f, self),
            Self::Power(base, exp) => {
                write_wrapped(f, base, Precedence::Power)?;
                write!(f, "^")?;
                write_wrapped(f, exp, Precedence::Power)
            },
            Self::Function(func, arg) => write!(f, "{}({})", func, arg),
            Self::MultiFunction(func, args) => {
                write!(f, "{}(", func)?;
                write_args(f, args.iter())?;
                write!(f, ")")
            },
            leaf => write_leaf(f, leaf),
        }
    }
}

/// Displays an expression with every composite child parenthesized.
///
/// This is created by [`Expr::strict`].
#[derive(Debug, Clone, Copy)]
pub struct Strict<'a>(pub &'a Expr);

impl Strict<'_> {
    /// Writes a child, wrapped in parentheses if it is composite or a signed / fractional number.
    fn write_child(f: &mut Formatter<'_>, child: &Expr) -> fmt::Result {
        let wrap = match child {
            Expr::Sum(_) | Expr::Product(_) | Expr::Power(..) | Expr::NegativeInfinity => true,
            Expr::Number(n) => number_needs_parens(n),
            _ => false,
        };
        if wrap {
            write!(f, "({})", Strict(child))
        } else {
            write!(f, "{}", Strict(child))
        }
    }

    fn write_joined(f: &mut Formatter<'_>, children: &[Expr], sep: &str) -> fmt::Result {
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", sep)?;
            }
            Self::write_child(f, child)?;
        }
        Ok(())
    }
}

impl Display for Strict<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Sum(terms) => Self::write_joined(f, terms, " + "),
            Expr::Product(factors) => Self::write_joined(f, factors, "*"),
            Expr::Power(base, exp) => {
                Self::write_child(f, base)?;
                write!(f, "^")?;
                Self::write_child(f, exp)
            },
            Expr::Function(func, arg) => write!(f, "{}({})", func, Strict(arg)),
            Expr::MultiFunction(func, args) => {
                write!(f, "{}(", func)?;
                write_args(f, args.iter().map(Strict))?;
                write!(f, ")")
            },
            leaf => write_leaf(f, leaf),
        }
    }
}
