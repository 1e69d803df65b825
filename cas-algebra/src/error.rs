//! Kinds of errors returned by algebraic operations.
//!
//! Every kind derives [`ErrorKind`] and is boxed into a [`cas_error::Error`] when returned.
//! Mathematically undefined results, such as `0^0`, are **not** errors: they are represented by
//! [`Expr::Undefined`](crate::symbolic::Expr::Undefined).

use ariadne::Fmt;
use cas_attrs::ErrorKind;
use cas_error::{ErrorKind, EXPR};
use crate::symbolic::expr::{Func, MultiFunc};
use levenshtein::levenshtein;

/// A symbol name that does not have the form `letter (letter | digit)*`.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(
    message = format!("`{}` is not a valid symbol name", name),
    help = "symbol names start with a letter and contain only letters and digits",
)]
pub struct InvalidSymbol {
    /// The rejected name.
    pub name: String,
}

/// A function name that is not one of the builtin functions.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(
    message = format!("unknown function `{}`", name),
    help = if suggestions.is_empty() {
        "see `Func` and `MultiFunc` for the supported functions".to_string()
    } else {
        let list = suggestions.iter()
            .map(|s| format!("`{}`", s.fg(EXPR)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("did you mean {}?", list)
    },
)]
pub struct UnknownFunction {
    /// The unknown name.
    pub name: String,

    /// Names of builtin functions similar to the unknown name.
    pub suggestions: Vec<String>,
}

impl UnknownFunction {
    /// Creates the error, collecting every builtin function name similar to the given name.
    pub fn new(name: &str) -> Self {
        let suggestions = Func::ALL.iter().map(|f| f.name())
            .chain(MultiFunc::ALL.iter().map(|f| f.name()))
            .filter(|candidate| levenshtein(candidate, name) < 2)
            .map(str::to_owned)
            .collect();
        Self { name: name.to_owned(), suggestions }
    }
}

/// A function applied to the wrong number of arguments.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(message = format!("`{}` takes {} arguments, but {} were given", name, expected, given))]
pub struct WrongArity {
    /// The name of the function.
    pub name: &'static str,

    /// Description of the accepted argument count, such as `2` or `at least 2`.
    pub expected: &'static str,

    /// The number of arguments given.
    pub given: usize,
}

/// An operation that has no symbolic rule for the given function.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(
    message = format!("cannot compute the {} of `{}` symbolically", operation, name),
    help = "rewrite the expression in terms of the supported functions",
)]
pub struct Unsupported {
    /// The operation, such as `derivative`.
    pub operation: &'static str,

    /// The name of the function.
    pub name: &'static str,
}

/// The denominator of a fraction is zero.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(message = "division by zero", help = "the denominator simplifies to zero")]
pub struct DivisionByZero;

/// A Taylor expansion was requested with fewer than one term.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(
    message = format!("cannot compute a Taylor expansion of degree {}", degree),
    help = "the degree must be at least 1",
)]
pub struct InvalidDegree {
    /// The rejected degree.
    pub degree: usize,
}

/// A containment query was given no symbols to look for.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(message = "no symbols were given to search for")]
pub struct EmptySymbolSet;

/// An expression is not a polynomial in the pivot symbol.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(
    message = format!("`{}` is not a polynomial in `{}`", expr, pivot),
    help = format!("polynomial operations require sums of terms `c*{}^n`, where `c` does not contain `{}`", pivot.fg(EXPR), pivot.fg(EXPR)),
)]
pub struct NotPolynomial {
    /// The printed expression.
    pub expr: String,

    /// The pivot symbol.
    pub pivot: String,
}

/// An iterative algorithm did not finish within its configured bound.
#[derive(Debug, Clone, PartialEq, Eq, ErrorKind)]
#[error(
    message = format!("{} did not finish within {} steps", operation, limit),
    help = "raise the limit in `Options` if the input is expected to need more steps",
)]
pub struct IterationLimit {
    /// The algorithm that was cut off.
    pub operation: &'static str,

    /// The configured bound.
    pub limit: usize,
}
