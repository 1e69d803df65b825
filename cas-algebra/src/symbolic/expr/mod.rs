//! The expression type and its canonicalizing constructors.
//!
//! An [`Expr`] is an immutable tree. Composite nodes share their children through [`Arc`], so
//! cloning an expression is cheap and subtrees can be shared freely, including across threads.
//!
//! # Canonical form
//!
//! The variants of [`Expr`] are public so that algorithms can pattern-match on them, but new
//! composite nodes should only ever be created through the constructors in this module:
//! [`Expr::sum`], [`Expr::product`], [`Expr::pow`], [`Expr::call`], [`Expr::call_multi`], and the
//! arithmetic operators. These guarantee that:
//!
//! - A [`Expr::Sum`] / [`Expr::Product`] never directly contains another node of the same kind.
//! - No two terms of a sum share the same non-numeric part, and no two factors of a product share
//!   the same base; such terms / factors are always merged (`2x + 3x = 5x`, `x^2 * x^3 = x^5`).
//! - No term is zero and no factor is one; a sum / product with fewer than two children collapses
//!   to its single child or to the identity.
//! - Children are sorted by the canonical ordering (see the [`Ord`] implementation).
//! - [`Expr::Undefined`] absorbs every operation it takes part in.
//!
//! Because of this, the derived [`PartialEq`] and [`Hash`] implementations are structural, and two
//! expressions are equal exactly when their canonical forms are the same tree.

mod builder;
mod fmt;
mod func;
mod iter;
mod ops;
mod ordering;

pub use fmt::Strict;
pub use func::{Func, MultiFunc};
pub use iter::ExprIter;

use crate::error::{InvalidSymbol, UnknownFunction, WrongArity};
use crate::number::Number;
use crate::primitive::rational;
use cas_error::Error;
use once_cell::sync::Lazy;
use rug::Float;
use std::{cmp::Ordering, sync::Arc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number `0`.
pub static ZERO: Lazy<Expr> = Lazy::new(|| Expr::Number(Number::int(0)));

/// The number `1`.
pub static ONE: Lazy<Expr> = Lazy::new(|| Expr::Number(Number::int(1)));

/// The number `-1`.
pub static NEG_ONE: Lazy<Expr> = Lazy::new(|| Expr::Number(Number::int(-1)));

/// The number `1/2`.
pub static ONE_HALF: Lazy<Expr> = Lazy::new(|| Expr::Number(Number::Rational(rational(1, 2))));

/// Names printed by the sentinel variants, which are not valid symbol names.
const RESERVED_NAMES: [&str; 2] = ["inf", "undefined"];

/// A mathematical expression in canonical form.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A real number, such as `2`, `-1/3`, or `0.5`.
    Number(Number),

    /// A variable, such as `x` or `theta2`.
    Symbol(Arc<str>),

    /// Two or more terms added together.
    Sum(Arc<[Expr]>),

    /// Two or more factors multiplied together.
    Product(Arc<[Expr]>),

    /// A base raised to an exponent.
    Power(Arc<Expr>, Arc<Expr>),

    /// A builtin function of one argument, such as `sin(x)`.
    Function(Func, Arc<Expr>),

    /// A builtin function of two or more arguments, such as `log(x, 2)`.
    MultiFunction(MultiFunc, Arc<[Expr]>),

    /// Positive infinity.
    PositiveInfinity,

    /// Negative infinity.
    NegativeInfinity,

    /// An infinite value of unknown sign / phase, such as `1/0`.
    ComplexInfinity,

    /// A mathematically undefined value, such as `0^0`.
    Undefined,
}

impl Expr {
    /// Creates an exact integer.
    pub fn int(n: i64) -> Self {
        Self::Number(Number::int(n))
    }

    /// Creates the exact fraction `numer / denom`. A zero denominator produces
    /// [`Expr::ComplexInfinity`], or [`Expr::Undefined`] for `0/0`.
    pub fn rational(numer: i64, denom: i64) -> Self {
        match Number::rational(numer, denom) {
            Some(n) => Self::Number(n),
            None if numer == 0 => Self::Undefined,
            None => Self::ComplexInfinity,
        }
    }

    /// Creates an inexact number. NaN becomes [`Expr::Undefined`] and infinities become the
    /// signed infinities.
    pub fn float(n: f64) -> Self {
        Self::from(Number::float(n))
    }

    /// Creates a symbol without validating its name.
    ///
    /// The name should not be one of the sentinel names `inf` or `undefined`, since such a symbol
    /// would print the same as the sentinel. Use [`Expr::try_symbol`] for names that come from
    /// user input.
    pub fn symbol(name: &str) -> Self {
        Self::Symbol(Arc::from(name))
    }

    /// Creates a symbol, checking that its name is a letter followed by letters or digits, and is
    /// not a sentinel name.
    pub fn try_symbol(name: &str) -> Result<Self, Error> {
        let mut chars = name.chars();
        let valid = chars.next().is_some_and(char::is_alphabetic)
            && chars.all(char::is_alphanumeric)
            && !RESERVED_NAMES.contains(&name);
        if valid {
            Ok(Self::symbol(name))
        } else {
            Err(InvalidSymbol { name: name.to_owned() }.into())
        }
    }

    /// Applies a builtin function to an argument.
    ///
    /// Exactly-known values are evaluated immediately (`exp(0) = 1`, `ln(1) = 0`, ...), numeric
    /// arguments outside the function's domain produce [`Expr::Undefined`], and float arguments
    /// are evaluated numerically.
    pub fn call(func: Func, arg: Expr) -> Self {
        func.evaluate(&arg).unwrap_or_else(|| Self::Function(func, Arc::new(arg)))
    }

    /// Applies a builtin function of several arguments, checking the number of arguments.
    pub fn call_multi(func: MultiFunc, args: Vec<Expr>) -> Result<Self, Error> {
        func.check_arity(args.len())?;
        Ok(Self::call_multi_unchecked(func, args))
    }

    /// Applies a builtin function of several arguments whose arity is already known to be valid.
    pub(crate) fn call_multi_unchecked(func: MultiFunc, args: Vec<Expr>) -> Self {
        func.evaluate(&args).unwrap_or_else(|| Self::MultiFunction(func, args.into()))
    }

    /// Applies the builtin function with the given name, choosing between [`Func`] and
    /// [`MultiFunc`] by the number of arguments.
    pub fn call_named(name: &str, mut args: Vec<Expr>) -> Result<Self, Error> {
        if let Ok(func) = name.parse::<Func>() {
            if args.len() != 1 {
                return Err(WrongArity { name: func.name(), expected: "1", given: args.len() }.into());
            }
            return Ok(Self::call(func, args.remove(0)));
        }

        match name.parse::<MultiFunc>() {
            Ok(func) => Self::call_multi(func, args),
            Err(_) => Err(UnknownFunction::new(name).into()),
        }
    }

    /// Returns `e^self`.
    pub fn exp(&self) -> Self {
        Self::call(Func::Exp, self.clone())
    }

    /// Returns `ln(self)`.
    pub fn ln(&self) -> Self {
        Self::call(Func::Ln, self.clone())
    }

    /// Returns `sin(self)`.
    pub fn sin(&self) -> Self {
        Self::call(Func::Sin, self.clone())
    }

    /// Returns `cos(self)`.
    pub fn cos(&self) -> Self {
        Self::call(Func::Cos, self.clone())
    }

    /// Returns `tan(self)`.
    pub fn tan(&self) -> Self {
        Self::call(Func::Tan, self.clone())
    }

    /// Returns `self^(1/2)`.
    pub fn sqrt(&self) -> Self {
        self.pow(&ONE_HALF)
    }

    /// Returns `self^exp`.
    pub fn pow(&self, exp: &Expr) -> Self {
        builder::power(self.clone(), exp.clone())
    }

    /// Returns `1/self`.
    pub fn recip(&self) -> Self {
        self.pow(&NEG_ONE)
    }

    /// Adds the given terms together, producing a canonical sum.
    pub fn sum<I: IntoIterator<Item = Expr>>(terms: I) -> Self {
        let mut builder = builder::SumBuilder::default();
        for term in terms {
            builder.push(term);
        }
        builder.build()
    }

    /// Multiplies the given factors together, producing a canonical product.
    pub fn product<I: IntoIterator<Item = Expr>>(factors: I) -> Self {
        let mut builder = builder::ProductBuilder::default();
        for factor in factors {
            builder.push(factor);
        }
        builder.build()
    }

    /// Returns true if the expression is the number zero (exact or inexact).
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Number(n) if n.is_zero())
    }

    /// Returns true if the expression is exactly the number one.
    pub fn is_one(&self) -> bool {
        matches!(self, Self::Number(n) if n.is_one())
    }

    /// Returns true if the expression is one of the infinities or [`Expr::Undefined`].
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self,
            Self::PositiveInfinity | Self::NegativeInfinity | Self::ComplexInfinity | Self::Undefined
        )
    }

    /// Returns true if the expression is a number, symbol, or sentinel, i.e. has no children.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Symbol(_)) || self.is_sentinel()
    }

    /// If the expression is a number, returns a reference to it.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the expression is a symbol, returns its name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// If the expression is an exact positive integer that fits in a [`u32`], returns it.
    pub fn as_positive_integer(&self) -> Option<u32> {
        self.as_number()
            .and_then(Number::to_u32)
            .filter(|&n| n > 0)
    }

    /// If the expression is an exact integer that fits in an [`i32`], returns it.
    pub fn as_integer(&self) -> Option<i32> {
        self.as_number().and_then(Number::to_i32)
    }

    /// If the expression is a call to `func`, returns its argument.
    pub fn as_call(&self, func: Func) -> Option<&Expr> {
        match self {
            Self::Function(f, arg) if *f == func => Some(arg),
            _ => None,
        }
    }

    /// Returns true if the expression reads as negative: a negative number, or a product whose
    /// numeric coefficient is negative.
    pub fn is_negative_term(&self) -> bool {
        match self {
            Self::Number(n) => n.is_negative(),
            Self::Product(factors) => factors[0].as_number().is_some_and(Number::is_negative),
            Self::NegativeInfinity => true,
            _ => false,
        }
    }

    /// Splits the expression into its numeric coefficient and the remaining factors. The
    /// coefficient of a number is the number itself, with a remainder of one.
    pub fn split_coefficient(&self) -> (Number, Expr) {
        match self {
            Self::Number(n) => (n.clone(), ONE.clone()),
            Self::Product(factors) => match factors[0].as_number() {
                Some(n) => (n.clone(), builder::product_from_sorted(&factors[1..])),
                None => (Number::int(1), self.clone()),
            },
            _ => (Number::int(1), self.clone()),
        }
    }

    /// Splits the expression into its base and exponent. The exponent of a non-power is one.
    pub fn as_base_exp(&self) -> (&Expr, &Expr) {
        match self {
            Self::Power(base, exp) => (&**base, &**exp),
            _ => (self, &*ONE),
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns an adapter that displays the expression with every composite child parenthesized.
    pub fn strict(&self) -> Strict<'_> {
        Strict(self)
    }

    /// Compares two expressions by the canonical ordering.
    ///
    /// This is the same as [`Ord::cmp`]; it exists to make call sites in algorithms read
    /// explicitly.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        ordering::compare(self, other)
    }
}

impl From<Number> for Expr {
    /// Wraps a number, mapping NaN to [`Expr::Undefined`] and infinite floats to the infinities.
    fn from(n: Number) -> Self {
        match n {
            Number::Float(ref f) if f.is_nan() => Self::Undefined,
            Number::Float(ref f) if f.is_infinite() => {
                if f.is_sign_negative() {
                    Self::NegativeInfinity
                } else {
                    Self::PositiveInfinity
                }
            },
            n => Self::Number(n),
        }
    }
}

impl From<Float> for Expr {
    fn from(f: Float) -> Self {
        Self::from(Number::from(f))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::error::{InvalidSymbol, UnknownFunction, WrongArity};
    use super::*;

    #[test]
    fn symbol_validation() {
        assert!(Expr::try_symbol("theta2").is_ok());
        assert!(Expr::try_symbol("x").is_ok());

        for bad in ["", "2x", "x_1", "x y", "inf", "undefined"] {
            let err = Expr::try_symbol(bad).unwrap_err();
            assert!(err.is::<InvalidSymbol>(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn named_calls() {
        let x = Expr::symbol("x");
        assert_eq!(Expr::call_named("sin", vec![x.clone()]).unwrap(), x.sin());

        let err = Expr::call_named("sine", vec![x.clone()]).unwrap_err();
        let kind = err.downcast_ref::<UnknownFunction>().unwrap();
        assert_eq!(kind.suggestions, vec!["sin".to_string(), "sinh".to_string()]);

        let err = Expr::call_named("log", vec![x.clone()]).unwrap_err();
        assert!(err.is::<WrongArity>());

        let err = Expr::call_named("exp", vec![x.clone(), x]).unwrap_err();
        assert!(err.is::<WrongArity>());
    }

    #[test]
    fn rational_constructor() {
        assert_eq!(Expr::rational(2, 4), ONE_HALF.clone());
        assert_eq!(Expr::rational(1, 0), Expr::ComplexInfinity);
        assert_eq!(Expr::rational(0, 0), Expr::Undefined);
    }

    #[test]
    fn float_sentinels() {
        assert_eq!(Expr::float(f64::NAN), Expr::Undefined);
        assert_eq!(Expr::float(f64::INFINITY), Expr::PositiveInfinity);
        assert_eq!(Expr::float(f64::NEG_INFINITY), Expr::NegativeInfinity);
    }

    #[test]
    fn coefficient_split() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        let term = Expr::int(-3) * &x * &y;
        assert_eq!(term.split_coefficient(), (Number::int(-3), &x * &y));
        assert!(term.is_negative_term());
        assert_eq!((Expr::int(5) * &x).split_coefficient(), (Number::int(5), x.clone()));
        assert_eq!(x.split_coefficient(), (Number::int(1), x));
    }

    #[test]
    fn shared_across_threads() {
        let x = Expr::symbol("x");
        let expr = x.sin() + x.pow(&Expr::int(2));
        let handle = {
            let expr = expr.clone();
            std::thread::spawn(move || expr.to_string())
        };
        assert_eq!(handle.join().unwrap(), expr.to_string());
    }
}
