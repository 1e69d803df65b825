//! The scalar number tower used by expressions.
//!
//! Exact values are stored as arbitrary-precision [`Rational`]s, so exact arithmetic never
//! overflows and never silently degrades to floating-point. Inexact values are [`Float`]s with
//! [`PRECISION`] bits of precision. Mixing the two produces a [`Float`].

use crate::primitive::{float, int, PRECISION};
use rug::{ops::Pow, Float, Integer, Rational};
use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A real number, either exact or inexact.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Number {
    /// An exact rational number, such as `2` or `-3/4`.
    Rational(Rational),

    /// An inexact floating-point number, such as `0.5` or `3.14`.
    Float(Float),
}

impl Number {
    /// Creates an exact integer.
    pub fn int<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::Rational(Rational::from(int(n)))
    }

    /// Creates an exact rational number. Returns [`None`] if the denominator is zero.
    pub fn rational(numer: i64, denom: i64) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        Some(Self::Rational(Rational::from((int(numer), int(denom)))))
    }

    /// Creates an inexact number.
    pub fn float(n: f64) -> Self {
        Self::Float(float(n))
    }

    /// Returns true if the number is exact.
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Rational(_))
    }

    /// Returns true if the number is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Rational(r) => r.cmp0() == Ordering::Equal,
            Self::Float(f) => f.is_zero(),
        }
    }

    /// Returns true if the number is **exactly** one. The float `1.0` is not exactly one.
    pub fn is_one(&self) -> bool {
        matches!(self, Self::Rational(r) if *r == 1)
    }

    /// Returns true if the number is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.signum() == Ordering::Less
    }

    /// Returns true if the number is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.signum() == Ordering::Greater
    }

    /// Returns true if the number is an exact integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Rational(r) if *r.denom() == 1)
    }

    /// Returns true if the float is NaN. Exact numbers are never NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::Float(f) if f.is_nan())
    }

    /// Returns true if the float is infinite. Exact numbers are never infinite.
    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Float(f) if f.is_infinite())
    }

    /// Returns the sign of the number as an [`Ordering`] against zero.
    pub fn signum(&self) -> Ordering {
        match self {
            Self::Rational(r) => r.cmp0(),
            Self::Float(f) => f.cmp0().unwrap_or(Ordering::Equal),
        }
    }

    /// If the number is an exact integer, returns it.
    pub fn to_integer(&self) -> Option<Integer> {
        match self {
            Self::Rational(r) if *r.denom() == 1 => Some(r.numer().clone()),
            _ => None,
        }
    }

    /// If the number is an exact integer that fits in an [`i32`], returns it.
    pub fn to_i32(&self) -> Option<i32> {
        self.to_integer().and_then(|n| n.to_i32())
    }

    /// If the number is an exact non-negative integer that fits in a [`u32`], returns it.
    pub fn to_u32(&self) -> Option<u32> {
        self.to_integer().and_then(|n| n.to_u32())
    }

    /// Converts the number to a [`Float`].
    pub fn to_float(&self) -> Float {
        match self {
            Self::Rational(r) => float(r),
            Self::Float(f) => f.clone(),
        }
    }

    /// Converts the number to an [`f64`], rounding if necessary.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Rational(r) => r.to_f64(),
            Self::Float(f) => f.to_f64(),
        }
    }

    /// Returns the numerator of the number. The numerator of a float is the float itself.
    pub fn numer(&self) -> Self {
        match self {
            Self::Rational(r) => Self::Rational(Rational::from(r.numer().clone())),
            Self::Float(_) => self.clone(),
        }
    }

    /// Returns the denominator of the number. The denominator of a float is one.
    pub fn denom(&self) -> Self {
        match self {
            Self::Rational(r) => Self::Rational(Rational::from(r.denom().clone())),
            Self::Float(_) => Self::int(1),
        }
    }

    /// Applies a binary operation, promoting to [`Float`] if either side is inexact.
    fn combine(
        &self,
        other: &Self,
        exact: impl FnOnce(&Rational, &Rational) -> Rational,
        inexact: impl FnOnce(Float, Float) -> Float,
    ) -> Self {
        match (self, other) {
            (Self::Rational(a), Self::Rational(b)) => Self::Rational(exact(a, b)),
            _ => Self::Float(inexact(self.to_float(), other.to_float())),
        }
    }

    /// Adds two numbers.
    pub fn add(&self, other: &Self) -> Self {
        self.combine(other, |a, b| Rational::from(a + b), |a, b| a + b)
    }

    /// Subtracts `other` from this number.
    pub fn sub(&self, other: &Self) -> Self {
        self.combine(other, |a, b| Rational::from(a - b), |a, b| a - b)
    }

    /// Multiplies two numbers.
    pub fn mul(&self, other: &Self) -> Self {
        self.combine(other, |a, b| Rational::from(a * b), |a, b| a * b)
    }

    /// Divides this number by `other`. Returns [`None`] if `other` is zero.
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        Some(self.combine(other, |a, b| Rational::from(a / b), |a, b| a / b))
    }

    /// Returns the reciprocal of this number. Returns [`None`] if the number is zero.
    pub fn recip(&self) -> Option<Self> {
        Self::int(1).checked_div(self)
    }

    /// Negates the number.
    pub fn neg(&self) -> Self {
        match self {
            Self::Rational(r) => Self::Rational(-r.clone()),
            Self::Float(f) => Self::Float(-f.clone()),
        }
    }

    /// Returns the absolute value of the number.
    pub fn abs(&self) -> Self {
        match self {
            Self::Rational(r) => Self::Rational(r.clone().abs()),
            Self::Float(f) => Self::Float(f.clone().abs()),
        }
    }

    /// Raises this number to the given power.
    ///
    /// For exact operands the result is exact, or [`None`] if no exact result exists (for example
    /// `2^(1/2)`). An inexact operand produces an inexact result, which can be NaN or infinite.
    /// Raising zero to a negative power returns [`None`].
    pub fn pow(&self, exp: &Self) -> Option<Self> {
        match (self, exp) {
            (Self::Rational(base), Self::Rational(exp)) => exact_pow(base, exp).map(Self::Rational),
            _ => Some(Self::Float(self.to_float().pow(&exp.to_float()))),
        }
    }
}

/// Raises an exact rational to an exact rational power, if the result is exact.
fn exact_pow(base: &Rational, exp: &Rational) -> Option<Rational> {
    let power = exp.numer().to_i32()?;
    let root = exp.denom().to_u32()?;

    if base.cmp0() == Ordering::Equal {
        return match power.cmp(&0) {
            Ordering::Greater => Some(Rational::new()),
            Ordering::Equal => Some(Rational::from(1)),
            Ordering::Less => None,
        };
    }

    let base = if root == 1 {
        base.clone()
    } else {
        Rational::from((exact_root(base.numer(), root)?, exact_root(base.denom(), root)?))
    };

    Some(Rational::from((&base).pow(power)))
}

/// Computes the exact `n`th root of an integer, if it exists.
fn exact_root(value: &Integer, n: u32) -> Option<Integer> {
    let negative = value.cmp0() == Ordering::Less;
    if negative && n % 2 == 0 {
        return None;
    }

    let magnitude = value.clone().abs();
    let root = magnitude.clone().root(n);
    if root.clone().pow(n) != magnitude {
        return None;
    }

    Some(if negative { -root } else { root })
}

impl From<Rational> for Number {
    fn from(r: Rational) -> Self {
        Self::Rational(r)
    }
}

impl From<Integer> for Number {
    fn from(n: Integer) -> Self {
        Self::Rational(Rational::from(n))
    }
}

impl From<Float> for Number {
    fn from(f: Float) -> Self {
        Self::Float(Float::with_val(PRECISION, f))
    }
}

/// Equality is structural: an exact number is never equal to a float, even if they have the same
/// value.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Rational(a), Self::Rational(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            _ => false,
        }
    }
}

/// Expressions never hold NaN, so float equality is reflexive.
impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Rational(r) => {
                0u8.hash(state);
                r.hash(state);
            },
            Self::Float(f) => {
                1u8.hash(state);
                // `0.0 == -0.0`, so both must hash the same
                if f.is_zero() {
                    0u64.hash(state);
                } else {
                    f.to_f64().to_bits().hash(state);
                }
            },
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Numbers are ordered by value. An exact number sorts before a float of the same value.
impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Rational(a), Self::Rational(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Rational(a), Self::Float(b)) => b
                .partial_cmp(a)
                .map(Ordering::reverse)
                .unwrap_or(Ordering::Equal)
                .then(Ordering::Less),
            (Self::Float(a), Self::Rational(b)) => a
                .partial_cmp(b)
                .unwrap_or(Ordering::Equal)
                .then(Ordering::Greater),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rational(r) => write!(f, "{}", r),
            Self::Float(n) => write!(f, "{}", format_float(n)),
        }
    }
}

/// Formats a float with every digit needed to read it back exactly, dropping trailing zeros from
/// the fractional part.
fn format_float(n: &Float) -> String {
    let digits = n.to_string_radix(10, None);
    if !n.is_finite() {
        return digits;
    }

    let (mantissa, exponent) = digits.split_at(digits.find('e').unwrap_or(digits.len()));
    match mantissa.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            let frac = if frac.is_empty() { "0" } else { frac };
            format!("{}.{}{}", whole, frac, exponent)
        },
        None => format!("{}.0{}", mantissa, exponent),
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_relative_eq;
    use crate::primitive::rational;
    use super::*;

    fn q(n: i64, d: i64) -> Number {
        Number::rational(n, d).unwrap()
    }

    #[test]
    fn exact_arithmetic() {
        assert_eq!(q(1, 2).add(&q(1, 3)), q(5, 6));
        assert_eq!(q(1, 2).sub(&q(1, 2)), Number::int(0));
        assert_eq!(q(2, 3).mul(&q(3, 4)), q(1, 2));
        assert_eq!(q(1, 2).checked_div(&q(1, 4)), Some(Number::int(2)));
        assert_eq!(q(1, 2).checked_div(&Number::int(0)), None);
    }

    #[test]
    fn large_integers_stay_exact() {
        let big = Number::int(i64::MAX);
        let squared = big.mul(&big);
        assert!(squared.is_exact());
        assert_eq!(squared.checked_div(&big), Some(big));
    }

    #[test]
    fn mixing_produces_float() {
        let sum = Number::int(1).add(&Number::float(0.5));
        assert!(!sum.is_exact());
        assert_float_relative_eq!(sum.to_f64(), 1.5);
    }

    #[test]
    fn exact_powers() {
        assert_eq!(Number::int(2).pow(&Number::int(10)), Some(Number::int(1024)));
        assert_eq!(Number::int(2).pow(&Number::int(-2)), Some(q(1, 4)));
        assert_eq!(Number::int(8).pow(&q(2, 3)), Some(Number::int(4)));
        assert_eq!(q(4, 9).pow(&q(1, 2)), Some(q(2, 3)));
        assert_eq!(Number::int(-27).pow(&q(1, 3)), Some(Number::int(-3)));
        assert_eq!(Number::int(2).pow(&q(1, 2)), None);
        assert_eq!(Number::int(-4).pow(&q(1, 2)), None);
        assert_eq!(Number::int(0).pow(&Number::int(-1)), None);
    }

    #[test]
    fn float_powers() {
        let root = Number::float(2.0).pow(&q(1, 2)).unwrap();
        assert_float_relative_eq!(root.to_f64(), std::f64::consts::SQRT_2);
        assert!(Number::float(-1.0).pow(&q(1, 2)).unwrap().is_nan());
    }

    #[test]
    fn structural_equality() {
        assert_ne!(Number::int(1), Number::float(1.0));
        assert_eq!(Number::float(0.0), Number::float(-0.0));
        assert_eq!(Number::Rational(rational(2, 4)), q(1, 2));
    }

    #[test]
    fn ordering_by_value() {
        let mut numbers = vec![Number::float(1.0), q(3, 2), Number::int(-2), Number::int(1)];
        numbers.sort();
        assert_eq!(numbers, vec![Number::int(-2), Number::int(1), Number::float(1.0), q(3, 2)]);
    }

    #[test]
    fn display() {
        assert_eq!(q(-3, 4).to_string(), "-3/4");
        assert_eq!(Number::int(12).to_string(), "12");
        assert_eq!(Number::float(2.0).to_string(), "2.0");
        assert_eq!(Number::float(-0.5).to_string(), "-0.5");
    }
}
