//! Functions to construct [`Integer`]s, [`Rational`]s, and [`Float`]s from various types.

use rug::{Assign, Float, Integer, Rational};

/// The number of bits of precision to use when computing inexact values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given numerator and denominator.
///
/// Panics if the denominator is zero.
pub fn rational<N, D>(numer: N, denom: D) -> Rational
where
    Integer: From<N> + From<D>,
{
    Rational::from((int(numer), int(denom)))
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Computes `n!` exactly.
pub fn factorial(n: u32) -> Integer {
    Integer::from(Integer::factorial(n))
}

/// Computes the binomial coefficient `n choose k` exactly. Returns zero if `k > n`.
pub fn binomial(n: u32, k: u32) -> Integer {
    Integer::from(Integer::binomial_u(n, k))
}
