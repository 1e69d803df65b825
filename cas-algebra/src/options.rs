#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bounds for the iterative algorithms.
///
/// Every function that loops until some condition holds has a `_with` variant accepting these
/// options; the plain variant uses [`Options::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Options {
    /// The maximum number of cross-multiplication steps taken when bringing a sum over a common
    /// denominator. Exceeding it fails with [`IterationLimit`](crate::error::IterationLimit).
    pub max_rationalize_steps: usize,

    /// The maximum number of passes made when contracting exponential or trigonometric forms to a
    /// fixed point. Reaching it stops contraction with the last result.
    pub max_contract_passes: usize,

    /// The maximum number of steps taken by polynomial long division and the Euclidean GCD loop.
    /// Exceeding it fails with [`IterationLimit`](crate::error::IterationLimit).
    pub max_division_steps: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_rationalize_steps: 64,
            max_contract_passes: 32,
            max_division_steps: 256,
        }
    }
}
