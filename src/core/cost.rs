//! The [`Cost`] trait abstracts over the scalar a [`MoveManager`](super::move_manager::MoveManager)
//! reports. Most problems use a floating-point cost (Euclidean tour length); purely combinatorial
//! problems such as the inversion-count sort harness can use a signed integer instead and still
//! plug into the same [`Annealer`](super::annealer::Annealer).

use std::fmt::{Debug, Display};
use std::ops::{Add, Sub};

/// A totally ordered scalar where lower is better.
///
/// Implementors must support subtraction (to express deltas), addition (to accumulate deltas onto
/// a running total), absolute value, ordering against zero, and lossy conversion to `f64` for the
/// annealer's running statistics and Boltzmann factor. Maximization problems must invert their
/// score before implementing this trait; the annealer always minimizes.
pub trait Cost:
  Copy + PartialOrd + PartialEq + Add<Output = Self> + Sub<Output = Self> + Debug + Display
{
  /// The additive identity, used both as the accumulator seed and as the "is this an improving
  /// delta" comparison point.
  fn zero() -> Self;

  /// Absolute value.
  fn abs(self) -> Self;

  /// Lossy conversion to `f64`, used for the Boltzmann factor and running statistics.
  fn to_f64(self) -> f64;

  /// Whether this cost is strictly negative, i.e. an improving delta.
  fn is_negative(self) -> bool {
    self < Self::zero()
  }
}

impl Cost for f64 {
  fn zero() -> Self {
    0.0
  }

  fn abs(self) -> Self {
    f64::abs(self)
  }

  fn to_f64(self) -> f64 {
    self
  }
}

impl Cost for i64 {
  fn zero() -> Self {
    0
  }

  fn abs(self) -> Self {
    i64::abs(self)
  }

  fn to_f64(self) -> f64 {
    self as f64
  }
}
