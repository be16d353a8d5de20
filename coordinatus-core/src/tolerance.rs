//! Numeric tolerances.
//!
//! There is no file or environment configuration: a [`Tolerance`] value is
//! passed to the operations that need one, and [`Tolerance::default`] is
//! what the plain constructors use.

use crate::constants::{DEFAULT_COMPARISON_TOLERANCE, DEFAULT_ROTATION_TOLERANCE};

/// Absolute tolerances used when validating and comparing values.
///
/// ```
/// use coordinatus_core::Tolerance;
///
/// let strict = Tolerance::default().with_rotation(1e-12);
/// assert_eq!(strict.rotation, 1e-12);
/// assert_eq!(strict.comparison, Tolerance::default().comparison);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tolerance {
    /// Maximum element deviation of `M * M^T` from identity, and of the
    /// determinant from +1, for a matrix to count as a rotation.
    pub rotation: f64,
    /// Maximum element difference for two values to compare as equal.
    pub comparison: f64,
}

impl Tolerance {
    /// Tolerance with explicit rotation and comparison bounds.
    pub fn new(rotation: f64, comparison: f64) -> Self {
        Self {
            rotation,
            comparison,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_comparison(mut self, comparison: f64) -> Self {
        self.comparison = comparison;
        self
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATION_TOLERANCE, DEFAULT_COMPARISON_TOLERANCE)
    }
}
