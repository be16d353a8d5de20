//! Error types for frame and coordinate calculations.
//!
//! A single error type, [`GeometryError`], covers every failure mode of the
//! workspace. All of them are local, synchronous failures raised at the point
//! of the offending call. Nothing is retried and no operation leaves a value
//! half-modified when it fails.
//!
//! # Error Categories
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`Shape`](GeometryError::Shape) | Coordinate construction, indexing, arithmetic |
//! | [`DimensionMismatch`](GeometryError::DimensionMismatch) | Transform composition and application |
//! | [`InvalidRotation`](GeometryError::InvalidRotation) | Non-orthonormal rotation input |
//! | [`Cycle`](GeometryError::Cycle) | Parent traversal that does not terminate |
//! | [`UnknownFrame`](GeometryError::UnknownFrame) | Frame id not present in a graph |
//!
//! # Usage
//!
//! ```
//! use coordinatus_core::{GeometryError, GeometryResult};
//!
//! fn checked_len(values: &[f64], expected: usize) -> GeometryResult<usize> {
//!     if values.len() != expected {
//!         return Err(GeometryError::shape(
//!             "checked_len",
//!             format!("expected {} components, found {}", expected, values.len()),
//!         ));
//!     }
//!     Ok(values.len())
//! }
//!
//! assert!(checked_len(&[1.0, 2.0], 3).is_err());
//! ```

use thiserror::Error;

/// Unified error type for transform, coordinate and frame operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Dimension or length mismatch on construction, indexing, or arithmetic.
    #[error("Shape error in {operation}: {message}")]
    Shape { operation: String, message: String },

    /// Two operands of a transform operation live in different dimensions.
    #[error("Dimension mismatch in {operation}: expected {expected}, found {found}")]
    DimensionMismatch {
        operation: String,
        expected: usize,
        found: usize,
    },

    /// Rotation component is not a proper orthonormal matrix.
    #[error("Invalid rotation: {message}")]
    InvalidRotation { message: String },

    /// Walking parent links from `frame` did not reach a root within `steps` hops.
    #[error("Cycle detected walking parents of frame {frame} (gave up after {steps} steps)")]
    Cycle { frame: usize, steps: usize },

    /// A frame id that the graph never issued.
    #[error("Unknown frame id {frame}")]
    UnknownFrame { frame: usize },
}

/// Convenience alias for `Result<T, GeometryError>`.
pub type GeometryResult<T> = Result<T, GeometryError>;

impl GeometryError {
    /// Creates a [`Shape`](Self::Shape) error.
    pub fn shape(operation: &str, message: impl Into<String>) -> Self {
        Self::Shape {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    /// Creates a [`DimensionMismatch`](Self::DimensionMismatch) error.
    pub fn dimension_mismatch(operation: &str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            operation: operation.to_string(),
            expected,
            found,
        }
    }

    /// Creates an [`InvalidRotation`](Self::InvalidRotation) error.
    pub fn invalid_rotation(message: impl Into<String>) -> Self {
        Self::InvalidRotation {
            message: message.into(),
        }
    }

    /// Creates a [`Cycle`](Self::Cycle) error.
    pub fn cycle(frame: usize, steps: usize) -> Self {
        Self::Cycle { frame, steps }
    }

    /// Creates an [`UnknownFrame`](Self::UnknownFrame) error.
    pub fn unknown_frame(frame: usize) -> Self {
        Self::UnknownFrame { frame }
    }

    /// Returns `true` for errors caused by input shapes rather than graph state.
    pub fn is_shape_related(&self) -> bool {
        matches!(
            self,
            Self::Shape { .. } | Self::DimensionMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_message() {
        let err = GeometryError::shape("Coordinate::set", "expected 2 components, found 3");
        assert_eq!(
            err.to_string(),
            "Shape error in Coordinate::set: expected 2 components, found 3"
        );
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = GeometryError::dimension_mismatch("Transform::compose", 2, 3);
        assert!(err.to_string().contains("expected 2, found 3"));
        assert!(err.to_string().contains("Transform::compose"));
    }

    #[test]
    fn test_invalid_rotation_message() {
        let err = GeometryError::invalid_rotation("determinant is -1");
        assert!(err.to_string().contains("determinant is -1"));
    }

    #[test]
    fn test_cycle_message() {
        let err = GeometryError::cycle(4, 5);
        assert!(err.to_string().contains("frame 4"));
        assert!(err.to_string().contains("5 steps"));
    }

    #[test]
    fn test_shape_related() {
        assert!(GeometryError::shape("op", "bad").is_shape_related());
        assert!(GeometryError::dimension_mismatch("op", 1, 2).is_shape_related());
        assert!(!GeometryError::cycle(0, 1).is_shape_related());
        assert!(!GeometryError::unknown_frame(9).is_shape_related());
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<GeometryError>();
        _assert_sync::<GeometryError>();
    }
}
