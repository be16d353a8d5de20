//! Geometric building blocks for hierarchical reference frames.
//!
//! `coordinatus-core` provides the value types a frame tree is built from:
//! validated rotation matrices, rigid transforms, and point/vector coordinate
//! batches with array-like arithmetic. The dimension D is chosen at runtime,
//! so the same types serve planar drawings and 3D scenes.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`matrix`] | D×D proper rotation matrices with orthonormality validation |
//! | [`transform`] | Rotation + translation, composition, inversion, application |
//! | [`coordinate`] | Points and vectors, single or batched, input coercion, arithmetic |
//! | [`tolerance`] | Numeric tolerances used for validation and comparison |
//! | [`constants`] | Default tolerances and display limits |
//! | [`errors`] | [`GeometryError`] and [`GeometryResult`] |
//!
//! # Points and Vectors
//!
//! A point is a location and is moved by the translation part of a
//! transform. A vector is a displacement and is only rotated:
//!
//! ```
//! use coordinatus_core::{Coordinate, Transform};
//!
//! let t = Transform::translate_2d(5.0, 3.0);
//! let p = Coordinate::point([1.0, 2.0]).unwrap();
//! let v = Coordinate::vector([1.0, 2.0]).unwrap();
//!
//! assert_eq!(t.apply(&p).unwrap(), [6.0, 5.0]);
//! assert_eq!(t.apply(&v).unwrap(), [1.0, 2.0]);
//! ```
//!
//! # Re-exports
//!
//! ```
//! use coordinatus_core::{Coordinate, CoordinateArray, CoordinateInput, CoordinateKind, Operand};
//! use coordinatus_core::{GeometryError, GeometryResult, RotationMatrix, Tolerance, Transform};
//! ```
//!
//! # Design Notes
//!
//! - **Immutable transforms**: `compose` and `inverse` return new values.
//! - **No normalization**: a rotation that is not orthonormal with determinant
//!   +1 is rejected with [`GeometryError::InvalidRotation`].
//! - **Batch layout**: nested input is read as one row per component, the same
//!   D×N shape [`Coordinate::export`] produces.

pub mod constants;
pub mod coordinate;
pub mod errors;
pub mod matrix;
pub mod tolerance;
pub mod transform;

pub use coordinate::{Coordinate, CoordinateArray, CoordinateInput, CoordinateKind, Operand};
pub use errors::{GeometryError, GeometryResult};
pub use matrix::RotationMatrix;
pub use tolerance::Tolerance;
pub use transform::Transform;
