//! Rotation matrices of any fixed dimension.
//!
//! - [`RotationMatrix`]: validated D×D proper rotation

mod rotation_matrix;

pub use rotation_matrix::RotationMatrix;
