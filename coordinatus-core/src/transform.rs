//! Rigid transforms: a rotation followed by a translation.
//!
//! A [`Transform`] maps coordinates expressed in a child frame into its parent
//! frame. Points are rotated and then translated; vectors are only rotated,
//! because a displacement does not change when the origin moves.
//!
//! # Composition
//!
//! `a.compose(&b)` is the transform that applies `b` first and then `a`, the
//! same right-to-left order as matrix multiplication. Walking a frame chain
//! from the root down, the absolute transform of a leaf is
//! `root_to_child.compose(&child_to_leaf)`.
//!
//! ```
//! use coordinatus_core::{Coordinate, Transform};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let spin = Transform::rotate_2d(FRAC_PI_2);
//! let shift = Transform::translate_2d(3.0, 2.0);
//!
//! // rotate first, then translate
//! let t = shift.compose(&spin).unwrap();
//! let p = t.apply_point(&Coordinate::point([1.0, 0.0]).unwrap()).unwrap();
//! assert!(p.approx_eq(&Coordinate::point([3.0, 3.0]).unwrap(), 1e-12));
//! ```
//!
//! # Inversion
//!
//! The inverse of `x -> R x + t` is `x -> R^T x - R^T t`; no general matrix
//! inverse is needed.
//!
//! # Scaling
//!
//! The rotation component is always orthonormal, so scale and shear are not
//! representable. Scale coordinates with [`Coordinate`] arithmetic instead.

use crate::{
    Coordinate, CoordinateKind, GeometryError, GeometryResult, RotationMatrix, Tolerance,
};
use std::fmt;

/// Rotation plus translation in a fixed dimension D.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TransformRepr", into = "TransformRepr")
)]
pub struct Transform {
    rotation: RotationMatrix,
    translation: Vec<f64>,
}

impl Transform {
    /// Combines a rotation with a translation of the same dimension.
    pub fn new(rotation: RotationMatrix, translation: Vec<f64>) -> GeometryResult<Self> {
        if translation.len() != rotation.dim() {
            return Err(GeometryError::dimension_mismatch(
                "Transform::new",
                rotation.dim(),
                translation.len(),
            ));
        }
        Ok(Self {
            rotation,
            translation,
        })
    }

    /// Builds a transform from raw rotation rows and a translation.
    ///
    /// A rotation that is not orthonormal with determinant +1 is rejected with
    /// `InvalidRotation`; it is never normalized.
    pub fn from_parts<R: AsRef<[f64]>>(rows: &[R], translation: &[f64]) -> GeometryResult<Self> {
        Self::from_parts_with(rows, translation, &Tolerance::default())
    }

    /// Like [`from_parts`](Self::from_parts), validating the rotation under `tolerance`.
    pub fn from_parts_with<R: AsRef<[f64]>>(
        rows: &[R],
        translation: &[f64],
        tolerance: &Tolerance,
    ) -> GeometryResult<Self> {
        let rotation = RotationMatrix::from_rows_with(rows, tolerance)?;
        Self::new(rotation, translation.to_vec())
    }

    /// Identity transform in `dim` dimensions.
    pub fn identity(dim: usize) -> Self {
        Self {
            rotation: RotationMatrix::identity(dim),
            translation: vec![0.0; dim],
        }
    }

    /// Pure translation; the dimension is the length of `offset`.
    pub fn from_translation(offset: &[f64]) -> Self {
        Self {
            rotation: RotationMatrix::identity(offset.len()),
            translation: offset.to_vec(),
        }
    }

    /// Pure rotation about the origin.
    pub fn from_rotation(rotation: RotationMatrix) -> Self {
        let dim = rotation.dim();
        Self {
            rotation,
            translation: vec![0.0; dim],
        }
    }

    /// Planar translation by `(tx, ty)`.
    pub fn translate_2d(tx: f64, ty: f64) -> Self {
        Self::from_translation(&[tx, ty])
    }

    /// Counter-clockwise rotation by `angle` radians about the origin.
    pub fn rotate_2d(angle: f64) -> Self {
        Self::from_rotation(RotationMatrix::planar(angle))
    }

    /// Rotation by `angle` followed by translation by `(tx, ty)`.
    ///
    /// This is how a child frame is usually placed: its origin sits at
    /// `(tx, ty)` in the parent and its axes are turned by `angle`.
    pub fn rigid_2d(tx: f64, ty: f64, angle: f64) -> Self {
        Self {
            rotation: RotationMatrix::planar(angle),
            translation: vec![tx, ty],
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.rotation.dim()
    }

    pub fn rotation(&self) -> &RotationMatrix {
        &self.rotation
    }

    pub fn translation(&self) -> &[f64] {
        &self.translation
    }

    /// Returns the transform that applies `other` first, then `self`.
    ///
    /// Neither operand is modified. Fails with `DimensionMismatch` if the two
    /// transforms live in different dimensions.
    pub fn compose(&self, other: &Self) -> GeometryResult<Self> {
        if self.dim() != other.dim() {
            return Err(GeometryError::dimension_mismatch(
                "Transform::compose",
                self.dim(),
                other.dim(),
            ));
        }

        let rotation = self.rotation.multiply_unchecked(&other.rotation);
        let mut translation = vec![0.0; self.dim()];
        self.rotation.apply_into(&other.translation, &mut translation);
        for (t, own) in translation.iter_mut().zip(&self.translation) {
            *t += own;
        }

        Ok(Self {
            rotation,
            translation,
        })
    }

    /// Returns the transform mapping this transform's output space back to its input.
    ///
    /// ```
    /// use coordinatus_core::Transform;
    ///
    /// let t = Transform::rigid_2d(4.0, -1.0, 0.7);
    /// let round_trip = t.compose(&t.inverse()).unwrap();
    /// assert!(round_trip.is_identity(1e-12));
    /// ```
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.transpose();
        let mut translation = vec![0.0; self.dim()];
        rotation.apply_into(&self.translation, &mut translation);
        for t in translation.iter_mut() {
            *t = -*t;
        }
        Self {
            rotation,
            translation,
        }
    }

    /// Rotates then translates every instance. The result keeps the input's kind.
    pub fn apply_point(&self, coordinate: &Coordinate) -> GeometryResult<Coordinate> {
        self.map_instances(
            "Transform::apply_point",
            coordinate,
            CoordinateKind::Point.weight(),
        )
    }

    /// Rotates every instance; translation is ignored. The result keeps the input's kind.
    pub fn apply_vector(&self, coordinate: &Coordinate) -> GeometryResult<Coordinate> {
        self.map_instances(
            "Transform::apply_vector",
            coordinate,
            CoordinateKind::Vector.weight(),
        )
    }

    /// Applies point or vector semantics according to the coordinate's kind.
    pub fn apply(&self, coordinate: &Coordinate) -> GeometryResult<Coordinate> {
        self.map_instances("Transform::apply", coordinate, coordinate.kind().weight())
    }

    fn map_instances(
        &self,
        operation: &str,
        coordinate: &Coordinate,
        weight: f64,
    ) -> GeometryResult<Coordinate> {
        let dim = self.dim();
        if coordinate.dim() != dim {
            return Err(GeometryError::dimension_mismatch(
                operation,
                dim,
                coordinate.dim(),
            ));
        }

        let mut values = vec![0.0; coordinate.values().len()];
        for (input, out) in coordinate.iter().zip(values.chunks_exact_mut(dim)) {
            self.rotation.apply_into(input, out);
            // homogeneous weight: translation scales by 1 for points, 0 for vectors
            if weight != 0.0 {
                for (o, t) in out.iter_mut().zip(&self.translation) {
                    *o += weight * t;
                }
            }
        }

        Ok(Coordinate::from_raw(coordinate.kind(), dim, values))
    }

    /// `true` if rotation and translation are within `tolerance` of the identity.
    pub fn is_identity(&self, tolerance: f64) -> bool {
        self.max_difference(&Self::identity(self.dim())) <= tolerance
    }

    /// Maximum absolute difference over rotation and translation elements.
    ///
    /// Transforms of different dimensions are infinitely far apart.
    pub fn max_difference(&self, other: &Self) -> f64 {
        let rotation = self.rotation.max_difference(&other.rotation);
        if !rotation.is_finite() {
            return rotation;
        }
        self.translation
            .iter()
            .zip(&other.translation)
            .fold(rotation, |acc, (a, b)| acc.max(libm::fabs(a - b)))
    }

    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.max_difference(other) <= tolerance
    }

    /// Homogeneous (D+1)×(D+1) affine matrix, last row `[0, ..., 0, 1]`.
    pub fn to_homogeneous(&self) -> Vec<Vec<f64>> {
        let dim = self.dim();
        let mut rows: Vec<Vec<f64>> = self
            .rotation
            .rows()
            .into_iter()
            .zip(&self.translation)
            .map(|(mut row, &t)| {
                row.push(t);
                row
            })
            .collect();
        let mut last = vec![0.0; dim + 1];
        last[dim] = 1.0;
        rows.push(last);
        rows
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transform(D={}):", self.dim())?;
        for (row, t) in self.to_homogeneous().iter().zip(&self.translation) {
            let rotation: Vec<String> = row[..self.dim()]
                .iter()
                .map(|v| format!("{:12.9}", v))
                .collect();
            writeln!(f, "  [{}] + {:12.9}", rotation.join(" "), t)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct TransformRepr {
    rotation: RotationMatrix,
    translation: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<TransformRepr> for Transform {
    type Error = GeometryError;

    fn try_from(repr: TransformRepr) -> GeometryResult<Self> {
        Self::new(repr.rotation, repr.translation)
    }
}

#[cfg(feature = "serde")]
impl From<Transform> for TransformRepr {
    fn from(transform: Transform) -> Self {
        Self {
            rotation: transform.rotation,
            translation: transform.translation,
        }
    }
}
