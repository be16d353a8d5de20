//! D×D rotation matrices for rigid frame transformations.
//!
//! A rotation matrix is an orthogonal matrix with determinant +1. Applied to a
//! vector it rotates it while preserving its length. Every [`Transform`]
//! carries one as its linear part, and composing transforms multiplies them.
//!
//! # Dimension
//!
//! The dimension is a runtime property: the same type serves planar (2×2) and
//! spatial (3×3) frame trees, and anything else a caller needs. Operations
//! between matrices of different dimensions fail with
//! [`DimensionMismatch`](crate::GeometryError::DimensionMismatch).
//!
//! # Rotation Convention
//!
//! Rotations are **active** and counter-clockwise: rotating by a positive angle
//! moves the vector, not the axes. In the plane, a quarter turn takes
//! `[1, 0]` to `[0, 1]`:
//!
//! ```
//! use coordinatus_core::RotationMatrix;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let r = RotationMatrix::planar(FRAC_PI_2);
//! let v = r.apply(&[1.0, 0.0]).unwrap();
//! assert!(v[0].abs() < 1e-15);
//! assert!((v[1] - 1.0).abs() < 1e-15);
//! ```
//!
//! # Storage Layout
//!
//! Elements are stored row-major. The element at row `i`, column `j` is
//! `matrix[(i, j)]` or `matrix.get(i, j)`.
//!
//! # Inverting Rotations
//!
//! For a proper rotation the inverse equals the transpose, which is cheap and
//! numerically stable, so there is no general inverse here.
//!
//! [`Transform`]: crate::Transform

use crate::{GeometryError, GeometryResult, Tolerance};
use std::fmt;

/// A validated D×D rotation matrix.
///
/// Constructors that take raw elements ([`from_rows`](Self::from_rows))
/// reject anything that is not a proper rotation. Matrices built from angles
/// are rotations by construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")
)]
pub struct RotationMatrix {
    dim: usize,
    elements: Vec<f64>,
}

impl RotationMatrix {
    /// Creates the D×D identity matrix.
    pub fn identity(dim: usize) -> Self {
        let mut elements = vec![0.0; dim * dim];
        for i in 0..dim {
            elements[i * dim + i] = 1.0;
        }
        Self { dim, elements }
    }

    /// Creates a rotation from row slices, validated with the default tolerance.
    ///
    /// ```
    /// use coordinatus_core::{GeometryError, RotationMatrix};
    ///
    /// let swap = RotationMatrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).unwrap();
    /// assert_eq!(swap.dim(), 2);
    ///
    /// // Scaling is not a rotation.
    /// let err = RotationMatrix::from_rows(&[[2.0, 0.0], [0.0, 1.0]]).unwrap_err();
    /// assert!(matches!(err, GeometryError::InvalidRotation { .. }));
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> GeometryResult<Self> {
        Self::from_rows_with(rows, &Tolerance::default())
    }

    /// Creates a rotation from row slices, validated with `tolerance.rotation`.
    ///
    /// Fails with `Shape` for empty, ragged or non-square input and with
    /// `InvalidRotation` when the matrix is not orthonormal with determinant +1.
    /// Input is never normalized.
    pub fn from_rows_with<R: AsRef<[f64]>>(
        rows: &[R],
        tolerance: &Tolerance,
    ) -> GeometryResult<Self> {
        let dim = rows.len();
        if dim == 0 {
            return Err(GeometryError::shape(
                "RotationMatrix::from_rows",
                "rotation matrix needs at least one row",
            ));
        }

        let mut elements = Vec::with_capacity(dim * dim);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dim {
                return Err(GeometryError::shape(
                    "RotationMatrix::from_rows",
                    format!(
                        "row {} has {} columns, expected {} for a square matrix",
                        i,
                        row.len(),
                        dim
                    ),
                ));
            }
            elements.extend_from_slice(row);
        }

        let matrix = Self { dim, elements };
        if let Some(reason) = matrix.rotation_defect(tolerance.rotation) {
            return Err(GeometryError::invalid_rotation(reason));
        }
        Ok(matrix)
    }

    /// Counter-clockwise planar rotation by `angle` radians.
    ///
    /// ```text
    /// R(a) = | cos(a)  -sin(a) |
    ///        | sin(a)   cos(a) |
    /// ```
    pub fn planar(angle: f64) -> Self {
        let (s, c) = libm::sincos(angle);
        Self {
            dim: 2,
            elements: vec![c, -s, s, c],
        }
    }

    /// Counter-clockwise rotation about the X axis by `angle` radians.
    ///
    /// ```
    /// use coordinatus_core::RotationMatrix;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// // +Y turns toward +Z
    /// let v = RotationMatrix::about_x(FRAC_PI_2).apply(&[0.0, 1.0, 0.0]).unwrap();
    /// assert!((v[2] - 1.0).abs() < 1e-15);
    /// ```
    pub fn about_x(angle: f64) -> Self {
        let (s, c) = libm::sincos(angle);
        Self {
            dim: 3,
            elements: vec![1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c],
        }
    }

    /// Counter-clockwise rotation about the Y axis by `angle` radians (+Z turns toward +X).
    pub fn about_y(angle: f64) -> Self {
        let (s, c) = libm::sincos(angle);
        Self {
            dim: 3,
            elements: vec![c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c],
        }
    }

    /// Counter-clockwise rotation about the Z axis by `angle` radians (+X turns toward +Y).
    pub fn about_z(angle: f64) -> Self {
        let (s, c) = libm::sincos(angle);
        Self {
            dim: 3,
            elements: vec![c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the element at the specified row and column.
    ///
    /// Panics if `row` or `col` is not below [`dim`](Self::dim).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }

    /// Row-major element storage.
    pub fn elements(&self) -> &[f64] {
        &self.elements
    }

    /// Copies the matrix out as one `Vec` per row.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.elements
            .chunks_exact(self.dim.max(1))
            .map(<[f64]>::to_vec)
            .collect()
    }

    /// Multiplies this matrix by another, returning `self * other`.
    ///
    /// The product represents `other` applied first, then `self`.
    pub fn multiply(&self, other: &Self) -> GeometryResult<Self> {
        if self.dim != other.dim {
            return Err(GeometryError::dimension_mismatch(
                "RotationMatrix::multiply",
                self.dim,
                other.dim,
            ));
        }
        Ok(self.multiply_unchecked(other))
    }

    pub(crate) fn multiply_unchecked(&self, other: &Self) -> Self {
        let n = self.dim;
        let mut elements = vec![0.0; n * n];

        for (i, row) in elements.chunks_exact_mut(n.max(1)).enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                for k in 0..n {
                    *cell += self.elements[i * n + k] * other.elements[k * n + j];
                }
            }
        }

        Self { dim: n, elements }
    }

    /// Applies this rotation to a D-component vector.
    pub fn apply(&self, vector: &[f64]) -> GeometryResult<Vec<f64>> {
        if vector.len() != self.dim {
            return Err(GeometryError::dimension_mismatch(
                "RotationMatrix::apply",
                self.dim,
                vector.len(),
            ));
        }
        let mut out = vec![0.0; self.dim];
        self.apply_into(vector, &mut out);
        Ok(out)
    }

    /// `out = M * vector`; both slices must have length `dim`.
    pub(crate) fn apply_into(&self, vector: &[f64], out: &mut [f64]) {
        let n = self.dim;
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.elements[i * n..(i + 1) * n]
                .iter()
                .zip(vector)
                .map(|(m, v)| m * v)
                .sum();
        }
    }

    /// Returns the transpose, which for a rotation is its inverse.
    pub fn transpose(&self) -> Self {
        let n = self.dim;
        let mut elements = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                elements[j * n + i] = self.elements[i * n + j];
            }
        }
        Self { dim: n, elements }
    }

    /// Computes the determinant by Gaussian elimination with partial pivoting.
    ///
    /// +1 for a proper rotation, -1 for a reflection.
    pub fn determinant(&self) -> f64 {
        let n = self.dim;
        let mut m = self.elements.clone();
        let mut det = 1.0;

        for col in 0..n {
            let pivot = (col..n)
                .max_by(|&a, &b| {
                    libm::fabs(m[a * n + col]).total_cmp(&libm::fabs(m[b * n + col]))
                })
                .unwrap_or(col);

            if m[pivot * n + col] == 0.0 {
                return 0.0;
            }
            if pivot != col {
                for k in 0..n {
                    m.swap(col * n + k, pivot * n + k);
                }
                det = -det;
            }

            let p = m[col * n + col];
            det *= p;
            for row in (col + 1)..n {
                let factor = m[row * n + col] / p;
                for k in col..n {
                    m[row * n + k] -= factor * m[col * n + k];
                }
            }
        }

        det
    }

    /// Checks whether this matrix is a proper rotation within `tolerance`.
    ///
    /// Requires `M * M^T = I` elementwise and a determinant of +1.
    pub fn is_rotation_matrix(&self, tolerance: f64) -> bool {
        self.rotation_defect(tolerance).is_none()
    }

    fn rotation_defect(&self, tolerance: f64) -> Option<String> {
        if self.elements.iter().any(|e| !e.is_finite()) {
            return Some("matrix contains non-finite elements".to_string());
        }

        let product = self.multiply_unchecked(&self.transpose());
        let deviation = product.max_difference(&Self::identity(self.dim));
        if deviation > tolerance {
            return Some(format!(
                "matrix is not orthonormal: M*M^T deviates from identity by {:e} (tolerance {:e})",
                deviation, tolerance
            ));
        }

        let det = self.determinant();
        if libm::fabs(det - 1.0) > tolerance {
            return Some(format!(
                "determinant is {:.6}, a proper rotation needs +1",
                det
            ));
        }

        None
    }

    /// Returns the maximum absolute difference between corresponding elements.
    ///
    /// Matrices of different dimensions are infinitely far apart.
    pub fn max_difference(&self, other: &Self) -> f64 {
        if self.dim != other.dim {
            return f64::INFINITY;
        }
        self.elements
            .iter()
            .zip(&other.elements)
            .fold(0.0_f64, |acc, (a, b)| acc.max(libm::fabs(a - b)))
    }
}

impl std::ops::Index<(usize, usize)> for RotationMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.dim && col < self.dim,
            "RotationMatrix index out of bounds: ({}, {})",
            row,
            col
        );
        &self.elements[row * self.dim + col]
    }
}

impl TryFrom<Vec<Vec<f64>>> for RotationMatrix {
    type Error = GeometryError;

    fn try_from(rows: Vec<Vec<f64>>) -> GeometryResult<Self> {
        Self::from_rows(&rows)
    }
}

impl From<RotationMatrix> for Vec<Vec<f64>> {
    fn from(matrix: RotationMatrix) -> Self {
        matrix.rows()
    }
}

impl fmt::Display for RotationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RotationMatrix({}x{}):", self.dim, self.dim)?;
        for row in self.elements.chunks_exact(self.dim.max(1)) {
            write!(f, "  [")?;
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:12.9}", value)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
