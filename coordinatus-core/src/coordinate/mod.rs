//! Points and vectors, single or batched.
//!
//! A [`Coordinate`] holds N instances of a D-dimensional value together with
//! a [`CoordinateKind`] that decides how transforms treat it:
//!
//! - **Point**: a position. Rotation and translation both apply.
//! - **Vector**: a displacement or direction. Only rotation applies.
//!
//! # Construction
//!
//! ```
//! use coordinatus_core::{Coordinate, CoordinateKind};
//!
//! // One 3D point
//! let p = Coordinate::point([1.0, 2.0, 3.0]).unwrap();
//! assert_eq!((p.dim(), p.len()), (3, 1));
//!
//! // Batches use one row per component: 2 components, 3 instances
//! let batch = Coordinate::vector([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
//! assert_eq!((batch.dim(), batch.len()), (2, 3));
//! assert_eq!(batch.get(1).unwrap(), &[2.0, 5.0]);
//!
//! // Or one entry per instance
//! let same = Coordinate::from_instances(
//!     CoordinateKind::Vector,
//!     &[[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]],
//! ).unwrap();
//! assert_eq!(same, batch);
//! ```
//!
//! # Arithmetic
//!
//! See [`ops`] for the broadcasting and kind-combination rules.

mod input;
pub mod ops;

pub use input::{CoordinateArray, CoordinateInput};
pub use ops::Operand;

use crate::constants::DISPLAY_MAX_INSTANCES;
use crate::{GeometryError, GeometryResult};
use std::fmt;

/// Whether a coordinate is a position or a displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CoordinateKind {
    Point,
    Vector,
}

impl CoordinateKind {
    /// Kind of the result of combining `self` with another operand.
    ///
    /// A Point on either side gives a Point. Operands without a kind (scalars,
    /// raw arrays) leave `self` unchanged.
    pub fn combine(self, other: Option<CoordinateKind>) -> CoordinateKind {
        match (self, other) {
            (Self::Point, _) | (_, Some(Self::Point)) => Self::Point,
            _ => Self::Vector,
        }
    }

    /// Homogeneous weight: 1 for points, 0 for vectors.
    pub fn weight(self) -> f64 {
        match self {
            Self::Point => 1.0,
            Self::Vector => 0.0,
        }
    }
}

impl fmt::Display for CoordinateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => write!(f, "Point"),
            Self::Vector => write!(f, "Vector"),
        }
    }
}

/// N instances of a D-dimensional point or vector.
///
/// D and N are both at least 1, and D never changes for a given value.
/// Instances are stored contiguously, so [`get`](Self::get) borrows a slice.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CoordinateRepr", into = "CoordinateRepr")
)]
pub struct Coordinate {
    kind: CoordinateKind,
    dim: usize,
    values: Vec<f64>,
}

impl Coordinate {
    /// Builds a coordinate of the given kind from any supported input.
    ///
    /// Copying from another [`Coordinate`] keeps that coordinate's kind; use
    /// [`with_kind`](Self::with_kind) to change it.
    pub fn new(kind: CoordinateKind, input: impl Into<CoordinateInput>) -> GeometryResult<Self> {
        let parsed = input.into().parse("Coordinate::new")?;
        Ok(Self {
            kind: parsed.kind.unwrap_or(kind),
            dim: parsed.dim,
            values: parsed.values,
        })
    }

    /// Shorthand for `new(CoordinateKind::Point, input)`.
    pub fn point(input: impl Into<CoordinateInput>) -> GeometryResult<Self> {
        Self::new(CoordinateKind::Point, input)
    }

    /// Shorthand for `new(CoordinateKind::Vector, input)`.
    pub fn vector(input: impl Into<CoordinateInput>) -> GeometryResult<Self> {
        Self::new(CoordinateKind::Vector, input)
    }

    /// Like [`new`](Self::new), but fails with `Shape` unless the input has
    /// exactly `dim` components per instance.
    ///
    /// Use this when the layout of nested input is known, so that data in the
    /// transposed layout is rejected instead of accepted with swapped D and N.
    ///
    /// ```
    /// use coordinatus_core::{Coordinate, CoordinateKind};
    ///
    /// let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
    /// assert!(Coordinate::with_dim(CoordinateKind::Point, rows.clone(), 2).is_ok());
    /// assert!(Coordinate::with_dim(CoordinateKind::Point, rows, 3).is_err());
    /// ```
    pub fn with_dim(
        kind: CoordinateKind,
        input: impl Into<CoordinateInput>,
        dim: usize,
    ) -> GeometryResult<Self> {
        let coordinate = Self::new(kind, input)?;
        if coordinate.dim != dim {
            return Err(GeometryError::shape(
                "Coordinate::with_dim",
                format!("expected D={}, input has D={}", dim, coordinate.dim),
            ));
        }
        Ok(coordinate)
    }

    /// Builds a batch from one slice per instance.
    pub fn from_instances<R: AsRef<[f64]>>(
        kind: CoordinateKind,
        instances: &[R],
    ) -> GeometryResult<Self> {
        let instances = instances.iter().map(|r| r.as_ref().to_vec()).collect();
        Self::new(kind, CoordinateInput::Instances(instances))
    }

    /// Assembles a coordinate from already-validated parts.
    pub(crate) fn from_raw(kind: CoordinateKind, dim: usize, values: Vec<f64>) -> Self {
        debug_assert!(dim > 0 && !values.is_empty() && values.len() % dim == 0);
        Self { kind, dim, values }
    }

    #[inline]
    pub fn kind(&self) -> CoordinateKind {
        self.kind
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        self.kind == CoordinateKind::Point
    }

    #[inline]
    pub fn is_vector(&self) -> bool {
        self.kind == CoordinateKind::Vector
    }

    /// Spatial dimension D.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of instances N.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len() / self.dim
    }

    /// Always `false`: a coordinate holds at least one instance.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values, instance after instance.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the same values with a different kind.
    pub fn with_kind(mut self, kind: CoordinateKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns instance `index` as a length-D slice.
    pub fn get(&self, index: usize) -> GeometryResult<&[f64]> {
        if index >= self.len() {
            return Err(GeometryError::shape(
                "Coordinate::get",
                format!("index {} out of bounds for {} instances", index, self.len()),
            ));
        }
        Ok(&self.values[index * self.dim..(index + 1) * self.dim])
    }

    /// Replaces instance `index` in place.
    ///
    /// Fails with `Shape` if `index` is out of range or `value` does not have
    /// exactly D components; the coordinate is unchanged on failure.
    pub fn set(&mut self, index: usize, value: impl AsRef<[f64]>) -> GeometryResult<()> {
        let value = value.as_ref();
        if value.len() != self.dim {
            return Err(GeometryError::shape(
                "Coordinate::set",
                format!("expected {} components, found {}", self.dim, value.len()),
            ));
        }
        if index >= self.len() {
            return Err(GeometryError::shape(
                "Coordinate::set",
                format!("index {} out of bounds for {} instances", index, self.len()),
            ));
        }
        self.values[index * self.dim..(index + 1) * self.dim].copy_from_slice(value);
        Ok(())
    }

    /// Iterates over instances as length-D slices.
    pub fn iter(&self) -> std::slice::ChunksExact<'_, f64> {
        self.values.chunks_exact(self.dim)
    }

    /// Exports to the plain `(D,)` or `(D, N)` array form.
    pub fn export(&self) -> CoordinateArray {
        if self.len() == 1 {
            return CoordinateArray::Single(self.values.clone());
        }
        let rows = (0..self.dim)
            .map(|k| self.iter().map(|instance| instance[k]).collect())
            .collect();
        CoordinateArray::Batch(rows)
    }

    /// Compares kind, shape, and values elementwise within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.kind == other.kind && self.approx_eq_values(other, tolerance)
    }

    fn approx_eq_values(&self, other: &Self, tolerance: f64) -> bool {
        self.dim == other.dim
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| libm::fabs(a - b) <= tolerance)
    }

    /// Compares numeric content only, ignoring kind.
    ///
    /// Input that cannot be coerced to a coordinate compares unequal.
    pub fn eq_values(&self, other: impl Into<CoordinateInput>) -> bool {
        match other.into().parse("Coordinate::eq_values") {
            Ok(parsed) => parsed.dim == self.dim && parsed.values == self.values,
            Err(_) => false,
        }
    }

    /// Human-readable summary listing at most `max_instances` instances.
    pub fn summary(&self, max_instances: usize) -> String {
        let mut out = format!("{}(D={}, N={}) ", self.kind, self.dim, self.len());
        if self.len() == 1 {
            out.push_str(&format_instance(&self.values));
            return out;
        }

        let shown: Vec<String> = self.iter().take(max_instances).map(format_instance).collect();
        out.push('[');
        out.push_str(&shown.join(", "));
        let hidden = self.len().saturating_sub(max_instances);
        if hidden > 0 {
            out.push_str(&format!(", ... ({} more)", hidden));
        }
        out.push(']');
        out
    }
}

fn format_instance(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary(DISPLAY_MAX_INSTANCES))
    }
}

impl<'a> IntoIterator for &'a Coordinate {
    type Item = &'a [f64];
    type IntoIter = std::slice::ChunksExact<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<const N: usize> PartialEq<[f64; N]> for Coordinate {
    fn eq(&self, other: &[f64; N]) -> bool {
        self.eq_values(other)
    }
}

impl PartialEq<Vec<f64>> for Coordinate {
    fn eq(&self, other: &Vec<f64>) -> bool {
        self.eq_values(other.as_slice())
    }
}

impl PartialEq<Vec<Vec<f64>>> for Coordinate {
    fn eq(&self, other: &Vec<Vec<f64>>) -> bool {
        self.eq_values(other.clone())
    }
}

impl PartialEq<CoordinateArray> for Coordinate {
    fn eq(&self, other: &CoordinateArray) -> bool {
        self.eq_values(other.clone())
    }
}

impl TryFrom<CoordinateInput> for Coordinate {
    type Error = GeometryError;

    /// Raw input without a kind becomes a Point.
    fn try_from(input: CoordinateInput) -> GeometryResult<Self> {
        Self::new(CoordinateKind::Point, input)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct CoordinateRepr {
    kind: CoordinateKind,
    coords: CoordinateArray,
}

#[cfg(feature = "serde")]
impl TryFrom<CoordinateRepr> for Coordinate {
    type Error = GeometryError;

    fn try_from(repr: CoordinateRepr) -> GeometryResult<Self> {
        Self::new(repr.kind, repr.coords)
    }
}

#[cfg(feature = "serde")]
impl From<Coordinate> for CoordinateRepr {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            kind: coordinate.kind,
            coords: coordinate.export(),
        }
    }
}
