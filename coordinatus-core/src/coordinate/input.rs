//! Conversion of array-like input into coordinate storage, and the export form.
//!
//! [`CoordinateInput`] is the closed set of shapes accepted wherever a
//! [`Coordinate`] is expected. Each shape is named, so an ambiguous nested
//! sequence is never silently reinterpreted:
//!
//! | Variant | Shape | Meaning |
//! |---------|-------|---------|
//! | `Single` | `(D,)` | one coordinate |
//! | `Rows` | `(D, N)` | one row per component, one column per instance |
//! | `Instances` | `(N, D)` | one entry per instance |
//! | `Coordinate` | any | copy of an existing value, kind preserved |
//!
//! Nested `Vec`s and nested arrays convert to `Rows`, matching the layout of
//! [`CoordinateArray::Batch`], so exporting and re-importing is lossless.

use super::{Coordinate, CoordinateKind};
use crate::{GeometryError, GeometryResult};

/// Array-like input accepted by coordinate construction and arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateInput {
    Single(Vec<f64>),
    Rows(Vec<Vec<f64>>),
    Instances(Vec<Vec<f64>>),
    Coordinate(Coordinate),
}

/// Validated storage extracted from a [`CoordinateInput`].
#[derive(Debug)]
pub(crate) struct ParsedInput {
    pub kind: Option<CoordinateKind>,
    pub dim: usize,
    pub values: Vec<f64>,
}

impl ParsedInput {
    pub fn count(&self) -> usize {
        self.values.len() / self.dim
    }
}

impl CoordinateInput {
    pub(crate) fn parse(self, operation: &str) -> GeometryResult<ParsedInput> {
        match self {
            Self::Single(values) => {
                if values.is_empty() {
                    return Err(GeometryError::shape(
                        operation,
                        "coordinate needs at least one component",
                    ));
                }
                Ok(ParsedInput {
                    kind: None,
                    dim: values.len(),
                    values,
                })
            }
            Self::Rows(rows) => {
                let (dim, count) = rectangular(&rows, operation, "row")?;
                let mut values = Vec::with_capacity(dim * count);
                for i in 0..count {
                    values.extend(rows.iter().map(|row| row[i]));
                }
                Ok(ParsedInput {
                    kind: None,
                    dim,
                    values,
                })
            }
            Self::Instances(instances) => {
                let (count, dim) = rectangular(&instances, operation, "instance")?;
                let mut values = Vec::with_capacity(dim * count);
                for instance in &instances {
                    values.extend_from_slice(instance);
                }
                Ok(ParsedInput {
                    kind: None,
                    dim,
                    values,
                })
            }
            Self::Coordinate(coordinate) => Ok(ParsedInput {
                kind: Some(coordinate.kind),
                dim: coordinate.dim,
                values: coordinate.values,
            }),
        }
    }
}

/// Checks a sequence of sequences is non-empty and rectangular.
///
/// Returns `(outer, inner)` lengths.
fn rectangular(
    nested: &[Vec<f64>],
    operation: &str,
    what: &str,
) -> GeometryResult<(usize, usize)> {
    let Some(first) = nested.first() else {
        return Err(GeometryError::shape(operation, "empty coordinate batch"));
    };
    let inner = first.len();
    if inner == 0 {
        return Err(GeometryError::shape(
            operation,
            format!("{} 0 is empty", what),
        ));
    }
    if let Some((i, ragged)) = nested.iter().enumerate().find(|(_, v)| v.len() != inner) {
        return Err(GeometryError::shape(
            operation,
            format!(
                "ragged input: {} {} has length {}, expected {}",
                what,
                i,
                ragged.len(),
                inner
            ),
        ));
    }
    Ok((nested.len(), inner))
}

impl<const N: usize> From<[f64; N]> for CoordinateInput {
    fn from(values: [f64; N]) -> Self {
        Self::Single(values.to_vec())
    }
}

impl<const N: usize> From<&[f64; N]> for CoordinateInput {
    fn from(values: &[f64; N]) -> Self {
        Self::Single(values.to_vec())
    }
}

impl From<&[f64]> for CoordinateInput {
    fn from(values: &[f64]) -> Self {
        Self::Single(values.to_vec())
    }
}

impl From<Vec<f64>> for CoordinateInput {
    fn from(values: Vec<f64>) -> Self {
        Self::Single(values)
    }
}

impl<const N: usize, const D: usize> From<[[f64; N]; D]> for CoordinateInput {
    fn from(rows: [[f64; N]; D]) -> Self {
        Self::Rows(rows.iter().map(|row| row.to_vec()).collect())
    }
}

impl From<Vec<Vec<f64>>> for CoordinateInput {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self::Rows(rows)
    }
}

impl From<Coordinate> for CoordinateInput {
    fn from(coordinate: Coordinate) -> Self {
        Self::Coordinate(coordinate)
    }
}

impl From<&Coordinate> for CoordinateInput {
    fn from(coordinate: &Coordinate) -> Self {
        Self::Coordinate(coordinate.clone())
    }
}

impl From<CoordinateArray> for CoordinateInput {
    fn from(array: CoordinateArray) -> Self {
        match array {
            CoordinateArray::Single(values) => Self::Single(values),
            CoordinateArray::Batch(rows) => Self::Rows(rows),
        }
    }
}

/// Plain array form of a coordinate, handed to plotting and serialization.
///
/// `Single` has shape `(D,)` and is used when N == 1; otherwise `Batch` holds
/// D rows of N values each.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum CoordinateArray {
    Single(Vec<f64>),
    Batch(Vec<Vec<f64>>),
}

impl CoordinateArray {
    /// Returns `(D, N)`: components per instance and number of instances.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Single(values) => (values.len(), 1),
            Self::Batch(rows) => (rows.len(), rows.first().map_or(0, Vec::len)),
        }
    }
}
