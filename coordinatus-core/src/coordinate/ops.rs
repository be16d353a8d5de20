//! Arithmetic on [`Coordinate`].
//!
//! Every operation exists as a named method ([`Coordinate::add`],
//! [`Coordinate::subtract`], ...) and as the matching operator. Both surfaces
//! follow the same rules:
//!
//! - **Operands**: a scalar, another [`Coordinate`], or any raw array accepted
//!   by [`CoordinateInput`].
//! - **Shape**: D must match. N must match unless one side has N == 1, which
//!   broadcasts over the other. Anything else fails with `Shape`; nothing is
//!   padded or truncated.
//! - **Kind**: a Point on either side makes the result a Point, otherwise it
//!   is a Vector. Scalars and raw arrays carry no kind. `Point - Point` is a
//!   Point: this is arithmetic on stored values, not a geometric claim.
//! - **Division** by zero follows IEEE 754 and yields infinities or NaN.
//!
//! Operators between two coordinates (or a coordinate and a raw array) can
//! fail, so their output is a [`GeometryResult`]. Operators with an `f64` on
//! either side cannot fail and return the coordinate directly.
//!
//! ```
//! use coordinatus_core::{Coordinate, CoordinateKind};
//!
//! let p = Coordinate::point([1.0, 1.0]).unwrap();
//! let v = Coordinate::vector([0.5, -1.0]).unwrap();
//!
//! let moved = (&p + &v).unwrap();
//! assert_eq!(moved.kind(), CoordinateKind::Point);
//! assert_eq!(moved, [1.5, 0.0]);
//!
//! let doubled = &v * 2.0;
//! assert_eq!(doubled, [1.0, -2.0]);
//!
//! let shifted = v.subtract([1.0, 1.0]).unwrap();
//! assert_eq!(shifted.kind(), CoordinateKind::Vector);
//! ```

use super::{Coordinate, CoordinateArray, CoordinateInput};
use crate::{GeometryError, GeometryResult};
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Right-hand side of a coordinate arithmetic operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(f64),
    Values(CoordinateInput),
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<CoordinateInput> for Operand {
    fn from(input: CoordinateInput) -> Self {
        Self::Values(input)
    }
}

impl From<Coordinate> for Operand {
    fn from(coordinate: Coordinate) -> Self {
        Self::Values(coordinate.into())
    }
}

impl From<&Coordinate> for Operand {
    fn from(coordinate: &Coordinate) -> Self {
        Self::Values(coordinate.into())
    }
}

impl<const N: usize> From<[f64; N]> for Operand {
    fn from(values: [f64; N]) -> Self {
        Self::Values(values.into())
    }
}

impl<const N: usize, const D: usize> From<[[f64; N]; D]> for Operand {
    fn from(rows: [[f64; N]; D]) -> Self {
        Self::Values(rows.into())
    }
}

impl From<&[f64]> for Operand {
    fn from(values: &[f64]) -> Self {
        Self::Values(values.into())
    }
}

impl From<Vec<f64>> for Operand {
    fn from(values: Vec<f64>) -> Self {
        Self::Values(values.into())
    }
}

impl From<Vec<Vec<f64>>> for Operand {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Self::Values(rows.into())
    }
}

impl From<CoordinateArray> for Operand {
    fn from(array: CoordinateArray) -> Self {
        Self::Values(array.into())
    }
}

#[derive(Debug, Clone, Copy)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    #[inline]
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Add => "Coordinate::add",
            Self::Sub => "Coordinate::subtract",
            Self::Mul => "Coordinate::multiply",
            Self::Div => "Coordinate::divide",
        }
    }
}

impl Coordinate {
    /// `self + rhs`
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, rhs: impl Into<Operand>) -> GeometryResult<Coordinate> {
        self.binary(rhs.into(), BinaryOp::Add, false)
    }

    /// `self - rhs`
    pub fn subtract(&self, rhs: impl Into<Operand>) -> GeometryResult<Coordinate> {
        self.binary(rhs.into(), BinaryOp::Sub, false)
    }

    /// `self * rhs`, elementwise.
    pub fn multiply(&self, rhs: impl Into<Operand>) -> GeometryResult<Coordinate> {
        self.binary(rhs.into(), BinaryOp::Mul, false)
    }

    /// `self / rhs`, elementwise.
    pub fn divide(&self, rhs: impl Into<Operand>) -> GeometryResult<Coordinate> {
        self.binary(rhs.into(), BinaryOp::Div, false)
    }

    /// `lhs + self`
    pub fn radd(&self, lhs: impl Into<Operand>) -> GeometryResult<Coordinate> {
        self.binary(lhs.into(), BinaryOp::Add, true)
    }

    /// `lhs - self`
    pub fn rsubtract(&self, lhs: impl Into<Operand>) -> GeometryResult<Coordinate> {
        self.binary(lhs.into(), BinaryOp::Sub, true)
    }

    /// `lhs * self`, elementwise.
    pub fn rmultiply(&self, lhs: impl Into<Operand>) -> GeometryResult<Coordinate> {
        self.binary(lhs.into(), BinaryOp::Mul, true)
    }

    /// `lhs / self`, elementwise.
    pub fn rdivide(&self, lhs: impl Into<Operand>) -> GeometryResult<Coordinate> {
        self.binary(lhs.into(), BinaryOp::Div, true)
    }

    /// Elementwise negation, kind preserved.
    pub fn negate(&self) -> Coordinate {
        self.map_values(|v| -v)
    }

    /// Elementwise magnitude, kind preserved.
    pub fn absolute_value(&self) -> Coordinate {
        self.map_values(libm::fabs)
    }

    fn map_values(&self, f: impl Fn(f64) -> f64) -> Coordinate {
        Coordinate::from_raw(self.kind, self.dim, self.values.iter().map(|&v| f(v)).collect())
    }

    fn scalar(&self, s: f64, op: BinaryOp, reflected: bool) -> Coordinate {
        if reflected {
            self.map_values(|v| op.apply(s, v))
        } else {
            self.map_values(|v| op.apply(v, s))
        }
    }

    fn binary(&self, rhs: Operand, op: BinaryOp, reflected: bool) -> GeometryResult<Coordinate> {
        let input = match rhs {
            Operand::Scalar(s) => return Ok(self.scalar(s, op, reflected)),
            Operand::Values(input) => input,
        };

        let other = input.parse(op.name())?;
        if other.dim != self.dim {
            return Err(GeometryError::shape(
                op.name(),
                format!("operands have D={} and D={}", self.dim, other.dim),
            ));
        }

        let (n_self, n_other) = (self.len(), other.count());
        if n_self != n_other && n_self != 1 && n_other != 1 {
            return Err(GeometryError::shape(
                op.name(),
                format!(
                    "cannot broadcast N={} against N={}; one side must have N=1",
                    n_self, n_other
                ),
            ));
        }

        let dim = self.dim;
        let count = n_self.max(n_other);
        let mut values = Vec::with_capacity(dim * count);
        for i in 0..count {
            let a = instance(&self.values, dim, if n_self == 1 { 0 } else { i });
            let b = instance(&other.values, dim, if n_other == 1 { 0 } else { i });
            values.extend(a.iter().zip(b).map(|(&x, &y)| {
                if reflected {
                    op.apply(y, x)
                } else {
                    op.apply(x, y)
                }
            }));
        }

        Ok(Coordinate::from_raw(
            self.kind.combine(other.kind),
            dim,
            values,
        ))
    }
}

#[inline]
fn instance(values: &[f64], dim: usize, index: usize) -> &[f64] {
    &values[index * dim..(index + 1) * dim]
}

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait<Coordinate> for Coordinate {
            type Output = GeometryResult<Coordinate>;
            fn $method(self, rhs: Coordinate) -> Self::Output {
                self.binary(rhs.into(), $op, false)
            }
        }

        impl $trait<&Coordinate> for Coordinate {
            type Output = GeometryResult<Coordinate>;
            fn $method(self, rhs: &Coordinate) -> Self::Output {
                self.binary(rhs.into(), $op, false)
            }
        }

        impl $trait<Coordinate> for &Coordinate {
            type Output = GeometryResult<Coordinate>;
            fn $method(self, rhs: Coordinate) -> Self::Output {
                self.binary(rhs.into(), $op, false)
            }
        }

        impl $trait<&Coordinate> for &Coordinate {
            type Output = GeometryResult<Coordinate>;
            fn $method(self, rhs: &Coordinate) -> Self::Output {
                self.binary(rhs.into(), $op, false)
            }
        }

        impl<const N: usize> $trait<[f64; N]> for Coordinate {
            type Output = GeometryResult<Coordinate>;
            fn $method(self, rhs: [f64; N]) -> Self::Output {
                self.binary(rhs.into(), $op, false)
            }
        }

        impl<const N: usize> $trait<[f64; N]> for &Coordinate {
            type Output = GeometryResult<Coordinate>;
            fn $method(self, rhs: [f64; N]) -> Self::Output {
                self.binary(rhs.into(), $op, false)
            }
        }

        impl $trait<f64> for Coordinate {
            type Output = Coordinate;
            fn $method(self, rhs: f64) -> Coordinate {
                self.scalar(rhs, $op, false)
            }
        }

        impl $trait<f64> for &Coordinate {
            type Output = Coordinate;
            fn $method(self, rhs: f64) -> Coordinate {
                self.scalar(rhs, $op, false)
            }
        }

        impl $trait<Coordinate> for f64 {
            type Output = Coordinate;
            fn $method(self, rhs: Coordinate) -> Coordinate {
                rhs.scalar(self, $op, true)
            }
        }

        impl $trait<&Coordinate> for f64 {
            type Output = Coordinate;
            fn $method(self, rhs: &Coordinate) -> Coordinate {
                rhs.scalar(self, $op, true)
            }
        }
    };
}

impl_binary_operator!(Add, add, BinaryOp::Add);
impl_binary_operator!(Sub, sub, BinaryOp::Sub);
impl_binary_operator!(Mul, mul, BinaryOp::Mul);
impl_binary_operator!(Div, div, BinaryOp::Div);

/// -Coordinate
impl Neg for Coordinate {
    type Output = Coordinate;

    fn neg(self) -> Coordinate {
        self.negate()
    }
}

/// -&Coordinate
impl Neg for &Coordinate {
    type Output = Coordinate;

    fn neg(self) -> Coordinate {
        self.negate()
    }
}
