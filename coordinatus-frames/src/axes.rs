//! Frame axes in absolute space, the data a plotting collaborator draws.
//!
//! Each axis is reported as the absolute position of the tip of the frame's
//! unit basis vector, so a renderer draws a segment from `origin` to each tip.

use coordinatus_core::{Coordinate, CoordinateKind, GeometryResult, Transform};

/// Origin and unit axis tips of a frame, expressed in absolute space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameAxes {
    /// Absolute position of the frame origin.
    pub origin: Vec<f64>,
    /// `tips[k]` is the absolute position of the frame's k-th unit axis tip.
    pub tips: Vec<Vec<f64>>,
}

impl FrameAxes {
    /// Axes of absolute space itself: origin at zero, tips on the unit axes.
    pub fn absolute(dim: usize) -> Self {
        Self::from_transform(&Transform::identity(dim))
    }

    /// Axes of the frame whose absolute transform is `absolute`.
    pub fn from_transform(absolute: &Transform) -> Self {
        let dim = absolute.dim();
        let origin = absolute.translation().to_vec();
        let rotation = absolute.rotation();
        let tips = (0..dim)
            .map(|k| {
                origin
                    .iter()
                    .enumerate()
                    .map(|(row, o)| o + rotation.get(row, k))
                    .collect()
            })
            .collect();
        Self { origin, tips }
    }

    pub fn dim(&self) -> usize {
        self.origin.len()
    }

    /// Unit direction of axis `k` in absolute space.
    pub fn direction(&self, k: usize) -> Option<Vec<f64>> {
        self.tips
            .get(k)
            .map(|tip| tip.iter().zip(&self.origin).map(|(t, o)| t - o).collect())
    }

    /// Origin and tips as one point batch (origin first), ready for export.
    pub fn to_points(&self) -> GeometryResult<Coordinate> {
        let mut instances = Vec::with_capacity(self.tips.len() + 1);
        instances.push(self.origin.clone());
        instances.extend(self.tips.iter().cloned());
        Coordinate::from_instances(CoordinateKind::Point, &instances)
    }
}
