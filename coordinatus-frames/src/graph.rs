//! Arena of frames and the conversions between their coordinate spaces.
//!
//! Frames are stored in a `Vec` and refer to their parent by [`FrameId`].
//! Ids are issued in creation order and a parent must exist before its
//! children, so a graph built through [`FrameGraph::create_frame`] is a
//! forest by construction. Graphs rebuilt from raw frames go through
//! [`FrameGraph::from_frames`], which checks the same properties.
//!
//! # Absolute space
//!
//! A root frame coincides with absolute space: its absolute transform is the
//! identity whatever transform it was created with. Every root shares the
//! same absolute space, so frames in different trees can still exchange
//! coordinates as long as the dimensions agree.
//!
//! ```
//! use coordinatus_core::{Coordinate, Transform};
//! use coordinatus_frames::FrameGraph;
//!
//! let mut graph = FrameGraph::new();
//! let root = graph.create_root("world", 2).unwrap();
//! let child = graph
//!     .create_frame(Some(root), Transform::translate_2d(1.0, 0.0), "child")
//!     .unwrap();
//!
//! let p = Coordinate::point([0.0, 0.0]).unwrap();
//! assert_eq!(graph.to_absolute(child, &p).unwrap(), [1.0, 0.0]);
//! ```

use crate::{Frame, FrameAxes, FrameId};
use coordinatus_core::{Coordinate, GeometryError, GeometryResult, Tolerance, Transform};
use tracing::{debug, trace, warn};

/// Forest of reference frames.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "FrameGraphRepr", into = "FrameGraphRepr")
)]
pub struct FrameGraph {
    frames: Vec<Frame>,
    tolerance: Tolerance,
}

impl FrameGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty graph validating rotations and comparing transforms with `tolerance`.
    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        Self {
            frames: Vec::new(),
            tolerance,
        }
    }

    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    /// Rebuilds a graph from raw frames using the default tolerance.
    pub fn from_frames(frames: Vec<Frame>) -> GeometryResult<Self> {
        Self::from_frames_with(frames, Tolerance::default())
    }

    /// Rebuilds a graph from raw frames.
    ///
    /// Frame `i` must carry id `i`, every parent must be present, children
    /// must share their parent's dimension, every rotation must be valid
    /// under `tolerance`, and the parent links must not form a cycle.
    pub fn from_frames_with(frames: Vec<Frame>, tolerance: Tolerance) -> GeometryResult<Self> {
        for (index, frame) in frames.iter().enumerate() {
            if frame.id.0 != index {
                return Err(GeometryError::shape(
                    "FrameGraph::from_frames",
                    format!("frame at position {} has id {}", index, frame.id),
                ));
            }
            check_transform("FrameGraph::from_frames", frame.transform(), &tolerance)?;
            if let Some(parent) = frame.parent {
                let parent_frame = frames
                    .get(parent.0)
                    .ok_or_else(|| GeometryError::unknown_frame(parent.0))?;
                if parent_frame.dim() != frame.dim() {
                    return Err(GeometryError::dimension_mismatch(
                        "FrameGraph::from_frames",
                        parent_frame.dim(),
                        frame.dim(),
                    ));
                }
            }
        }

        let graph = Self { frames, tolerance };
        for frame in &graph.frames {
            graph.ancestors(frame.id)?;
        }
        debug!(frames = graph.len(), "frame graph rebuilt");
        Ok(graph)
    }

    /// Adds a frame under `parent`, or a new root when `parent` is `None`.
    ///
    /// `transform` maps the new frame's local coordinates into the parent's.
    /// A root keeps its transform for reference but always sits at the
    /// identity in absolute space.
    pub fn create_frame(
        &mut self,
        parent: Option<FrameId>,
        transform: Transform,
        name: impl Into<String>,
    ) -> GeometryResult<FrameId> {
        check_transform("FrameGraph::create_frame", &transform, &self.tolerance)?;
        if let Some(parent) = parent {
            let parent_dim = self.frame(parent)?.dim();
            if parent_dim != transform.dim() {
                return Err(GeometryError::dimension_mismatch(
                    "FrameGraph::create_frame",
                    parent_dim,
                    transform.dim(),
                ));
            }
        }

        let id = FrameId(self.frames.len());
        let name = name.into();
        debug!(
            frame = %id,
            name = %name,
            parent = ?parent.map(FrameId::index),
            dim = transform.dim(),
            "frame created"
        );
        self.frames.push(Frame {
            id,
            name,
            transform,
            parent,
        });
        Ok(id)
    }

    /// Adds a root frame of dimension `dim` with an identity transform.
    ///
    /// Fails with `Shape` when `dim` is zero.
    pub fn create_root(
        &mut self,
        name: impl Into<String>,
        dim: usize,
    ) -> GeometryResult<FrameId> {
        self.create_frame(None, Transform::identity(dim), name)
    }

    /// Adds a planar frame rotated by `angle` radians with its origin at
    /// `(tx, ty)` in the parent.
    pub fn create_frame_2d(
        &mut self,
        parent: Option<FrameId>,
        name: impl Into<String>,
        tx: f64,
        ty: f64,
        angle: f64,
    ) -> GeometryResult<FrameId> {
        self.create_frame(parent, Transform::rigid_2d(tx, ty, angle), name)
    }

    pub fn frame(&self, id: FrameId) -> GeometryResult<&Frame> {
        self.frames
            .get(id.0)
            .ok_or_else(|| GeometryError::unknown_frame(id.0))
    }

    pub fn parent(&self, id: FrameId) -> GeometryResult<Option<FrameId>> {
        Ok(self.frame(id)?.parent)
    }

    /// Direct children of `id`, in creation order.
    pub fn children(&self, id: FrameId) -> GeometryResult<Vec<FrameId>> {
        self.frame(id)?;
        Ok(self
            .frames
            .iter()
            .filter(|f| f.parent == Some(id))
            .map(|f| f.id)
            .collect())
    }

    /// Ancestors of `id`, nearest first, ending with its root.
    ///
    /// Fails with `Cycle` if the walk takes more steps than there are frames.
    pub fn ancestors(&self, id: FrameId) -> GeometryResult<Vec<FrameId>> {
        let mut chain = Vec::new();
        let mut current = self.frame(id)?;
        while let Some(parent) = current.parent {
            if chain.len() >= self.frames.len() {
                warn!(frame = %id, steps = chain.len(), "cycle in frame parents");
                return Err(GeometryError::cycle(id.0, chain.len()));
            }
            chain.push(parent);
            current = self.frame(parent)?;
        }
        Ok(chain)
    }

    pub fn root_of(&self, id: FrameId) -> GeometryResult<FrameId> {
        Ok(self.ancestors(id)?.last().copied().unwrap_or(id))
    }

    /// Number of parent links between `id` and its root.
    pub fn depth(&self, id: FrameId) -> GeometryResult<usize> {
        Ok(self.ancestors(id)?.len())
    }

    /// First frame named `name`.
    pub fn find(&self, name: &str) -> Option<FrameId> {
        self.frames.iter().find(|f| f.name == name).map(|f| f.id)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn roots(&self) -> impl Iterator<Item = &Frame> + '_ {
        self.frames.iter().filter(|f| f.is_root())
    }

    /// Transform from the local space of `id` to absolute space.
    ///
    /// Relative transforms are composed root to leaf; the root itself
    /// contributes the identity.
    pub fn compute_absolute_transform(&self, id: FrameId) -> GeometryResult<Transform> {
        let ancestors = self.ancestors(id)?;
        let frame = self.frame(id)?;
        trace!(frame = %id, depth = ancestors.len(), "computing absolute transform");

        if frame.is_root() {
            return Ok(Transform::identity(frame.dim()));
        }

        // ancestors ends with the root, whose transform is skipped
        let mut absolute = Transform::identity(frame.dim());
        for ancestor in ancestors.iter().rev().skip(1) {
            absolute = absolute.compose(self.frame(*ancestor)?.transform())?;
        }
        absolute.compose(frame.transform())
    }

    /// Expresses `coordinate`, given in the local space of `id`, in absolute space.
    pub fn to_absolute(&self, id: FrameId, coordinate: &Coordinate) -> GeometryResult<Coordinate> {
        self.compute_absolute_transform(id)?.apply(coordinate)
    }

    /// Expresses an absolute `coordinate` in the local space of `id`.
    pub fn to_local(&self, id: FrameId, coordinate: &Coordinate) -> GeometryResult<Coordinate> {
        self.compute_absolute_transform(id)?
            .inverse()
            .apply(coordinate)
    }

    /// Re-expresses `coordinate` from the space of `from` in the space of `to`,
    /// passing through absolute space.
    pub fn to_frame(
        &self,
        from: FrameId,
        to: FrameId,
        coordinate: &Coordinate,
    ) -> GeometryResult<Coordinate> {
        let absolute = self.to_absolute(from, coordinate)?;
        self.to_local(to, &absolute)
    }

    /// Single transform taking coordinates of `from` into the space of `to`.
    ///
    /// Applying it gives the same result as [`to_frame`](Self::to_frame).
    pub fn convert_transform(&self, from: FrameId, to: FrameId) -> GeometryResult<Transform> {
        let from_absolute = self.compute_absolute_transform(from)?;
        let to_absolute = self.compute_absolute_transform(to)?;
        to_absolute.inverse().compose(&from_absolute)
    }

    /// `true` if both frames sit at the same place in absolute space, within
    /// the graph's comparison tolerance.
    pub fn coincident(&self, a: FrameId, b: FrameId) -> GeometryResult<bool> {
        let a = self.compute_absolute_transform(a)?;
        let b = self.compute_absolute_transform(b)?;
        Ok(a.approx_eq(&b, self.tolerance.comparison))
    }

    /// Origin and axis tips of `id` in absolute space.
    pub fn frame_axes(&self, id: FrameId) -> GeometryResult<FrameAxes> {
        Ok(FrameAxes::from_transform(
            &self.compute_absolute_transform(id)?,
        ))
    }
}

impl<'a> IntoIterator for &'a FrameGraph {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

fn check_transform(
    operation: &str,
    transform: &Transform,
    tolerance: &Tolerance,
) -> GeometryResult<()> {
    if transform.dim() == 0 {
        return Err(GeometryError::shape(
            operation,
            "frame transform needs at least one dimension",
        ));
    }
    if transform.rotation().is_rotation_matrix(tolerance.rotation) {
        Ok(())
    } else {
        Err(GeometryError::invalid_rotation(format!(
            "rotation is not orthonormal with determinant +1 within tolerance {:e}",
            tolerance.rotation
        )))
    }
}

/// Serialized graph. Rotations are kept as raw rows so they are validated
/// under the graph's own tolerance rather than the default one.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct FrameGraphRepr {
    frames: Vec<FrameRepr>,
    #[serde(default)]
    tolerance: Tolerance,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct FrameRepr {
    id: usize,
    name: String,
    transform: TransformRepr,
    parent: Option<usize>,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct TransformRepr {
    rotation: Vec<Vec<f64>>,
    translation: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<FrameGraphRepr> for FrameGraph {
    type Error = GeometryError;

    fn try_from(repr: FrameGraphRepr) -> GeometryResult<Self> {
        let tolerance = repr.tolerance;
        let frames = repr
            .frames
            .into_iter()
            .map(|frame| {
                let transform = Transform::from_parts_with(
                    &frame.transform.rotation,
                    &frame.transform.translation,
                    &tolerance,
                )?;
                Ok(Frame::new(frame.id, frame.name, transform, frame.parent))
            })
            .collect::<GeometryResult<Vec<_>>>()?;
        Self::from_frames_with(frames, tolerance)
    }
}

#[cfg(feature = "serde")]
impl From<FrameGraph> for FrameGraphRepr {
    fn from(graph: FrameGraph) -> Self {
        let frames = graph
            .frames
            .into_iter()
            .map(|frame| FrameRepr {
                id: frame.id.0,
                transform: TransformRepr {
                    rotation: frame.transform.rotation().rows(),
                    translation: frame.transform.translation().to_vec(),
                },
                name: frame.name,
                parent: frame.parent.map(FrameId::index),
            })
            .collect();
        Self {
            frames,
            tolerance: graph.tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use coordinatus_core::RotationMatrix;
    use std::f64::consts::FRAC_PI_2;

    fn point(values: [f64; 2]) -> Coordinate {
        Coordinate::point(values).unwrap()
    }

    /// world -> base (3, 0) -> arm (rotated 90°) -> tool (1, 0)
    fn chain() -> (FrameGraph, FrameId, FrameId, FrameId, FrameId) {
        let mut graph = FrameGraph::new();
        let world = graph.create_root("world", 2).unwrap();
        let base = graph.create_frame_2d(Some(world), "base", 3.0, 0.0, 0.0).unwrap();
        let arm = graph.create_frame_2d(Some(base), "arm", 0.0, 0.0, FRAC_PI_2).unwrap();
        let tool = graph.create_frame_2d(Some(arm), "tool", 1.0, 0.0, 0.0).unwrap();
        (graph, world, base, arm, tool)
    }

    fn cyclic() -> FrameGraph {
        // built directly; create_frame and from_frames never allow this
        FrameGraph {
            frames: vec![
                Frame::new(0, "a", Transform::identity(2), Some(1)),
                Frame::new(1, "b", Transform::identity(2), Some(0)),
            ],
            tolerance: Tolerance::default(),
        }
    }

    #[test]
    fn test_child_translation_to_absolute() {
        let mut graph = FrameGraph::new();
        let root = graph.create_root("R", 2).unwrap();
        let child = graph
            .create_frame(Some(root), Transform::translate_2d(1.0, 0.0), "C")
            .unwrap();
        assert_eq!(graph.to_absolute(child, &point([0.0, 0.0])).unwrap(), [1.0, 0.0]);
    }

    #[test]
    fn test_root_is_identity_even_with_transform() {
        let mut graph = FrameGraph::new();
        let root = graph
            .create_frame(None, Transform::rigid_2d(10.0, 5.0, 0.3), "anchor")
            .unwrap();
        assert!(graph.compute_absolute_transform(root).unwrap().is_identity(0.0));
        assert_eq!(graph.frame(root).unwrap().transform().translation(), &[10.0, 5.0]);
    }

    #[test]
    fn test_chain_absolute_transform() {
        let (graph, _, _, _, tool) = chain();
        let p = graph.to_absolute(tool, &point([0.0, 0.0])).unwrap();
        assert!(p.approx_eq(&point([3.0, 1.0]), 1e-12));
    }

    #[test]
    fn test_to_local_inverts_to_absolute() {
        let (graph, _, _, _, tool) = chain();
        let p = point([0.25, -2.0]);
        let back = graph
            .to_local(tool, &graph.to_absolute(tool, &p).unwrap())
            .unwrap();
        assert!(back.approx_eq(&p, 1e-12));
    }

    #[test]
    fn test_vectors_ignore_translation() {
        let (graph, _, base, _, tool) = chain();
        let v = Coordinate::vector([1.0, 0.0]).unwrap();
        assert_eq!(graph.to_absolute(base, &v).unwrap(), [1.0, 0.0]);
        let rotated = graph.to_absolute(tool, &v).unwrap();
        assert!(rotated.is_vector());
        assert_abs_diff_eq!(rotated.values()[0], 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(rotated.values()[1], 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_to_frame_between_siblings() {
        let mut graph = FrameGraph::new();
        let world = graph.create_root("world", 2).unwrap();
        let left = graph.create_frame_2d(Some(world), "left", -1.0, 0.0, 0.0).unwrap();
        let right = graph.create_frame_2d(Some(world), "right", 1.0, 0.0, 0.0).unwrap();

        let p = graph.to_frame(left, right, &point([0.0, 0.0])).unwrap();
        assert!(p.approx_eq(&point([-2.0, 0.0]), 1e-12));
    }

    #[test]
    fn test_convert_transform_matches_to_frame() {
        let (graph, world, base, arm, tool) = chain();
        let p = Coordinate::point([[0.0, 1.0, -3.0], [2.0, 0.5, 4.0]]).unwrap();
        for &(from, to) in &[(tool, base), (base, tool), (arm, world), (world, arm)] {
            let direct = graph.convert_transform(from, to).unwrap().apply(&p).unwrap();
            let staged = graph.to_frame(from, to, &p).unwrap();
            assert!(direct.approx_eq(&staged, 1e-12));
        }
    }

    #[test]
    fn test_separate_roots_share_absolute_space() {
        let mut graph = FrameGraph::new();
        let a = graph.create_root("a", 2).unwrap();
        let b = graph.create_root("b", 2).unwrap();
        let child = graph.create_frame_2d(Some(b), "child", 0.0, 2.0, 0.0).unwrap();

        assert!(graph.coincident(a, b).unwrap());
        let p = graph.to_frame(a, child, &point([0.0, 0.0])).unwrap();
        assert!(p.approx_eq(&point([0.0, -2.0]), 1e-12));
    }

    #[test]
    fn test_tree_queries() {
        let (graph, world, base, arm, tool) = chain();
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.parent(arm).unwrap(), Some(base));
        assert_eq!(graph.parent(world).unwrap(), None);
        assert_eq!(graph.children(base).unwrap(), vec![arm]);
        assert!(graph.children(tool).unwrap().is_empty());
        assert_eq!(graph.ancestors(tool).unwrap(), vec![arm, base, world]);
        assert_eq!(graph.root_of(tool).unwrap(), world);
        assert_eq!(graph.root_of(world).unwrap(), world);
        assert_eq!(graph.depth(tool).unwrap(), 3);
        assert_eq!(graph.depth(world).unwrap(), 0);
        assert_eq!(graph.find("arm"), Some(arm));
        assert_eq!(graph.find("missing"), None);
        assert_eq!(graph.roots().count(), 1);
        assert_eq!(graph.iter().map(Frame::name).collect::<Vec<_>>(), ["world", "base", "arm", "tool"]);
    }

    #[test]
    fn test_unknown_frame() {
        let (graph, ..) = chain();
        let stale = FrameId(42);
        assert_eq!(
            graph.frame(stale).unwrap_err(),
            GeometryError::UnknownFrame { frame: 42 }
        );
        assert!(graph.to_absolute(stale, &point([0.0, 0.0])).is_err());

        let mut other = FrameGraph::new();
        assert!(matches!(
            other.create_frame_2d(Some(stale), "orphan", 0.0, 0.0, 0.0),
            Err(GeometryError::UnknownFrame { frame: 42 })
        ));
        assert!(other.is_empty());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let mut graph = FrameGraph::new();
        assert!(matches!(
            graph.create_root("point-like", 0),
            Err(GeometryError::Shape { .. })
        ));
        assert!(matches!(
            graph.create_frame(None, Transform::identity(0), "empty"),
            Err(GeometryError::Shape { .. })
        ));
        assert!(graph.is_empty());

        let frames = vec![Frame::new(0, "empty", Transform::identity(0), None)];
        assert!(matches!(
            FrameGraph::from_frames(frames),
            Err(GeometryError::Shape { .. })
        ));
    }

    #[test]
    fn test_child_dimension_must_match_parent() {
        let mut graph = FrameGraph::new();
        let root = graph.create_root("world", 3).unwrap();
        let err = graph
            .create_frame(Some(root), Transform::translate_2d(1.0, 0.0), "flat")
            .unwrap_err();
        assert!(matches!(
            err,
            GeometryError::DimensionMismatch { expected: 3, found: 2, .. }
        ));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_mixed_dimension_trees_cannot_exchange() {
        let mut graph = FrameGraph::new();
        let flat = graph.create_root("flat", 2).unwrap();
        let space = graph.create_root("space", 3).unwrap();
        assert!(matches!(
            graph.convert_transform(flat, space),
            Err(GeometryError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_strict_tolerance_rejects_sloppy_rotation() {
        let sloppy = RotationMatrix::from_rows_with(
            &[[1.0, 1e-6], [-1e-6, 1.0]],
            &Tolerance::default().with_rotation(1e-6),
        )
        .unwrap();
        let transform = Transform::from_rotation(sloppy);

        let mut strict = FrameGraph::with_tolerance(Tolerance::default().with_rotation(1e-15));
        assert!(matches!(
            strict.create_frame(None, transform.clone(), "sloppy"),
            Err(GeometryError::InvalidRotation { .. })
        ));

        let mut loose = FrameGraph::with_tolerance(Tolerance::default().with_rotation(1e-6));
        assert!(loose.create_frame(None, transform, "sloppy").is_ok());
    }

    #[test]
    fn test_cycle_detected() {
        let graph = cyclic();
        assert!(matches!(
            graph.compute_absolute_transform(FrameId(0)),
            Err(GeometryError::Cycle { frame: 0, .. })
        ));
        assert!(matches!(graph.root_of(FrameId(1)), Err(GeometryError::Cycle { .. })));
    }

    #[test]
    fn test_from_frames_round_trip() {
        let (graph, _, _, _, tool) = chain();
        let frames: Vec<Frame> = graph.iter().cloned().collect();
        let rebuilt = FrameGraph::from_frames(frames).unwrap();
        assert_eq!(rebuilt, graph);
        assert!(rebuilt
            .compute_absolute_transform(tool)
            .unwrap()
            .approx_eq(&graph.compute_absolute_transform(tool).unwrap(), 0.0));
    }

    #[test]
    fn test_from_frames_validation() {
        let cyclic = cyclic().frames;
        assert!(matches!(
            FrameGraph::from_frames(cyclic),
            Err(GeometryError::Cycle { .. })
        ));

        let misnumbered = vec![Frame::new(1, "a", Transform::identity(2), None)];
        assert!(matches!(
            FrameGraph::from_frames(misnumbered),
            Err(GeometryError::Shape { .. })
        ));

        let dangling = vec![Frame::new(0, "a", Transform::identity(2), Some(7))];
        assert!(matches!(
            FrameGraph::from_frames(dangling),
            Err(GeometryError::UnknownFrame { frame: 7 })
        ));

        let mixed = vec![
            Frame::new(0, "a", Transform::identity(2), None),
            Frame::new(1, "b", Transform::identity(3), Some(0)),
        ];
        assert!(matches!(
            FrameGraph::from_frames(mixed),
            Err(GeometryError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_frame_axes() {
        let (graph, _, _, arm, _) = chain();
        let axes = graph.frame_axes(arm).unwrap();
        assert_eq!(axes.origin, vec![3.0, 0.0]);
        let x = axes.direction(0).unwrap();
        assert_abs_diff_eq!(x[0], 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(x[1], 1.0, epsilon = 1e-15);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_and_validation() {
        let (graph, ..) = chain();
        let json = serde_json::to_string(&graph).unwrap();
        let back: FrameGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, graph);

        let frames = serde_json::to_value(&cyclic().frames).unwrap();
        let bad = serde_json::json!({ "frames": frames });
        assert!(serde_json::from_value::<FrameGraph>(bad).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uses_graph_tolerance() {
        let tolerance = Tolerance::default().with_rotation(1e-7);
        let sloppy = RotationMatrix::from_rows_with(&[[1.0, 1e-4], [-1e-4, 1.0]], &tolerance)
            .unwrap();
        let mut graph = FrameGraph::with_tolerance(tolerance);
        let root = graph.create_root("world", 2).unwrap();
        graph
            .create_frame(Some(root), Transform::from_rotation(sloppy), "sloppy")
            .unwrap();

        let json = serde_json::to_string(&graph).unwrap();
        let back: FrameGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, graph);
        assert_eq!(back.tolerance().rotation, 1e-7);

        let mut tightened = serde_json::to_value(&graph).unwrap();
        tightened["tolerance"]["rotation"] = serde_json::json!(1e-9);
        let err = serde_json::from_value::<FrameGraph>(tightened).unwrap_err();
        assert!(err.to_string().contains("Invalid rotation"));
    }
}
