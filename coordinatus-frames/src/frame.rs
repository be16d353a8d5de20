use coordinatus_core::Transform;
use std::fmt;

/// Index of a frame inside its [`FrameGraph`](crate::FrameGraph).
///
/// Ids are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct FrameId(pub(crate) usize);

impl FrameId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A reference frame defined relative to its parent.
///
/// `transform` maps coordinates expressed in this frame into the parent
/// frame. A root frame has no parent; its transform is kept but the root is
/// treated as coincident with absolute space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub(crate) id: FrameId,
    pub(crate) name: String,
    pub(crate) transform: Transform,
    pub(crate) parent: Option<FrameId>,
}

impl Frame {
    /// Builds a detached frame record, e.g. to assemble a graph with
    /// [`FrameGraph::from_frames`](crate::FrameGraph::from_frames).
    pub fn new(
        id: usize,
        name: impl Into<String>,
        transform: Transform,
        parent: Option<usize>,
    ) -> Self {
        Self {
            id: FrameId(id),
            name: name.into(),
            transform,
            parent: parent.map(FrameId),
        }
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn parent(&self) -> Option<FrameId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn dim(&self) -> usize {
        self.transform.dim()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parent {
            Some(parent) => write!(f, "Frame {} '{}' (parent {})", self.id, self.name, parent),
            None => write!(f, "Frame {} '{}' (root)", self.id, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_accessors() {
        let frame = Frame::new(3, "gripper", Transform::translate_2d(1.0, 0.0), Some(1));
        assert_eq!(frame.id().index(), 3);
        assert_eq!(frame.name(), "gripper");
        assert_eq!(frame.parent(), Some(FrameId(1)));
        assert_eq!(frame.dim(), 2);
        assert!(!frame.is_root());
    }

    #[test]
    fn test_display() {
        let root = Frame::new(0, "world", Transform::identity(2), None);
        assert_eq!(root.to_string(), "Frame #0 'world' (root)");
        let child = Frame::new(1, "arm", Transform::identity(2), Some(0));
        assert_eq!(child.to_string(), "Frame #1 'arm' (parent #0)");
    }
}
