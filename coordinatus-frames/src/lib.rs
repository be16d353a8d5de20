//! Hierarchical reference frames.
//!
//! A [`FrameGraph`] owns a forest of [`Frame`]s, each placed relative to its
//! parent by a rigid [`Transform`](coordinatus_core::Transform). Coordinates
//! attached to any frame can be expressed in absolute space, in another
//! frame's local space, or handed to a renderer through [`FrameAxes`].
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`frame`] | [`Frame`] records and [`FrameId`] handles |
//! | [`graph`] | The frame arena, tree queries, and coordinate conversion |
//! | [`axes`] | Absolute origin and axis tips for plotting |
//!
//! # Example
//!
//! ```
//! use coordinatus_core::Coordinate;
//! use coordinatus_frames::FrameGraph;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let mut graph = FrameGraph::new();
//! let world = graph.create_root("world", 2)?;
//! let table = graph.create_frame_2d(Some(world), "table", 10.0, 5.0, 0.0)?;
//! let cup = graph.create_frame_2d(Some(table), "cup", 1.0, 0.0, FRAC_PI_2)?;
//!
//! let handle = Coordinate::point([0.5, 0.0])?;
//! let absolute = graph.to_absolute(cup, &handle)?;
//! assert!(absolute.approx_eq(&Coordinate::point([11.0, 5.5])?, 1e-12));
//! # Ok::<(), coordinatus_core::GeometryError>(())
//! ```
//!
//! # Logging
//!
//! Frame creation and graph rebuilds are reported at `debug` level and
//! absolute-transform walks at `trace` level through `tracing`. Detected
//! parent cycles are reported at `warn`. No subscriber is installed here.

pub mod axes;
pub mod frame;
pub mod graph;

pub use axes::FrameAxes;
pub use frame::{Frame, FrameId};
pub use graph::FrameGraph;
