//! Planar two-link arm: where is the gripper, and where is a target seen from it?
//!
//! Run with `RUST_LOG=coordinatus_frames=debug` to see frame creation.

use coordinatus_core::{Coordinate, GeometryResult};
use coordinatus_frames::FrameGraph;
use std::f64::consts::{FRAC_PI_4, FRAC_PI_6};
use tracing_subscriber::EnvFilter;

fn main() -> GeometryResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut graph = FrameGraph::new();
    let world = graph.create_root("world", 2)?;
    let base = graph.create_frame_2d(Some(world), "base", 2.0, 1.0, 0.0)?;
    let upper = graph.create_frame_2d(Some(base), "upper", 0.0, 0.0, FRAC_PI_4)?;
    let fore = graph.create_frame_2d(Some(upper), "fore", 1.5, 0.0, -FRAC_PI_6)?;
    let gripper = graph.create_frame_2d(Some(fore), "gripper", 1.0, 0.0, 0.0)?;

    for frame in &graph {
        let axes = graph.frame_axes(frame.id())?;
        tracing::info!(
            frame = frame.name(),
            depth = graph.depth(frame.id())?,
            origin = ?axes.origin,
            "frame placed"
        );
    }

    let tip = graph.to_absolute(gripper, &Coordinate::point([0.0, 0.0])?)?;
    println!("gripper tip in world: {}", tip);

    let target = Coordinate::point([4.0, 3.0])?;
    let seen = graph.to_local(gripper, &target)?;
    println!("target seen from gripper: {}", seen);

    let reach = graph.to_frame(gripper, base, &Coordinate::vector([1.0, 0.0])?)?;
    println!("gripper x axis in base frame: {}", reach);

    let path = Coordinate::point([[0.0, 0.25, 0.5, 0.75, 1.0], [0.0, 0.1, 0.2, 0.1, 0.0]])?;
    let path_world = graph.to_absolute(gripper, &path)?;
    println!("gripper path in world: {}", path_world);
    println!("export: {:?}", path_world.export());

    Ok(())
}
