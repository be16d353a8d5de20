/// Default absolute tolerance for orthonormality checks on rotation input.
pub const DEFAULT_ROTATION_TOLERANCE: f64 = 1e-9;

/// Default absolute tolerance for approximate value comparisons.
pub const DEFAULT_COMPARISON_TOLERANCE: f64 = 1e-9;

/// Instances printed by `Display` before a coordinate batch is summarized.
pub const DISPLAY_MAX_INSTANCES: usize = 6;
