mod cap;
mod join;
mod outline;
mod parallel;
mod stitch;
mod stroke_style;
mod stroke_to_fill;

pub use cap::cap_segment;
pub use join::join_segment;
pub use outline::{outline_stroke, Outline};
pub use parallel::build_parallel;
pub use stitch::join_segments;
pub use stroke_style::{LineCap, LineJoin, StrokeRecord, StrokeStyle, DEFAULT_MITER_LIMIT};
pub use stroke_to_fill::{stroke_to_fill, StrokeToFill};

/// Parameters controlling the accuracy of stroke offsetting.
#[derive(Debug, Clone, Copy)]
pub struct OffsetParams {
    /// Allowed deviation of an offset curve from the true parallel, relative
    /// to the offset distance.
    pub tolerance: f64,
    /// Maximum number of halvings of a source cubic.
    pub recursion_limit: u32,
    /// Flatness used when measuring curve lengths for dashing.
    pub flatten_tolerance: f64,
}

impl Default for OffsetParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            recursion_limit: 6,
            flatten_tolerance: 1e-3,
        }
    }
}
