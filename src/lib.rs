pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod stroke;

pub use error::{OutlineError, Result};
pub use geometry::{Node, NodeKind, Path, Piece, Segment};
pub use stroke::{stroke_to_fill, LineCap, LineJoin, OffsetParams, StrokeStyle, StrokeToFill};
