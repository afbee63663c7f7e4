pub mod path;
pub mod piece;

pub use path::{Node, NodeKind, Path, Segment};
pub use piece::Piece;
