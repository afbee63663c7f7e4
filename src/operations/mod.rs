mod dash;
mod union;

pub use dash::{dash_path, DashPath};
pub use union::{NonZeroUnion, PathUnion};
