use crate::geometry::path::Path;

/// Combines the fill outlines of two stroked paths.
pub trait PathUnion {
    /// Returns a path set covering the area of both inputs.
    fn union(&self, a: Vec<Path>, b: Vec<Path>) -> Vec<Path>;
}

/// Union by concatenation, for painting with the non-zero fill rule.
///
/// Every stroke outline winds the same way around its own area, so the
/// combined contour set covers exactly the union of the inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonZeroUnion;

impl PathUnion for NonZeroUnion {
    fn union(&self, mut a: Vec<Path>, b: Vec<Path>) -> Vec<Path> {
        a.extend(b);
        a
    }
}
