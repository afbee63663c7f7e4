pub mod bezier_2d;
pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Length of the Bézier tangents approximating a quarter circle of radius 1.
pub const CIRCLE_CONSTANT: f64 = 4.0 / 3.0 * (std::f64::consts::SQRT_2 - 1.0);

/// Returns a unit vector pointing in the same direction, or zero for a zero vector.
#[must_use]
pub fn normalize_or_zero(v: Vector2) -> Vector2 {
    let len = v.norm();
    if len > 0.0 {
        v / len
    } else {
        Vector2::zeros()
    }
}

/// Returns the right-hand perpendicular `(y, -x)` of a vector.
///
/// Offsetting along this side puts the forward boundary of a counter-clockwise
/// contour on its outside.
#[must_use]
pub fn right_normal(v: Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross_2d(a: Vector2, b: Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Linear interpolation between two points.
#[must_use]
pub fn lerp(a: Point2, b: Point2, t: f64) -> Point2 {
    a + (b - a) * t
}
