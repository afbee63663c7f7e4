use tracing::trace;

use crate::math::bezier_2d::{subdivide, Cubic};
use crate::math::{cross_2d, normalize_or_zero, right_normal, Point2, Vector2};

use super::OffsetParams;

/// Below this normalized cross product the control vectors are treated as
/// parallel and the midpoint correction is skipped.
const MIN_INDEPENDENCE: f64 = 0.1;

/// Sample parameters at which an offset candidate is checked.
const CHECK_PARAMS: [f64; 3] = [0.25, 0.5, 0.75];

/// Approximates the curve parallel to `source` at distance `radius`.
///
/// Positive radii offset to the right of the direction of travel. Returns a
/// cubic chain `[p0, c1, c2, p1, ...]`, or an empty list when the segment has
/// no usable tangent or the radius is zero.
#[must_use]
pub fn build_parallel(source: &Cubic, radius: f64, params: &OffsetParams) -> Vec<Point2> {
    if radius.abs() < f64::EPSILON {
        return Vec::new();
    }
    build_rec(source, radius, params, params.recursion_limit)
}

fn build_rec(p: &Cubic, radius: f64, params: &OffsetParams, limit: u32) -> Vec<Point2> {
    let Some(start_tangent) = [p[1], p[2], p[3]]
        .iter()
        .map(|&q| q - p[0])
        .find(|v| *v != Vector2::zeros())
    else {
        return Vec::new();
    };
    let end_tangent = [p[2], p[1], p[0]]
        .iter()
        .map(|&q| p[3] - q)
        .find(|v| *v != Vector2::zeros())
        .unwrap_or(start_tangent);

    let p0 = p[0] + right_normal(normalize_or_zero(start_tangent) * radius);
    let p3 = p[3] + right_normal(normalize_or_zero(end_tangent) * radius);
    let c1 = p[1] - p[0];
    let c2 = p[3] - p[2];

    let (head, tail) = subdivide(p, 0.5);
    let true_center = offset_sample(&head, &tail, radius);
    let candidate = [p0, p0 + c1, p3 - c2, p3];
    let now_center = subdivide(&candidate, 0.5).0[3];

    // Moving the interior control points by a and b moves the midpoint by
    // 3/8 (a + b).
    let correction = (true_center - now_center) * (8.0 / 3.0);

    let det = cross_2d(c1, c2);
    let norms = c1.norm() * c2.norm();
    let independence = if norms > 0.0 { det / norms } else { 0.0 };

    let (oc1, oc2) = if independence.abs() >= MIN_INDEPENDENCE {
        (
            c1 * (cross_2d(correction, c2) / det),
            c2 * (cross_2d(c1, correction) / det),
        )
    } else {
        (Vector2::zeros(), Vector2::zeros())
    };

    let proposed = [p0, p0 + c1 + oc1, p3 - c2 + oc2, p3];
    if is_parallel(p, &proposed, radius, params.tolerance) {
        return proposed.to_vec();
    }
    if limit == 0 {
        trace!(radius, "parallel curve recursion limit reached");
        return proposed.to_vec();
    }

    let mut points = build_rec(&head, radius, params, limit - 1);
    let second = build_rec(&tail, radius, params, limit - 1);
    match (points.is_empty(), second.is_empty()) {
        (_, true) => points,
        (true, false) => second,
        (false, false) => {
            points.extend_from_slice(&second[1..]);
            points
        }
    }
}

/// Offset of the split point shared by `head` and `tail`, perpendicular to
/// the curve direction there.
fn offset_sample(head: &Cubic, tail: &Cubic, radius: f64) -> Point2 {
    let on_curve = tail[0];
    let dir = if tail[1] == on_curve {
        on_curve - head[2]
    } else {
        tail[1] - on_curve
    };
    on_curve + right_normal(normalize_or_zero(dir) * radius)
}

/// Checks that `parallel` stays within `tolerance * |radius|` of the true
/// offset of `source` at the interior sample parameters.
///
/// End points are correct by construction and not checked.
fn is_parallel(source: &Cubic, parallel: &Cubic, radius: f64, tolerance: f64) -> bool {
    let limit = tolerance * radius.abs();
    CHECK_PARAMS.iter().all(|&t| {
        let (s_head, s_tail) = subdivide(source, t);
        let expected = offset_sample(&s_head, &s_tail, radius);
        let actual = subdivide(parallel, t).0[3];
        (expected - actual).norm() < limit
    })
}
