//! Cubic Bézier primitives: de Casteljau subdivision, flattening, arc length.

use super::{lerp, Point2, TOLERANCE};

/// Control points of a cubic Bézier segment `[p0, c1, c2, p3]`.
pub type Cubic = [Point2; 4];

/// Maximum subdivision depth when flattening a cubic.
const MAX_FLATTEN_DEPTH: u32 = 16;

/// Splits a cubic at parameter `t` using de Casteljau's algorithm.
///
/// Returns the `[0, t]` and `[t, 1]` halves. Both share the split point.
#[must_use]
pub fn subdivide(c: &Cubic, t: f64) -> (Cubic, Cubic) {
    let p01 = lerp(c[0], c[1], t);
    let p12 = lerp(c[1], c[2], t);
    let p23 = lerp(c[2], c[3], t);
    let p012 = lerp(p01, p12, t);
    let p123 = lerp(p12, p23, t);
    let p0123 = lerp(p012, p123, t);
    ([c[0], p01, p012, p0123], [p0123, p123, p23, c[3]])
}

/// Evaluates the cubic at parameter `t`.
#[must_use]
pub fn point_at(c: &Cubic, t: f64) -> Point2 {
    subdivide(c, t).0[3]
}

/// Evaluates a one-dimensional cubic Bézier with the given control values.
#[must_use]
pub fn cubic_1d(v: [f64; 4], t: f64) -> f64 {
    let s = 1.0 - t;
    s * s * s * v[0] + 3.0 * s * s * t * v[1] + 3.0 * s * t * t * v[2] + t * t * t * v[3]
}

/// Extracts the sub-curve covering `[t0, t1]` (with `t0 < t1`).
#[must_use]
pub fn split_range(c: &Cubic, t0: f64, t1: f64) -> Cubic {
    if t0 <= 0.0 {
        return subdivide(c, t1).0;
    }
    let (_, tail) = subdivide(c, t0);
    if t1 >= 1.0 {
        return tail;
    }
    let local = (t1 - t0) / (1.0 - t0);
    subdivide(&tail, local).0
}

/// Expresses a straight line as an editable cubic with control points at
/// one and two thirds of its length.
#[must_use]
pub fn from_line(a: Point2, b: Point2) -> Cubic {
    let d = b - a;
    [a, a + d / 3.0, a + d * (2.0 / 3.0), b]
}

/// Axis-aligned bounding box of the control polygon as `(min, max)`.
#[must_use]
pub fn control_bounds(c: &Cubic) -> (Point2, Point2) {
    let mut min = c[0];
    let mut max = c[0];
    for p in &c[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

/// Returns `true` if both interior control points lie within `tolerance` of
/// the chord.
#[must_use]
pub fn is_flat(c: &Cubic, tolerance: f64) -> bool {
    let chord = c[3] - c[0];
    let len = chord.norm();
    if len < TOLERANCE {
        return (c[1] - c[0]).norm() <= tolerance && (c[2] - c[0]).norm() <= tolerance;
    }
    let dist = |p: Point2| super::cross_2d(chord, p - c[0]).abs() / len;
    dist(c[1]) <= tolerance && dist(c[2]) <= tolerance
}

/// Flattens the cubic into a polyline within `tolerance`, returning
/// `(t, point)` pairs from `t = 0` to `t = 1`.
#[must_use]
pub fn flatten_with_params(c: &Cubic, tolerance: f64) -> Vec<(f64, Point2)> {
    let mut out = vec![(0.0, c[0])];
    flatten_rec(c, 0.0, 1.0, tolerance, 0, &mut out);
    out
}

fn flatten_rec(
    c: &Cubic,
    t0: f64,
    t1: f64,
    tolerance: f64,
    depth: u32,
    out: &mut Vec<(f64, Point2)>,
) {
    if depth >= MAX_FLATTEN_DEPTH || is_flat(c, tolerance) {
        out.push((t1, c[3]));
        return;
    }
    let (left, right) = subdivide(c, 0.5);
    let mid = 0.5 * (t0 + t1);
    flatten_rec(&left, t0, mid, tolerance, depth + 1, out);
    flatten_rec(&right, mid, t1, tolerance, depth + 1, out);
}

/// Cumulative arc length table `(t, length_so_far)` of a flattened cubic.
#[must_use]
pub fn arc_length_table(c: &Cubic, tolerance: f64) -> Vec<(f64, f64)> {
    let samples = flatten_with_params(c, tolerance);
    let mut table = Vec::with_capacity(samples.len());
    let mut acc = 0.0;
    let mut prev = samples[0].1;
    for (t, p) in samples {
        acc += (p - prev).norm();
        table.push((t, acc));
        prev = p;
    }
    table
}

/// Maps a distance along the curve back to a parameter using an arc length
/// table built by [`arc_length_table`].
#[must_use]
pub fn param_at_length(table: &[(f64, f64)], length: f64) -> f64 {
    let Some(&(_, total)) = table.last() else {
        return 0.0;
    };
    if length <= 0.0 {
        return 0.0;
    }
    if length >= total {
        return 1.0;
    }
    let idx = table.partition_point(|&(_, l)| l < length);
    if idx == 0 {
        return 0.0;
    }
    let (t_a, l_a) = table[idx - 1];
    let (t_b, l_b) = table[idx];
    let span = l_b - l_a;
    if span < TOLERANCE {
        return t_b;
    }
    t_a + (t_b - t_a) * (length - l_a) / span
}
