use super::bezier_2d::{control_bounds, is_flat, subdivide, Cubic};
use super::{cross_2d, Point2, TOLERANCE};

/// Flatness below which a cubic is intersected through its chord.
const FLAT_TOLERANCE: f64 = 1e-9;

/// Maximum subdivision depth for curve-curve intersection.
const MAX_DEPTH: u32 = 40;

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = cross_2d(da, db);
    if cross.abs() < TOLERANCE {
        return None;
    }

    let d = b0 - a0;
    let t = cross_2d(d, db) / cross;
    let u = cross_2d(d, da) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Intersections of two cubic Béziers in 2D.
///
/// Uses recursive subdivision with bounding-box rejection; once both pieces
/// are flat their chords are intersected. Returns `(t, u)` parameter pairs on
/// `a` and `b`, sorted by `t`. Overlapping collinear stretches report no
/// intersection.
#[must_use]
pub fn cubic_cubic_intersect_2d(a: &Cubic, b: &Cubic) -> Vec<(f64, f64)> {
    let mut hits = Vec::new();
    intersect_rec(a, (0.0, 1.0), b, (0.0, 1.0), 0, &mut hits);

    hits.sort_by(|x, y| x.0.total_cmp(&y.0));
    hits.dedup_by(|x, y| (x.0 - y.0).abs() < 1e-9 && (x.1 - y.1).abs() < 1e-9);
    hits
}

fn intersect_rec(
    a: &Cubic,
    a_range: (f64, f64),
    b: &Cubic,
    b_range: (f64, f64),
    depth: u32,
    hits: &mut Vec<(f64, f64)>,
) {
    if !bounds_overlap(a, b) {
        return;
    }

    let a_flat = is_flat(a, FLAT_TOLERANCE);
    let b_flat = is_flat(b, FLAT_TOLERANCE);

    if (a_flat && b_flat) || depth >= MAX_DEPTH {
        if let Some((_, t, u)) = segment_segment_intersect_2d(&a[0], &a[3], &b[0], &b[3]) {
            hits.push((
                a_range.0 + (a_range.1 - a_range.0) * t,
                b_range.0 + (b_range.1 - b_range.0) * u,
            ));
        }
        return;
    }

    let a_mid = 0.5 * (a_range.0 + a_range.1);
    let b_mid = 0.5 * (b_range.0 + b_range.1);

    match (a_flat, b_flat) {
        (true, _) => {
            let (b_left, b_right) = subdivide(b, 0.5);
            intersect_rec(a, a_range, &b_left, (b_range.0, b_mid), depth + 1, hits);
            intersect_rec(a, a_range, &b_right, (b_mid, b_range.1), depth + 1, hits);
        }
        (false, true) => {
            let (a_left, a_right) = subdivide(a, 0.5);
            intersect_rec(&a_left, (a_range.0, a_mid), b, b_range, depth + 1, hits);
            intersect_rec(&a_right, (a_mid, a_range.1), b, b_range, depth + 1, hits);
        }
        (false, false) => {
            let (a_left, a_right) = subdivide(a, 0.5);
            let (b_left, b_right) = subdivide(b, 0.5);
            let a_halves = [(a_left, (a_range.0, a_mid)), (a_right, (a_mid, a_range.1))];
            let b_halves = [(b_left, (b_range.0, b_mid)), (b_right, (b_mid, b_range.1))];
            for (ah, ar) in &a_halves {
                for (bh, br) in &b_halves {
                    intersect_rec(ah, *ar, bh, *br, depth + 1, hits);
                }
            }
        }
    }
}

fn bounds_overlap(a: &Cubic, b: &Cubic) -> bool {
    let (a_min, a_max) = control_bounds(a);
    let (b_min, b_max) = control_bounds(b);
    let eps = TOLERANCE;
    a_min.x <= b_max.x + eps
        && b_min.x <= a_max.x + eps
        && a_min.y <= b_max.y + eps
        && b_min.y <= a_max.y + eps
}
