use crate::math::bezier_2d::{cubic_1d, from_line, subdivide};
use crate::math::{normalize_or_zero, right_normal, Point2, CIRCLE_CONSTANT};

use super::stroke_style::LineJoin;

/// Smallest bisection step when searching the circle split parameter.
const CIRCLE_PARAM_STEP: f64 = 1e-4;

/// Builds the corner geometry bridging two offset end points.
///
/// The corner bulges to the right of `start → end`. The result always begins
/// with `start` and ends with `end` exactly: two points for a bevel, a
/// seven-point cubic chain for miter and round corners. Miter and round fall
/// back to a bevel when the points are at least `2 * radius` apart, and a
/// miter also when its apex lies farther than `miter_limit * radius` from the
/// corner.
#[must_use]
pub fn join_segment(
    start: Point2,
    end: Point2,
    radius: f64,
    join: LineJoin,
    miter_limit: f64,
) -> Vec<Point2> {
    let bevel = vec![start, end];
    let d = (end - start) * 0.5;
    let half = d.norm();
    if half <= 0.0 || half >= radius {
        return bevel;
    }

    match join {
        LineJoin::Bevel => bevel,
        LineJoin::Miter => {
            let o = normalize_or_zero(right_normal(d));
            let h = (radius * radius - half * half).sqrt();
            let h2 = half * half / h;
            if h + h2 > miter_limit * radius {
                return bevel;
            }
            let apex = start + d + o * h2;
            let leg1 = from_line(start, apex);
            let leg2 = from_line(apex, end);
            vec![start, leg1[1], leg1[2], apex, leg2[1], leg2[2], end]
        }
        LineJoin::Round => {
            let f = CIRCLE_CONSTANT;
            let o = normalize_or_zero(right_normal(d)) * radius;
            let h = (radius * radius - half * half).sqrt() / radius;
            let center = start + d - o * h;
            let du = normalize_or_zero(d) * radius;
            let t0 = circle_param(h);

            let first_quadrant = [center - du, center - du + o * f, center - du * f + o, center + o];
            let (_, first) = subdivide(&first_quadrant, t0);

            let second_quadrant = [center + o, center + o + du * f, center + du + o * f, center + du];
            let (second, _) = subdivide(&second_quadrant, 1.0 - t0);

            vec![start, first[1], first[2], first[3], second[1], second[2], end]
        }
    }
}

/// Finds the parameter at which a unit quarter-circle Bézier reaches
/// height `h` along its end direction, by bisection.
fn circle_param(h: f64) -> f64 {
    let mut t0 = 0.5;
    let mut dt = 0.25;
    while dt >= CIRCLE_PARAM_STEP {
        let height = cubic_1d([0.0, CIRCLE_CONSTANT, 1.0, 1.0], t0);
        if height > h {
            t0 -= dt;
        } else if height < h {
            t0 += dt;
        } else {
            break;
        }
        dt /= 2.0;
    }
    t0
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::math::bezier_2d::point_at;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn bevel_is_two_points() {
        let r = join_segment(p(10.0, -1.0), p(11.0, 0.0), 1.0, LineJoin::Bevel, 10.0);
        assert_eq!(r, vec![p(10.0, -1.0), p(11.0, 0.0)]);
    }

    #[test]
    fn miter_right_angle_apex() {
        let start = p(10.0, -1.0);
        let end = p(11.0, 0.0);
        let r = join_segment(start, end, 1.0, LineJoin::Miter, 10.0);
        assert_eq!(r.len(), 7);
        assert_eq!(r[0], start);
        assert_eq!(r[6], end);
        assert_abs_diff_eq!(r[3].x, 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r[3].y, -1.0, epsilon = 1e-12);
        // Editable control points sit at thirds of each leg.
        assert_abs_diff_eq!(r[1].x, 10.0 + 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r[5].y, -1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn miter_limit_falls_back_to_bevel() {
        // Right angle: apex distance is sqrt(2) * radius.
        let start = p(10.0, -1.0);
        let end = p(11.0, 0.0);
        let r = join_segment(start, end, 1.0, LineJoin::Miter, 1.4);
        assert_eq!(r, vec![start, end]);
    }

    #[test]
    fn sharp_corner_exceeds_default_limit() {
        // Nearly reversed edges: the chord is almost a full diameter.
        let start = p(0.0, -1.0);
        let end = p(0.0, 0.999);
        let r = join_segment(start, end, 1.0, LineJoin::Miter, 10.433);
        assert_eq!(r, vec![start, end]);
    }

    #[test]
    fn far_apart_points_fall_back_to_bevel() {
        for join in [LineJoin::Miter, LineJoin::Round] {
            let r = join_segment(p(0.0, 0.0), p(2.0, 0.0), 1.0, join, 10.0);
            assert_eq!(r.len(), 2, "{join:?}");
        }
    }

    #[test]
    fn coincident_points_are_a_bevel() {
        let q = p(3.0, 4.0);
        assert_eq!(join_segment(q, q, 1.0, LineJoin::Round, 10.0), vec![q, q]);
    }

    #[test]
    fn round_join_follows_circle() {
        let radius = 1.0;
        let start = p(0.0, 1.0);
        let end = p(1.0, 0.0);
        let center = p(1.0, 1.0);
        let r = join_segment(start, end, radius, LineJoin::Round, 10.0);
        assert_eq!(r.len(), 7);
        assert_eq!(r[0], start);
        assert_eq!(r[6], end);
        assert_abs_diff_eq!((r[3] - center).norm(), radius, epsilon = 1e-12);

        let tolerance = 0.01;
        for cubic in [[r[0], r[1], r[2], r[3]], [r[3], r[4], r[5], r[6]]] {
            for t in [0.25, 0.5, 0.75] {
                let dist = (point_at(&cubic, t) - center).norm();
                assert!((dist - radius).abs() < tolerance * radius, "t={t} dist={dist}");
            }
        }
    }

    #[test]
    fn circle_param_bounds() {
        assert_abs_diff_eq!(circle_param(0.0), 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(circle_param(1.0), 1.0, epsilon = 1e-3);
    }
}
