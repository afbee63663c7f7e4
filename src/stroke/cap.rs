use crate::math::{right_normal, Point2, CIRCLE_CONSTANT};

use super::stroke_style::LineCap;

/// Builds the cap closing a stroke end, from one boundary end point to the
/// other.
///
/// The cap extends to the right of `start → end`, away from the stroke body.
/// The result begins with `start` and ends with `end` exactly.
#[must_use]
pub fn cap_segment(start: Point2, end: Point2, cap: LineCap) -> Vec<Point2> {
    let d = (end - start) * 0.5;
    let o = right_normal(d);

    match cap {
        // =====|
        LineCap::Butt => vec![start, end],
        // =====)
        LineCap::Round => {
            let f = CIRCLE_CONSTANT;
            let apex_corner = start + o;
            vec![
                start,
                start + o * f,
                apex_corner + d * (1.0 - f),
                apex_corner + d,
                apex_corner + d * (1.0 + f),
                end + o * f,
                end,
            ]
        }
        // =====]
        // Control points coincide with the corners so editors see right angles.
        LineCap::Square => {
            let c1 = start + o;
            let c2 = end + o;
            vec![start, start, c1, c1, c1, c2, c2, c2, end, end]
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::math::bezier_2d::point_at;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn butt_cap_is_straight() {
        assert_eq!(
            cap_segment(p(0.0, 2.0), p(0.0, -2.0), LineCap::Butt),
            vec![p(0.0, 2.0), p(0.0, -2.0)]
        );
    }

    #[test]
    fn caps_keep_exact_endpoints() {
        let start = p(0.1, 2.3);
        let end = p(-0.7, -1.9);
        for cap in [LineCap::Butt, LineCap::Round, LineCap::Square] {
            let r = cap_segment(start, end, cap);
            assert_eq!(r[0], start, "{cap:?}");
            assert_eq!(r[r.len() - 1], end, "{cap:?}");
        }
    }

    #[test]
    fn round_cap_is_semicircle() {
        let r = cap_segment(p(0.0, 2.0), p(0.0, -2.0), LineCap::Round);
        assert_eq!(r.len(), 7);
        // Tip of the cap lies one half-width outside the end.
        assert_abs_diff_eq!(r[3].x, -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r[3].y, 0.0, epsilon = 1e-12);
        for cubic in [[r[0], r[1], r[2], r[3]], [r[3], r[4], r[5], r[6]]] {
            let mid = point_at(&cubic, 0.5);
            assert_abs_diff_eq!(mid.coords.norm(), 2.0, epsilon = 0.01);
        }
    }

    #[test]
    fn square_cap_extends_by_half_width() {
        let r = cap_segment(p(0.0, 2.0), p(0.0, -2.0), LineCap::Square);
        assert_eq!(r.len(), 10);
        assert_eq!(r[3], p(-2.0, 2.0));
        assert_eq!(r[6], p(-2.0, -2.0));
        assert_eq!(r[1], r[0]);
        assert_eq!(r[8], r[9]);
    }
}
