use crate::error::Result;
use crate::geometry::path::{Path, Segment};
use crate::geometry::piece::Piece;
use crate::math::{lerp, normalize_or_zero, right_normal, Point2};

use super::cap::cap_segment;
use super::parallel::build_parallel;
use super::stitch::join_segments;
use super::stroke_style::{LineCap, LineJoin};
use super::OffsetParams;

/// Fraction of the chord by which a control point coinciding with its end
/// point is pulled inward, so the curve has a usable end tangent.
const CONTROL_NUDGE: f64 = 1e-4;

/// The two boundaries of a stroked path.
///
/// `forward` runs along the right-hand side in path direction, `backward`
/// along the left-hand side in reverse. For an open path both carry a
/// leading cap and together form a single loop; for a closed path each is a
/// loop of its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub forward: Vec<Piece>,
    pub backward: Vec<Piece>,
}

/// Builds both stroke boundaries of one path.
///
/// # Errors
///
/// Returns `OperationError::InvalidArgument` if offset, join or cap geometry
/// cannot be expressed as a piece.
pub fn outline_stroke(
    path: &Path,
    half_width: f64,
    join: LineJoin,
    cap: LineCap,
    miter_limit: f64,
    params: &OffsetParams,
) -> Result<Outline> {
    let mut forward = Vec::new();
    let mut backward = Vec::new();

    for segment in path.segments() {
        match segment {
            Segment::Line { start, end } => {
                if start == end {
                    continue;
                }
                let offset = right_normal(normalize_or_zero(end - start) * half_width);
                forward.push(Piece::Line {
                    start: start + offset,
                    end: end + offset,
                });
                backward.push(Piece::Line {
                    start: end - offset,
                    end: start - offset,
                });
            }
            Segment::Cubic { p0, c1, c2, p3 } => {
                let c1 = if c1 == p0 { lerp(p0, p3, CONTROL_NUDGE) } else { c1 };
                let c2 = if c2 == p3 { lerp(p0, p3, 1.0 - CONTROL_NUDGE) } else { c2 };

                let points = build_parallel(&[p0, c1, c2, p3], half_width, params);
                if !points.is_empty() {
                    forward.push(Piece::from_points(points)?);
                }
                // Offsetting the reversed curve keeps the backward boundary
                // in travel order.
                let points = build_parallel(&[p3, c2, c1, p0], half_width, params);
                if !points.is_empty() {
                    backward.push(Piece::from_points(points)?);
                }
            }
        }
    }
    backward.reverse();

    let mut forward = join_segments(forward, half_width, join, miter_limit, path.closed)?;
    let mut backward = join_segments(backward, half_width, join, miter_limit, path.closed)?;

    if !path.closed {
        if let (Some(fw_start), Some(bw_end)) = (first_point(&forward), last_point(&backward)) {
            forward.insert(0, Piece::from_points(cap_segment(bw_end, fw_start, cap))?);
        }
        if let (Some(fw_end), Some(bw_start)) = (last_point(&forward), first_point(&backward)) {
            backward.insert(0, Piece::from_points(cap_segment(fw_end, bw_start, cap))?);
        }
    }

    Ok(Outline { forward, backward })
}

fn first_point(pieces: &[Piece]) -> Option<Point2> {
    pieces.first().map(Piece::start)
}

fn last_point(pieces: &[Piece]) -> Option<Point2> {
    pieces.last().map(Piece::end)
}
