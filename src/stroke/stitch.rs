use tracing::trace;

use crate::error::Result;
use crate::geometry::piece::Piece;
use crate::math::bezier_2d::subdivide;
use crate::math::intersect_2d::{cubic_cubic_intersect_2d, segment_segment_intersect_2d};
use crate::math::Point2;

use super::join::join_segment;
use super::stroke_style::LineJoin;

/// Stitches consecutive offset pieces into one continuous boundary.
///
/// Each gap between a piece's end and the next piece's start is closed by,
/// in order of preference:
/// 1. moving both ends to the point where the pieces cross (curves are
///    trimmed there);
/// 2. for miter joins between two lines, moving both ends to the miter apex;
/// 3. inserting the join geometry as a new piece.
///
/// For `closed` boundaries the seam from the last piece back to the first is
/// stitched as well; a join inserted there leads the output.
///
/// # Errors
///
/// Returns `OperationError::InvalidArgument` if a curve piece is not a whole
/// cubic chain, or if join geometry cannot be expressed as a piece.
pub fn join_segments(
    mut pieces: Vec<Piece>,
    radius: f64,
    join: LineJoin,
    miter_limit: f64,
    closed: bool,
) -> Result<Vec<Piece>> {
    for piece in &pieces {
        piece.validate()?;
    }
    let n = pieces.len();
    if n == 0 {
        return Ok(pieces);
    }
    let stitch = |a: &mut Piece, b: &mut Piece| stitch_pair(a, b, radius, join, miter_limit);

    let mut seam = None;
    if closed {
        if n == 1 {
            let (start, end) = (pieces[0].start(), pieces[0].end());
            if end != start {
                let joint = join_segment(end, start, radius, join, miter_limit);
                seam = Some(Piece::from_points(joint)?);
            }
        } else {
            let (last, first) = pair_mut(&mut pieces, n - 1, 0);
            seam = stitch(last, first)?;
        }
    }

    let mut gaps = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let (a, b) = pair_mut(&mut pieces, i, i + 1);
        gaps.push(stitch(a, b)?);
    }

    let mut out = Vec::with_capacity(2 * n + 1);
    out.extend(seam);
    let mut gaps = gaps.into_iter();
    for piece in pieces {
        out.push(piece);
        if let Some(Some(gap)) = gaps.next() {
            out.push(gap);
        }
    }
    Ok(out)
}

/// Closes the gap between `a`'s end and `b`'s start, mutating their
/// endpoints where possible. Returns a piece to insert between them, if any.
fn stitch_pair(
    a: &mut Piece,
    b: &mut Piece,
    radius: f64,
    join: LineJoin,
    miter_limit: f64,
) -> Result<Option<Piece>> {
    if a.end() == b.start() {
        return Ok(None);
    }

    let joint = join_segment(a.end(), b.start(), radius, join, miter_limit);

    if a.is_line() && b.is_line() {
        let crossing = segment_segment_intersect_2d(&a.start(), &a.end(), &b.start(), &b.end());
        if let Some((pt, _, _)) = crossing {
            trace!(x = pt.x, y = pt.y, "lines meet at crossing");
            snap(a, b, pt);
            return Ok(None);
        }
        if join == LineJoin::Miter && joint.len() == 7 {
            trace!(x = joint[3].x, y = joint[3].y, "lines extended to miter apex");
            snap(a, b, joint[3]);
            return Ok(None);
        }
    } else if let Some((t, u)) = nearest_crossing(a, b) {
        let (head, _) = subdivide(&a.last_cubic(), t);
        let (_, mut tail) = subdivide(&b.first_cubic(), u);
        tail[0] = head[3];
        trace!(t, u, "pieces trimmed at crossing");
        a.replace_last_cubic(head);
        b.replace_first_cubic(tail);
        return Ok(None);
    }

    Piece::from_points(joint).map(Some)
}

/// Crossing of `a`'s last primitive with `b`'s first, nearest the seam.
fn nearest_crossing(a: &Piece, b: &Piece) -> Option<(f64, f64)> {
    cubic_cubic_intersect_2d(&a.last_cubic(), &b.first_cubic())
        .into_iter()
        .max_by(|x, y| x.0.total_cmp(&y.0).then(y.1.total_cmp(&x.1)))
}

fn snap(a: &mut Piece, b: &mut Piece, pt: Point2) {
    a.set_end(pt);
    b.set_start(pt);
}

/// Borrows two distinct pieces mutably.
fn pair_mut(pieces: &mut [Piece], i: usize, j: usize) -> (&mut Piece, &mut Piece) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = pieces.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = pieces.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
