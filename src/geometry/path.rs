use crate::error::{GeometryError, Result};
use crate::math::bezier_2d::Cubic;
use crate::math::Point2;

use super::piece::Piece;

/// Smoothness tag of a curve node.
///
/// Carried through for editors; the stroke math ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    #[default]
    Cusp,
    Smooth,
    Symmetric,
}

/// A path node: a straight line or a cubic curve to a new end point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node {
    Line(Point2),
    Curve {
        c1: Point2,
        c2: Point2,
        end: Point2,
        kind: NodeKind,
    },
}

impl Node {
    /// Creates a cusp curve node.
    #[must_use]
    pub fn curve(c1: Point2, c2: Point2, end: Point2) -> Self {
        Self::Curve {
            c1,
            c2,
            end,
            kind: NodeKind::Cusp,
        }
    }

    /// Returns the point this node ends at.
    #[must_use]
    pub fn end(&self) -> Point2 {
        match self {
            Self::Line(p) => *p,
            Self::Curve { end, .. } => *end,
        }
    }
}

/// One segment of a path, with both endpoints explicit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line {
        start: Point2,
        end: Point2,
    },
    Cubic {
        p0: Point2,
        c1: Point2,
        c2: Point2,
        p3: Point2,
    },
}

impl Segment {
    /// Creates a cubic segment from its control points.
    #[must_use]
    pub fn from_cubic(c: Cubic) -> Self {
        Self::Cubic {
            p0: c[0],
            c1: c[1],
            c2: c[2],
            p3: c[3],
        }
    }

    /// Returns the first point.
    #[must_use]
    pub fn start(&self) -> Point2 {
        match self {
            Self::Line { start, .. } => *start,
            Self::Cubic { p0, .. } => *p0,
        }
    }

    /// Returns the last point.
    #[must_use]
    pub fn end(&self) -> Point2 {
        match self {
            Self::Line { end, .. } => *end,
            Self::Cubic { p3, .. } => *p3,
        }
    }

    /// Converts the segment to the path node that reaches its end point.
    #[must_use]
    pub fn to_node(&self) -> Node {
        match self {
            Self::Line { end, .. } => Node::Line(*end),
            Self::Cubic { c1, c2, p3, .. } => Node::curve(*c1, *c2, *p3),
        }
    }
}

/// A vector path: a start point followed by line and curve nodes.
///
/// A closed path whose last node does not return to `start` is closed by an
/// implicit straight segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub start: Point2,
    pub nodes: Vec<Node>,
    pub closed: bool,
}

impl Path {
    /// Creates a path from a start point and nodes.
    #[must_use]
    pub fn new(start: Point2, nodes: Vec<Node>, closed: bool) -> Self {
        Self {
            start,
            nodes,
            closed,
        }
    }

    /// Creates a straight-line path through the given points.
    ///
    /// Returns `None` for an empty point list.
    #[must_use]
    pub fn polyline(points: &[Point2], closed: bool) -> Option<Self> {
        let (&start, rest) = points.split_first()?;
        Some(Self {
            start,
            nodes: rest.iter().map(|&p| Node::Line(p)).collect(),
            closed,
        })
    }

    /// Returns the point the last node ends at.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        self.nodes.last().map_or(self.start, Node::end)
    }

    /// Returns the explicit segment list, including the implicit closing line
    /// of a closed path.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(self.nodes.len() + 1);
        let mut current = self.start;
        for node in &self.nodes {
            match *node {
                Node::Line(end) => segments.push(Segment::Line {
                    start: current,
                    end,
                }),
                Node::Curve { c1, c2, end, .. } => segments.push(Segment::Cubic {
                    p0: current,
                    c1,
                    c2,
                    p3: end,
                }),
            }
            current = node.end();
        }
        if self.closed && self.end_point() != self.start {
            segments.push(Segment::Line {
                start: current,
                end: self.start,
            });
        }
        segments
    }

    /// Builds an open path from consecutive segments.
    ///
    /// Returns `None` for an empty list.
    #[must_use]
    pub fn from_segments(segments: &[Segment]) -> Option<Self> {
        let first = segments.first()?;
        Some(Self {
            start: first.start(),
            nodes: segments.iter().map(Segment::to_node).collect(),
            closed: false,
        })
    }

    /// Builds a closed fill path from boundary pieces.
    ///
    /// Gaps between pieces are bridged with lines, and a trailing line back
    /// to the start is dropped because the path closes implicitly. Returns
    /// `None` for an empty list.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidArgument` if a curve piece is not a
    /// whole cubic chain.
    pub fn from_pieces(pieces: &[Piece]) -> Result<Option<Self>> {
        for piece in pieces {
            piece.validate()?;
        }
        let Some(first) = pieces.first() else {
            return Ok(None);
        };
        let start = first.start();
        let mut nodes = Vec::new();
        let mut current = start;

        for piece in pieces {
            if piece.start() != current {
                nodes.push(Node::Line(piece.start()));
            }
            match piece {
                Piece::Line { end, .. } => nodes.push(Node::Line(*end)),
                Piece::Curve(points) => {
                    for chunk in points[1..].chunks_exact(3) {
                        nodes.push(Node::curve(chunk[0], chunk[1], chunk[2]));
                    }
                }
            }
            current = piece.end();
        }

        if matches!(nodes.last(), Some(Node::Line(p)) if *p == start) {
            nodes.pop();
        }

        Ok(Some(Self {
            start,
            nodes,
            closed: true,
        }))
    }

    /// Checks that every coordinate is finite.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if any point has a NaN or infinite
    /// coordinate.
    pub fn validate(&self) -> Result<()> {
        let finite = |p: &Point2| p.x.is_finite() && p.y.is_finite();
        let nodes_finite = self.nodes.iter().all(|node| match node {
            Node::Line(p) => finite(p),
            Node::Curve { c1, c2, end, .. } => finite(c1) && finite(c2) && finite(end),
        });
        if finite(&self.start) && nodes_finite {
            Ok(())
        } else {
            Err(GeometryError::NonFinite("path").into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn open_polyline_segments() {
        let path = Path::polyline(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)], false).unwrap();
        let segs = path.segments();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].start(), p(1.0, 0.0));
        assert_eq!(segs[1].end(), p(1.0, 1.0));
    }

    #[test]
    fn closed_polyline_adds_closing_segment() {
        let path = Path::polyline(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)], true).unwrap();
        let segs = path.segments();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2].end(), p(0.0, 0.0));
    }

    #[test]
    fn explicitly_closed_path_has_no_extra_segment() {
        let path = Path::polyline(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 0.0)], true)
            .unwrap();
        assert_eq!(path.segments().len(), 3);
    }

    #[test]
    fn curve_node_becomes_cubic_segment() {
        let path = Path::new(
            p(0.0, 0.0),
            vec![Node::curve(p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0))],
            false,
        );
        let segs = path.segments();
        assert!(matches!(segs[0], Segment::Cubic { p0, p3, .. } if p0 == p(0.0, 0.0) && p3 == p(1.0, 0.0)));
    }

    #[test]
    fn from_pieces_bridges_gaps_and_drops_closing_line() {
        let pieces = vec![
            Piece::Line {
                start: p(0.0, 0.0),
                end: p(1.0, 0.0),
            },
            Piece::Curve(vec![p(1.0, 0.0), p(1.5, 0.5), p(1.5, 0.5), p(1.0, 1.0)]),
            Piece::Line {
                start: p(0.5, 1.0),
                end: p(0.0, 0.0),
            },
        ];
        let path = Path::from_pieces(&pieces).unwrap().unwrap();
        assert!(path.closed);
        assert_eq!(path.start, p(0.0, 0.0));
        // line, curve, bridging line; the closing line is implicit.
        assert_eq!(path.nodes.len(), 3);
        assert_eq!(path.nodes[2], Node::Line(p(0.5, 1.0)));
    }

    #[test]
    fn from_pieces_rejects_short_curve_and_skips_empty() {
        assert!(Path::from_pieces(&[]).unwrap().is_none());
        assert!(Path::from_pieces(&[Piece::Curve(Vec::new())]).is_err());
        let short = [
            Piece::Line {
                start: p(0.0, 0.0),
                end: p(1.0, 0.0),
            },
            Piece::Curve(vec![p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]),
        ];
        assert!(Path::from_pieces(&short).is_err());
    }

    #[test]
    fn validate_rejects_nan() {
        let path = Path::polyline(&[p(0.0, 0.0), p(f64::NAN, 0.0)], false).unwrap();
        assert!(path.validate().is_err());
        let ok = Path::polyline(&[p(0.0, 0.0), p(1.0, 0.0)], false).unwrap();
        assert!(ok.validate().is_ok());
    }
}
