use crate::error::{OperationError, Result};
use crate::math::bezier_2d::{from_line, Cubic};
use crate::math::Point2;

/// One element of an outline boundary.
///
/// A curve piece is a chain of cubics stored as
/// `[p0, c1, c2, p1, c1, c2, p2, ...]`, always `3k + 1` points long.
#[derive(Debug, Clone, PartialEq)]
pub enum Piece {
    Line { start: Point2, end: Point2 },
    Curve(Vec<Point2>),
}

impl Piece {
    /// Builds a piece from a raw point list: two points make a line,
    /// `3k + 1` points a cubic chain.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidArgument` for any other length.
    pub fn from_points(points: Vec<Point2>) -> Result<Self> {
        match points.len() {
            2 => Ok(Self::Line {
                start: points[0],
                end: points[1],
            }),
            n => {
                check_chain_len(n)?;
                Ok(Self::Curve(points))
            }
        }
    }

    /// Checks that a curve piece holds a whole cubic chain.
    ///
    /// Every other method assumes this holds; operations taking pieces from
    /// callers check it first.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidArgument` if a curve piece is not
    /// `3k + 1` points long with `k >= 1`.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Line { .. } => Ok(()),
            Self::Curve(points) => check_chain_len(points.len()),
        }
    }

    /// Returns the first point.
    #[must_use]
    pub fn start(&self) -> Point2 {
        match self {
            Self::Line { start, .. } => *start,
            Self::Curve(points) => points[0],
        }
    }

    /// Returns the last point.
    #[must_use]
    pub fn end(&self) -> Point2 {
        match self {
            Self::Line { end, .. } => *end,
            Self::Curve(points) => points[points.len() - 1],
        }
    }

    /// Returns `true` for a straight piece.
    #[must_use]
    pub fn is_line(&self) -> bool {
        matches!(self, Self::Line { .. })
    }

    /// Moves the first point, leaving control points in place.
    pub fn set_start(&mut self, p: Point2) {
        match self {
            Self::Line { start, .. } => *start = p,
            Self::Curve(points) => points[0] = p,
        }
    }

    /// Moves the last point, leaving control points in place.
    pub fn set_end(&mut self, p: Point2) {
        match self {
            Self::Line { end, .. } => *end = p,
            Self::Curve(points) => {
                let last = points.len() - 1;
                points[last] = p;
            }
        }
    }

    /// Returns the first primitive as a cubic; a line is expressed with
    /// evenly spaced control points.
    #[must_use]
    pub fn first_cubic(&self) -> Cubic {
        match self {
            Self::Line { start, end } => from_line(*start, *end),
            Self::Curve(points) => [points[0], points[1], points[2], points[3]],
        }
    }

    /// Returns the last primitive as a cubic.
    #[must_use]
    pub fn last_cubic(&self) -> Cubic {
        match self {
            Self::Line { start, end } => from_line(*start, *end),
            Self::Curve(points) => {
                let n = points.len();
                [points[n - 4], points[n - 3], points[n - 2], points[n - 1]]
            }
        }
    }

    /// Replaces the first primitive; a line keeps only the new end points.
    pub fn replace_first_cubic(&mut self, c: Cubic) {
        match self {
            Self::Line { start, end } => {
                *start = c[0];
                *end = c[3];
            }
            Self::Curve(points) => points[..4].copy_from_slice(&c),
        }
    }

    /// Replaces the last primitive; a line keeps only the new end points.
    pub fn replace_last_cubic(&mut self, c: Cubic) {
        match self {
            Self::Line { start, end } => {
                *start = c[0];
                *end = c[3];
            }
            Self::Curve(points) => {
                let n = points.len();
                points[n - 4..].copy_from_slice(&c);
            }
        }
    }
}

fn check_chain_len(n: usize) -> Result<()> {
    if n >= 4 && (n - 1) % 3 == 0 {
        Ok(())
    } else {
        Err(OperationError::InvalidArgument(format!(
            "{n} points form neither a line nor a cubic chain"
        ))
        .into())
    }
}
