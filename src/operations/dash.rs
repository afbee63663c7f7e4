use tracing::debug;

use crate::geometry::path::{Path, Segment};
use crate::math::bezier_2d::{arc_length_table, param_at_length, split_range, Cubic};
use crate::math::{lerp, Point2};

/// Default flatness used to measure curve lengths.
const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Splits a path into the "on" intervals of a dash pattern.
///
/// Pattern entries are alternating on/off lengths in multiples of the stroke
/// width, starting with "on". The pattern runs continuously over the whole
/// path, including the closing segment of a closed path. Each "on" interval
/// becomes an open subpath; curve pieces are exact sub-ranges of the source
/// cubics.
#[derive(Debug)]
pub struct DashPath<'a> {
    path: &'a Path,
    lengths: Vec<f64>,
    tolerance: f64,
}

impl<'a> DashPath<'a> {
    /// Creates a new `DashPath` operation.
    #[must_use]
    pub fn new(path: &'a Path, width: f64, pattern: &[f64]) -> Self {
        Self {
            path,
            lengths: pattern.iter().map(|d| d * width).collect(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Sets the flatness used to build arc length tables for curves.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the split.
    ///
    /// An unusable pattern (empty, negative or non-finite entries, zero
    /// total length) leaves the path whole.
    #[must_use]
    pub fn execute(&self) -> Vec<Path> {
        let total: f64 = self.lengths.iter().sum();
        let usable = !self.lengths.is_empty()
            && self.lengths.iter().all(|l| l.is_finite() && *l >= 0.0)
            && total > 0.0;
        if !usable {
            debug!(lengths = ?self.lengths, "dash pattern ignored");
            return vec![self.path.clone()];
        }

        let mut dashes = Vec::new();
        let mut current: Vec<Segment> = Vec::new();
        let mut index = 0;
        let mut remaining = self.lengths[0];
        let mut on = true;

        for segment in self.path.segments() {
            let measured = Measured::new(segment, self.tolerance);
            let length = measured.length();
            let mut pos = 0.0;
            while pos < length {
                let next = (pos + remaining).min(length);
                if on && next > pos {
                    current.push(measured.range(pos, next));
                }
                remaining -= next - pos;
                pos = next;
                if remaining <= 0.0 {
                    if on {
                        dashes.extend(Path::from_segments(&current));
                        current.clear();
                    }
                    on = !on;
                    index = (index + 1) % self.lengths.len();
                    remaining = self.lengths[index];
                }
            }
        }
        dashes.extend(Path::from_segments(&current));

        debug!(dashes = dashes.len(), "path dashed");
        dashes
    }
}

/// Splits `path` with the default measuring tolerance.
#[must_use]
pub fn dash_path(path: &Path, width: f64, pattern: &[f64]) -> Vec<Path> {
    DashPath::new(path, width, pattern).execute()
}

/// A segment with its arc length parametrization.
enum Measured {
    Line { start: Point2, end: Point2 },
    Cubic { cubic: Cubic, table: Vec<(f64, f64)> },
}

impl Measured {
    fn new(segment: Segment, tolerance: f64) -> Self {
        match segment {
            Segment::Line { start, end } => Self::Line { start, end },
            Segment::Cubic { p0, c1, c2, p3 } => {
                let cubic = [p0, c1, c2, p3];
                let table = arc_length_table(&cubic, tolerance);
                Self::Cubic { cubic, table }
            }
        }
    }

    fn length(&self) -> f64 {
        match self {
            Self::Line { start, end } => (end - start).norm(),
            Self::Cubic { table, .. } => table.last().map_or(0.0, |&(_, l)| l),
        }
    }

    /// The part of the segment between two distances from its start.
    fn range(&self, from: f64, to: f64) -> Segment {
        match self {
            Self::Line { start, end } => {
                let length = (end - start).norm();
                let point = |d: f64| {
                    if d >= length {
                        *end
                    } else {
                        lerp(*start, *end, d / length)
                    }
                };
                Segment::Line {
                    start: point(from),
                    end: point(to),
                }
            }
            Self::Cubic { cubic, table } => {
                let t0 = param_at_length(table, from);
                let t1 = param_at_length(table, to);
                Segment::from_cubic(split_range(cubic, t0, t1))
            }
        }
    }
}
