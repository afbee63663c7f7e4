use tracing::debug;

use crate::error::Result;
use crate::geometry::path::Path;
use crate::operations::{DashPath, NonZeroUnion, PathUnion};

use super::outline::outline_stroke;
use super::stroke_style::StrokeStyle;
use super::OffsetParams;

/// Converts stroked paths into filled outline paths.
///
/// Each open source path yields one closed outline around the stroke; each
/// closed source path yields an outer and an inner loop. Outlines of several
/// source paths are merged through the configured [`PathUnion`].
#[derive(Debug)]
pub struct StrokeToFill<U = NonZeroUnion> {
    paths: Vec<Path>,
    style: StrokeStyle,
    params: OffsetParams,
    union: U,
}

impl StrokeToFill {
    /// Creates a new `StrokeToFill` operation with default accuracy.
    #[must_use]
    pub fn new(paths: Vec<Path>, style: StrokeStyle) -> Self {
        Self {
            paths,
            style,
            params: OffsetParams::default(),
            union: NonZeroUnion,
        }
    }
}

impl<U: PathUnion> StrokeToFill<U> {
    /// Sets the offset accuracy parameters.
    #[must_use]
    pub fn with_params(mut self, params: OffsetParams) -> Self {
        self.params = params;
        self
    }

    /// Replaces the strategy used to merge outlines of separate paths.
    #[must_use]
    pub fn with_union<V: PathUnion>(self, union: V) -> StrokeToFill<V> {
        StrokeToFill {
            paths: self.paths,
            style: self.style,
            params: self.params,
            union,
        }
    }

    /// Executes the conversion.
    ///
    /// A stroke without positive width produces no outlines.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if a source path has a NaN or
    /// infinite coordinate, or `OperationError::InvalidArgument` if outline
    /// geometry cannot be assembled.
    pub fn execute(&self) -> Result<Vec<Path>> {
        let width = self.style.width();
        if width.is_nan() || width <= 0.0 {
            debug!(width, "stroke has no width");
            return Ok(Vec::new());
        }
        for path in &self.paths {
            path.validate()?;
        }

        let dashed: Vec<Path>;
        let sources = match self.style.dash() {
            Some(pattern) => {
                dashed = self
                    .paths
                    .iter()
                    .flat_map(|path| {
                        DashPath::new(path, width, pattern)
                            .with_tolerance(self.params.flatten_tolerance)
                            .execute()
                    })
                    .collect();
                debug!(paths = self.paths.len(), dashes = dashed.len(), "dashes expanded");
                &dashed
            }
            None => &self.paths,
        };

        let mut outlines = Vec::new();
        for path in sources {
            let fills = self.outline_path(path)?;
            if !fills.is_empty() {
                outlines.push(fills);
            }
        }

        let mut outlines = outlines.into_iter();
        let Some(first) = outlines.next() else {
            return Ok(Vec::new());
        };
        Ok(outlines.fold(first, |acc, next| self.union.union(acc, next)))
    }

    fn outline_path(&self, path: &Path) -> Result<Vec<Path>> {
        let outline = outline_stroke(
            path,
            self.style.half_width(),
            self.style.join(),
            self.style.cap(),
            self.style.miter_limit(),
            &self.params,
        )?;
        debug!(
            segments = path.segments().len(),
            forward = outline.forward.len(),
            backward = outline.backward.len(),
            closed = path.closed,
            "path outlined"
        );

        let fills = if path.closed {
            [
                Path::from_pieces(&outline.forward)?,
                Path::from_pieces(&outline.backward)?,
            ]
            .into_iter()
            .flatten()
            .collect()
        } else {
            let mut pieces = outline.forward;
            pieces.extend(outline.backward);
            Path::from_pieces(&pieces)?.into_iter().collect()
        };
        Ok(fills)
    }
}

/// Converts stroked paths with the default accuracy and union.
///
/// Returns no paths when `style` is absent.
///
/// # Errors
///
/// See [`StrokeToFill::execute`].
pub fn stroke_to_fill(paths: &[Path], style: Option<&StrokeStyle>) -> Result<Vec<Path>> {
    match style {
        Some(style) => StrokeToFill::new(paths.to_vec(), style.clone()).execute(),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::{GeometryError, OutlineError};
    use crate::geometry::path::Node;
    use crate::math::Point2;
    use crate::stroke::{LineCap, LineJoin, StrokeRecord};
    use approx::assert_abs_diff_eq;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    /// Start point followed by every node end point.
    fn corners(path: &Path) -> Vec<Point2> {
        std::iter::once(path.start)
            .chain(path.nodes.iter().map(Node::end))
            .collect()
    }

    fn assert_corners(path: &Path, expected: &[Point2]) {
        let actual = corners(path);
        assert_eq!(actual.len(), expected.len(), "{actual:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(a.x, e.x, epsilon = 1e-9);
            assert_abs_diff_eq!(a.y, e.y, epsilon = 1e-9);
        }
    }

    fn horizontal_line() -> Path {
        Path::polyline(&[p(0.0, 0.0), p(10.0, 0.0)], false).unwrap()
    }

    fn square() -> Path {
        Path::polyline(
            &[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)],
            true,
        )
        .unwrap()
    }

    #[test]
    fn line_with_butt_caps_becomes_rectangle() {
        init_tracing();
        let result = stroke_to_fill(&[horizontal_line()], Some(&StrokeStyle::new(4.0))).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].closed);
        assert_corners(
            &result[0],
            &[p(0.0, 2.0), p(0.0, -2.0), p(10.0, -2.0), p(10.0, 2.0)],
        );
    }

    #[test]
    fn closed_square_becomes_ring() {
        init_tracing();
        let style = StrokeStyle::new(2.0)
            .with_join(LineJoin::Miter)
            .with_miter_limit(10.0);
        let result = StrokeToFill::new(vec![square()], style).execute().unwrap();
        assert_eq!(result.len(), 2);
        assert_corners(
            &result[0],
            &[p(-1.0, -1.0), p(11.0, -1.0), p(11.0, 11.0), p(-1.0, 11.0)],
        );
        assert_corners(
            &result[1],
            &[p(1.0, 1.0), p(1.0, 9.0), p(9.0, 9.0), p(9.0, 1.0)],
        );
    }

    #[test]
    fn zero_width_or_missing_style_is_empty() {
        let paths = [horizontal_line()];
        assert!(stroke_to_fill(&paths, None).unwrap().is_empty());
        assert!(stroke_to_fill(&paths, Some(&StrokeStyle::new(0.0)))
            .unwrap()
            .is_empty());
        assert!(stroke_to_fill(&paths, Some(&StrokeStyle::new(-1.0)))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn degenerate_path_is_dropped() {
        let dot = Path::polyline(&[p(3.0, 3.0)], false).unwrap();
        let result = stroke_to_fill(&[dot], Some(&StrokeStyle::new(1.0))).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn round_caps_extend_past_ends() {
        let style = StrokeStyle::new(2.0).with_cap(LineCap::Round);
        let result = stroke_to_fill(&[horizontal_line()], Some(&style)).unwrap();
        assert_eq!(result.len(), 1);
        let xs: Vec<f64> = corners(&result[0]).iter().map(|q| q.x).collect();
        let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_abs_diff_eq!(min, -1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(max, 11.0, epsilon = 1e-9);
        assert!(result[0]
            .nodes
            .iter()
            .any(|node| matches!(node, Node::Curve { .. })));
    }

    #[test]
    fn dashed_line_gives_one_outline_per_dash() {
        init_tracing();
        let style = StrokeStyle::new(1.0).with_dashes([1.0, 1.0]);
        let result = stroke_to_fill(&[horizontal_line()], Some(&style)).unwrap();
        assert_eq!(result.len(), 5);
        assert!(result.iter().all(|path| path.closed));
    }

    #[test]
    fn curved_path_outline_is_finite() {
        init_tracing();
        let path = Path::new(
            p(0.0, 0.0),
            vec![
                Node::curve(p(0.0, 10.0), p(10.0, 10.0), p(10.0, 0.0)),
                Node::curve(p(10.0, -10.0), p(20.0, -10.0), p(20.0, 0.0)),
            ],
            false,
        );
        let style = StrokeStyle::new(2.0).with_join(LineJoin::Round);
        let result = stroke_to_fill(&[path], Some(&style)).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].validate().is_ok());
        assert!(result[0].nodes.len() > 4);
    }

    #[test]
    fn separate_paths_are_merged_through_union() {
        struct Counting<'a>(&'a Cell<usize>);
        impl PathUnion for Counting<'_> {
            fn union(&self, mut a: Vec<Path>, b: Vec<Path>) -> Vec<Path> {
                self.0.set(self.0.get() + 1);
                a.extend(b);
                a
            }
        }

        let calls = Cell::new(0);
        let second = Path::polyline(&[p(0.0, 5.0), p(10.0, 5.0)], false).unwrap();
        let third = Path::polyline(&[p(0.0, 9.0), p(10.0, 9.0)], false).unwrap();
        let result = StrokeToFill::new(vec![horizontal_line(), second, third], StrokeStyle::new(1.0))
            .with_union(Counting(&calls))
            .execute()
            .unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn params_control_accuracy() {
        let path = Path::new(
            p(0.0, 0.0),
            vec![Node::curve(p(0.0, 10.0), p(10.0, 10.0), p(10.0, 0.0))],
            false,
        );
        let style = StrokeStyle::new(4.0);
        let coarse = StrokeToFill::new(vec![path.clone()], style.clone())
            .with_params(OffsetParams {
                recursion_limit: 0,
                ..OffsetParams::default()
            })
            .execute()
            .unwrap();
        let fine = StrokeToFill::new(vec![path], style)
            .with_params(OffsetParams {
                tolerance: 1e-4,
                ..OffsetParams::default()
            })
            .execute()
            .unwrap();
        assert!(fine[0].nodes.len() > coarse[0].nodes.len());
    }

    #[test]
    fn record_codes_are_decoded() {
        let record = StrokeRecord {
            width: 2.0,
            dash: Vec::new(),
            cap: 2,
            join: 1,
            miter_limit: 10.433,
        };
        let style = StrokeStyle::try_from(&record).unwrap();
        assert_eq!(style.cap(), LineCap::Round);
        assert_eq!(style.join(), LineJoin::Round);

        let bad = StrokeRecord { join: 7, ..record };
        assert!(StrokeStyle::try_from(&bad).is_err());
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let path = Path::polyline(&[p(0.0, 0.0), p(f64::NAN, 1.0)], false).unwrap();
        let err = stroke_to_fill(&[path], Some(&StrokeStyle::new(1.0))).unwrap_err();
        assert!(matches!(
            err,
            OutlineError::Geometry(GeometryError::NonFinite(_))
        ));
    }
}
