use crate::error::{OperationError, OutlineError, Result};

/// Default miter limit, as a multiple of the stroke half-width.
pub const DEFAULT_MITER_LIMIT: f64 = 10.433;

/// How two consecutive stroke edges are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Edges extended to their intersection point.
    #[default]
    Miter,
    /// Circular arc around the corner.
    Round,
    /// Straight segment across the corner.
    Bevel,
}

impl LineJoin {
    /// Decodes a join code of the stroke record (`0` miter, `1` round, `2` bevel).
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidArgument` for an unknown code.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Miter),
            1 => Ok(Self::Round),
            2 => Ok(Self::Bevel),
            _ => Err(OperationError::InvalidArgument(format!("unknown join type {code}")).into()),
        }
    }
}

/// Shape closing the free ends of an open stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    /// Flat cap extended by half the stroke width.
    Square,
}

impl LineCap {
    /// Decodes a cap code of the stroke record (`1` butt, `2` round, `3` square).
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidArgument` for an unknown code.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            1 => Ok(Self::Butt),
            2 => Ok(Self::Round),
            3 => Ok(Self::Square),
            _ => Err(OperationError::InvalidArgument(format!("unknown cap type {code}")).into()),
        }
    }
}

/// Style parameters of a stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    width: f64,
    dash: Option<Vec<f64>>,
    cap: LineCap,
    join: LineJoin,
    miter_limit: f64,
}

impl StrokeStyle {
    /// Creates a solid stroke with butt caps and miter joins.
    ///
    /// A non-positive width is accepted and strokes to nothing.
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self {
            width,
            dash: None,
            cap: LineCap::default(),
            join: LineJoin::default(),
            miter_limit: DEFAULT_MITER_LIMIT,
        }
    }

    /// Sets the cap applied to both ends of open paths.
    #[must_use]
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    /// Sets the join used at corners between segments.
    #[must_use]
    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    /// Sets the miter limit, as a multiple of the half-width.
    #[must_use]
    pub fn with_miter_limit(mut self, limit: f64) -> Self {
        self.miter_limit = limit;
        self
    }

    /// Sets the dash pattern. Entries are alternating on/off lengths in
    /// multiples of the stroke width.
    #[must_use]
    pub fn with_dashes<I>(mut self, pattern: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        self.dash = Some(pattern.into_iter().collect());
        self
    }

    /// Returns the stroke width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns half the stroke width.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }

    /// Returns the dash pattern, if the stroke is dashed.
    #[must_use]
    pub fn dash(&self) -> Option<&[f64]> {
        self.dash.as_deref()
    }

    /// Returns the line cap.
    #[must_use]
    pub fn cap(&self) -> LineCap {
        self.cap
    }

    /// Returns the line join.
    #[must_use]
    pub fn join(&self) -> LineJoin {
        self.join
    }

    /// Returns the miter limit.
    #[must_use]
    pub fn miter_limit(&self) -> f64 {
        self.miter_limit
    }
}

/// Stroke description in the fixed record shape used by document formats,
/// with cap and join as numeric codes.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeRecord {
    pub width: f64,
    pub dash: Vec<f64>,
    pub cap: i32,
    pub join: i32,
    pub miter_limit: f64,
}

impl TryFrom<&StrokeRecord> for StrokeStyle {
    type Error = OutlineError;

    fn try_from(record: &StrokeRecord) -> Result<Self> {
        let mut style = StrokeStyle::new(record.width)
            .with_cap(LineCap::from_code(record.cap)?)
            .with_join(LineJoin::from_code(record.join)?)
            .with_miter_limit(record.miter_limit);
        if !record.dash.is_empty() {
            style = style.with_dashes(record.dash.iter().copied());
        }
        Ok(style)
    }
}
