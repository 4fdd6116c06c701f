//! Data ranges and the visible bounds of a plot.

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Expand the range to include a value. Non-finite values are ignored.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Overlap of two ranges, or `None` when they are disjoint.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(Self { min, max })
    }

    /// Smallest range covering every finite value, or `None` if there is none.
    pub fn enclosing<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut range: Option<Self> = None;
        for value in values.into_iter().filter(|value| value.is_finite()) {
            match range.as_mut() {
                None => range = Some(Self::new(value, value)),
                Some(existing) => existing.expand_to_include(value),
            }
        }
        range
    }
}

/// State of one axis of the visible bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AxisLimits {
    /// Not known yet; inferred from the series on the next frame.
    #[default]
    Unset,
    /// Inferred once from series extents.
    Inferred(Range),
    /// Set by the user or by a zoom gesture.
    Explicit(Range),
}

impl AxisLimits {
    /// The resolved range, if any.
    pub fn range(&self) -> Option<Range> {
        match self {
            Self::Unset => None,
            Self::Inferred(range) | Self::Explicit(range) => Some(*range),
        }
    }

    /// Check whether the axis still waits for inference.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Check whether the axis was set explicitly.
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }
}

/// The data-space rectangle currently mapped onto the drawable interior.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    /// X axis limits.
    pub x: AxisLimits,
    /// Y axis limits.
    pub y: AxisLimits,
}

impl Bounds {
    /// Bounds with both axes unset.
    pub fn unset() -> Self {
        Self::default()
    }

    /// Bounds with both axes set explicitly.
    pub fn explicit(x: Range, y: Range) -> Self {
        Self {
            x: AxisLimits::Explicit(x),
            y: AxisLimits::Explicit(y),
        }
    }

    /// Check whether both axes are resolved.
    pub fn is_resolved(&self) -> bool {
        !self.x.is_unset() && !self.y.is_unset()
    }

    /// The resolved ranges of both axes.
    pub fn ranges(&self) -> Option<(Range, Range)> {
        Some((self.x.range()?, self.y.range()?))
    }

    /// Infer unset axes from the given extents.
    ///
    /// Axes that are already inferred or explicit are left alone, as are
    /// axes for which no extent is available. Returns whether anything changed.
    pub fn infer(&mut self, x_extent: Option<Range>, y_extent: Option<Range>) -> bool {
        let mut changed = false;
        if self.x.is_unset()
            && let Some(range) = x_extent
        {
            self.x = AxisLimits::Inferred(range);
            changed = true;
        }
        if self.y.is_unset()
            && let Some(range) = y_extent
        {
            self.y = AxisLimits::Inferred(range);
            changed = true;
        }
        changed
    }
}
