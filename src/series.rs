//! Data series: explicit samples or a function sampled on demand.

use std::fmt;
use std::sync::Arc;

use crate::geom::{Point, linspace};
use crate::style::{Color, MarkerKind, SeriesStyle};
use crate::view::Range;

/// Callback evaluated at every sample of a function series.
///
/// Evaluation failures are reported as NaN, which the renderer draws as a gap.
pub type SampleFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// A function together with the interval and sample count it is drawn with.
#[derive(Clone)]
pub struct FunctionSource {
    function: SampleFn,
    interval: Range,
    points: usize,
}

impl FunctionSource {
    /// Declared sampling interval.
    pub fn interval(&self) -> Range {
        self.interval
    }

    /// Number of samples per evaluation.
    pub fn points(&self) -> usize {
        self.points
    }

    /// Evaluate the function at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        (self.function)(x)
    }
}

impl fmt::Debug for FunctionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionSource")
            .field("interval", &self.interval)
            .field("points", &self.points)
            .finish_non_exhaustive()
    }
}

/// Window the current samples of a function series were produced for.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SampleWindow {
    Stale,
    Declared,
    Visible(Range),
}

#[derive(Debug, Clone)]
enum SeriesSource {
    Explicit,
    Function {
        source: FunctionSource,
        window: SampleWindow,
    },
}

/// One plotted entity with its style and samples.
#[derive(Debug, Clone)]
pub struct Series {
    style: SeriesStyle,
    source: SeriesSource,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Series {
    /// Create a series from explicit X and Y samples.
    ///
    /// Index `i` of `xs` pairs with index `i` of `ys`. The lengths are checked
    /// when the series is added to a plot.
    pub fn xy(xs: impl Into<Vec<f64>>, ys: impl Into<Vec<f64>>) -> Self {
        Self {
            style: SeriesStyle::default(),
            source: SeriesSource::Explicit,
            xs: xs.into(),
            ys: ys.into(),
        }
    }

    /// Create a series from a function sampled `points` times over `interval`.
    pub fn function(
        function: impl Fn(f64) -> f64 + Send + Sync + 'static,
        interval: Range,
        points: usize,
    ) -> Self {
        Self {
            style: SeriesStyle::default(),
            source: SeriesSource::Function {
                source: FunctionSource {
                    function: Arc::new(function),
                    interval,
                    points,
                },
                window: SampleWindow::Stale,
            },
            xs: Vec::new(),
            ys: Vec::new(),
        }
    }

    /// Replace the whole style.
    ///
    /// A line width that is not a positive finite number falls back to the
    /// default width.
    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.style = SeriesStyle {
            line_width: line_width_or_default(style.line_width),
            ..style
        };
        self
    }

    /// Set the stroke and marker color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    /// Set the marker glyph.
    pub fn with_marker(mut self, marker: MarkerKind) -> Self {
        self.style.marker = marker;
        self
    }

    /// Set the line width in pixels.
    ///
    /// Zero, negative and NaN widths fall back to the default width.
    pub fn with_line_width(mut self, width: f32) -> Self {
        self.style.line_width = line_width_or_default(width);
        self
    }

    /// Toggle the polyline joining the samples.
    pub fn with_line(mut self, line: bool) -> Self {
        self.style.line = line;
        self
    }

    /// Access the style.
    pub fn style(&self) -> &SeriesStyle {
        &self.style
    }

    pub(crate) fn style_mut(&mut self) -> &mut SeriesStyle {
        &mut self.style
    }

    /// Current X samples.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Current Y samples.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of current samples.
    pub fn len(&self) -> usize {
        self.xs.len().min(self.ys.len())
    }

    /// Check whether there are no current samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the current samples as points.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| Point::new(x, y))
    }

    /// The function source, for function series.
    pub fn function_source(&self) -> Option<&FunctionSource> {
        match &self.source {
            SeriesSource::Explicit => None,
            SeriesSource::Function { source, .. } => Some(source),
        }
    }

    /// Check whether the samples are derived from a function.
    pub fn is_function(&self) -> bool {
        self.function_source().is_some()
    }

    /// Check whether the series can be registered.
    ///
    /// Explicit series need equally long, non-empty sample arrays; function
    /// series need at least one sample.
    pub fn is_registrable(&self) -> bool {
        match &self.source {
            SeriesSource::Explicit => !self.xs.is_empty() && self.xs.len() == self.ys.len(),
            SeriesSource::Function { source, .. } => source.points > 0,
        }
    }

    /// Regenerate the samples of a function series.
    ///
    /// With `None` the declared interval is sampled. With a visible window the
    /// intersection of both intervals is sampled; a disjoint window leaves no
    /// samples. Requests for the window the samples were already produced
    /// for are skipped, so calling this repeatedly is cheap and yields the
    /// same samples. Returns whether the samples were regenerated.
    pub fn resample(&mut self, visible: Option<Range>) -> bool {
        let SeriesSource::Function { source, window } = &mut self.source else {
            return false;
        };
        let wanted = match visible {
            None => SampleWindow::Declared,
            Some(range) => SampleWindow::Visible(range),
        };
        if *window == wanted {
            return false;
        }
        *window = wanted;

        let interval = match visible {
            None => Some(source.interval),
            Some(range) => source.interval.intersect(&range),
        };
        match interval {
            Some(interval) => {
                self.xs = linspace(interval.min, interval.max, source.points);
                self.ys = self.xs.iter().map(|&x| source.eval(x)).collect();
            }
            None => {
                self.xs.clear();
                self.ys.clear();
            }
        }
        true
    }

    /// Mark function samples as outdated so the next resample regenerates them.
    pub fn invalidate(&mut self) {
        if let SeriesSource::Function { window, .. } = &mut self.source {
            *window = SampleWindow::Stale;
        }
    }

    /// Extent of the finite X samples.
    pub fn x_extent(&self) -> Option<Range> {
        Range::enclosing(self.xs.iter().copied())
    }

    /// Extent of the finite Y samples.
    pub fn y_extent(&self) -> Option<Range> {
        Range::enclosing(self.ys.iter().copied())
    }
}

fn line_width_or_default(width: f32) -> f32 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        SeriesStyle::default().line_width
    }
}
