//! Plot aggregate root and builder.

use std::path::Path;

use crate::config::PlotConfig;
use crate::error::PlotError;
use crate::geom::ScreenRect;
use crate::interaction::InteractionState;
use crate::render::{ImageSurface, RenderPass, Surface, render};
use crate::series::Series;
use crate::style::MarkerKind;
use crate::transform::Transform;
use crate::view::{AxisLimits, Bounds, Range};

/// A plot: its size, configuration, series and visible bounds.
///
/// Series are drawn in insertion order, later ones on top.
#[derive(Debug, Clone)]
pub struct Plot {
    width: u32,
    height: u32,
    config: PlotConfig,
    grid: bool,
    series: Vec<Series>,
    bounds: Bounds,
    pub(crate) interaction: InteractionState,
}

impl Plot {
    /// Create an empty `width` x `height` plot with default configuration.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            config: PlotConfig::default(),
            grid: false,
            series: Vec::new(),
            bounds: Bounds::unset(),
            interaction: InteractionState::default(),
        }
    }

    /// Start building a plot with custom configuration.
    pub fn builder() -> PlotBuilder {
        PlotBuilder::default()
    }

    /// Add a series. Returns `false` and leaves the plot unchanged when the
    /// series has mismatched or empty samples.
    ///
    /// A lone explicit point without a marker gets a circle marker.
    pub fn add_series(&mut self, mut series: Series) -> bool {
        if !series.is_registrable() {
            log::debug!(
                "series rejected: {} x samples, {} y samples",
                series.xs().len(),
                series.ys().len()
            );
            return false;
        }
        let lone_point = !series.is_function() && series.len() == 1;
        if lone_point && series.style().marker == MarkerKind::None {
            series.style_mut().marker = MarkerKind::Circle;
        }
        self.series.push(series);
        true
    }

    /// Access all series.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Current bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Replace the bounds.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Fix the X range. Inference no longer touches the X axis.
    pub fn set_x_limits(&mut self, min: f64, max: f64) {
        self.bounds.x = AxisLimits::Explicit(Range::new(min, max));
    }

    /// Fix the Y range. Inference no longer touches the Y axis.
    pub fn set_y_limits(&mut self, min: f64, max: f64) {
        self.bounds.y = AxisLimits::Explicit(Range::new(min, max));
    }

    /// Toggle gridlines.
    pub fn set_grid(&mut self, enabled: bool) {
        self.grid = enabled;
    }

    /// Check whether gridlines are drawn.
    pub fn has_grid(&self) -> bool {
        self.grid
    }

    /// Access the configuration.
    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Access the configuration mutably.
    pub fn config_mut(&mut self) -> &mut PlotConfig {
        &mut self.config
    }

    /// Surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Change the surface size and arm a full redraw.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.request_full_redraw();
    }

    /// The drawable interior: the surface minus the margins.
    pub fn interior(&self) -> ScreenRect {
        self.config
            .margins
            .interior(self.width as f32, self.height as f32)
    }

    /// Transform for the current bounds and interior, if both are usable.
    pub fn transform(&self) -> Option<Transform> {
        let (x, y) = self.bounds.ranges()?;
        let interior = self.interior();
        Transform::new(x, y, interior.width(), interior.height())
    }

    /// Sample function series and infer unset axes.
    ///
    /// While an axis is unset, function series are sampled over their
    /// declared interval to seed inference. Afterwards they are sampled over
    /// the visible X window. Returns whether any axis was inferred.
    pub fn resolve_bounds(&mut self) -> bool {
        let mut inferred = false;
        if !self.bounds.is_resolved() {
            for series in &mut self.series {
                series.resample(None);
            }
            let x_extent = Range::enclosing(
                self.series
                    .iter()
                    .flat_map(|series| series.xs().iter().copied()),
            );
            let y_extent = Range::enclosing(
                self.series
                    .iter()
                    .flat_map(|series| series.ys().iter().copied()),
            );
            inferred = self.bounds.infer(x_extent, y_extent);
            if inferred {
                log::debug!("bounds inferred: {:?}", self.bounds);
            }
        }
        if let Some(x) = self.bounds.x.range() {
            for series in &mut self.series {
                series.resample(Some(x));
            }
        }
        inferred
    }

    /// Render one frame onto `surface`.
    pub fn render_to<S: Surface + ?Sized>(&mut self, surface: &mut S, pass: RenderPass) {
        render(self, surface, pass);
    }

    /// Render a full frame and write it as a PNG file.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), PlotError> {
        let mut surface = ImageSurface::new(self.width, self.height)?;
        self.render_to(&mut surface, RenderPass::Full);
        surface.write_png(path)
    }

    /// Open a window showing the plot and block until it is closed.
    ///
    /// Zooming in the window changes the bounds of this plot.
    #[cfg(feature = "gpui")]
    pub fn show(&mut self, title: &str) -> Result<(), PlotError> {
        use std::sync::{Arc, PoisonError, RwLock};

        let shared = Arc::new(RwLock::new(self.clone()));
        let result = crate::gpui_backend::run_session(Arc::clone(&shared), title);
        let shown = shared.read().unwrap_or_else(PoisonError::into_inner).clone();
        *self = shown;
        self.reset_interaction();
        result
    }

    /// Open a window showing the plot.
    ///
    /// Window support is not compiled in; always fails with
    /// [`PlotError::WindowUnavailable`].
    #[cfg(not(feature = "gpui"))]
    pub fn show(&mut self, title: &str) -> Result<(), PlotError> {
        log::warn!("cannot show {title:?}: not compiled with window support");
        Err(PlotError::WindowUnavailable)
    }
}

/// Builder for configuring a plot before construction.
#[derive(Debug, Default)]
pub struct PlotBuilder {
    size: Option<(u32, u32)>,
    config: PlotConfig,
    grid: bool,
    x_limits: Option<Range>,
    y_limits: Option<Range>,
    series: Vec<Series>,
}

impl PlotBuilder {
    /// Set the surface size. Defaults to 700 x 500.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Set the configuration.
    pub fn config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Toggle gridlines.
    pub fn grid(mut self, enabled: bool) -> Self {
        self.grid = enabled;
        self
    }

    /// Fix the X range.
    pub fn x_limits(mut self, min: f64, max: f64) -> Self {
        self.x_limits = Some(Range::new(min, max));
        self
    }

    /// Fix the Y range.
    pub fn y_limits(mut self, min: f64, max: f64) -> Self {
        self.y_limits = Some(Range::new(min, max));
        self
    }

    /// Add a series.
    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Build the plot. Series that fail registration are dropped.
    pub fn build(self) -> Plot {
        let (width, height) = self.size.unwrap_or((700, 500));
        let mut plot = Plot::new(width, height);
        plot.config = self.config;
        plot.grid = self.grid;
        if let Some(range) = self.x_limits {
            plot.bounds.x = AxisLimits::Explicit(range);
        }
        if let Some(range) = self.y_limits {
            plot.bounds.y = AxisLimits::Explicit(range);
        }
        for series in self.series {
            plot.add_series(series);
        }
        plot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn invalid_series_are_not_registered() {
        let mut plot = Plot::new(700, 500);
        assert!(plot.add_series(Series::xy([0.0, 1.0], [0.0, 1.0])));
        assert!(!plot.add_series(Series::xy([0.0, 1.0, 2.0], [0.0, 1.0])));
        assert!(!plot.add_series(Series::xy(Vec::new(), Vec::new())));
        assert_eq!(plot.series().len(), 1);
    }

    #[test]
    fn lone_point_gets_a_marker() {
        let mut plot = Plot::new(700, 500);
        plot.add_series(Series::xy([1.0], [2.0]));
        plot.add_series(Series::xy([1.0], [2.0]).with_marker(MarkerKind::Square));
        assert_eq!(plot.series()[0].style().marker, MarkerKind::Circle);
        assert_eq!(plot.series()[1].style().marker, MarkerKind::Square);
    }

    #[test]
    fn inference_uses_exact_extents() {
        let mut plot = Plot::new(700, 500);
        plot.add_series(Series::xy([0.0, 1.0, 2.0], [0.0, 1.0, 0.0]));
        plot.add_series(Series::xy([-3.0, 0.5], [0.2, 4.0]));
        assert!(plot.resolve_bounds());
        assert_eq!(
            plot.bounds().ranges(),
            Some((Range::new(-3.0, 2.0), Range::new(0.0, 4.0)))
        );
        assert!(!plot.resolve_bounds());
    }

    #[test]
    fn explicit_axis_survives_inference() {
        let mut plot = Plot::new(700, 500);
        plot.set_y_limits(5.0, -5.0);
        plot.add_series(Series::xy([0.0, 10.0], [100.0, 200.0]));
        plot.resolve_bounds();
        assert_eq!(plot.bounds().y, AxisLimits::Explicit(Range::new(-5.0, 5.0)));
        assert_eq!(plot.bounds().x, AxisLimits::Inferred(Range::new(0.0, 10.0)));
    }

    #[test]
    fn empty_plot_stays_unresolved() {
        let mut plot = Plot::new(700, 500);
        assert!(!plot.resolve_bounds());
        assert!(plot.transform().is_none());
    }

    #[test]
    fn function_series_seed_inference_then_follow_window() {
        let mut plot = Plot::new(700, 500);
        plot.set_x_limits(0.0, 2.0);
        plot.add_series(Series::function(|x| x * x, Range::new(-4.0, 4.0), 8));
        plot.resolve_bounds();
        // Y inferred from the declared interval [-4, 4).
        assert_eq!(plot.bounds().y.range(), Some(Range::new(0.0, 16.0)));
        assert_eq!(
            plot.series()[0].xs(),
            &[0.0, 0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75]
        );
    }

    #[test]
    fn builder_applies_settings() {
        let plot = Plot::builder()
            .size(320, 240)
            .grid(true)
            .x_limits(0.0, 1.0)
            .series(Series::xy([0.0], [0.0]).with_color(Color::RED))
            .series(Series::xy([0.0, 1.0], [0.0]))
            .build();
        assert_eq!(plot.size(), (320, 240));
        assert!(plot.has_grid());
        assert!(plot.bounds().x.is_explicit());
        assert!(plot.bounds().y.is_unset());
        assert_eq!(plot.series().len(), 1);
        assert_eq!(plot.series()[0].style().color, Color::RED);
    }

    #[cfg(not(feature = "gpui"))]
    #[test]
    fn show_without_window_support_fails() {
        let mut plot = Plot::new(100, 100);
        assert!(matches!(plot.show("t"), Err(PlotError::WindowUnavailable)));
    }
}
