use crate::axis::TickFormatter;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::style::{FontSpec, Theme};

/// Pixels reserved around the drawable interior for axes and labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Top margin.
    pub top: f32,
    /// Right margin.
    pub right: f32,
    /// Bottom margin, holds the X tick labels.
    pub bottom: f32,
    /// Left margin, holds the Y tick labels.
    pub left: f32,
}

impl Margins {
    /// The drawable interior of a `width` x `height` surface.
    pub fn interior(&self, width: f32, height: f32) -> ScreenRect {
        ScreenRect::new(
            ScreenPoint::new(self.left, self.top),
            ScreenPoint::new(width - self.right, height - self.bottom),
        )
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 10.0,
            bottom: 50.0,
            left: 50.0,
        }
    }
}

/// Layout and styling knobs of a plot.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Reserved margins.
    pub margins: Margins,
    /// Chrome colors.
    pub theme: Theme,
    /// Number of ticks per axis.
    pub tick_count: usize,
    /// Tick mark length in pixels.
    pub tick_length: f32,
    /// Tick label formatter.
    pub tick_formatter: TickFormatter,
    /// Tick label font.
    pub font: FontSpec,
    /// Offset of Y tick labels from the tick, relative to the left margin edge.
    pub y_label_offset: ScreenPoint,
    /// Offset of X tick labels from the tick, relative to the bottom margin edge.
    pub x_label_offset: ScreenPoint,
    /// Gridline width in pixels.
    pub grid_line_width: f32,
    /// Axis box and tick width in pixels.
    pub axis_line_width: f32,
    /// Marker radius (half the glyph size) in pixels.
    pub marker_size: f32,
    /// Zoom rectangles thinner than this many pixels are ignored.
    pub min_zoom_px: f32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            theme: Theme::default(),
            tick_count: 8,
            tick_length: 10.0,
            tick_formatter: TickFormatter::default(),
            font: FontSpec::default(),
            // Tuned for labels with two decimals.
            y_label_offset: ScreenPoint::new(-45.0, 5.0),
            x_label_offset: ScreenPoint::new(-10.0, 30.0),
            grid_line_width: 0.5,
            axis_line_width: 1.0,
            marker_size: 3.0,
            min_zoom_px: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_interior_excludes_margins() {
        let rect = Margins::default().interior(700.0, 500.0);
        assert_eq!(rect.min, ScreenPoint::new(50.0, 10.0));
        assert_eq!(rect.max, ScreenPoint::new(690.0, 450.0));
        assert_eq!(rect.width(), 640.0);
        assert_eq!(rect.height(), 440.0);
    }
}
