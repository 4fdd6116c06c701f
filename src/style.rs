//! Colors, series styling and theming.

/// RGBA color.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);

    /// Convert to 8-bit channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        ]
    }
}

/// Glyph drawn at every valid sample of a series.
///
/// The set is closed; every kind is painted by the single dispatch in the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerKind {
    /// No marker.
    #[default]
    None,
    /// Filled circle.
    Circle,
    /// Filled square.
    Square,
    /// Plus-shaped cross.
    Cross,
}

/// Visual style of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    /// Stroke and marker color.
    pub color: Color,
    /// Line width in pixels.
    pub line_width: f32,
    /// Marker glyph.
    pub marker: MarkerKind,
    /// Whether samples are joined by a polyline.
    pub line: bool,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            line_width: 2.0,
            marker: MarkerKind::None,
            line: true,
        }
    }
}

/// Font selection for tick labels.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font family name.
    pub family: String,
    /// Font size in pixels.
    pub size: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "serif".to_string(),
            size: 12.0,
        }
    }
}

/// Colors used for the plot chrome.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Background fill.
    pub background: Color,
    /// Fill of the drawable interior.
    pub canvas: Color,
    /// Axis box, tick marks and labels.
    pub axis: Color,
    /// Gridlines.
    pub grid: Color,
    /// Zoom selection rectangle fill.
    pub selection_fill: Color,
}

impl Theme {
    /// Black on white.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            canvas: Color::WHITE,
            axis: Color::BLACK,
            grid: Color::BLACK,
            selection_fill: Color::new(0.0, 0.0, 0.0, 0.5),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
