//! Raster surface backed by an RGB buffer, exported as PNG.
//!
//! Each primitive is rasterized through a plotters bitmap drawing area over
//! the buffer. Clipping happens here, before geometry reaches plotters.

use std::path::Path as FsPath;

use image::{ImageFormat, RgbImage};
use plotters::backend::BitMapBackend;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
#[cfg(feature = "ttf")]
use plotters::element::Text;
use plotters::element::{PathElement, Polygon, Rectangle};
use plotters::style::{RGBAColor, ShapeStyle};
#[cfg(feature = "ttf")]
use plotters::style::{IntoFont, TextStyle};

use crate::error::PlotError;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::style::{Color, FontSpec};

use super::{GraphicsState, Path, Surface, clip_segment};

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// In-memory raster surface.
///
/// Drawing failures are sticky: the first one is kept and reported by
/// [`ImageSurface::into_image`] and [`ImageSurface::write_png`].
pub struct ImageSurface {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    path: Path,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    error: Option<PlotError>,
    text_warned: bool,
}

impl ImageSurface {
    /// Allocate a `width` x `height` surface.
    pub fn new(width: u32, height: u32) -> Result<Self, PlotError> {
        if width == 0 || height == 0 {
            return Err(PlotError::InvalidSurfaceSize { width, height });
        }
        Ok(Self {
            width,
            height,
            buffer: vec![0; width as usize * height as usize * 3],
            path: Path::default(),
            state: GraphicsState::default(),
            saved: Vec::new(),
            error: None,
            text_warned: false,
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB value of a pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        Some([
            self.buffer[offset],
            self.buffer[offset + 1],
            self.buffer[offset + 2],
        ])
    }

    /// Finish drawing and hand out the raster.
    pub fn into_image(self) -> Result<RgbImage, PlotError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let (width, height) = (self.width, self.height);
        RgbImage::from_raw(width, height, self.buffer)
            .ok_or(PlotError::InvalidSurfaceSize { width, height })
    }

    /// Finish drawing and write the raster as a PNG file.
    pub fn write_png(self, path: impl AsRef<FsPath>) -> Result<(), PlotError> {
        let image = self.into_image()?;
        image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    fn bounds(&self) -> ScreenRect {
        ScreenRect::new(
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(self.width as f32, self.height as f32),
        )
    }

    fn clip(&self) -> ScreenRect {
        let bounds = self.bounds();
        match self.state.clip {
            None => bounds,
            Some(clip) => clip
                .intersect(&bounds)
                .unwrap_or_else(|| ScreenRect::new(bounds.min, bounds.min)),
        }
    }

    fn shape_style(&self, filled: bool) -> ShapeStyle {
        ShapeStyle {
            color: to_rgba(self.state.color),
            filled,
            stroke_width: self.state.line_width.round().max(1.0) as u32,
        }
    }

    fn with_area(&mut self, draw: impl FnOnce(&Area<'_>) -> Result<(), String>) {
        if self.error.is_some() {
            return;
        }
        let size = (self.width, self.height);
        let area = BitMapBackend::with_buffer(&mut self.buffer, size).into_drawing_area();
        if let Err(message) = draw(&area) {
            self.error = Some(PlotError::Draw(message));
        }
    }

    #[cfg(feature = "ttf")]
    fn draw_text(&mut self, text: &str, origin: ScreenPoint) {
        let font = self.state.font.clone();
        // Plotters anchors text at its top-left corner, not at the baseline.
        let top_left = to_coord(ScreenPoint::new(origin.x, origin.y - font.size * 0.8));
        let color = to_rgba(self.state.color);
        let size = (self.width, self.height);
        let area = BitMapBackend::with_buffer(&mut self.buffer, size).into_drawing_area();
        let style = TextStyle::from((font.family.as_str(), font.size as f64).into_font())
            .color(&color);
        if let Err(err) = area.draw(&Text::new(text.to_string(), top_left, style)) {
            if !self.text_warned {
                log::warn!("tick labels skipped in image export: {err}");
                self.text_warned = true;
            }
        }
    }

    /// Plotters has no font backend without `ttf` and panics on any text.
    #[cfg(not(feature = "ttf"))]
    fn draw_text(&mut self, _text: &str, _origin: ScreenPoint) {
        if !self.text_warned {
            log::warn!("tick labels skipped in image export: built without the `ttf` feature");
            self.text_warned = true;
        }
    }
}

impl Surface for ImageSurface {
    fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn set_color(&mut self, color: Color) {
        self.state.color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
    }

    fn select_font(&mut self, font: &FontSpec) {
        self.state.font = font.clone();
    }

    fn move_to(&mut self, point: ScreenPoint) {
        self.path.move_to(point);
    }

    fn line_to(&mut self, point: ScreenPoint) {
        self.path.line_to(point);
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn arc(&mut self, center: ScreenPoint, radius: f32, start_angle: f32, end_angle: f32) {
        self.path.arc(center, radius, start_angle, end_angle);
    }

    fn stroke(&mut self) {
        let clip = self.clip();
        let mut segments = Vec::new();
        for subpath in self.path.take() {
            let points = &subpath.points;
            let mut pairs: Vec<_> = points.windows(2).map(|pair| (pair[0], pair[1])).collect();
            if subpath.closed && points.len() > 2 {
                pairs.push((points[points.len() - 1], points[0]));
            }
            segments.extend(
                pairs
                    .into_iter()
                    .filter_map(|(start, end)| clip_segment(start, end, clip))
                    .map(|(start, end)| vec![to_coord(start), to_coord(end)]),
            );
        }
        if segments.is_empty() {
            return;
        }
        let style = self.shape_style(false);
        self.with_area(|area| {
            for segment in segments {
                area.draw(&PathElement::new(segment, style))
                    .map_err(|err| err.to_string())?;
            }
            Ok(())
        });
    }

    fn fill(&mut self) {
        let clip = self.clip();
        let polygons: Vec<Vec<(i32, i32)>> = self
            .path
            .take()
            .into_iter()
            .map(|subpath| clip_polygon(&subpath.points, clip))
            .filter(|points| points.len() >= 3)
            .map(|points| points.into_iter().map(to_coord).collect())
            .collect();
        if polygons.is_empty() {
            return;
        }
        let style = self.shape_style(true);
        self.with_area(|area| {
            for polygon in polygons {
                area.draw(&Polygon::new(polygon, style))
                    .map_err(|err| err.to_string())?;
            }
            Ok(())
        });
    }

    fn paint(&mut self) {
        let clip = self.clip();
        if !clip.is_valid() {
            return;
        }
        let corners = [to_coord(clip.min), to_coord(clip.max)];
        let style = self.shape_style(true);
        self.with_area(|area| {
            area.draw(&Rectangle::new(corners, style))
                .map_err(|err| err.to_string())
        });
    }

    fn show_text(&mut self, text: &str) {
        let origin = self.path.current_point();
        self.path.take();
        let Some(origin) = origin else {
            return;
        };
        if text.is_empty() || !self.clip().contains(origin) {
            return;
        }
        self.draw_text(text, origin);
    }

    fn clip_rect(&mut self, rect: ScreenRect) {
        self.state.intersect_clip(rect);
    }
}

fn to_rgba(color: Color) -> RGBAColor {
    let [r, g, b, _] = color.to_rgba8();
    RGBAColor(r, g, b, color.a.clamp(0.0, 1.0) as f64)
}

fn to_coord(point: ScreenPoint) -> (i32, i32) {
    (point.x.round() as i32, point.y.round() as i32)
}

/// Clip a polygon against a rectangle (Sutherland-Hodgman).
fn clip_polygon(points: &[ScreenPoint], rect: ScreenRect) -> Vec<ScreenPoint> {
    let edges: [(fn(ScreenPoint, ScreenRect) -> bool, Edge); 4] = [
        (|p, r| p.x >= r.min.x, Edge::Left),
        (|p, r| p.x <= r.max.x, Edge::Right),
        (|p, r| p.y >= r.min.y, Edge::Top),
        (|p, r| p.y <= r.max.y, Edge::Bottom),
    ];
    let mut output = points.to_vec();
    for (inside, edge) in edges {
        let input = std::mem::take(&mut output);
        let Some(&last) = input.last() else {
            break;
        };
        let mut previous = last;
        for &current in &input {
            match (inside(current, rect), inside(previous, rect)) {
                (true, true) => output.push(current),
                (true, false) => {
                    output.push(edge.intersect(previous, current, rect));
                    output.push(current);
                }
                (false, true) => output.push(edge.intersect(previous, current, rect)),
                (false, false) => {}
            }
            previous = current;
        }
    }
    output
}

#[derive(Clone, Copy)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    fn intersect(self, from: ScreenPoint, to: ScreenPoint, rect: ScreenRect) -> ScreenPoint {
        let at_x = |x: f32| {
            let t = (x - from.x) / (to.x - from.x);
            ScreenPoint::new(x, from.y + t * (to.y - from.y))
        };
        let at_y = |y: f32| {
            let t = (y - from.y) / (to.y - from.y);
            ScreenPoint::new(from.x + t * (to.x - from.x), y)
        };
        match self {
            Self::Left => at_x(rect.min.x),
            Self::Right => at_x(rect.max.x),
            Self::Top => at_y(rect.min.y),
            Self::Bottom => at_y(rect.max.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(surface: &mut ImageSurface, min: f32, max: f32) {
        surface.move_to(ScreenPoint::new(min, min));
        surface.line_to(ScreenPoint::new(max, min));
        surface.line_to(ScreenPoint::new(max, max));
        surface.line_to(ScreenPoint::new(min, max));
        surface.close_path();
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        assert!(matches!(
            ImageSurface::new(0, 10),
            Err(PlotError::InvalidSurfaceSize {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn paint_respects_clip_and_restore() {
        let mut surface = ImageSurface::new(20, 20).unwrap();
        surface.set_color(Color::WHITE);
        surface.paint();

        surface.save();
        surface.clip_rect(ScreenRect::new(
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(5.0, 5.0),
        ));
        surface.set_color(Color::RED);
        surface.paint();
        surface.restore();

        assert_eq!(surface.pixel(2, 2), Some([255, 0, 0]));
        assert_eq!(surface.pixel(15, 15), Some([255, 255, 255]));
        assert_eq!(surface.pixel(20, 0), None);
    }

    #[test]
    fn fill_covers_polygon_interior() {
        let mut surface = ImageSurface::new(30, 30).unwrap();
        surface.set_color(Color::WHITE);
        surface.paint();
        surface.set_color(Color::BLUE);
        square(&mut surface, 5.0, 20.0);
        surface.fill();
        assert_eq!(surface.pixel(12, 12), Some([0, 0, 255]));
        assert_eq!(surface.pixel(25, 25), Some([255, 255, 255]));
    }

    #[test]
    fn polygon_clipping_keeps_inside_part() {
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0));
        let clipped = clip_polygon(
            &[
                ScreenPoint::new(-5.0, 2.0),
                ScreenPoint::new(5.0, 2.0),
                ScreenPoint::new(5.0, 8.0),
                ScreenPoint::new(-5.0, 8.0),
            ],
            rect,
        );
        assert!(clipped.iter().all(|point| rect.contains(*point)));
        assert!(clipped.contains(&ScreenPoint::new(0.0, 2.0)));
        assert!(clipped.contains(&ScreenPoint::new(5.0, 8.0)));
    }

    #[test]
    fn text_never_aborts_drawing() {
        let mut surface = ImageSurface::new(40, 20).unwrap();
        surface.set_color(Color::WHITE);
        surface.paint();
        surface.set_color(Color::BLACK);
        surface.move_to(ScreenPoint::new(2.0, 15.0));
        surface.show_text("1.00");
        surface.move_to(ScreenPoint::new(2.0, 15.0));
        surface.show_text("2.00");

        // The path is consumed and later drawing still lands.
        surface.line_to(ScreenPoint::new(30.0, 5.0));
        surface.stroke();
        surface.set_color(Color::RED);
        surface.paint();
        assert_eq!(surface.pixel(35, 2), Some([255, 0, 0]));
        assert!(surface.into_image().is_ok());
    }

    #[test]
    fn writes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut surface = ImageSurface::new(16, 8).unwrap();
        surface.set_color(Color::GREEN);
        surface.paint();
        surface.write_png(&path).unwrap();

        let image = image::open(&path).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (16, 8));
        assert_eq!(image.get_pixel(3, 3).0, [0, 255, 0]);
    }
}
