//! The draw-call sink every backend implements.
//!
//! Surfaces follow a path model: `move_to`/`line_to`/`arc` build the current
//! path and `stroke`/`fill` paint and consume it. Graphics state (color,
//! line width, font and clip) is saved and restored as a stack.

use std::f32::consts::TAU;

use crate::geom::{ScreenPoint, ScreenRect};
use crate::style::{Color, FontSpec};

use super::RenderList;

/// A 2-D drawing surface.
pub trait Surface {
    /// Surface size in pixels.
    fn size(&self) -> (f32, f32);

    /// Push the graphics state.
    fn save(&mut self);

    /// Pop the graphics state pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    /// Set the color used by stroke, fill, paint and text.
    fn set_color(&mut self, color: Color);

    /// Set the stroke width in pixels.
    fn set_line_width(&mut self, width: f32);

    /// Select the font used by [`Surface::show_text`].
    fn select_font(&mut self, font: &FontSpec);

    /// Begin a new sub-path at `point`.
    fn move_to(&mut self, point: ScreenPoint);

    /// Extend the current sub-path to `point`.
    fn line_to(&mut self, point: ScreenPoint);

    /// Close the current sub-path.
    fn close_path(&mut self);

    /// Add a circular arc, angles in radians, clockwise on screen.
    fn arc(&mut self, center: ScreenPoint, radius: f32, start_angle: f32, end_angle: f32);

    /// Stroke and clear the current path.
    fn stroke(&mut self);

    /// Fill and clear the current path.
    fn fill(&mut self);

    /// Fill the whole clip region with the current color.
    fn paint(&mut self);

    /// Draw text with its baseline starting at the current point, then clear
    /// the path.
    fn show_text(&mut self, text: &str);

    /// Intersect the clip region with `rect`.
    fn clip_rect(&mut self, rect: ScreenRect);

    /// Push any pending output to the backing store.
    fn flush(&mut self) {}

    /// Draw an offscreen layer with its top-left corner at `offset`.
    ///
    /// The layer is clipped to its own size.
    fn composite(&mut self, layer: &RenderList, offset: ScreenPoint) {
        let (width, height) = layer.size();
        self.save();
        self.clip_rect(ScreenRect::from_origin_size(offset, width, height));
        layer.replay(self, offset);
        self.restore();
    }
}

/// Graphics state tracked by raster backends.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GraphicsState {
    pub(crate) color: Color,
    pub(crate) line_width: f32,
    pub(crate) font: FontSpec,
    pub(crate) clip: Option<ScreenRect>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            line_width: 2.0,
            font: FontSpec::default(),
            clip: None,
        }
    }
}

impl GraphicsState {
    /// Narrow the clip to `rect`. Disjoint rectangles clip everything away.
    pub(crate) fn intersect_clip(&mut self, rect: ScreenRect) {
        let rect = rect.normalized();
        self.clip = Some(match self.clip {
            None => rect,
            Some(current) => current
                .intersect(&rect)
                .unwrap_or_else(|| ScreenRect::new(rect.min, rect.min)),
        });
    }
}

/// One connected run of a path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubPath {
    /// Vertices in drawing order.
    pub points: Vec<ScreenPoint>,
    /// Whether the last vertex joins back to the first.
    pub closed: bool,
}

/// Path under construction on a surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    subpaths: Vec<SubPath>,
}

impl Path {
    /// Begin a new sub-path.
    pub fn move_to(&mut self, point: ScreenPoint) {
        self.subpaths.push(SubPath {
            points: vec![point],
            closed: false,
        });
    }

    /// Extend the current sub-path. Without a current point this acts as
    /// [`Path::move_to`]; after a close a new sub-path starts at the closed
    /// sub-path's first vertex.
    pub fn line_to(&mut self, point: ScreenPoint) {
        match self.subpaths.last_mut() {
            None => self.move_to(point),
            Some(current) if current.closed => {
                let start = current.points.first().copied().unwrap_or(point);
                self.subpaths.push(SubPath {
                    points: vec![start, point],
                    closed: false,
                });
            }
            Some(current) => current.points.push(point),
        }
    }

    /// Close the current sub-path.
    pub fn close(&mut self) {
        if let Some(current) = self.subpaths.last_mut() {
            current.closed = true;
        }
    }

    /// Append an arc approximated by line segments.
    pub fn arc(&mut self, center: ScreenPoint, radius: f32, start_angle: f32, end_angle: f32) {
        for point in arc_points(center, radius, start_angle, end_angle) {
            self.line_to(point);
        }
    }

    /// Last vertex of the current sub-path.
    pub fn current_point(&self) -> Option<ScreenPoint> {
        self.subpaths
            .last()
            .and_then(|subpath| subpath.points.last().copied())
    }

    /// Check whether the path has no sub-paths.
    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Take all sub-paths, leaving the path empty.
    pub fn take(&mut self) -> Vec<SubPath> {
        std::mem::take(&mut self.subpaths)
    }
}

/// Points along an arc, clockwise on screen for increasing angles.
pub(crate) fn arc_points(
    center: ScreenPoint,
    radius: f32,
    start_angle: f32,
    end_angle: f32,
) -> impl Iterator<Item = ScreenPoint> {
    let sweep = end_angle - start_angle;
    let steps = ((sweep.abs() / TAU) * 32.0).ceil().max(8.0) as usize;
    (0..=steps).map(move |i| {
        let angle = start_angle + sweep * i as f32 / steps as f32;
        ScreenPoint::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    })
}

/// Clip a segment to a rectangle (Cohen-Sutherland).
pub(crate) fn clip_segment(
    mut start: ScreenPoint,
    mut end: ScreenPoint,
    rect: ScreenRect,
) -> Option<(ScreenPoint, ScreenPoint)> {
    let mut out_start = region_code(start, rect);
    let mut out_end = region_code(end, rect);

    loop {
        if (out_start | out_end) == 0 {
            return Some((start, end));
        }
        if (out_start & out_end) != 0 {
            return None;
        }

        let out_code = if out_start != 0 { out_start } else { out_end };
        let (mut x, mut y) = (0.0_f32, 0.0_f32);

        if (out_code & TOP) != 0 {
            x = start.x + (end.x - start.x) * (rect.min.y - start.y) / (end.y - start.y);
            y = rect.min.y;
        } else if (out_code & BOTTOM) != 0 {
            x = start.x + (end.x - start.x) * (rect.max.y - start.y) / (end.y - start.y);
            y = rect.max.y;
        } else if (out_code & RIGHT) != 0 {
            y = start.y + (end.y - start.y) * (rect.max.x - start.x) / (end.x - start.x);
            x = rect.max.x;
        } else if (out_code & LEFT) != 0 {
            y = start.y + (end.y - start.y) * (rect.min.x - start.x) / (end.x - start.x);
            x = rect.min.x;
        }

        let new_point = ScreenPoint::new(x, y);
        if out_code == out_start {
            start = new_point;
            out_start = region_code(start, rect);
        } else {
            end = new_point;
            out_end = region_code(end, rect);
        }
    }
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

fn region_code(point: ScreenPoint, rect: ScreenRect) -> u8 {
    let mut code = 0;
    if point.x < rect.min.x {
        code |= LEFT;
    } else if point.x > rect.max.x {
        code |= RIGHT;
    }
    if point.y < rect.min.y {
        code |= TOP;
    } else if point.y > rect.max.y {
        code |= BOTTOM;
    }
    code
}
