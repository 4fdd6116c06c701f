//! Rendering: the surface abstraction, recorded display lists and the frame
//! renderer.
//!
//! [`RenderList`] is both the offscreen back buffer the renderer draws series
//! into and the frame record window backends replay at paint time.

mod frame;
mod raster;
mod surface;

pub use frame::{
    RenderPass, asymptote_break, build_markers, build_polylines, draw_body, draw_chrome,
    draw_selection, render, series_layer,
};
pub use raster::ImageSurface;
pub use surface::{Path, SubPath, Surface};

pub(crate) use surface::{GraphicsState, clip_segment};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::style::{Color, FontSpec};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Push the graphics state.
    Save,
    /// Pop the graphics state.
    Restore,
    /// Set the current color.
    SetColor(Color),
    /// Set the stroke width.
    SetLineWidth(f32),
    /// Select the text font.
    SelectFont(FontSpec),
    /// Begin a sub-path.
    MoveTo(ScreenPoint),
    /// Extend the current sub-path.
    LineTo(ScreenPoint),
    /// Close the current sub-path.
    ClosePath,
    /// Add an arc.
    Arc {
        /// Arc center.
        center: ScreenPoint,
        /// Arc radius.
        radius: f32,
        /// Start angle in radians.
        start_angle: f32,
        /// End angle in radians.
        end_angle: f32,
    },
    /// Stroke the current path.
    Stroke,
    /// Fill the current path.
    Fill,
    /// Fill the clip region.
    Paint,
    /// Draw text at the current point.
    ShowText(String),
    /// Narrow the clip region.
    ClipRect(ScreenRect),
}

/// A sized, recorded sequence of draw calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderList {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RenderList {
    /// Create an empty list for a `width` x `height` surface.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Push a draw call.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Access all recorded draw calls.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Check whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Issue every recorded draw call on `target`, shifted by `offset`.
    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S, offset: ScreenPoint) {
        for command in &self.commands {
            match command {
                DrawCommand::Save => target.save(),
                DrawCommand::Restore => target.restore(),
                DrawCommand::SetColor(color) => target.set_color(*color),
                DrawCommand::SetLineWidth(width) => target.set_line_width(*width),
                DrawCommand::SelectFont(font) => target.select_font(font),
                DrawCommand::MoveTo(point) => target.move_to(point.offset(offset)),
                DrawCommand::LineTo(point) => target.line_to(point.offset(offset)),
                DrawCommand::ClosePath => target.close_path(),
                DrawCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => target.arc(center.offset(offset), *radius, *start_angle, *end_angle),
                DrawCommand::Stroke => target.stroke(),
                DrawCommand::Fill => target.fill(),
                DrawCommand::Paint => target.paint(),
                DrawCommand::ShowText(text) => target.show_text(text),
                DrawCommand::ClipRect(rect) => target.clip_rect(rect.offset(offset)),
            }
        }
    }

    /// Reconstruct every stroked sub-path, in drawing order.
    ///
    /// Arcs contribute their approximating vertices.
    pub fn stroked_paths(&self) -> Vec<SubPath> {
        let mut path = Path::default();
        let mut stroked = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::MoveTo(point) => path.move_to(*point),
                DrawCommand::LineTo(point) => path.line_to(*point),
                DrawCommand::ClosePath => path.close(),
                DrawCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => path.arc(*center, *radius, *start_angle, *end_angle),
                DrawCommand::Stroke => stroked.extend(path.take()),
                DrawCommand::Fill | DrawCommand::ShowText(_) => {
                    path.take();
                }
                _ => {}
            }
        }
        stroked
    }

    /// Collect every text string drawn, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::ShowText(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RenderList {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn save(&mut self) {
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.push(DrawCommand::Restore);
    }

    fn set_color(&mut self, color: Color) {
        self.push(DrawCommand::SetColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.push(DrawCommand::SetLineWidth(width));
    }

    fn select_font(&mut self, font: &FontSpec) {
        self.push(DrawCommand::SelectFont(font.clone()));
    }

    fn move_to(&mut self, point: ScreenPoint) {
        self.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: ScreenPoint) {
        self.push(DrawCommand::LineTo(point));
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn arc(&mut self, center: ScreenPoint, radius: f32, start_angle: f32, end_angle: f32) {
        self.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn paint(&mut self) {
        self.push(DrawCommand::Paint);
    }

    fn show_text(&mut self, text: &str) {
        self.push(DrawCommand::ShowText(text.to_string()));
    }

    fn clip_rect(&mut self, rect: ScreenRect) {
        self.push(DrawCommand::ClipRect(rect));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_shifts_and_clips_layer() {
        let mut layer = RenderList::new(20.0, 10.0);
        layer.move_to(ScreenPoint::new(0.0, 0.0));
        layer.line_to(ScreenPoint::new(20.0, 10.0));
        layer.stroke();

        let mut target = RenderList::new(100.0, 100.0);
        target.composite(&layer, ScreenPoint::new(30.0, 40.0));

        assert_eq!(target.commands()[0], DrawCommand::Save);
        assert_eq!(
            target.commands()[1],
            DrawCommand::ClipRect(ScreenRect::new(
                ScreenPoint::new(30.0, 40.0),
                ScreenPoint::new(50.0, 50.0)
            ))
        );
        assert_eq!(target.commands().last(), Some(&DrawCommand::Restore));
        let paths = target.stroked_paths();
        assert_eq!(paths.len(), 1);
        assert_eq!(
            paths[0].points,
            vec![ScreenPoint::new(30.0, 40.0), ScreenPoint::new(50.0, 50.0)]
        );
    }

    #[test]
    fn filled_paths_are_not_reported_as_strokes() {
        let mut list = RenderList::new(10.0, 10.0);
        list.arc(ScreenPoint::new(5.0, 5.0), 3.0, 0.0, std::f32::consts::TAU);
        list.fill();
        list.move_to(ScreenPoint::new(0.0, 0.0));
        list.line_to(ScreenPoint::new(1.0, 1.0));
        list.stroke();
        let paths = list.stroked_paths();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].points.len(), 2);
    }
}
