use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels, TextRun, Window,
    font, point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{GraphicsState, Path, RenderList, Surface};
use crate::style::{Color, FontSpec};

/// Paints a recorded frame into the window, shifted by the canvas origin.
pub(crate) fn paint_frame(
    frame: &RenderList,
    bounds: Bounds<Pixels>,
    window: &mut Window,
    cx: &mut App,
) {
    let origin = ScreenPoint::new(f32::from(bounds.origin.x), f32::from(bounds.origin.y));
    let (width, height) = frame.size();
    let area = ScreenRect::from_origin_size(origin, width, height);
    let mut surface = GpuiSurface::new(window, cx, area);
    frame.replay(&mut surface, origin);
}

/// Surface that paints straight into a gpui window during the paint phase.
///
/// Drawing is confined to `area`, the canvas bounds in window pixels.
pub(crate) struct GpuiSurface<'a> {
    window: &'a mut Window,
    cx: &'a mut App,
    area: ScreenRect,
    path: Path,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl<'a> GpuiSurface<'a> {
    pub(crate) fn new(window: &'a mut Window, cx: &'a mut App, area: ScreenRect) -> Self {
        Self {
            window,
            cx,
            area,
            path: Path::default(),
            state: GraphicsState {
                clip: Some(area),
                ..GraphicsState::default()
            },
            saved: Vec::new(),
        }
    }

    fn paint_built(&mut self, mut builder: PathBuilder) {
        for subpath in self.path.take() {
            let mut points = subpath.points.iter();
            let Some(first) = points.next() else {
                continue;
            };
            builder.move_to(to_point(*first));
            for vertex in points {
                builder.line_to(to_point(*vertex));
            }
            if subpath.closed {
                builder.close();
            }
        }
        let color = to_rgba(self.state.color);
        if let Ok(path) = builder.build() {
            with_clip(self.window, self.state.clip, |window| {
                window.paint_path(path, color);
            });
        }
    }
}

impl Surface for GpuiSurface<'_> {
    fn size(&self) -> (f32, f32) {
        (self.area.width(), self.area.height())
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
        let width = self.state.line_width.max(0.5);
        self.paint_built(PathBuilder::stroke(px(width)));
    }

    fn fill(&mut self) {
        self.paint_built(PathBuilder::fill());
    }

    fn paint(&mut self) {
        let rect = self.state.clip.unwrap_or(self.area);
        let color = to_rgba(self.state.color);
        self.window.paint_quad(quad(
            to_bounds(rect),
            Corners::all(px(0.0)),
            color,
            Edges::all(px(0.0)),
            color,
            BorderStyle::default(),
        ));
    }

    fn show_text(&mut self, text: &str) {
        let origin = self.path.current_point();
        self.path.take();
        let Some(origin) = origin else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let run = TextRun {
            len: text.len(),
            font: font(font_family(&self.state.font)),
            color: gpui::Hsla::from(to_rgba(self.state.color)),
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let shaped = self.window.text_system().shape_line(
            text.to_string().into(),
            px(self.state.font.size),
            &[run],
            None,
        );
        let line_height = shaped.ascent + shaped.descent;
        let top_left = point(px(origin.x), px(origin.y) - shaped.ascent);
        let cx = &mut *self.cx;
        with_clip(self.window, self.state.clip, |window| {
            let _ = shaped.paint(top_left, line_height, window, cx);
        });
    }

    fn clip_rect(&mut self, rect: ScreenRect) {
        self.state.intersect_clip(rect);
    }
}

fn font_family(spec: &FontSpec) -> String {
    match spec.family.as_str() {
        "serif" | "sans-serif" => ".SystemUIFont".to_string(),
        family => family.to_string(),
    }
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

fn to_point(screen: ScreenPoint) -> gpui::Point<Pixels> {
    point(px(screen.x), px(screen.y))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(to_point(rect.min), to_point(rect.max))
}

fn with_clip(window: &mut Window, clip: Option<ScreenRect>, f: impl FnOnce(&mut Window)) {
    match clip {
        Some(rect) => window.with_content_mask(
            Some(ContentMask {
                bounds: to_bounds(rect),
            }),
            f,
        ),
        None => f(window),
    }
}
