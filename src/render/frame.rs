//! Frame composition: chrome, grid, tick labels and series.
//!
//! Series are drawn into a back buffer the size of the drawable interior, in
//! interior-local coordinates, and composited onto the target at the margin
//! offset.

use std::f32::consts::TAU;

use crate::axis::layout_ticks;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::plot::Plot;
use crate::series::Series;
use crate::style::MarkerKind;
use crate::transform::Transform;

use super::{RenderList, Surface};

/// Which parts of a frame are repainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPass {
    /// Background, ticks, labels, axis box, grid and series.
    Full,
    /// Axis box, grid and series only, leaving margins untouched.
    OverlayOnly,
}

/// Render one frame of `plot` onto `surface`.
///
/// Bounds are resolved first. An active zoom selection is painted on top.
pub fn render<S: Surface + ?Sized>(plot: &mut Plot, surface: &mut S, pass: RenderPass) {
    plot.resolve_bounds();
    if pass == RenderPass::Full {
        draw_chrome(plot, surface);
    }
    draw_body(plot, surface);
    draw_selection(plot, surface);
    surface.flush();
}

/// Paint the background, tick marks and tick labels.
///
/// Labels are only drawn for axes with finite bounds.
pub fn draw_chrome<S: Surface + ?Sized>(plot: &Plot, surface: &mut S) {
    let config = plot.config();
    let interior = plot.interior();
    let bounds = plot.bounds();

    surface.save();
    surface.set_color(config.theme.background);
    surface.paint();
    surface.restore();

    surface.save();
    surface.set_color(config.theme.axis);
    surface.select_font(&config.font);
    surface.set_line_width(config.axis_line_width);

    for tick in layout_ticks(
        interior.max.y,
        interior.min.y,
        config.tick_count,
        bounds.y.range(),
    ) {
        surface.move_to(ScreenPoint::new(interior.min.x, tick.pixel));
        surface.line_to(ScreenPoint::new(
            interior.min.x - config.tick_length,
            tick.pixel,
        ));
        surface.stroke();
        if let Some(value) = tick.value {
            surface.move_to(ScreenPoint::new(
                interior.min.x + config.y_label_offset.x,
                tick.pixel + config.y_label_offset.y,
            ));
            surface.show_text(&config.tick_formatter.format(value));
        }
    }

    for tick in layout_ticks(
        interior.min.x,
        interior.max.x,
        config.tick_count,
        bounds.x.range(),
    ) {
        surface.move_to(ScreenPoint::new(tick.pixel, interior.max.y));
        surface.line_to(ScreenPoint::new(
            tick.pixel,
            interior.max.y + config.tick_length,
        ));
        surface.stroke();
        if let Some(value) = tick.value {
            surface.move_to(ScreenPoint::new(
                tick.pixel + config.x_label_offset.x,
                interior.max.y + config.x_label_offset.y,
            ));
            surface.show_text(&config.tick_formatter.format(value));
        }
    }
    surface.restore();
}

/// Draw the axis box, the grid and the composited series layer.
pub fn draw_body<S: Surface + ?Sized>(plot: &Plot, surface: &mut S) {
    let config = plot.config();
    let interior = plot.interior();

    surface.save();
    surface.set_line_width(config.axis_line_width);
    surface.set_color(config.theme.axis);
    rect_path(surface, interior);
    surface.stroke();
    surface.set_color(config.theme.canvas);
    rect_path(surface, interior);
    surface.fill();
    surface.restore();

    if plot.has_grid() {
        surface.save();
        surface.set_color(config.theme.grid);
        surface.set_line_width(config.grid_line_width);
        let rows = layout_ticks(interior.min.y, interior.max.y, config.tick_count, None);
        let columns = layout_ticks(interior.min.x, interior.max.x, config.tick_count, None);
        for (row, column) in rows.iter().zip(&columns) {
            surface.move_to(ScreenPoint::new(interior.min.x, row.pixel));
            surface.line_to(ScreenPoint::new(interior.max.x, row.pixel));
            surface.stroke();

            surface.move_to(ScreenPoint::new(column.pixel, interior.max.y));
            surface.line_to(ScreenPoint::new(column.pixel, interior.min.y));
            surface.stroke();
        }
        surface.restore();
    }

    if let Some(layer) = series_layer(plot) {
        surface.composite(&layer, interior.min);
    }
}

/// Fill the active zoom selection, if any.
pub fn draw_selection<S: Surface + ?Sized>(plot: &Plot, surface: &mut S) {
    let Some(rect) = plot.selection_rect() else {
        return;
    };
    surface.save();
    surface.set_color(plot.config().theme.selection_fill);
    rect_path(surface, rect);
    surface.fill();
    surface.restore();
}

/// Draw every series into a back buffer sized to the drawable interior.
///
/// Returns `None` when the bounds cannot be mapped yet.
pub fn series_layer(plot: &Plot) -> Option<RenderList> {
    let transform = plot.transform()?;
    let mut layer = RenderList::new(transform.width(), transform.height());
    let marker_size = plot.config().marker_size;
    for series in plot.series() {
        draw_series(&mut layer, series, &transform, marker_size);
    }
    Some(layer)
}

fn draw_series<S: Surface + ?Sized>(
    surface: &mut S,
    series: &Series,
    transform: &Transform,
    marker_size: f32,
) {
    let style = series.style();
    surface.save();
    surface.set_line_width(style.line_width);
    surface.set_color(style.color);

    if style.marker != MarkerKind::None {
        for center in build_markers(series, transform) {
            draw_marker(surface, style.marker, center, marker_size);
        }
    }

    if style.line {
        for polyline in build_polylines(series, transform) {
            let mut points = polyline.into_iter();
            if let Some(first) = points.next() {
                surface.move_to(first);
                for point in points {
                    surface.line_to(point);
                }
                surface.stroke();
            }
        }
    }
    surface.restore();
}

fn draw_marker<S: Surface + ?Sized>(
    surface: &mut S,
    kind: MarkerKind,
    center: ScreenPoint,
    size: f32,
) {
    match kind {
        MarkerKind::None => {}
        MarkerKind::Circle => {
            surface.arc(center, size, 0.0, TAU);
            surface.fill();
        }
        MarkerKind::Square => {
            rect_path(
                surface,
                ScreenRect::new(
                    ScreenPoint::new(center.x - size, center.y - size),
                    ScreenPoint::new(center.x + size, center.y + size),
                ),
            );
            surface.fill();
        }
        MarkerKind::Cross => {
            surface.move_to(ScreenPoint::new(center.x - size, center.y));
            surface.line_to(ScreenPoint::new(center.x + size, center.y));
            surface.move_to(ScreenPoint::new(center.x, center.y - size));
            surface.line_to(ScreenPoint::new(center.x, center.y + size));
            surface.stroke();
        }
    }
}

/// Mapped positions of every valid sample.
pub fn build_markers(series: &Series, transform: &Transform) -> Vec<ScreenPoint> {
    series
        .points()
        .filter_map(|point| transform.data_to_screen(point))
        .collect()
}

/// Split the samples into polylines, in interior-local pixels.
///
/// A run ends at an invalid sample or at an asymptote; the breaking sample
/// is dropped and the next valid sample starts a new run.
pub fn build_polylines(series: &Series, transform: &Transform) -> Vec<Vec<ScreenPoint>> {
    let span = transform.y_range().span();
    let ys = series.ys();
    let mut polylines = Vec::new();
    let mut current = Vec::new();
    for (index, point) in series.points().enumerate() {
        let mapped = if asymptote_break(ys, index, span) {
            None
        } else {
            transform.data_to_screen(point)
        };
        match mapped {
            Some(pixel) => current.push(pixel),
            None if !current.is_empty() => polylines.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        polylines.push(current);
    }
    polylines
}

/// Whether sample `index` jumps across zero by more than the visible span.
///
/// A sign change (product of neighbors at most zero) combined with a jump
/// larger than `span` is taken to be a pole of a sampled function.
pub fn asymptote_break(ys: &[f64], index: usize, span: f64) -> bool {
    if index == 0 || index >= ys.len() {
        return false;
    }
    let (previous, current) = (ys[index - 1], ys[index]);
    if current * previous > 0.0 {
        return false;
    }
    (current - previous).abs() > span
}

fn rect_path<S: Surface + ?Sized>(surface: &mut S, rect: ScreenRect) {
    surface.move_to(rect.min);
    surface.line_to(ScreenPoint::new(rect.max.x, rect.min.y));
    surface.line_to(rect.max);
    surface.line_to(ScreenPoint::new(rect.min.x, rect.max.y));
    surface.close_path();
}
