use gpui_fnplot::render::{build_polylines, series_layer};
use gpui_fnplot::{
    DrawCommand, InputEvent, MouseButton, Plot, Point, Range, RenderList, RenderPass,
    ScreenPoint, Series,
};

#[test]
fn explicit_series_fills_the_interior() {
    let mut plot = Plot::new(700, 500);
    plot.add_series(Series::xy([0.0, 1.0, 2.0], [0.0, 1.0, 0.0]));

    let mut frame = RenderList::new(700.0, 500.0);
    plot.render_to(&mut frame, RenderPass::Full);

    assert_eq!(
        plot.bounds().ranges(),
        Some((Range::new(0.0, 2.0), Range::new(0.0, 1.0)))
    );

    let layer = series_layer(&plot).expect("bounds resolved");
    let local = layer.stroked_paths();
    assert_eq!(local.len(), 1);
    assert_eq!(
        local[0].points,
        vec![
            ScreenPoint::new(0.0, 440.0),
            ScreenPoint::new(320.0, 0.0),
            ScreenPoint::new(640.0, 440.0),
        ]
    );

    let shifted = vec![
        ScreenPoint::new(50.0, 450.0),
        ScreenPoint::new(370.0, 10.0),
        ScreenPoint::new(690.0, 450.0),
    ];
    assert!(
        frame
            .stroked_paths()
            .iter()
            .any(|path| path.points == shifted)
    );
    assert!(
        !frame
            .commands()
            .iter()
            .any(|command| matches!(command, DrawCommand::Arc { .. }))
    );
}

#[test]
fn reciprocal_breaks_at_the_pole() {
    let mut plot = Plot::new(700, 500);
    plot.set_y_limits(-10.0, 10.0);
    plot.add_series(Series::function(|x| 1.0 / x, Range::new(-1.0, 1.0), 100));
    plot.resolve_bounds();

    let transform = plot.transform().expect("bounds resolved");
    let polylines = build_polylines(&plot.series()[0], &transform);
    assert_eq!(polylines.len(), 2);

    let pole = transform
        .data_to_screen(Point::new(0.0, 0.0))
        .expect("finite")
        .x;
    let left_end = polylines[0].last().expect("non-empty").x;
    let right_start = polylines[1][0].x;
    assert!(left_end < pole);
    assert!(right_start > pole);
}

fn reciprocal_runs_with_inferred_bounds(points: usize) -> usize {
    let mut plot = Plot::new(700, 500);
    plot.add_series(Series::function(|x| 1.0 / x, Range::new(-1.0, 1.0), points));
    let mut frame = RenderList::new(700.0, 500.0);
    plot.render_to(&mut frame, RenderPass::Full);
    let transform = plot.transform().expect("bounds resolved");
    build_polylines(&plot.series()[0], &transform).len()
}

#[test]
fn reciprocal_with_inferred_bounds() {
    assert_eq!(reciprocal_runs_with_inferred_bounds(101), 2);
    // A sample lands within 1e-16 of zero and becomes the inferred y max, so
    // the jump across the pole equals the visible span and does not break.
    assert_eq!(reciprocal_runs_with_inferred_bounds(100), 1);
}

#[test]
fn drag_zoom_then_export() {
    let mut plot = Plot::new(700, 500);
    plot.set_x_limits(0.0, 64.0);
    plot.set_y_limits(0.0, 44.0);
    plot.add_series(Series::function(|x| x.sin() * 20.0 + 22.0, Range::new(0.0, 64.0), 200));

    plot.handle_input(&InputEvent::ButtonPressed {
        button: MouseButton::Primary,
        position: ScreenPoint::new(150.0, 120.0),
    });
    plot.handle_input(&InputEvent::CursorMoved(ScreenPoint::new(350.0, 340.0)));
    let pass = plot.handle_input(&InputEvent::ButtonReleased {
        button: MouseButton::Primary,
        position: ScreenPoint::new(350.0, 340.0),
    });
    assert_eq!(pass, Some(RenderPass::Full));
    assert_eq!(
        plot.bounds().ranges(),
        Some((Range::new(10.0, 30.0), Range::new(11.0, 33.0)))
    );

    plot.resolve_bounds();
    let xs = plot.series()[0].xs();
    assert_eq!(xs.len(), 200);
    assert_eq!(xs[0], 10.0);
    assert!(xs.iter().all(|&x| (10.0..30.0).contains(&x)));
}

#[test]
fn saved_png_matches_plot_size() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("line.png");

    let mut plot = Plot::new(200, 150);
    plot.add_series(Series::xy([0.0, 1.0], [0.0, 1.0]));
    plot.save(&path).expect("png written");

    let image = image::open(&path).expect("png readable").to_rgb8();
    assert_eq!(image.dimensions(), (200, 150));
    assert_eq!(image.get_pixel(1, 1).0, [255, 255, 255]);
    let blue = image
        .pixels()
        .filter(|pixel| pixel.0[2] > 128 && pixel.0[0] < 64 && pixel.0[1] < 64)
        .count();
    assert!(blue > 0);
}
