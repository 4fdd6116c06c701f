use gpui_fnplot::{Color, MarkerKind, Plot, PlotError, Range, Series};

fn main() -> Result<(), PlotError> {
    let mut plot = Plot::builder().size(720, 480).grid(true).build();

    plot.add_series(Series::function(|x| x * x, Range::new(-50.0, 50.0), 400));
    plot.add_series(
        Series::xy([-40.0, -20.0, 0.0, 20.0, 40.0], [400.0, 1200.0, 300.0, 900.0, 2000.0])
            .with_color(Color::RED)
            .with_marker(MarkerKind::Circle)
            .with_line(false),
    );

    // Drag a rectangle to zoom; close the window to return.
    plot.show("basic")?;
    println!("closed at {:?}", plot.bounds());
    Ok(())
}
