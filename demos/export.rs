use gpui_fnplot::{Color, MarkerKind, Plot, PlotError, Range, Series};

fn main() -> Result<(), PlotError> {
    let mut poles = Plot::new(700, 500);
    poles.set_y_limits(-10.0, 10.0);
    poles.add_series(Series::function(|x| 1.0 / x, Range::new(-5.0, 5.0), 500));
    poles.save("reciprocal.png")?;

    let mut waves = Plot::builder().size(800, 400).grid(true).build();
    waves.add_series(Series::function(f64::sin, Range::new(0.0, 12.0), 240));
    waves.add_series(
        Series::function(|x| 0.5 * (2.0 * x).cos(), Range::new(0.0, 12.0), 24)
            .with_color(Color::GREEN)
            .with_marker(MarkerKind::Square),
    );
    waves.save("waves.png")?;

    println!("wrote reciprocal.png and waves.png");
    Ok(())
}
