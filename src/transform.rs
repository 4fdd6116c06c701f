//! Coordinate transforms between data space and the drawable interior.
//!
//! Screen coordinates produced here are local to the drawable interior: the
//! origin is its top-left corner, not the corner of the window.

use crate::geom::{Point, ScreenPoint, map};
use crate::view::Range;

/// Transform from data coordinates into drawable-interior pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    x: Range,
    y: Range,
    width: f64,
    height: f64,
}

impl Transform {
    /// Create a transform for the visible ranges and interior size.
    ///
    /// Returns `None` when either range or the pixel size is degenerate, so
    /// no zero-width interval ever reaches [`map`].
    pub fn new(x: Range, y: Range, width: f32, height: f32) -> Option<Self> {
        if !x.is_valid() || !y.is_valid() || width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self {
            x,
            y,
            width: width as f64,
            height: height as f64,
        })
    }

    /// Visible X range.
    pub fn x_range(&self) -> Range {
        self.x
    }

    /// Visible Y range.
    pub fn y_range(&self) -> Range {
        self.y
    }

    /// Interior width in pixels.
    pub fn width(&self) -> f32 {
        self.width as f32
    }

    /// Interior height in pixels.
    pub fn height(&self) -> f32 {
        self.height as f32
    }

    /// Map a data point into interior pixels.
    ///
    /// Pixel y grows downward, so the y axis is flipped. Invalid samples map
    /// to `None`.
    pub fn data_to_screen(&self, point: Point) -> Option<ScreenPoint> {
        if is_invalid_value(point.x) || is_invalid_value(point.y) {
            return None;
        }
        let sx = map(point.x, self.x.min, self.x.max, 0.0, self.width);
        let sy = -map(point.y, self.y.min, self.y.max, -self.height, 0.0);
        Some(ScreenPoint::new(sx as f32, sy as f32))
    }

    /// Map an interior pixel back into data space.
    pub fn screen_to_data(&self, point: ScreenPoint) -> Point {
        let x = map(point.x as f64, 0.0, self.width, self.x.min, self.x.max);
        let y = map(-(point.y as f64), -self.height, 0.0, self.y.min, self.y.max);
        Point::new(x, y)
    }
}

/// NaN and both infinities mark a sample as invalid.
pub fn is_invalid_value(value: f64) -> bool {
    !value.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_transform() -> Transform {
        Transform::new(Range::new(0.0, 10.0), Range::new(0.0, 10.0), 100.0, 50.0)
            .expect("valid transform")
    }

    #[test]
    fn flips_the_y_axis() {
        let transform = unit_transform();
        assert_eq!(
            transform.data_to_screen(Point::new(0.0, 0.0)),
            Some(ScreenPoint::new(0.0, 50.0))
        );
        assert_eq!(
            transform.data_to_screen(Point::new(10.0, 10.0)),
            Some(ScreenPoint::new(100.0, 0.0))
        );
    }

    #[test]
    fn linear_roundtrip() {
        let transform = unit_transform();
        let point = Point::new(5.0, 7.5);
        let screen_point = transform.data_to_screen(point).unwrap();
        let roundtrip = transform.screen_to_data(screen_point);
        assert!((roundtrip.x - point.x).abs() < 1e-4);
        assert!((roundtrip.y - point.y).abs() < 1e-4);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(Transform::new(Range::new(1.0, 1.0), Range::new(0.0, 1.0), 10.0, 10.0).is_none());
        assert!(
            Transform::new(
                Range::new(f64::INFINITY, f64::NEG_INFINITY),
                Range::new(0.0, 1.0),
                10.0,
                10.0
            )
            .is_none()
        );
        assert!(Transform::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0), 0.0, 10.0).is_none());
    }

    #[test]
    fn invalid_samples_do_not_map() {
        let transform = unit_transform();
        assert!(transform.data_to_screen(Point::new(f64::NAN, 1.0)).is_none());
        assert!(transform.data_to_screen(Point::new(1.0, f64::NEG_INFINITY)).is_none());
        assert!(is_invalid_value(f64::INFINITY));
        assert!(!is_invalid_value(-0.0));
    }
}
