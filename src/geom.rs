//! Geometric primitives and scalar helpers used by the plotting pipeline.
//!
//! [`Point`] lives in data space. [`ScreenPoint`] and [`ScreenRect`] live in
//! pixel space: origin at the top-left corner, y growing downward.

/// A point in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X value in data coordinates.
    pub x: f64,
    /// Y value in data coordinates.
    pub y: f64,
}

impl Point {
    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Shift the point by an offset.
    pub fn offset(self, by: ScreenPoint) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_origin_size(origin: ScreenPoint, width: f32, height: f32) -> Self {
        Self::new(origin, ScreenPoint::new(origin.x + width, origin.y + height))
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether a point lies inside the rectangle (edges included).
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Clamp a point onto the rectangle.
    pub fn clamp_point(&self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            clamp(point.x as f64, self.min.x as f64, self.max.x as f64) as f32,
            clamp(point.y as f64, self.min.y as f64, self.max.y as f64) as f32,
        )
    }

    /// Reorder corners so `min` is the top-left and `max` the bottom-right.
    pub fn normalized(&self) -> Self {
        Self::new(
            ScreenPoint::new(self.min.x.min(self.max.x), self.min.y.min(self.max.y)),
            ScreenPoint::new(self.min.x.max(self.max.x), self.min.y.max(self.max.y)),
        )
    }

    /// Shift the rectangle by an offset.
    pub fn offset(&self, by: ScreenPoint) -> Self {
        Self::new(self.min.offset(by), self.max.offset(by))
    }

    /// Intersection of two rectangles, if they overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let rect = Self::new(
            ScreenPoint::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            ScreenPoint::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        );
        (rect.width() >= 0.0 && rect.height() >= 0.0).then_some(rect)
    }
}

/// Affine map of `x` from `[imin, imax]` onto `[omin, omax]`.
///
/// No clamping is applied and `imin == imax` divides by zero; callers must
/// hand in a non-degenerate input interval.
pub fn map(x: f64, imin: f64, imax: f64, omin: f64, omax: f64) -> f64 {
    (x - imin) / (imax - imin) * (omax - omin) + omin
}

/// Produce `points` samples starting at `from` with step `(to - from) / points`.
///
/// The last sample is `from + (points - 1) * step`, so `to` itself is never
/// reached.
pub fn linspace(from: f64, to: f64, points: usize) -> Vec<f64> {
    let step = (to - from) / points as f64;
    let mut value = from;
    let mut out = Vec::with_capacity(points);
    for _ in 0..points {
        out.push(value);
        value += step;
    }
    out
}

/// Clamp `x` into `[a, b]`.
pub fn clamp(x: f64, a: f64, b: f64) -> f64 {
    x.min(b).max(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_hits_endpoints_and_midpoint() {
        assert_eq!(map(2.0, 2.0, 6.0, -10.0, 10.0), -10.0);
        assert_eq!(map(6.0, 2.0, 6.0, -10.0, 10.0), 10.0);
        assert_eq!(map(4.0, 2.0, 6.0, -10.0, 10.0), 0.0);
    }

    #[test]
    fn map_handles_inverted_output() {
        assert_eq!(map(0.0, 0.0, 1.0, 100.0, 0.0), 100.0);
        assert_eq!(map(1.0, 0.0, 1.0, 100.0, 0.0), 0.0);
    }

    #[test]
    fn linspace_stops_one_step_short() {
        let samples = linspace(0.0, 1.0, 4);
        assert_eq!(samples, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn linspace_counts_and_spacing() {
        let samples = linspace(-3.0, 5.0, 16);
        assert_eq!(samples.len(), 16);
        assert_eq!(samples[0], -3.0);
        let step = 8.0 / 16.0;
        for pair in samples.windows(2) {
            assert!((pair[1] - pair[0] - step).abs() < 1e-12);
        }
        assert!((samples[15] - (-3.0 + 15.0 * step)).abs() < 1e-12);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn clamp_limits_both_sides() {
        assert_eq!(clamp(-1.0, 0.0, 2.0), 0.0);
        assert_eq!(clamp(3.0, 0.0, 2.0), 2.0);
        assert_eq!(clamp(1.5, 0.0, 2.0), 1.5);
    }

    #[test]
    fn rect_normalizes_and_clamps() {
        let rect = ScreenRect::new(ScreenPoint::new(10.0, 8.0), ScreenPoint::new(2.0, 1.0));
        let rect = rect.normalized();
        assert_eq!(rect.min, ScreenPoint::new(2.0, 1.0));
        assert_eq!(rect.max, ScreenPoint::new(10.0, 8.0));
        assert_eq!(
            rect.clamp_point(ScreenPoint::new(20.0, -4.0)),
            ScreenPoint::new(10.0, 1.0)
        );
        assert!(rect.contains(ScreenPoint::new(2.0, 8.0)));
        assert!(!rect.contains(ScreenPoint::new(1.9, 8.0)));
    }
}
