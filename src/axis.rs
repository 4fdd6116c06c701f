//! Tick placement and tick label formatting.

use std::sync::Arc;

use crate::geom::map;
use crate::view::Range;

/// Formatter for tick labels.
#[derive(Clone)]
pub enum TickFormatter {
    /// Fixed number of decimals.
    Fixed {
        /// Digits after the decimal point.
        decimals: usize,
    },
    /// Custom formatter callback.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl TickFormatter {
    /// Format a value for display.
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Fixed { decimals } => format!("{value:.decimals$}"),
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl Default for TickFormatter {
    fn default() -> Self {
        Self::Fixed { decimals: 2 }
    }
}

impl std::fmt::Debug for TickFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed { decimals } => write!(f, "TickFormatter::Fixed({decimals})"),
            Self::Custom(_) => write!(f, "TickFormatter::Custom(..)"),
        }
    }
}

/// One tick: its pixel coordinate along the axis and the data value there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Pixel coordinate along the axis.
    pub pixel: f32,
    /// Data value at the tick, when the axis range is known.
    pub value: Option<f64>,
}

/// Place `count` evenly spaced ticks from `start` to `end` (both included).
///
/// `range` is mapped onto the pixel span so that `start` carries `range.min`
/// and `end` carries `range.max`. Pass a reversed pixel span for an axis that
/// grows upward.
pub fn layout_ticks(start: f32, end: f32, count: usize, range: Option<Range>) -> Vec<Tick> {
    let step = if count > 1 {
        (end - start) / (count - 1) as f32
    } else {
        0.0
    };
    let range = range.filter(|range| range.is_finite());
    (0..count)
        .map(|i| {
            let pixel = start + step * i as f32;
            let value = range.and_then(|range| {
                (start != end)
                    .then(|| map(pixel as f64, start as f64, end as f64, range.min, range.max))
            });
            Tick { pixel, value }
        })
        .collect()
}
