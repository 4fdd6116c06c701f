//! gpui_fnplot plots functions and sampled data on a 2D Cartesian grid.
//! Plots render to PNG files or, with the `gpui` feature, to a window where
//! dragging a rectangle zooms into it.

#![forbid(unsafe_code)]

pub mod axis;
pub mod config;
pub mod error;
pub mod geom;
pub mod interaction;
pub mod plot;
pub mod render;
pub mod series;
pub mod style;
pub mod transform;
pub mod view;

#[cfg(feature = "gpui")]
mod gpui_backend;

pub use axis::{Tick, TickFormatter, layout_ticks};
pub use config::{Margins, PlotConfig};
pub use error::PlotError;
pub use geom::{Point, ScreenPoint, ScreenRect, clamp, linspace, map};
pub use interaction::{Gesture, InputEvent, MouseButton, SessionRegistry};
pub use plot::{Plot, PlotBuilder};
pub use render::{DrawCommand, ImageSurface, RenderList, RenderPass, Surface};
pub use series::{FunctionSource, SampleFn, Series};
pub use style::{Color, FontSpec, MarkerKind, SeriesStyle, Theme};
pub use transform::{Transform, is_invalid_value};
pub use view::{AxisLimits, Bounds, Range};
