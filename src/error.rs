//! Errors surfaced by export and window sessions.
//!
//! Bad input series and invalid samples are not errors: the former are
//! ignored at registration, the latter are drawn as gaps.

/// Failures that end an export or a window session.
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("draw error: {0}")]
    Draw(String),
    #[error("cannot allocate a {width}x{height} surface")]
    InvalidSurfaceSize { width: u32, height: u32 },
    #[error("window error: {0}")]
    Window(String),
    #[error("window support is not compiled in (enable the `gpui` feature)")]
    WindowUnavailable,
}
