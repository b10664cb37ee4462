//! Error types for frame rendering.

use thiserror::Error;

/// Errors that can occur while resampling, stretching or encoding frames.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Target size or scale factor cannot produce a raster.
    #[error("invalid size: {0}")]
    InvalidSize(String),

    /// Frame rate must be at least one frame per second.
    #[error("invalid frame rate {0}: must be greater than zero")]
    InvalidFrameRate(u32),

    /// Nothing to encode.
    #[error("no frames to encode")]
    NoFrames,

    /// All frames of a sequence must share one size.
    #[error("frame {index} is {found_width}x{found_height}, expected {width}x{height}")]
    DimensionMismatch {
        index: usize,
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Png(String),

    /// Image decoding or GIF encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Create an InvalidSize error.
    pub fn invalid_size(msg: impl Into<String>) -> Self {
        Self::InvalidSize(msg.into())
    }
}

/// Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
