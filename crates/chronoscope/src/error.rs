//! Error types for the chronoscope pipeline.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while producing an animation.
#[derive(Error, Debug)]
pub enum ChronoscopeError {
    /// The window is not fully inside the scene footprint.
    #[error("window {window} is not inside the scene footprint {footprint}")]
    InvalidWindow { window: String, footprint: String },

    /// Configuration or band table cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filesystem error outside raster I/O.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Band table or CRS error.
    #[error(transparent)]
    Scene(#[from] scene_common::SceneError),

    /// Reprojection error.
    #[error("reprojection failed: {0}")]
    Projection(#[from] projection::ProjectionError),

    /// Raster read error.
    #[error("raster read failed: {0}")]
    Raster(#[from] raster_io::RasterError),

    /// Resampling or encoding error.
    #[error("rendering failed: {0}")]
    Render(#[from] renderer::RenderError),
}

impl ChronoscopeError {
    /// Create an InvalidWindow error.
    pub fn invalid_window(window: impl Into<String>, footprint: impl Into<String>) -> Self {
        Self::InvalidWindow {
            window: window.into(),
            footprint: footprint.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an Io error.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for chronoscope operations.
pub type ChronoscopeResult<T> = std::result::Result<T, ChronoscopeError>;
