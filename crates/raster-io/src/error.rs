//! Error types for raster I/O.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while opening or reading band rasters.
#[derive(Error, Debug)]
pub enum RasterError {
    /// The raster file could not be opened.
    #[error("failed to open raster {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The raster file could not be created.
    #[error("failed to create raster {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TIFF decoding/encoding error.
    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// GDAL error.
    #[cfg(feature = "gdal")]
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    /// A required GeoTIFF tag is missing.
    #[error("{path}: missing GeoTIFF tag {tag}")]
    MissingGeoTag { path: PathBuf, tag: &'static str },

    /// Georeferencing metadata is present but unusable.
    #[error("invalid raster metadata: {0}")]
    InvalidMetadata(String),

    /// CRS not supported by the reprojection layer.
    #[error(transparent)]
    Crs(#[from] scene_common::SceneError),

    /// No reader is available for this file type.
    #[error("unsupported raster format: {0}")]
    UnsupportedFormat(String),

    /// The raster layout (samples, bit depth) is not supported.
    #[error("unsupported raster layout: {0}")]
    UnsupportedLayout(String),

    /// The requested window does not overlap the raster.
    #[error("requested window {requested} does not overlap raster bounds {raster}")]
    EmptyWindow { requested: String, raster: String },
}

impl RasterError {
    /// Create an Open error.
    pub fn open(path: &Path, source: std::io::Error) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a MissingGeoTag error.
    pub fn missing_tag(path: &Path, tag: &'static str) -> Self {
        Self::MissingGeoTag {
            path: path.to_path_buf(),
            tag,
        }
    }

    /// Create an InvalidMetadata error.
    pub fn invalid_metadata(msg: impl Into<String>) -> Self {
        Self::InvalidMetadata(msg.into())
    }
}

/// Result type for raster operations.
pub type RasterResult<T> = std::result::Result<T, RasterError>;
