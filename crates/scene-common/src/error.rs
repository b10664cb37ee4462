//! Error types for shared scene types.

use thiserror::Error;

/// Result type alias using SceneError.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors raised while interpreting scene-level metadata.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),

    #[error("Invalid band table: {0}")]
    InvalidBandTable(String),

    #[error("Failed to read band table: {0}")]
    BandTableIo(#[from] std::io::Error),

    #[error("Failed to parse band table: {0}")]
    BandTableYaml(#[from] serde_yaml::Error),
}
