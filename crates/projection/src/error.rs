//! Error types for projections.

use thiserror::Error;

/// Errors raised by forward/inverse projection.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    /// Input coordinates are NaN or infinite.
    #[error("non-finite coordinate ({0}, {1})")]
    NonFinite(f64, f64),

    /// Geographic point lies outside the domain of the projection.
    #[error("point (lon {lon}, lat {lat}) is outside the domain of {projection}")]
    OutOfDomain {
        projection: String,
        lon: f64,
        lat: f64,
    },

    /// UTM zone number outside 1..=60.
    #[error("invalid UTM zone {0}, expected 1-60")]
    InvalidZone(u8),
}

/// Result type for projection operations.
pub type ProjectionResult<T> = Result<T, ProjectionError>;
