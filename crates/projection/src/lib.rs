//! Coordinate reference system transformations.
//!
//! Implements map projections from scratch without external dependencies.

pub mod error;
pub mod geographic;
pub mod mercator;
pub mod transform;
pub mod utm;

pub use error::{ProjectionError, ProjectionResult};
pub use geographic::Geographic;
pub use mercator::WebMercator;
pub use transform::{projection_for, Reprojector};
pub use utm::TransverseMercator;

/// A map projection between geographic coordinates (lon/lat degrees) and a
/// planar coordinate system.
pub trait Projection {
    /// Geographic (lon, lat) to projected (x, y).
    fn forward(&self, lon: f64, lat: f64) -> ProjectionResult<(f64, f64)>;

    /// Projected (x, y) to geographic (lon, lat).
    fn inverse(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)>;
}
