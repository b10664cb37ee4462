//! Geographic (lon/lat) coordinates, EPSG:4326.
//!
//! Rasters already in EPSG:4326 need no projection; this only validates input.

use crate::error::{ProjectionError, ProjectionResult};
use crate::Projection;

/// Identity projection for geographic coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Geographic;

impl Geographic {
    fn check(lon: f64, lat: f64) -> ProjectionResult<(f64, f64)> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(ProjectionError::NonFinite(lon, lat));
        }
        if lat.abs() > 90.0 {
            return Err(ProjectionError::OutOfDomain {
                projection: "EPSG:4326".to_string(),
                lon,
                lat,
            });
        }
        Ok((lon, lat))
    }
}

impl Projection for Geographic {
    fn forward(&self, lon: f64, lat: f64) -> ProjectionResult<(f64, f64)> {
        Self::check(lon, lat)
    }

    fn inverse(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        Self::check(x, y)
    }
}
