//! Spherical (Web) Mercator projection, EPSG:3857.

use std::f64::consts::PI;

use crate::error::{ProjectionError, ProjectionResult};
use crate::Projection;

/// Sphere radius used by EPSG:3857 (the WGS84 semi-major axis).
const EARTH_RADIUS: f64 = 6378137.0;

/// Latitude limit where the square world ends (±85.0511°).
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Web Mercator projection (no parameters).
#[derive(Debug, Clone, Copy, Default)]
pub struct WebMercator;

impl Projection for WebMercator {
    fn forward(&self, lon: f64, lat: f64) -> ProjectionResult<(f64, f64)> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(ProjectionError::NonFinite(lon, lat));
        }
        if lat.abs() > MAX_LATITUDE {
            return Err(ProjectionError::OutOfDomain {
                projection: "Web Mercator".to_string(),
                lon,
                lat,
            });
        }

        let x = EARTH_RADIUS * lon.to_radians();
        let y = EARTH_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjectionError::NonFinite(x, y));
        }

        let lon = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        Ok((lon, lat))
    }
}
