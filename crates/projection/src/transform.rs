//! Reprojection between a raster's native CRS and geographic coordinates.

use scene_common::{BoundingBox, CrsCode};

use crate::error::ProjectionResult;
use crate::geographic::Geographic;
use crate::mercator::WebMercator;
use crate::utm::TransverseMercator;
use crate::Projection;

/// Build the projection implementing `crs`.
pub fn projection_for(crs: CrsCode) -> ProjectionResult<Box<dyn Projection>> {
    Ok(match crs {
        CrsCode::Wgs84 => Box::new(Geographic),
        CrsCode::WebMercator => Box::new(WebMercator),
        CrsCode::Utm { zone, north } => Box::new(TransverseMercator::utm(zone, north)?),
    })
}

/// Converts points between one native CRS and EPSG:4326.
pub struct Reprojector {
    crs: CrsCode,
    projection: Box<dyn Projection>,
}

impl Reprojector {
    pub fn new(crs: CrsCode) -> ProjectionResult<Self> {
        Ok(Self {
            crs,
            projection: projection_for(crs)?,
        })
    }

    /// The native CRS of this reprojector.
    pub fn crs(&self) -> CrsCode {
        self.crs
    }

    /// Native (x, y) to geographic (lon, lat).
    pub fn to_geographic(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        self.projection.inverse(x, y)
    }

    /// Geographic (lon, lat) to native (x, y).
    pub fn to_native(&self, lon: f64, lat: f64) -> ProjectionResult<(f64, f64)> {
        self.projection.forward(lon, lat)
    }

    /// Reproject the min and max corners of a geographic box into the native CRS.
    ///
    /// Only the two corners are transformed, so the result is exact for
    /// axis-aligned mappings and an approximation otherwise.
    pub fn corners_to_native(&self, bbox: &BoundingBox) -> ProjectionResult<BoundingBox> {
        let min = self.to_native(bbox.min_x, bbox.min_y)?;
        let max = self.to_native(bbox.max_x, bbox.max_y)?;
        Ok(BoundingBox::from_corners(min, max))
    }

    /// Reproject the min and max corners of a native box into geographic coordinates.
    pub fn corners_to_geographic(&self, bbox: &BoundingBox) -> ProjectionResult<BoundingBox> {
        let min = self.to_geographic(bbox.min_x, bbox.min_y)?;
        let max = self.to_geographic(bbox.max_x, bbox.max_y)?;
        Ok(BoundingBox::from_corners(min, max))
    }
}

impl std::fmt::Debug for Reprojector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reprojector").field("crs", &self.crs).finish()
    }
}
