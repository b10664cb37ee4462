//! Coordinate Reference System types and utilities.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SceneError;

/// CRS codes understood by the reprojection layer.
///
/// Sentinel-2 tiles are delivered in WGS84 / UTM, one zone per tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lon/lat in degrees)
    Wgs84,
    /// Web Mercator (meters)
    WebMercator,
    /// WGS84 / UTM zone (meters); EPSG:326zz north, EPSG:327zz south
    Utm { zone: u8, north: bool },
}

impl CrsCode {
    /// Map an EPSG code to a supported CRS.
    pub fn from_epsg(code: u32) -> Result<Self, SceneError> {
        match code {
            4326 => Ok(CrsCode::Wgs84),
            3857 | 900913 => Ok(CrsCode::WebMercator),
            32601..=32660 => Ok(CrsCode::Utm {
                zone: (code - 32600) as u8,
                north: true,
            }),
            32701..=32760 => Ok(CrsCode::Utm {
                zone: (code - 32700) as u8,
                north: false,
            }),
            _ => Err(SceneError::UnsupportedCrs(format!("EPSG:{}", code))),
        }
    }

    /// Parse a CRS string.
    ///
    /// Accepts formats like:
    /// - "EPSG:32632"
    /// - "epsg:4326"
    /// - "CRS:84" (WGS84 lon/lat)
    pub fn parse(s: &str) -> Result<Self, SceneError> {
        let normalized = s.trim().to_uppercase();
        if normalized == "CRS:84" {
            return Ok(CrsCode::Wgs84);
        }

        let code = normalized
            .strip_prefix("EPSG:")
            .and_then(|c| c.parse::<u32>().ok())
            .ok_or_else(|| SceneError::UnsupportedCrs(s.to_string()))?;
        Self::from_epsg(code)
    }

    /// The EPSG code of this CRS.
    pub fn epsg(&self) -> u32 {
        match self {
            CrsCode::Wgs84 => 4326,
            CrsCode::WebMercator => 3857,
            CrsCode::Utm { zone, north: true } => 32600 + *zone as u32,
            CrsCode::Utm { zone, north: false } => 32700 + *zone as u32,
        }
    }

    /// Check if this is a geographic (lon/lat) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self, CrsCode::Wgs84)
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}
