//! Common test fixtures for chronoscope tests.

/// Geographic windows as `[min_lon, min_lat, max_lon, max_lat]`.
pub mod windows {
    /// Inside the synthetic scene footprint (and a real 32TLR tile).
    pub const VALID: [f64; 4] = [6.0, 46.0, 6.2, 46.2];

    /// The whole globe; never inside a single scene.
    pub const GLOBAL: [f64; 4] = [-180.0, -90.0, 180.0, 90.0];

    /// Crosses the eastern edge of the synthetic scene.
    pub const EAST_OVERLAP: [f64; 4] = [6.4, 46.0, 6.7, 46.2];

    /// Inverted (min > max)
    pub const INVERTED: [f64; 4] = [6.2, 46.2, 6.0, 46.0];
}

/// Geometry of the synthetic scene written by [`crate::SyntheticScene`].
pub mod synthetic {
    /// UTM zone 32 north (EPSG:32632).
    pub const UTM_ZONE: u8 = 32;

    /// Upper-left corner in meters.
    pub const ORIGIN_X: f64 = 250_000.0;
    pub const ORIGIN_Y: f64 = 5_140_000.0;

    /// Scene side length in meters.
    pub const EXTENT_M: f64 = 60_000.0;

    /// Synthetic pixels are this many times coarser than the real GSD,
    /// which keeps fixture files small while preserving the 10/20/60 ratios.
    pub const GSD_FACTOR: f64 = 10.0;

    /// Approximate geographic extent as `[min_lon, min_lat, max_lon, max_lat]`.
    pub const APPROX_FOOTPRINT: [f64; 4] = [5.781, 45.828, 6.529, 46.387];
}

/// Common CRS identifiers.
pub mod crs {
    /// WGS84 geographic
    pub const EPSG_4326: &str = "EPSG:4326";

    /// Web Mercator
    pub const EPSG_3857: &str = "EPSG:3857";

    /// UTM zone 32 north
    pub const EPSG_32632: &str = "EPSG:32632";
}
