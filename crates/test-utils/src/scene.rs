//! Synthetic Sentinel-2-like scenes written as GeoTIFF bands.
//!
//! Each band lands at its relative path (`R10m/B02.tif`, ...) inside a
//! temporary directory that is removed when the scene is dropped. All
//! resolution groups cover the same UTM 32N square, so crops from different
//! groups line up after upsampling.

use std::path::{Path, PathBuf};

use raster_io::{write_geotiff_u16, RasterError, RasterResult};
use scene_common::{BandTable, CrsCode, GeoTransform, Resolution};
use tempfile::TempDir;

use crate::fixtures::synthetic::{EXTENT_M, GSD_FACTOR, ORIGIN_X, ORIGIN_Y, UTM_ZONE};
use crate::generators::create_reflectance_grid;

/// CRS of every synthetic band.
pub fn scene_crs() -> CrsCode {
    CrsCode::Utm {
        zone: UTM_ZONE,
        north: true,
    }
}

/// Pixel size in meters of a resolution group in the synthetic scene.
pub fn scene_pixel_size(resolution: Resolution) -> f64 {
    resolution.gsd_meters() * GSD_FACTOR
}

/// Raster side length in pixels of a resolution group.
pub fn scene_raster_size(resolution: Resolution) -> usize {
    (EXTENT_M / scene_pixel_size(resolution)).round() as usize
}

/// Geotransform of a resolution group.
pub fn scene_transform(resolution: Resolution) -> GeoTransform {
    let size = scene_pixel_size(resolution);
    GeoTransform::north_up(ORIGIN_X, ORIGIN_Y, size, size)
}

/// A scene directory populated with synthetic GeoTIFF bands.
pub struct SyntheticScene {
    dir: TempDir,
    bands: BandTable,
}

impl SyntheticScene {
    /// The default 12-entry Sentinel-2 band table with `.tif` files.
    pub fn sentinel2() -> RasterResult<Self> {
        Self::with_bands(BandTable::sentinel2_with_extension("tif"))
    }

    /// Write every distinct band file named by `bands`.
    pub fn with_bands(bands: BandTable) -> RasterResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix("chronoscope_scene_")
            .tempdir()
            .map_err(|e| create_error(Path::new("chronoscope_scene_"), e))?;

        for (index, band) in bands.iter().enumerate() {
            let path = dir.path().join(&band.path);
            if path.exists() {
                continue;
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| create_error(parent, e))?;
            }
            write_band(&path, band.resolution, index as u32)?;
        }

        Ok(Self { dir, bands })
    }

    /// Scene root directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Band table the scene was written from.
    pub fn bands(&self) -> &BandTable {
        &self.bands
    }

    /// Absolute path of a band given its relative identifier.
    pub fn band_path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}

/// Write one synthetic band covering the scene square.
pub fn write_band(path: &Path, resolution: Resolution, seed: u32) -> RasterResult<()> {
    let size = scene_raster_size(resolution);
    let data = create_reflectance_grid(size, size, seed);
    write_geotiff_u16(
        path,
        &data,
        size,
        size,
        scene_crs(),
        &scene_transform(resolution),
    )
}

fn create_error(path: &Path, source: std::io::Error) -> RasterError {
    RasterError::Create {
        path: path.to_path_buf(),
        source,
    }
}
