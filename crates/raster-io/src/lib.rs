//! Band raster readers.
//!
//! A [`BandReader`] exposes a band's CRS and georeferencing and reads the
//! pixels covering a native-CRS bounding box. GeoTIFF is decoded natively;
//! other formats (Sentinel-2 JPEG2000) go through GDAL when the `gdal`
//! feature is enabled.

pub mod error;
#[cfg(feature = "gdal")]
pub mod gdal_reader;
pub mod geotiff;
pub mod window;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use scene_common::{BoundingBox, CrsCode, GeoTransform, Raster};
use tracing::debug;

pub use error::{RasterError, RasterResult};
#[cfg(feature = "gdal")]
pub use gdal_reader::GdalReader;
pub use geotiff::{write_geotiff_u16, GeoTiffReader};
pub use window::PixelWindow;

/// Georeferencing of a single-band raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterMetadata {
    pub crs: CrsCode,
    pub transform: GeoTransform,
    pub width: usize,
    pub height: usize,
}

impl RasterMetadata {
    /// Full extent in native CRS units.
    pub fn bounds(&self) -> BoundingBox {
        self.transform.bounds(self.width, self.height)
    }

    /// Pixel window covering native-CRS `bounds`.
    pub fn window(&self, bounds: &BoundingBox) -> RasterResult<PixelWindow> {
        PixelWindow::from_bounds(bounds, &self.transform, self.width, self.height)
    }
}

/// Source of band rasters.
pub trait BandReader {
    /// Read CRS, transform and size without decoding pixels.
    fn metadata(&self, path: &Path) -> RasterResult<RasterMetadata>;

    /// Read the pixels covering `bounds`, given in the raster's native CRS.
    fn read_window(&self, path: &Path, bounds: &BoundingBox) -> RasterResult<Raster>;
}

/// Picks a reader from the file extension.
///
/// `.tif`/`.tiff` use [`GeoTiffReader`]. Any other extension is read with
/// GDAL when the `gdal` feature is enabled and the file exists. Otherwise a
/// GeoTIFF with the same stem (`R10m/B02.jp2` -> `R10m/B02.tif`) is used if
/// present, so scenes converted to GeoTIFF work with the default band table.
/// Failing both, the error is [`RasterError::UnsupportedFormat`] (or the
/// GDAL open error with the feature enabled).
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoReader {
    geotiff: GeoTiffReader,
    #[cfg(feature = "gdal")]
    gdal: GdalReader,
}

impl AutoReader {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve<'a>(&self, path: &'a Path) -> RasterResult<(Cow<'a, Path>, &dyn BandReader)> {
        if is_geotiff(path) {
            return Ok((Cow::Borrowed(path), &self.geotiff));
        }

        let gdal = self.gdal_reader();
        if let Some(gdal) = gdal {
            if path.exists() {
                return Ok((Cow::Borrowed(path), gdal));
            }
        }

        if let Some(sibling) = geotiff_sibling(path) {
            debug!(
                requested = %path.display(),
                using = %sibling.display(),
                "Reading GeoTIFF in place of band file"
            );
            return Ok((Cow::Owned(sibling), &self.geotiff));
        }

        match gdal {
            Some(gdal) => Ok((Cow::Borrowed(path), gdal)),
            None => Err(RasterError::UnsupportedFormat(format!(
                "{} (no GeoTIFF alongside it; build with the `gdal` feature to read .{} files)",
                path.display(),
                extension(path)
            ))),
        }
    }

    #[cfg(feature = "gdal")]
    fn gdal_reader(&self) -> Option<&dyn BandReader> {
        Some(&self.gdal)
    }

    #[cfg(not(feature = "gdal"))]
    fn gdal_reader(&self) -> Option<&dyn BandReader> {
        None
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

fn is_geotiff(path: &Path) -> bool {
    matches!(extension(path).as_str(), "tif" | "tiff")
}

/// Existing `.tif` or `.tiff` file with the same stem as `path`.
fn geotiff_sibling(path: &Path) -> Option<PathBuf> {
    ["tif", "tiff"]
        .iter()
        .map(|ext| path.with_extension(ext))
        .find(|candidate| candidate.is_file())
}

impl BandReader for AutoReader {
    fn metadata(&self, path: &Path) -> RasterResult<RasterMetadata> {
        let (path, reader) = self.resolve(path)?;
        reader.metadata(&path)
    }

    fn read_window(&self, path: &Path, bounds: &BoundingBox) -> RasterResult<Raster> {
        let (path, reader) = self.resolve(path)?;
        reader.read_window(&path, bounds)
    }
}
