//! GDAL-backed reader for formats without a native decoder (JPEG2000 etc).

use std::path::Path;

use gdal::Dataset;
use scene_common::{BoundingBox, CrsCode, GeoTransform, Raster};
use tracing::debug;

use crate::error::{RasterError, RasterResult};
use crate::{BandReader, RasterMetadata};

/// Reads band 1 of any raster GDAL can open.
#[derive(Debug, Clone, Copy, Default)]
pub struct GdalReader;

impl GdalReader {
    pub fn new() -> Self {
        Self
    }

    fn read_metadata(dataset: &Dataset) -> RasterResult<RasterMetadata> {
        let transform = GeoTransform::from_gdal(dataset.geo_transform()?);
        let (width, height) = dataset.raster_size();
        let code = dataset.spatial_ref()?.auth_code()?;
        let epsg = u32::try_from(code)
            .map_err(|_| RasterError::invalid_metadata(format!("invalid EPSG code {}", code)))?;

        Ok(RasterMetadata {
            crs: CrsCode::from_epsg(epsg)?,
            transform,
            width,
            height,
        })
    }
}

impl BandReader for GdalReader {
    fn metadata(&self, path: &Path) -> RasterResult<RasterMetadata> {
        let dataset = Dataset::open(path)?;
        Self::read_metadata(&dataset)
    }

    fn read_window(&self, path: &Path, bounds: &BoundingBox) -> RasterResult<Raster> {
        let dataset = Dataset::open(path)?;
        let metadata = Self::read_metadata(&dataset)?;
        let window = metadata.window(bounds)?;

        debug!(
            path = %path.display(),
            col_off = window.col_off,
            row_off = window.row_off,
            width = window.width,
            height = window.height,
            "Reading GDAL window"
        );

        let band = dataset.rasterband(1)?;
        let buffer = band.read_as::<f32>(
            (window.col_off as isize, window.row_off as isize),
            (window.width, window.height),
            (window.width, window.height),
            None,
        )?;
        Ok(Raster::new(buffer.data, window.width, window.height))
    }
}
