//! Band crop loading.

use std::path::Path;

use projection::Reprojector;
use raster_io::BandReader;
use renderer::upsample;
use scene_common::{BoundingBox, Raster, ResamplePolicy};
use tracing::debug;

use crate::error::ChronoscopeResult;

/// Read the pixels of `band` covering the geographic `window`.
///
/// The window's min and max corners are reprojected into the band's native
/// CRS and the pixel window they bound is read. With `resample` set, the crop
/// is upsampled by `scale` on both axes (cubic); otherwise `scale` is ignored.
pub fn load_crop(
    reader: &dyn BandReader,
    band: &Path,
    window: &BoundingBox,
    resample: bool,
    scale: f64,
) -> ChronoscopeResult<Raster> {
    let metadata = reader.metadata(band)?;
    let native = Reprojector::new(metadata.crs)?.corners_to_native(window)?;
    let crop = reader.read_window(band, &native)?;

    debug!(
        band = %band.display(),
        native = %native,
        width = crop.width,
        height = crop.height,
        "Read band crop"
    );

    if !resample {
        return Ok(crop);
    }

    let upsampled = upsample(&crop, scale)?;
    debug!(
        band = %band.display(),
        scale,
        width = upsampled.width,
        height = upsampled.height,
        "Upsampled band crop"
    );
    Ok(upsampled)
}

/// [`load_crop`] driven by a band's resample policy.
pub fn load_band(
    reader: &dyn BandReader,
    band: &Path,
    window: &BoundingBox,
    policy: ResamplePolicy,
) -> ChronoscopeResult<Raster> {
    let (resample, scale) = policy.flag_and_scale();
    load_crop(reader, band, window, resample, scale)
}
