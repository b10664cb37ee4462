//! Frame preparation: one aligned frame per band table entry.

use std::path::Path;

use raster_io::BandReader;
use renderer::resize_cubic;
use scene_common::{BandTable, BoundingBox, Raster};
use tracing::debug;

use crate::config::AlignmentPolicy;
use crate::crop::load_band;
use crate::error::{ChronoscopeError, ChronoscopeResult};

/// Load every band of `bands` from `scene`, in order, and bring all frames to
/// one size.
///
/// 10 m bands are read natively, 20 m bands upsampled by 2 and anything else
/// by 3. Every frame, the first included, is then resized to the size chosen
/// by `alignment`.
pub fn prep_frames(
    reader: &dyn BandReader,
    bands: &BandTable,
    scene: &Path,
    window: &BoundingBox,
    alignment: AlignmentPolicy,
) -> ChronoscopeResult<Vec<Raster>> {
    let mut raw = Vec::with_capacity(bands.len());
    for band in bands {
        let path = scene.join(&band.path);
        raw.push(load_band(reader, &path, window, band.resample_policy())?);
    }

    let Some(first) = raw.first() else {
        return Err(ChronoscopeError::invalid_config("band table is empty"));
    };
    let (width, height) = alignment.target_size(first.width, first.height);
    debug!(frames = raw.len(), width, height, %alignment, "Aligning frames");

    let frames = raw
        .iter()
        .map(|frame| resize_cubic(frame, width, height))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(frames)
}
