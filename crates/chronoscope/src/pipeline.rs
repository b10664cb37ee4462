//! End-to-end pipeline: footprint, window check, frames, GIF.

use std::path::{Path, PathBuf};

use raster_io::{AutoReader, BandReader};
use renderer::SequenceEncoder;
use scene_common::{BandTable, BoundingBox};
use tracing::{debug, info};

use crate::config::ChronoscopeConfig;
use crate::error::{ChronoscopeError, ChronoscopeResult};
use crate::footprint::{footprint_extent, scene_footprint};
use crate::frames::prep_frames;
use crate::window::check_window;

/// Animation builder holding the raster reader, band table and settings.
pub struct Chronoscope<R: BandReader = AutoReader> {
    reader: R,
    bands: BandTable,
    config: ChronoscopeConfig,
}

impl Chronoscope<AutoReader> {
    /// Default Sentinel-2 band table using `config.extension`, read with
    /// [`AutoReader`].
    pub fn new(config: ChronoscopeConfig) -> Self {
        let bands = BandTable::sentinel2_with_extension(&config.extension);
        Self::with_reader(AutoReader::new(), bands, config)
    }
}

impl<R: BandReader> Chronoscope<R> {
    pub fn with_reader(reader: R, bands: BandTable, config: ChronoscopeConfig) -> Self {
        Self {
            reader,
            bands,
            config,
        }
    }

    /// Replace the band table.
    pub fn with_bands(mut self, bands: BandTable) -> Self {
        self.bands = bands;
        self
    }

    pub fn config(&self) -> &ChronoscopeConfig {
        &self.config
    }

    pub fn bands(&self) -> &BandTable {
        &self.bands
    }

    /// Animate `scene` over the geographic `window` and return the GIF path.
    ///
    /// Fails with [`ChronoscopeError::InvalidWindow`] before reading any pixel
    /// when the window is not inside the scene footprint; nothing is written
    /// in that case.
    pub fn run(&self, scene: &Path, window: &BoundingBox) -> ChronoscopeResult<PathBuf> {
        self.config
            .validate()
            .map_err(ChronoscopeError::InvalidConfig)?;
        self.bands.validate()?;

        let reference = scene.join(self.config.reference_band_path());
        let footprint = scene_footprint(&self.reader, &reference)?;
        if !check_window(&footprint, window) {
            let extent = footprint_extent(&footprint)
                .map(|b| b.to_string())
                .unwrap_or_else(|| "<empty>".to_string());
            return Err(ChronoscopeError::invalid_window(window.to_string(), extent));
        }
        debug!(window = %window, "Window inside scene footprint");

        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|e| ChronoscopeError::io(output_dir, e))?;

        let frames = prep_frames(
            &self.reader,
            &self.bands,
            scene,
            window,
            self.config.alignment,
        )?;

        let output = self.config.output_path();
        let path = SequenceEncoder::new(self.config.fps)?.encode(&frames, &output)?;

        info!(
            path = %path.display(),
            frames = frames.len(),
            fps = self.config.fps,
            "Wrote animation"
        );
        Ok(path)
    }
}

/// Animate the default Sentinel-2 bands of `scene` over `window` at `fps`,
/// writing `<output_dir>/scene.gif`.
pub fn chronoscope(
    scene: &Path,
    fps: u32,
    window: &BoundingBox,
    output_dir: &Path,
) -> ChronoscopeResult<PathBuf> {
    let config = ChronoscopeConfig {
        fps,
        output_dir: output_dir.to_path_buf(),
        ..ChronoscopeConfig::default()
    };
    Chronoscope::new(config).run(scene, window)
}
