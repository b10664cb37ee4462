//! Band identifiers and the ordered band table.
//!
//! A scene stores one raster per spectral band under a directory named after the
//! band's native resolution (`R10m/B02.jp2`, `R20m/B8A.jp2`, ...). The order of the
//! table is the order of frames in the animation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Native resolution group of a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// 10 m ground sampling distance
    R10m,
    /// 20 m ground sampling distance
    R20m,
    /// 60 m ground sampling distance (not used by the default table)
    R60m,
}

impl Resolution {
    /// Directory name of this group inside a scene.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Resolution::R10m => "R10m",
            Resolution::R20m => "R20m",
            Resolution::R60m => "R60m",
        }
    }

    /// Nominal ground sampling distance in meters.
    pub fn gsd_meters(&self) -> f64 {
        match self {
            Resolution::R10m => 10.0,
            Resolution::R20m => 20.0,
            Resolution::R60m => 60.0,
        }
    }

    /// How crops of this group are brought towards the 10 m grid.
    pub fn resample_policy(&self) -> ResamplePolicy {
        match self {
            Resolution::R10m => ResamplePolicy::Native,
            Resolution::R20m => ResamplePolicy::Upsample { scale: 2.0 },
            Resolution::R60m => ResamplePolicy::Upsample { scale: 3.0 },
        }
    }

    /// Relative path of a band file within a scene, e.g. `R10m/B02.jp2`.
    pub fn band_path(&self, name: &str, extension: &str) -> String {
        format!("{}/{}.{}", self.dir_name(), name, extension.trim_start_matches('.'))
    }
}

/// Resampling applied to a crop right after it is read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ResamplePolicy {
    /// Keep the native crop.
    Native,
    /// Cubic upsampling by `scale` along both axes.
    Upsample { scale: f64 },
}

impl ResamplePolicy {
    /// The (resample flag, scale factor) pair understood by the crop loader.
    ///
    /// The scale of a native crop is reported as 1.0; the loader ignores it.
    pub fn flag_and_scale(&self) -> (bool, f64) {
        match self {
            ResamplePolicy::Native => (false, 1.0),
            ResamplePolicy::Upsample { scale } => (true, *scale),
        }
    }
}

/// One entry of the band table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSpec {
    /// Path of the band file relative to the scene directory.
    pub path: String,
    /// Native resolution group.
    pub resolution: Resolution,
}

impl BandSpec {
    pub fn new(resolution: Resolution, name: &str, extension: &str) -> Self {
        Self {
            path: resolution.band_path(name, extension),
            resolution,
        }
    }

    /// Resample policy derived from the resolution group.
    pub fn resample_policy(&self) -> ResamplePolicy {
        self.resolution.resample_policy()
    }
}

/// Ordered list of bands making up the animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    pub bands: Vec<BandSpec>,
}

/// Default Sentinel-2 L2A frame order: long wavelengths first, holding on B02 at the end.
const SENTINEL2_ORDER: [(Resolution, &str); 12] = [
    (Resolution::R20m, "B12"),
    (Resolution::R20m, "B8A"),
    (Resolution::R20m, "B07"),
    (Resolution::R20m, "B06"),
    (Resolution::R20m, "B05"),
    (Resolution::R10m, "B04"),
    (Resolution::R10m, "B03"),
    (Resolution::R20m, "B08"),
    (Resolution::R10m, "B02"),
    (Resolution::R10m, "B02"),
    (Resolution::R10m, "B02"),
    (Resolution::R10m, "B02"),
];

impl BandTable {
    pub fn new(bands: Vec<BandSpec>) -> Self {
        Self { bands }
    }

    /// The default Sentinel-2 table with JPEG2000 band files.
    pub fn sentinel2() -> Self {
        Self::sentinel2_with_extension("jp2")
    }

    /// The default Sentinel-2 order with a different file extension (e.g. `tif`).
    pub fn sentinel2_with_extension(extension: &str) -> Self {
        Self::new(
            SENTINEL2_ORDER
                .iter()
                .map(|(resolution, name)| BandSpec::new(*resolution, name, extension))
                .collect(),
        )
    }

    /// Parse a YAML band table (`bands: [{ path, resolution }, ...]`).
    pub fn from_yaml_str(yaml: &str) -> SceneResult<Self> {
        let table: BandTable = serde_yaml::from_str(yaml)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a YAML band table from disk.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> SceneResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Validate the table: non-empty, relative paths only.
    pub fn validate(&self) -> SceneResult<()> {
        if self.bands.is_empty() {
            return Err(SceneError::InvalidBandTable("band table is empty".to_string()));
        }

        for band in &self.bands {
            if band.path.trim().is_empty() {
                return Err(SceneError::InvalidBandTable("empty band path".to_string()));
            }
            if Path::new(&band.path).is_absolute() {
                return Err(SceneError::InvalidBandTable(format!(
                    "band path must be relative to the scene: {}",
                    band.path
                )));
            }
        }

        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BandSpec> {
        self.bands.iter()
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self::sentinel2()
    }
}

impl<'a> IntoIterator for &'a BandTable {
    type Item = &'a BandSpec;
    type IntoIter = std::slice::Iter<'a, BandSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.bands.iter()
    }
}
