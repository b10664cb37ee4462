//! Configuration for the chronoscope pipeline.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Configuration for one animation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChronoscopeConfig {
    /// Frames per second of the output animation.
    pub fps: u32,

    /// Directory receiving the animation; created if absent.
    pub output_dir: PathBuf,

    /// File name of the animation inside `output_dir`.
    pub output_name: String,

    /// Band whose extent defines the scene footprint, relative to the scene
    /// and without extension.
    pub reference_band: String,

    /// Extension of band files (`jp2`, `tif`).
    pub extension: String,

    /// How frames are brought to a common size.
    pub alignment: AlignmentPolicy,
}

impl Default for ChronoscopeConfig {
    fn default() -> Self {
        Self {
            fps: 5,
            output_dir: PathBuf::from("output"),
            output_name: "scene.gif".to_string(),
            reference_band: "R10m/B02".to_string(),
            extension: "jp2".to_string(),
            alignment: AlignmentPolicy::FirstFrame,
        }
    }
}

impl ChronoscopeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("CHRONOSCOPE_FPS") {
            if let Ok(fps) = val.parse() {
                config.fps = fps;
            }
        }

        if let Ok(val) = std::env::var("CHRONOSCOPE_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("CHRONOSCOPE_OUTPUT_NAME") {
            config.output_name = val;
        }

        if let Ok(val) = std::env::var("CHRONOSCOPE_REFERENCE_BAND") {
            config.reference_band = val;
        }

        if let Ok(val) = std::env::var("CHRONOSCOPE_BAND_EXTENSION") {
            config.extension = val;
        }

        if let Ok(val) = std::env::var("CHRONOSCOPE_FRAME_SIZE") {
            if let Ok(policy) = val.parse() {
                config.alignment = policy;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.fps == 0 {
            return Err("fps must be > 0".to_string());
        }

        if self.output_name.trim().is_empty() {
            return Err("output_name must not be empty".to_string());
        }

        if self.reference_band.trim().is_empty() {
            return Err("reference_band must not be empty".to_string());
        }

        if let AlignmentPolicy::Fixed { width, height } = self.alignment {
            if width == 0 || height == 0 {
                return Err(format!("frame size {}x{} must be non-empty", width, height));
            }
        }

        Ok(())
    }

    /// Reference band path relative to the scene, with extension.
    pub fn reference_band_path(&self) -> String {
        let ext = self.extension.trim_start_matches('.');
        if ext.is_empty() {
            self.reference_band.clone()
        } else {
            format!("{}.{}", self.reference_band, ext)
        }
    }

    /// Full path of the animation file.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_name)
    }
}

/// How frames of different native sizes are made uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlignmentPolicy {
    /// Resize every frame to the first loaded frame's pixel grid.
    #[default]
    FirstFrame,
    /// Resize every frame to a fixed size.
    Fixed { width: usize, height: usize },
}

impl AlignmentPolicy {
    /// Target size given the first frame's size.
    pub fn target_size(&self, first_width: usize, first_height: usize) -> (usize, usize) {
        match *self {
            Self::FirstFrame => (first_width, first_height),
            Self::Fixed { width, height } => (width, height),
        }
    }
}

impl FromStr for AlignmentPolicy {
    type Err = String;

    /// Parse `first` or a `WIDTHxHEIGHT` size such as `320x240`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("first") {
            return Ok(Self::FirstFrame);
        }

        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
        let width = w
            .trim()
            .parse()
            .map_err(|_| format!("invalid width '{}'", w))?;
        let height = h
            .trim()
            .parse()
            .map_err(|_| format!("invalid height '{}'", h))?;
        Ok(Self::Fixed { width, height })
    }
}

impl std::fmt::Display for AlignmentPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstFrame => write!(f, "first"),
            Self::Fixed { width, height } => write!(f, "{}x{}", width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChronoscopeConfig::default();
        assert_eq!(config.fps, 5);
        assert_eq!(config.output_path(), PathBuf::from("output/scene.gif"));
        assert_eq!(config.reference_band_path(), "R10m/B02.jp2");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reference_band_extension() {
        let config = ChronoscopeConfig {
            extension: ".tif".to_string(),
            ..Default::default()
        };
        assert_eq!(config.reference_band_path(), "R10m/B02.tif");
    }

    #[test]
    fn test_validate_rejects_zero_fps() {
        let config = ChronoscopeConfig {
            fps: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_frame_size() {
        let config = ChronoscopeConfig {
            alignment: AlignmentPolicy::Fixed {
                width: 0,
                height: 10,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_alignment_parse() {
        assert_eq!("first".parse::<AlignmentPolicy>(), Ok(AlignmentPolicy::FirstFrame));
        assert_eq!(
            "320x240".parse::<AlignmentPolicy>(),
            Ok(AlignmentPolicy::Fixed {
                width: 320,
                height: 240
            })
        );
        assert!("320".parse::<AlignmentPolicy>().is_err());
        assert!("ax2".parse::<AlignmentPolicy>().is_err());
        assert_eq!(AlignmentPolicy::Fixed { width: 4, height: 3 }.to_string(), "4x3");
    }

    #[test]
    fn test_target_size() {
        assert_eq!(AlignmentPolicy::FirstFrame.target_size(10, 20), (10, 20));
        let fixed = AlignmentPolicy::Fixed {
            width: 5,
            height: 6,
        };
        assert_eq!(fixed.target_size(10, 20), (5, 6));
    }
}
