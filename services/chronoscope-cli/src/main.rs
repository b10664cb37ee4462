//! Chronoscope command line.
//!
//! Crops every band of a Sentinel-2 scene to a geographic window and writes
//! the sequence as an animated GIF. The output path is printed on success.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chronoscope::{AlignmentPolicy, Chronoscope, ChronoscopeConfig};
use clap::Parser;
use scene_common::{BandTable, BoundingBox};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "chronoscope")]
#[command(about = "Animate the spectral bands of a Sentinel-2 scene as a GIF")]
struct Args {
    /// Scene directory containing R10m/ and R20m/ band folders
    #[arg(short, long)]
    scene: PathBuf,

    /// Geographic window in degrees
    #[arg(
        short,
        long,
        required = true,
        num_args = 4,
        value_names = ["MINX", "MINY", "MAXX", "MAXY"],
        allow_negative_numbers = true
    )]
    window: Vec<f64>,

    /// Frames per second [default: 5, env: CHRONOSCOPE_FPS]
    #[arg(short = 'f', long)]
    frame_rate: Option<u32>,

    /// Output directory [default: output, env: CHRONOSCOPE_OUTPUT_DIR]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML band table replacing the default Sentinel-2 order
    #[arg(long)]
    bands: Option<PathBuf>,

    /// Band file extension [default: jp2, env: CHRONOSCOPE_BAND_EXTENSION]
    #[arg(long)]
    extension: Option<String>,

    /// Band defining the scene footprint, relative and without extension
    /// [default: R10m/B02, env: CHRONOSCOPE_REFERENCE_BAND]
    #[arg(long)]
    reference_band: Option<String>,

    /// Fixed frame size (WIDTHxHEIGHT) instead of the first frame's size
    /// [env: CHRONOSCOPE_FRAME_SIZE]
    #[arg(long)]
    frame_size: Option<AlignmentPolicy>,

    /// Log level
    #[arg(long, default_value = "info", env = "CHRONOSCOPE_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    /// Environment configuration with the flags given on the command line
    /// layered on top.
    fn config(&self) -> ChronoscopeConfig {
        self.apply(ChronoscopeConfig::from_env())
    }

    fn apply(&self, mut config: ChronoscopeConfig) -> ChronoscopeConfig {
        if let Some(fps) = self.frame_rate {
            config.fps = fps;
        }
        if let Some(dir) = &self.output {
            config.output_dir = dir.clone();
        }
        if let Some(ext) = &self.extension {
            config.extension = ext.clone();
        }
        if let Some(band) = &self.reference_band {
            config.reference_band = band.clone();
        }
        if let Some(policy) = self.frame_size {
            config.alignment = policy;
        }
        config
    }

    fn band_table(&self, config: &ChronoscopeConfig) -> Result<BandTable> {
        match &self.bands {
            Some(path) => BandTable::from_yaml_file(path)
                .with_context(|| format!("failed to load band table {}", path.display())),
            None => Ok(BandTable::sentinel2_with_extension(&config.extension)),
        }
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs)?;

    let window = BoundingBox::from_values(&args.window).context("invalid --window")?;
    let config = args.config();
    let bands = args.band_table(&config)?;
    debug!(?config, bands = bands.len(), scene = %args.scene.display(), "Parsed arguments");

    let path = Chronoscope::new(config)
        .with_bands(bands)
        .run(&args.scene, &window)
        .with_context(|| format!("failed to animate scene {}", args.scene.display()))?;

    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_negative_window() {
        let args = Args::try_parse_from([
            "chronoscope",
            "-s",
            "scene",
            "-w",
            "-43.3",
            "-23.0",
            "-43.1",
            "-22.8",
        ])
        .unwrap();
        assert_eq!(args.window, vec![-43.3, -23.0, -43.1, -22.8]);
        assert!(BoundingBox::from_values(&args.window).is_ok());
    }

    #[test]
    fn test_window_requires_four_values() {
        let result = Args::try_parse_from(["chronoscope", "-s", "scene", "-w", "6.0", "46.0", "6.2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_scene_and_window_required() {
        assert!(Args::try_parse_from(["chronoscope", "-w", "6", "46", "6.2", "46.2"]).is_err());
        assert!(Args::try_parse_from(["chronoscope", "-s", "scene"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "chronoscope",
            "--scene",
            "scene",
            "--window",
            "6.0",
            "46.0",
            "6.2",
            "46.2",
            "--frame-rate",
            "3",
            "--output",
            "out",
            "--extension",
            "tif",
            "--frame-size",
            "320x240",
        ])
        .unwrap();

        let config = args.apply(ChronoscopeConfig::default());
        assert_eq!(config.fps, 3);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.reference_band_path(), "R10m/B02.tif");
        assert_eq!(
            config.alignment,
            AlignmentPolicy::Fixed {
                width: 320,
                height: 240
            }
        );
        let bands = args.band_table(&config).unwrap();
        assert_eq!(bands.len(), 12);
        assert!(bands.iter().all(|b| b.path.ends_with(".tif")));
    }

    #[test]
    fn test_missing_flags_keep_config() {
        let args =
            Args::try_parse_from(["chronoscope", "-s", "scene", "-w", "6.0", "46.0", "6.2", "46.2"])
                .unwrap();
        let base = ChronoscopeConfig {
            fps: 7,
            output_dir: PathBuf::from("frames"),
            output_name: "bands.gif".to_string(),
            reference_band: "R10m/B03".to_string(),
            extension: "tiff".to_string(),
            alignment: AlignmentPolicy::Fixed {
                width: 64,
                height: 48,
            },
        };

        let config = args.apply(base.clone());
        assert_eq!(config, base);
        let bands = args.band_table(&config).unwrap();
        assert!(bands.iter().all(|b| b.path.ends_with(".tiff")));
    }

    #[test]
    fn test_bad_frame_size() {
        let result = Args::try_parse_from([
            "chronoscope",
            "-s",
            "scene",
            "-w",
            "6.0",
            "46.0",
            "6.2",
            "46.2",
            "--frame-size",
            "wide",
        ]);
        assert!(result.is_err());
    }
}
