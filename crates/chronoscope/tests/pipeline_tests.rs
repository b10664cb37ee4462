//! End-to-end tests on synthetic GeoTIFF scenes.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chronoscope::{
    scene_footprint, AlignmentPolicy, Chronoscope, ChronoscopeConfig, ChronoscopeError,
};
use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use raster_io::{AutoReader, RasterError};
use scene_common::{BandSpec, BandTable, BoundingBox, Resolution};
use test_utils::{temp_test_dir_with_prefix, windows, SyntheticScene};

fn config(output_dir: &Path, fps: u32) -> ChronoscopeConfig {
    ChronoscopeConfig {
        fps,
        output_dir: output_dir.to_path_buf(),
        extension: "tif".to_string(),
        ..ChronoscopeConfig::default()
    }
}

fn window(values: [f64; 4]) -> BoundingBox {
    BoundingBox::from_values(&values).unwrap()
}

fn decode_gif(path: &Path) -> Vec<image::Frame> {
    let file = BufReader::new(File::open(path).unwrap());
    GifDecoder::new(file)
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

#[test]
fn test_in_bounds_window_produces_gif() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let out = temp_test_dir_with_prefix("chronoscope_out_");
    let output_dir = out.path().join("output");

    let path = Chronoscope::new(config(&output_dir, 3))
        .run(scene.path(), &window(windows::VALID))
        .unwrap();

    assert_eq!(path, output_dir.join("scene.gif"));
    assert!(path.exists());

    let frames = decode_gif(&path);
    assert_eq!(frames.len(), 12);
    // First band is a 20 m band: 81x108 crop upsampled to 162x216
    for frame in &frames {
        assert_eq!(frame.buffer().dimensions(), (162, 216));
    }
}

#[test]
fn test_global_window_is_rejected() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let out = temp_test_dir_with_prefix("chronoscope_out_");
    let output_dir = out.path().join("output");

    let result = Chronoscope::new(config(&output_dir, 5)).run(scene.path(), &window(windows::GLOBAL));

    match result {
        Err(ChronoscopeError::InvalidWindow { window, footprint }) => {
            assert!(window.contains("-180"));
            assert!(footprint.starts_with('['));
        }
        other => panic!("expected InvalidWindow, got {:?}", other),
    }
    assert!(!output_dir.join("scene.gif").exists());
    assert!(!output_dir.exists());
}

#[test]
fn test_partially_outside_window_is_rejected() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let out = temp_test_dir_with_prefix("chronoscope_out_");

    let result = Chronoscope::new(config(out.path(), 5))
        .run(scene.path(), &window(windows::EAST_OVERLAP));
    assert!(matches!(result, Err(ChronoscopeError::InvalidWindow { .. })));
}

#[test]
fn test_rerun_overwrites_output() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let out = temp_test_dir_with_prefix("chronoscope_out_");
    let pipeline = Chronoscope::new(config(out.path(), 5));

    let first = pipeline.run(scene.path(), &window(windows::VALID)).unwrap();
    let bytes = std::fs::read(&first).unwrap();
    let second = pipeline.run(scene.path(), &window(windows::VALID)).unwrap();

    assert_eq!(first, second);
    assert_eq!(bytes, std::fs::read(&second).unwrap());
}

#[test]
fn test_custom_band_table_and_fixed_size() {
    let bands = BandTable::new(vec![
        BandSpec::new(Resolution::R10m, "B02", "tif"),
        BandSpec::new(Resolution::R20m, "B8A", "tif"),
        BandSpec::new(Resolution::R60m, "B01", "tif"),
    ]);
    let scene = SyntheticScene::with_bands(bands.clone()).unwrap();
    let out = temp_test_dir_with_prefix("chronoscope_out_");

    let mut cfg = config(out.path(), 2);
    cfg.alignment = AlignmentPolicy::Fixed {
        width: 64,
        height: 48,
    };
    cfg.output_name = "custom.gif".to_string();

    let path = Chronoscope::new(cfg)
        .with_bands(bands)
        .run(scene.path(), &window(windows::VALID))
        .unwrap();

    assert_eq!(path.file_name().unwrap(), "custom.gif");
    let frames = decode_gif(&path);
    assert_eq!(frames.len(), 3);
    for frame in &frames {
        assert_eq!(frame.buffer().dimensions(), (64, 48));
    }
}

#[test]
fn test_missing_band_fails_without_output() {
    let scene = SyntheticScene::with_bands(BandTable::new(vec![BandSpec::new(
        Resolution::R10m,
        "B02",
        "tif",
    )]))
    .unwrap();
    let out = temp_test_dir_with_prefix("chronoscope_out_");

    // Default table also names R20m bands, which this scene lacks
    let result = Chronoscope::new(config(out.path(), 5)).run(scene.path(), &window(windows::VALID));
    assert!(matches!(
        result,
        Err(ChronoscopeError::Raster(RasterError::Open { .. }))
    ));
    assert!(!out.path().join("scene.gif").exists());
}

#[test]
fn test_zero_fps_is_config_error() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let out = temp_test_dir_with_prefix("chronoscope_out_");

    let result = Chronoscope::new(config(out.path(), 0)).run(scene.path(), &window(windows::VALID));
    assert!(matches!(result, Err(ChronoscopeError::InvalidConfig(_))));
}

#[test]
fn test_default_jp2_table_reads_geotiff_scene() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let out = temp_test_dir_with_prefix("chronoscope_out_");

    let path = chronoscope::chronoscope(scene.path(), 3, &window(windows::VALID), out.path()).unwrap();

    assert_eq!(path, out.path().join("scene.gif"));
    let frames = decode_gif(&path);
    assert_eq!(frames.len(), 12);
    assert!(frames
        .iter()
        .all(|f| f.buffer().dimensions() == (162, 216)));
}

#[test]
fn test_footprint_is_idempotent() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let reader = AutoReader::new();
    let band = scene.band_path("R10m/B02.tif");

    let a = scene_footprint(&reader, &band).unwrap();
    let b = scene_footprint(&reader, &band).unwrap();
    assert_eq!(a, b);
}

#[cfg(feature = "gdal")]
#[test]
fn test_real_jp2_scene() {
    let scene = test_utils::require_test_scene!();
    let out = temp_test_dir_with_prefix("chronoscope_real_");

    let footprint = scene_footprint(&AutoReader::new(), &scene.join("R10m/B02.jp2")).unwrap();
    let extent = chronoscope::footprint_extent(&footprint).unwrap();
    // Central tenth of the scene
    let window = BoundingBox::new(
        extent.min_x + extent.width() * 0.45,
        extent.min_y + extent.height() * 0.45,
        extent.min_x + extent.width() * 0.55,
        extent.min_y + extent.height() * 0.55,
    );

    let path = chronoscope::chronoscope(&scene, 4, &window, out.path()).unwrap();
    assert_eq!(decode_gif(&path).len(), 12);
}
