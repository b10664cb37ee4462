//! Tests for footprint, crop loading and frame preparation.

use chronoscope::{
    check_window, footprint_extent, load_crop, prep_frames, scene_footprint, AlignmentPolicy,
    ChronoscopeError,
};
use raster_io::AutoReader;
use scene_common::{BandSpec, BandTable, BoundingBox, Resolution};
use test_utils::{assert_approx_eq, synthetic, windows, SyntheticScene};

fn valid_window() -> BoundingBox {
    BoundingBox::from_values(&windows::VALID).unwrap()
}

#[test]
fn test_footprint_matches_native_bounds() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let footprint = scene_footprint(&AutoReader::new(), &scene.band_path("R10m/B02.tif")).unwrap();

    // Closed ring of four distinct vertices
    let ring: Vec<_> = footprint.exterior().points().collect();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring[0], ring[4]);
    for i in 0..4 {
        for j in (i + 1)..4 {
            assert_ne!(ring[i], ring[j]);
        }
    }

    let extent = footprint_extent(&footprint).unwrap();
    let [min_lon, min_lat, max_lon, max_lat] = synthetic::APPROX_FOOTPRINT;
    assert_approx_eq!(extent.min_x, min_lon, 1e-3);
    assert_approx_eq!(extent.min_y, min_lat, 1e-3);
    assert_approx_eq!(extent.max_x, max_lon, 1e-3);
    assert_approx_eq!(extent.max_y, max_lat, 1e-3);
}

#[test]
fn test_window_checks_against_scene() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let footprint = scene_footprint(&AutoReader::new(), &scene.band_path("R10m/B02.tif")).unwrap();

    assert!(check_window(&footprint, &valid_window()));
    for bad in [windows::GLOBAL, windows::EAST_OVERLAP, windows::INVERTED] {
        let window = BoundingBox::new(bad[0], bad[1], bad[2], bad[3]);
        assert!(!check_window(&footprint, &window), "{:?} should be rejected", bad);
    }

    // The footprint's own extent touches every edge and is still inside
    let extent = footprint_extent(&footprint).unwrap();
    assert!(check_window(&footprint, &extent));
}

#[test]
fn test_crop_without_resample_ignores_scale() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let reader = AutoReader::new();
    let band = scene.band_path("R10m/B02.tif");

    let a = load_crop(&reader, &band, &valid_window(), false, 1.0).unwrap();
    let b = load_crop(&reader, &band, &valid_window(), false, 7.5).unwrap();
    assert_eq!(a, b);
    assert_eq!((a.width, a.height), (163, 217));
}

#[test]
fn test_crop_upsample_doubles_20m_band() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let reader = AutoReader::new();
    let band = scene.band_path("R20m/B8A.tif");

    let raw = load_crop(&reader, &band, &valid_window(), false, 2.0).unwrap();
    let up = load_crop(&reader, &band, &valid_window(), true, 2.0).unwrap();
    assert_eq!((raw.width, raw.height), (81, 108));
    assert_eq!((up.width, up.height), (raw.width * 2, raw.height * 2));
}

#[test]
fn test_crop_reads_band_values() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let crop = load_crop(
        &AutoReader::new(),
        &scene.band_path("R10m/B04.tif"),
        &valid_window(),
        false,
        1.0,
    )
    .unwrap();
    assert!(crop.data.iter().all(|v| (500.0..=4500.0).contains(v)));
}

#[test]
fn test_frames_share_first_frame_size() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let frames = prep_frames(
        &AutoReader::new(),
        scene.bands(),
        scene.path(),
        &valid_window(),
        AlignmentPolicy::FirstFrame,
    )
    .unwrap();

    assert_eq!(frames.len(), scene.bands().len());
    for frame in &frames {
        assert_eq!(frame.shape(), (216, 162));
    }
}

#[test]
fn test_frames_align_to_10m_first() {
    let bands = BandTable::new(vec![
        BandSpec::new(Resolution::R10m, "B02", "tif"),
        BandSpec::new(Resolution::R20m, "B05", "tif"),
        BandSpec::new(Resolution::R60m, "B09", "tif"),
    ]);
    let scene = SyntheticScene::with_bands(bands.clone()).unwrap();
    let frames = prep_frames(
        &AutoReader::new(),
        &bands,
        scene.path(),
        &valid_window(),
        AlignmentPolicy::FirstFrame,
    )
    .unwrap();

    assert_eq!(frames.len(), 3);
    for frame in &frames {
        assert_eq!(frame.shape(), (217, 163));
    }
}

#[test]
fn test_frames_fixed_size() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let frames = prep_frames(
        &AutoReader::new(),
        scene.bands(),
        scene.path(),
        &valid_window(),
        AlignmentPolicy::Fixed {
            width: 100,
            height: 80,
        },
    )
    .unwrap();
    assert!(frames.iter().all(|f| f.shape() == (80, 100)));
}

#[test]
fn test_empty_band_table() {
    let scene = SyntheticScene::sentinel2().unwrap();
    let result = prep_frames(
        &AutoReader::new(),
        &BandTable::new(vec![]),
        scene.path(),
        &valid_window(),
        AlignmentPolicy::FirstFrame,
    );
    assert!(matches!(result, Err(ChronoscopeError::InvalidConfig(_))));
}

#[test]
fn test_scene_geometry_constants() {
    assert_eq!(synthetic::UTM_ZONE, 32);
    assert_approx_eq!(synthetic::EXTENT_M / synthetic::GSD_FACTOR, 6000.0, 1e-9);
}
