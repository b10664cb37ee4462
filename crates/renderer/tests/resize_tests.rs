//! Tests for cubic resampling.

use renderer::{resize_cubic, upsample, RenderError};
use scene_common::Raster;
use test_utils::{assert_approx_eq, create_ramp_raster, create_raster_with_nans};

#[test]
fn test_upsample_doubles_dimensions() {
    let src = create_ramp_raster(81, 108);
    let out = upsample(&src, 2.0).unwrap();
    assert_eq!(out.width, 162);
    assert_eq!(out.height, 216);
    assert_eq!(out.len(), 162 * 216);
}

#[test]
fn test_upsample_floors_fractional_size() {
    let src = create_ramp_raster(7, 5);
    let out = upsample(&src, 1.5).unwrap();
    assert_eq!(out.shape(), (7, 10)); // floor(7.5), floor(10.5)
}

#[test]
fn test_upsample_by_three() {
    let src = create_ramp_raster(10, 12);
    let out = upsample(&src, 3.0).unwrap();
    assert_eq!(out.shape(), (36, 30));
}

#[test]
fn test_invalid_scale() {
    let src = create_ramp_raster(4, 4);
    assert!(matches!(upsample(&src, 0.0), Err(RenderError::InvalidSize(_))));
    assert!(matches!(upsample(&src, f64::NAN), Err(RenderError::InvalidSize(_))));
    // 4 * 0.1 floors to zero
    assert!(matches!(upsample(&src, 0.1), Err(RenderError::InvalidSize(_))));
}

#[test]
fn test_same_size_is_identity() {
    let src = create_ramp_raster(13, 9);
    let out = resize_cubic(&src, 13, 9).unwrap();
    assert_eq!(out, src);
}

#[test]
fn test_constant_stays_constant() {
    let src = Raster::filled(20, 15, 1234.0);
    let out = resize_cubic(&src, 37, 29).unwrap();
    for v in &out.data {
        assert_approx_eq!(*v, 1234.0, 1e-3);
    }
}

#[test]
fn test_downsample_keeps_range() {
    let src = create_ramp_raster(64, 64);
    let out = resize_cubic(&src, 16, 16).unwrap();
    let min = out.data.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = out.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    // A linear ramp is reproduced exactly by Catmull-Rom away from the border
    assert!(min >= -1.0);
    assert!(max <= 1001.0);
    assert!(out.get(15, 15).unwrap() > out.get(0, 0).unwrap());
}

#[test]
fn test_integer_upsample_preserves_linear_interior() {
    // Horizontal ramp: value == column index
    let data: Vec<f32> = (0..8).flat_map(|_| (0..8).map(|c| c as f32)).collect();
    let src = Raster::new(data, 8, 8);
    let out = resize_cubic(&src, 16, 16).unwrap();

    // Output column 7 maps to source x = (7 + 0.5) / 2 - 0.5 = 3.25
    assert_approx_eq!(out.get(7, 8).unwrap(), 3.25, 1e-4);
    // Output column 8 maps to 3.75
    assert_approx_eq!(out.get(8, 8).unwrap(), 3.75, 1e-4);
}

#[test]
fn test_nan_pixels_do_not_spread_everywhere() {
    let src = create_raster_with_nans(16, 16, 10.0, &[(0, 0)]);
    let out = resize_cubic(&src, 32, 32).unwrap();
    assert!(out.get(0, 0).unwrap().is_nan());
    assert_approx_eq!(out.get(31, 31).unwrap(), 10.0, 1e-4);
}

#[test]
fn test_empty_target_rejected() {
    let src = create_ramp_raster(4, 4);
    assert!(resize_cubic(&src, 0, 4).is_err());
    assert!(resize_cubic(&src, 4, 0).is_err());
}
