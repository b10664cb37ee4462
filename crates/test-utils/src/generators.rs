//! Test data generators for synthetic band rasters.
//!
//! Deterministic patterns: the same arguments always give the same data.

use scene_common::Raster;

/// Creates reflectance-like digital numbers for one band.
///
/// Values stay within 500..4500, the usual range of Sentinel-2 L2A surface
/// reflectance (scaled by 10000) over land. A smooth gradient is overlaid
/// with deterministic texture so that each `seed` gives a distinct band.
pub fn create_reflectance_grid(width: usize, height: usize, seed: u32) -> Vec<u16> {
    let mut data = Vec::with_capacity(width * height);
    let base = 1000.0 + (seed % 8) as f32 * 300.0;
    for row in 0..height {
        for col in 0..width {
            let x_factor = col as f32 / width.max(1) as f32;
            let y_factor = row as f32 / height.max(1) as f32;
            let texture = (simple_hash(col as u32, row as u32, seed) % 400) as f32;
            let value = base + x_factor * 600.0 + y_factor * 400.0 + texture;
            data.push(value.clamp(500.0, 4500.0) as u16);
        }
    }
    data
}

/// A smooth diagonal ramp in `[0, 1000)`, handy for resampling tests.
pub fn create_ramp_raster(width: usize, height: usize) -> Raster {
    let mut data = Vec::with_capacity(width * height);
    let span = (width + height).max(1) as f32;
    for row in 0..height {
        for col in 0..width {
            data.push((col + row) as f32 / span * 1000.0);
        }
    }
    Raster::new(data, width, height)
}

/// Creates a raster with NaN values at specified `(col, row)` positions,
/// `fill` elsewhere.
pub fn create_raster_with_nans(
    width: usize,
    height: usize,
    fill: f32,
    nan_positions: &[(usize, usize)],
) -> Raster {
    let mut raster = Raster::filled(width, height, fill);
    for &(col, row) in nan_positions {
        if col < width && row < height {
            raster.data[row * width + col] = f32::NAN;
        }
    }
    raster
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
