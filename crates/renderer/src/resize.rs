//! Cubic resampling of raster frames.
//!
//! Output pixel centers are mapped onto the source grid with the
//! half-pixel convention (`src = (dst + 0.5) * ratio - 0.5`), so corners
//! line up with the source extent rather than the outermost pixel centers.
//! Samples outside the grid replicate the border.

use scene_common::Raster;

use crate::error::{RenderError, RenderResult};

/// Resize `src` to exactly `width` x `height` with bicubic interpolation.
///
/// Returns a copy when the size already matches.
pub fn resize_cubic(src: &Raster, width: usize, height: usize) -> RenderResult<Raster> {
    if width == 0 || height == 0 {
        return Err(RenderError::invalid_size(format!(
            "target size {}x{} is empty",
            width, height
        )));
    }
    if src.is_empty() {
        return Err(RenderError::invalid_size("source raster is empty"));
    }
    if src.width == width && src.height == height {
        return Ok(src.clone());
    }

    let ratio_x = src.width as f64 / width as f64;
    let ratio_y = src.height as f64 / height as f64;

    let mut output = Vec::with_capacity(width * height);
    for dy in 0..height {
        let sy = (dy as f64 + 0.5) * ratio_y - 0.5;
        for dx in 0..width {
            let sx = (dx as f64 + 0.5) * ratio_x - 0.5;
            output.push(cubic_interpolate(&src.data, src.width, src.height, sx, sy));
        }
    }

    Ok(Raster::new(output, width, height))
}

/// Scale both axes of `src` by `scale`; the output is `floor(scale * dim)`.
pub fn upsample(src: &Raster, scale: f64) -> RenderResult<Raster> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(RenderError::invalid_size(format!(
            "scale factor {} must be positive",
            scale
        )));
    }
    let width = (src.width as f64 * scale).floor() as usize;
    let height = (src.height as f64 * scale).floor() as usize;
    resize_cubic(src, width, height)
}

/// Bicubic interpolation.
///
/// Uses 16 surrounding points; falls back to bilinear when any is NaN.
fn cubic_interpolate(data: &[f32], width: usize, height: usize, x: f64, y: f64) -> f32 {
    let xi = x.floor() as i64;
    let yi = y.floor() as i64;

    let xf = (x - xi as f64) as f32;
    let yf = (y - yi as f64) as f32;

    let mut values = [[0.0f32; 4]; 4];
    for (j, row) in values.iter_mut().enumerate() {
        let py = clamp_index(yi + j as i64 - 1, height);
        for (i, value) in row.iter_mut().enumerate() {
            let px = clamp_index(xi + i as i64 - 1, width);
            *value = data[py * width + px];
            if value.is_nan() {
                return bilinear_interpolate(data, width, height, x, y);
            }
        }
    }

    let mut row_values = [0.0f32; 4];
    for (out, row) in row_values.iter_mut().zip(values.iter()) {
        *out = cubic_1d(row[0], row[1], row[2], row[3], xf);
    }

    cubic_1d(row_values[0], row_values[1], row_values[2], row_values[3], yf)
}

/// Bilinear interpolation with replicated borders. NaN if any neighbour is NaN.
fn bilinear_interpolate(data: &[f32], width: usize, height: usize, x: f64, y: f64) -> f32 {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let xf = (x - x0 as f64) as f32;
    let yf = (y - y0 as f64) as f32;

    let (c0, c1) = (clamp_index(x0, width), clamp_index(x0 + 1, width));
    let (r0, r1) = (clamp_index(y0, height), clamp_index(y0 + 1, height));

    let v00 = data[r0 * width + c0];
    let v10 = data[r0 * width + c1];
    let v01 = data[r1 * width + c0];
    let v11 = data[r1 * width + c1];

    let top = v00 * (1.0 - xf) + v10 * xf;
    let bottom = v01 * (1.0 - xf) + v11 * xf;
    top * (1.0 - yf) + bottom * yf
}

/// 1D cubic interpolation using Catmull-Rom spline.
fn cubic_1d(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    let a = -0.5 * p0 + 1.5 * p1 - 1.5 * p2 + 0.5 * p3;
    let b = p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3;
    let c = -0.5 * p0 + 0.5 * p2;
    let d = p1;

    a * t3 + b * t2 + c * t + d
}

#[inline]
fn clamp_index(i: i64, len: usize) -> usize {
    i.clamp(0, len as i64 - 1) as usize
}
