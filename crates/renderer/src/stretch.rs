//! Dynamic range stretch from raw band values to 8-bit gray.
//!
//! Each frame is scaled so that `mean + 2 * std` maps to 255; brighter
//! values saturate. Statistics are per frame, so consecutive frames are not
//! comparable in absolute brightness.

use scene_common::Raster;

/// Summary statistics over the finite pixels of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub count: usize,
}

impl FrameStats {
    /// Compute mean and population standard deviation, ignoring NaN and
    /// infinite pixels. `None` when no finite pixel exists.
    pub fn compute(data: &[f32]) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0f64;
        for v in data.iter().filter(|v| v.is_finite()) {
            count += 1;
            sum += *v as f64;
        }
        if count == 0 {
            return None;
        }
        let mean = sum / count as f64;

        let var = data
            .iter()
            .filter(|v| v.is_finite())
            .map(|v| {
                let d = *v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / count as f64;

        Some(Self {
            mean,
            std_dev: var.sqrt(),
            count,
        })
    }

    /// Upper clipping bound: `mean + 2 * std`.
    pub fn upper_bound(&self) -> f64 {
        self.mean + 2.0 * self.std_dev
    }
}

/// Stretch a raw frame to 8-bit: `saturate_u8(round(|v * 255 / bound|))`.
///
/// The absolute value is taken after scaling, so a negative bound (a frame
/// of negative values) still yields magnitudes. A zero or non-finite bound
/// (all-zero frame, no finite pixels) maps to all zeros. Non-finite pixels
/// map to 0.
pub fn stretch_to_u8(raster: &Raster) -> Vec<u8> {
    let bound = FrameStats::compute(&raster.data)
        .map(|s| s.upper_bound())
        .filter(|b| b.is_finite() && *b != 0.0);

    let Some(bound) = bound else {
        return vec![0; raster.len()];
    };
    let alpha = 255.0 / bound;

    raster
        .data
        .iter()
        .map(|v| {
            if v.is_finite() {
                (*v as f64 * alpha).abs().round().min(255.0) as u8
            } else {
                0
            }
        })
        .collect()
}
