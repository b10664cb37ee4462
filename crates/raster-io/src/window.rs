//! Pixel windows derived from native-CRS bounds.

use scene_common::{BoundingBox, GeoTransform};

use crate::error::{RasterError, RasterResult};

/// An integer pixel window inside a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    pub col_off: usize,
    pub row_off: usize,
    pub width: usize,
    pub height: usize,
}

impl PixelWindow {
    pub fn new(col_off: usize, row_off: usize, width: usize, height: usize) -> Self {
        Self {
            col_off,
            row_off,
            width,
            height,
        }
    }

    /// Compute the pixel window covering `bounds` (native CRS units).
    ///
    /// Window edges snap to the nearest pixel boundary and are clipped to the
    /// `raster_width` x `raster_height` extent. A window that is empty after
    /// clipping is an error.
    pub fn from_bounds(
        bounds: &BoundingBox,
        transform: &GeoTransform,
        raster_width: usize,
        raster_height: usize,
    ) -> RasterResult<Self> {
        let corners = [
            (bounds.min_x, bounds.max_y),
            (bounds.max_x, bounds.max_y),
            (bounds.min_x, bounds.min_y),
            (bounds.max_x, bounds.min_y),
        ];

        let mut col_min = f64::INFINITY;
        let mut col_max = f64::NEG_INFINITY;
        let mut row_min = f64::INFINITY;
        let mut row_max = f64::NEG_INFINITY;
        for (x, y) in corners {
            let (col, row) = transform.geo_to_pixel(x, y).ok_or_else(|| {
                RasterError::invalid_metadata(format!("singular geotransform {:?}", transform))
            })?;
            col_min = col_min.min(col);
            col_max = col_max.max(col);
            row_min = row_min.min(row);
            row_max = row_max.max(row);
        }

        let clip = |v: f64, max: usize| v.round().clamp(0.0, max as f64) as usize;
        let col_start = clip(col_min, raster_width);
        let col_stop = clip(col_max, raster_width);
        let row_start = clip(row_min, raster_height);
        let row_stop = clip(row_max, raster_height);

        if col_stop <= col_start || row_stop <= row_start {
            return Err(RasterError::EmptyWindow {
                requested: bounds.to_string(),
                raster: transform.bounds(raster_width, raster_height).to_string(),
            });
        }

        Ok(Self::new(
            col_start,
            row_start,
            col_stop - col_start,
            row_stop - row_start,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform() -> GeoTransform {
        // 100 x 100 raster, 10 m pixels, upper-left at (300000, 5100000)
        GeoTransform::north_up(300000.0, 5100000.0, 10.0, 10.0)
    }

    #[test]
    fn test_exact_pixel_bounds() {
        let bounds = BoundingBox::new(300100.0, 5099500.0, 300300.0, 5099800.0);
        let window = PixelWindow::from_bounds(&bounds, &transform(), 100, 100).unwrap();
        assert_eq!(window, PixelWindow::new(10, 20, 20, 30));
    }

    #[test]
    fn test_snaps_to_nearest_pixel() {
        let bounds = BoundingBox::new(300104.0, 5099496.0, 300306.0, 5099803.0);
        let window = PixelWindow::from_bounds(&bounds, &transform(), 100, 100).unwrap();
        assert_eq!(window, PixelWindow::new(10, 20, 21, 30));
    }

    #[test]
    fn test_clips_to_raster() {
        let bounds = BoundingBox::new(299000.0, 5099000.0, 300050.0, 5101000.0);
        let window = PixelWindow::from_bounds(&bounds, &transform(), 100, 100).unwrap();
        assert_eq!(window, PixelWindow::new(0, 0, 5, 100));
    }

    #[test]
    fn test_disjoint_is_error() {
        let bounds = BoundingBox::new(400000.0, 5000000.0, 400100.0, 5000100.0);
        let result = PixelWindow::from_bounds(&bounds, &transform(), 100, 100);
        assert!(matches!(result, Err(RasterError::EmptyWindow { .. })));
    }
}
