//! Windowed reads through the extension-dispatching reader.

use raster_io::{write_geotiff_u16, AutoReader, BandReader, RasterError};
use scene_common::{BoundingBox, CrsCode, GeoTransform};

const CRS: CrsCode = CrsCode::Utm {
    zone: 32,
    north: true,
};

fn write_band(dir: &std::path::Path, name: &str, pixel: f64, size: usize) -> std::path::PathBuf {
    let path = dir.join(name);
    let data: Vec<u16> = (0..size * size).map(|i| (i % 4096) as u16).collect();
    let transform = GeoTransform::north_up(400000.0, 5000000.0, pixel, pixel);
    write_geotiff_u16(&path, &data, size, size, CRS, &transform).unwrap();
    path
}

#[test]
fn test_same_bounds_scale_with_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let fine = write_band(dir.path(), "B02.tif", 10.0, 120);
    let coarse = write_band(dir.path(), "B05.tif", 20.0, 60);

    let bounds = BoundingBox::new(400100.0, 4999500.0, 400500.0, 4999900.0);
    let reader = AutoReader::new();
    let a = reader.read_window(&fine, &bounds).unwrap();
    let b = reader.read_window(&coarse, &bounds).unwrap();

    assert_eq!(a.shape(), (40, 40));
    assert_eq!(b.shape(), (20, 20));
}

#[test]
fn test_window_is_clipped_to_raster() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_band(dir.path(), "B04.tiff", 10.0, 50);

    // Extends 100 m past the east and south edges
    let bounds = BoundingBox::new(400300.0, 4999400.0, 400600.0, 4999700.0);
    let raster = AutoReader::new().read_window(&path, &bounds).unwrap();
    assert_eq!(raster.shape(), (20, 20));
    assert_eq!(raster.get(0, 0), Some((30 * 50 + 30) as f32));
}

#[test]
fn test_disjoint_window_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_band(dir.path(), "B08.tif", 10.0, 50);

    let bounds = BoundingBox::new(500000.0, 4000000.0, 500100.0, 4000100.0);
    let result = AutoReader::new().read_window(&path, &bounds);
    assert!(matches!(result, Err(RasterError::EmptyWindow { .. })));
}

#[test]
fn test_metadata_reports_native_extent() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_band(dir.path(), "B8A.tif", 20.0, 30);

    let meta = AutoReader::new().metadata(&path).unwrap();
    assert_eq!(meta.crs, CRS);
    let bounds = meta.bounds();
    assert_eq!(bounds.min_x, 400000.0);
    assert_eq!(bounds.max_x, 400600.0);
    assert_eq!(bounds.min_y, 4999400.0);
    assert_eq!(bounds.max_y, 5000000.0);
}
