//! Geographic footprint of a scene.

use std::path::Path;

use geo::{BoundingRect, LineString, Polygon};
use projection::Reprojector;
use raster_io::BandReader;
use scene_common::BoundingBox;
use tracing::debug;

use crate::error::ChronoscopeResult;

/// Closed rectangle polygon with vertices ordered
/// `(min_x, max_y), (max_x, max_y), (max_x, min_y), (min_x, min_y)`.
pub fn rectangle(bbox: &BoundingBox) -> Polygon<f64> {
    Polygon::new(
        LineString::from(vec![
            (bbox.min_x, bbox.max_y),
            (bbox.max_x, bbox.max_y),
            (bbox.max_x, bbox.min_y),
            (bbox.min_x, bbox.min_y),
        ]),
        vec![],
    )
}

/// Geographic footprint of the scene whose reference band is `reference`.
///
/// Only metadata is read. The native min and max corners are reprojected to
/// lon/lat and the rectangle they span is returned.
pub fn scene_footprint(
    reader: &dyn BandReader,
    reference: &Path,
) -> ChronoscopeResult<Polygon<f64>> {
    let metadata = reader.metadata(reference)?;
    let native = metadata.bounds();
    let geographic = Reprojector::new(metadata.crs)?.corners_to_geographic(&native)?;

    debug!(
        band = %reference.display(),
        crs = %metadata.crs,
        native = %native,
        geographic = %geographic,
        "Resolved scene footprint"
    );
    Ok(rectangle(&geographic))
}

/// Axis-aligned extent of a footprint polygon.
pub fn footprint_extent(footprint: &Polygon<f64>) -> Option<BoundingBox> {
    footprint
        .bounding_rect()
        .map(|rect| BoundingBox::from_corners(rect.min().x_y(), rect.max().x_y()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_vertex_order() {
        let poly = rectangle(&BoundingBox::new(1.0, 2.0, 3.0, 4.0));
        let coords: Vec<(f64, f64)> = poly.exterior().points().map(|p| p.x_y()).collect();
        assert_eq!(
            coords,
            vec![(1.0, 4.0), (3.0, 4.0), (3.0, 2.0), (1.0, 2.0), (1.0, 4.0)]
        );
    }

    #[test]
    fn test_extent() {
        let bbox = BoundingBox::new(-1.5, 2.0, 3.0, 4.25);
        assert_eq!(footprint_extent(&rectangle(&bbox)), Some(bbox));
    }
}
