//! Window containment check.

use geo::{Contains, Polygon};
use scene_common::BoundingBox;

use crate::footprint::rectangle;

/// True when `window` lies fully inside `footprint`.
///
/// The window polygon uses the same vertex order as the footprint. Windows
/// sharing an edge with the footprint are inside. Inverted, empty or
/// non-finite windows are never inside.
pub fn check_window(footprint: &Polygon<f64>, window: &BoundingBox) -> bool {
    if !window.is_valid() || window.width() <= 0.0 || window.height() <= 0.0 {
        return false;
    }
    footprint.contains(&rectangle(window))
}
