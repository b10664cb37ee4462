//! Shared test utilities for the chronoscope workspace.
//!
//! Most tests need a scene on disk. [`SyntheticScene`] writes one: UTM zone
//! 32N GeoTIFF bands under `R10m/`, `R20m/` and `R60m/` in a temporary
//! directory, covering the footprint in [`synthetic::APPROX_FOOTPRINT`].
//! Geographic windows inside and outside it live in [`windows`].
//!
//! ```ignore
//! use test_utils::{windows, SyntheticScene};
//!
//! let scene = SyntheticScene::sentinel2()?;
//! let window = BoundingBox::from_values(&windows::VALID)?;
//! ```
//!
//! Real Sentinel-2 scenes are opt-in through [`require_test_scene!`].

pub mod fixtures;
pub mod generators;
pub mod paths;
pub mod scene;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;
pub use scene::*;

/// Skip a test unless a real Sentinel-2 scene directory is available.
///
/// Evaluates to the scene's `IMG_DATA` path (see [`find_test_scene`]).
#[macro_export]
macro_rules! require_test_scene {
    () => {{
        match $crate::find_test_scene() {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: no Sentinel-2 scene found. Set {} or add testdata/scene.",
                    $crate::TEST_SCENE_ENV
                );
                return;
            }
        }
    }};
}

/// Assert two numbers differ by at most `epsilon`, compared as `f64`.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left = $left as f64;
        let right = $right as f64;
        let epsilon = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}
