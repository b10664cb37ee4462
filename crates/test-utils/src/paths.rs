//! Locating an optional real scene, and temporary output directories.

use std::path::{Path, PathBuf};

/// Environment variable pointing at a real Sentinel-2 `IMG_DATA` directory.
pub const TEST_SCENE_ENV: &str = "CHRONOSCOPE_TEST_SCENE";

/// Returns the workspace root directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// True when `dir` looks like a scene: it holds `R10m/` and `R20m/`.
pub fn is_scene_dir(dir: &Path) -> bool {
    dir.join("R10m").is_dir() && dir.join("R20m").is_dir()
}

/// Find a real scene for end-to-end tests.
///
/// Checks `$CHRONOSCOPE_TEST_SCENE`, then `testdata/scene` at the workspace
/// root. Scenes are large and never checked in.
pub fn find_test_scene() -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(dir) = std::env::var(TEST_SCENE_ENV) {
        candidates.push(PathBuf::from(dir));
    }
    candidates.push(workspace_root().join("testdata").join("scene"));

    candidates.into_iter().find(|dir| is_scene_dir(dir))
}

/// Creates a temporary directory, removed when dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Creates a temporary directory whose name starts with `prefix`.
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}
