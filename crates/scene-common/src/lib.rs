//! Common types shared across the chronoscope crates.

pub mod band;
pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;

pub use band::{BandSpec, BandTable, ResamplePolicy, Resolution};
pub use bbox::BoundingBox;
pub use crs::CrsCode;
pub use error::{SceneError, SceneResult};
pub use grid::{GeoTransform, Raster};
