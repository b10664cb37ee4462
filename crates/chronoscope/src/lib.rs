//! Animated band sequences for Sentinel-2 scenes.
//!
//! Given a scene directory and a geographic window, every band of the band
//! table is cropped to the window, resampled to a common grid, stretched to
//! 8-bit and assembled into one looping GIF.
//!
//! ```ignore
//! use chronoscope::{Chronoscope, ChronoscopeConfig};
//! use scene_common::BoundingBox;
//!
//! let config = ChronoscopeConfig { fps: 3, ..Default::default() };
//! let window = BoundingBox::new(6.0, 46.0, 6.2, 46.2);
//! let gif = Chronoscope::new(config).run("S2A_MSIL2A/IMG_DATA".as_ref(), &window)?;
//! ```

pub mod config;
pub mod crop;
pub mod error;
pub mod footprint;
pub mod frames;
pub mod pipeline;
pub mod window;

pub use config::{AlignmentPolicy, ChronoscopeConfig};
pub use crop::{load_band, load_crop};
pub use error::{ChronoscopeError, ChronoscopeResult};
pub use footprint::{footprint_extent, scene_footprint};
pub use frames::prep_frames;
pub use pipeline::{chronoscope, Chronoscope};
pub use window::check_window;
