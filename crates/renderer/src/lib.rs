//! Frame rendering for band animations.
//!
//! - Cubic resampling of raw rasters
//! - Dynamic range stretch to 8-bit gray
//! - Grayscale PNG encoding
//! - Animated GIF assembly

pub mod error;
pub mod gif;
pub mod png;
pub mod resize;
pub mod stretch;

pub use error::{RenderError, RenderResult};
pub use gif::{make_gif, SequenceEncoder};
pub use resize::{resize_cubic, upsample};
pub use stretch::{stretch_to_u8, FrameStats};
