//! Animated GIF assembly from a frame sequence.
//!
//! Frames are stretched to 8-bit, written as numbered PNGs into a scoped
//! temporary directory, then read back in lexicographic order and encoded
//! as one looping GIF. The temporary directory is removed when the encoder
//! returns, whether or not encoding succeeded.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use scene_common::Raster;
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::png::create_png_gray;
use crate::stretch::stretch_to_u8;

/// Encodes frame sequences at a fixed frame rate.
#[derive(Debug, Clone, Copy)]
pub struct SequenceEncoder {
    fps: u32,
}

impl SequenceEncoder {
    pub fn new(fps: u32) -> RenderResult<Self> {
        if fps == 0 {
            return Err(RenderError::InvalidFrameRate(fps));
        }
        Ok(Self { fps })
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Display time of one frame.
    pub fn frame_delay(&self) -> Delay {
        Delay::from_numer_denom_ms(1000, self.fps)
    }

    /// Encode `frames` into an animated GIF at `output` and return its path.
    pub fn encode(&self, frames: &[Raster], output: &Path) -> RenderResult<PathBuf> {
        let (width, height) = check_uniform(frames)?;

        let scratch = tempfile::tempdir()?;
        let digits = frame_index_width(frames.len());
        for (index, frame) in frames.iter().enumerate() {
            let gray = stretch_to_u8(frame);
            let png = create_png_gray(&gray, width, height)?;
            let path = scratch
                .path()
                .join(format!("{:0width$}.png", index, width = digits));
            std::fs::write(&path, png)?;
            debug!(index, path = %path.display(), "Wrote frame");
        }

        let mut written: Vec<PathBuf> = std::fs::read_dir(scratch.path())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
            .collect();
        written.sort();

        let delay = self.frame_delay();
        let mut gif_frames = Vec::with_capacity(written.len());
        for path in &written {
            let rgba = image::open(path)?.to_rgba8();
            gif_frames.push(Frame::from_parts(rgba, 0, 0, delay));
        }

        let file = File::create(output)?;
        {
            let mut encoder = GifEncoder::new(BufWriter::new(file));
            encoder.set_repeat(Repeat::Infinite)?;
            encoder.encode_frames(gif_frames)?;
        }

        debug!(
            path = %output.display(),
            frames = written.len(),
            fps = self.fps,
            "Encoded GIF"
        );
        Ok(output.to_path_buf())
    }
}

/// Encode `frames` at `fps` into `output`.
pub fn make_gif(frames: &[Raster], output: &Path, fps: u32) -> RenderResult<PathBuf> {
    SequenceEncoder::new(fps)?.encode(frames, output)
}

/// Zero-padded width of frame file indices: at least 2, and enough digits
/// for the last index so lexicographic order equals sequence order.
pub fn frame_index_width(count: usize) -> usize {
    let last = count.saturating_sub(1);
    let digits = last.checked_ilog10().map_or(1, |d| d as usize + 1);
    digits.max(2)
}

fn check_uniform(frames: &[Raster]) -> RenderResult<(usize, usize)> {
    let first = frames.first().ok_or(RenderError::NoFrames)?;
    let (width, height) = (first.width, first.height);
    if width == 0 || height == 0 {
        return Err(RenderError::invalid_size(format!(
            "frame 0 is empty ({}x{})",
            width, height
        )));
    }
    for (index, frame) in frames.iter().enumerate().skip(1) {
        if frame.width != width || frame.height != height {
            return Err(RenderError::DimensionMismatch {
                index,
                width,
                height,
                found_width: frame.width,
                found_height: frame.height,
            });
        }
    }
    Ok((width, height))
}
