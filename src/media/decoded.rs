use std::{fmt, io::Cursor, path::Path};

use anyhow::Context as _;
use image::{AnimationDecoder as _, Delay, Frame, ImageFormat, RgbaImage, codecs::gif::GifDecoder};

use crate::{
    clock::{delays::FrameDelays, handle::AnimatedImage},
    foundation::error::{AnimatorError, AnimatorResult},
};

/// Fully decoded multi-frame image held in memory as RGBA8 frames.
///
/// GIF input keeps every frame and its delay; any other format the `image` crate understands
/// becomes a single still frame without delay metadata.
pub struct DecodedImage {
    frames: Vec<RgbaImage>,
    delays_cs: Option<Vec<u32>>, // 1/100 s per frame, None for stills
    active: usize,
}

impl DecodedImage {
    /// Decode an image from encoded bytes.
    pub fn from_bytes(bytes: &[u8]) -> AnimatorResult<Self> {
        let format = image::guess_format(bytes)
            .map_err(|e| AnimatorError::invalid_image(format!("unrecognized image format: {e}")))?;

        match format {
            ImageFormat::Gif => Self::decode_gif(bytes),
            _ => {
                let still = image::load_from_memory_with_format(bytes, format)
                    .map_err(|e| AnimatorError::invalid_image(format!("decode {format:?}: {e}")))?;
                Ok(Self::still(still.to_rgba8()))
            }
        }
    }

    /// Read and decode an image file.
    pub fn open(path: &Path) -> AnimatorResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read image '{}'", path.display()))?;
        Self::from_bytes(&bytes)
    }

    /// Build an image from already decoded frames.
    pub fn from_frames(frames: Vec<Frame>) -> AnimatorResult<Self> {
        if frames.is_empty() {
            return Err(AnimatorError::invalid_image("image has no frames"));
        }
        let delays_cs = frames.iter().map(|f| delay_to_centiseconds(f.delay())).collect();
        Ok(Self {
            frames: frames.into_iter().map(Frame::into_buffer).collect(),
            delays_cs: Some(delays_cs),
            active: 0,
        })
    }

    /// Single-frame image without delay metadata.
    pub fn still(buffer: RgbaImage) -> Self {
        Self {
            frames: vec![buffer],
            delays_cs: None,
            active: 0,
        }
    }

    fn decode_gif(bytes: &[u8]) -> AnimatorResult<Self> {
        let decoder = GifDecoder::new(Cursor::new(bytes))
            .map_err(|e| AnimatorError::invalid_image(format!("decode gif header: {e}")))?;
        let frames = decoder
            .into_frames()
            .collect_frames()
            .map_err(|e| AnimatorError::invalid_image(format!("decode gif frames: {e}")))?;
        Self::from_frames(frames)
    }

    /// Number of decoded frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; a decoded image holds at least one frame.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the frame last selected with [`AnimatedImage::select_active_frame`].
    pub fn active_frame(&self) -> usize {
        self.active
    }

    /// Pixels of the active frame.
    pub fn active_buffer(&self) -> &RgbaImage {
        &self.frames[self.active]
    }

    /// Width and height of the active frame.
    pub fn dimensions(&self) -> (u32, u32) {
        self.active_buffer().dimensions()
    }

    /// Per-frame delays in 1/100 s, if the source format carries them.
    pub fn delays_centiseconds(&self) -> Option<&[u32]> {
        self.delays_cs.as_deref()
    }

    /// Write the active frame as a PNG file.
    pub fn save_active_png(&self, path: &Path) -> AnimatorResult<()> {
        self.active_buffer()
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

impl AnimatedImage for DecodedImage {
    fn is_time_animatable(&self) -> bool {
        self.frames.len() > 1
    }

    fn frame_count_in_time_dimension(&self) -> AnimatorResult<usize> {
        Ok(self.frames.len())
    }

    fn frame_delays(&self) -> FrameDelays {
        match &self.delays_cs {
            Some(cs) => FrameDelays::from_centiseconds(cs),
            None => FrameDelays::NoDelays,
        }
    }

    fn select_active_frame(&mut self, index: usize) -> AnimatorResult<()> {
        if index >= self.frames.len() {
            return Err(AnimatorError::image_selection(format!(
                "frame {index} out of range (image has {} frames)",
                self.frames.len()
            )));
        }
        self.active = index;
        Ok(())
    }
}

impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("frames", &self.frames.len())
            .field("dimensions", &self.dimensions())
            .field("delays_cs", &self.delays_cs)
            .field("active", &self.active)
            .finish()
    }
}

/// Round a decoder delay to the nearest 1/100 s.
pub fn delay_to_centiseconds(delay: Delay) -> u32 {
    let (numer, denom) = delay.numer_denom_ms();
    if denom == 0 {
        return 0;
    }
    let denom_cs = u64::from(denom) * 10;
    let cs = (u64::from(numer) + denom_cs / 2) / denom_cs;
    u32::try_from(cs).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/media/decoded.rs"]
mod tests;
