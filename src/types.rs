// Core buffers passed between the filter stages.

use image::{ImageBuffer, Rgb, imageops};

use crate::error::Error;

/// Interleaved RGB, one byte per channel.
pub const CHANNELS: usize = 3;

/// One camera frame: row-major RGB8, `data.len() == width * height * 3`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Frame {
    /// Wrap an RGB8 buffer, rejecting a length that does not match the dimensions.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, Error> {
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "frame buffer holds {} bytes, {width}x{height} RGB needs {expected}",
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// A frame with every channel of every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self { width, height, data: vec![value; width * height * CHANNELS] }
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Flip left/right so the camera behaves like a mirror.
    pub fn mirror_in_place(&mut self) -> Result<(), Error> {
        let w = u32::try_from(self.width)
            .map_err(|_| Error::InvalidParameter("frame too wide to mirror".into()))?;
        let h = u32::try_from(self.height)
            .map_err(|_| Error::InvalidParameter("frame too tall to mirror".into()))?;
        let mut view: ImageBuffer<Rgb<u8>, &mut [u8]> =
            ImageBuffer::from_raw(w, h, self.data.as_mut_slice()).ok_or_else(|| {
                Error::InvalidParameter("frame buffer shorter than its dimensions".into())
            })?;
        imageops::flip_horizontal_in_place(&mut view);
        Ok(())
    }

    /// Pack into `0x00RRGGBB` words for minifb. `out` must hold `pixel_count()` entries.
    pub fn pack_0rgb(&self, out: &mut [u32]) {
        for (dst, px) in out.iter_mut().zip(self.data.chunks_exact(CHANNELS)) {
            *dst = ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32;
        }
    }
}

/// Single-channel 0..=255 visibility grid (255 = fully visible).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityMask {
    pub width: usize,
    pub height: usize,
    pub values: Vec<u8>, // length = width * height
}

impl VisibilityMask {
    pub fn zeros(width: usize, height: usize) -> Self {
        Self { width, height, values: vec![0; width * height] }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.values[y * self.width + x]
    }
}

/// Visibility weight per pixel in [0.0, 1.0]; 1 keeps the source, 0 blacks it out.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightMask {
    pub width: usize,
    pub height: usize,
    pub weights: Vec<f32>, // length = width * height
}

impl WeightMask {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.weights[y * self.width + x]
    }

    /// Brightest weight anywhere in the mask (0.0 for an empty mask).
    pub fn max(&self) -> f32 {
        self.weights.iter().copied().fold(0.0, f32::max)
    }
}
