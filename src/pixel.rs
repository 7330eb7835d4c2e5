//! Raw pixel buffers.
//!
//! A [`PixelBuffer`] is the only image representation the analysis core
//! understands: interleaved 8-bit samples, row-major, no padding between rows.
//! Decoding files into buffers is the codec's job (see [`crate::imaging`]).
//!
//! Channel layouts:
//!
//! | `channels` | Layout | RGB view |
//! |---|---|---|
//! | 1 | gray | `(v, v, v)` |
//! | 2 | gray + alpha | `(v, v, v)` |
//! | 3 | RGB | as stored |
//! | 4 | RGBA | alpha ignored |

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("unsupported channel count: {0} (expected 1-4)")]
    UnsupportedChannels(u8),
    #[error("buffer length {actual} does not match {width}x{height}x{channels} = {expected}")]
    LengthMismatch {
        width: u32,
        height: u32,
        channels: u8,
        expected: usize,
        actual: usize,
    },
}

/// An immutable, interleaved 8-bit pixel buffer.
///
/// The length invariant `data.len() == width * height * channels` is checked
/// once on construction; every accessor relies on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, BufferError> {
        if !(1..=4).contains(&channels) {
            return Err(BufferError::UnsupportedChannels(channels));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// A buffer filled with one RGB color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            width,
            height,
            channels: 3,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// First channel of the pixel at `(x, y)`.
    ///
    /// For gray buffers this is the intensity; for color buffers it is red.
    #[inline]
    pub fn first_channel(&self, x: u32, y: u32) -> u8 {
        let idx = (y as usize * self.width as usize + x as usize) * self.channels as usize;
        self.data[idx]
    }

    /// RGB view of the pixel at linear index `i` (row-major).
    #[inline]
    pub fn rgb_at(&self, i: usize) -> [u8; 3] {
        let c = self.channels as usize;
        let px = &self.data[i * c..i * c + c];
        match c {
            1 | 2 => [px[0], px[0], px[0]],
            _ => [px[0], px[1], px[2]],
        }
    }

    /// All pixels as RGB triples, row-major.
    pub fn rgb_pixels(&self) -> Vec<[u8; 3]> {
        (0..self.pixel_count()).map(|i| self.rgb_at(i)).collect()
    }
}
