//! Shared test utilities: synthetic pixel buffers.
//!
//! Every builder returns a valid [`PixelBuffer`], so tests can focus on the
//! analysis under test instead of buffer bookkeeping.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let sharp = checkerboard(32, 32);
//! let flat = uniform(32, 32, [128, 128, 128]);
//! let mirrored = flip_horizontal(&gradient(100, 60));
//! ```

use crate::pixel::PixelBuffer;

// =========================================================================
// Builders
// =========================================================================

/// A single-color RGB buffer.
pub fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> PixelBuffer {
    PixelBuffer::filled(width, height, rgb)
}

/// Alternating black and white RGB pixels, black at the origin.
pub fn checkerboard(width: u32, height: u32) -> PixelBuffer {
    from_fn(width, height, |x, y| {
        let v = if (x + y) % 2 == 0 { 0 } else { 255 };
        [v, v, v]
    })
}

/// An RGB buffer with red rising left to right and green top to bottom.
/// Not symmetric in either axis.
pub fn gradient(width: u32, height: u32) -> PixelBuffer {
    from_fn(width, height, |x, y| {
        [
            (x * 255 / width.max(2).saturating_sub(1)).min(255) as u8,
            (y * 255 / height.max(2).saturating_sub(1)).min(255) as u8,
            96,
        ]
    })
}

/// A single-channel ramp with intensity equal to `x`, so it has no
/// curvature for widths up to 256.
pub fn gray_gradient(width: u32, height: u32) -> PixelBuffer {
    let data = (0..height)
        .flat_map(|_| (0..width).map(|x| x.min(255) as u8))
        .collect();
    PixelBuffer::new(width, height, 1, data).unwrap()
}

/// Build an RGB buffer pixel by pixel.
pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> PixelBuffer {
    let data = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .flat_map(|(x, y)| f(x, y))
        .collect();
    PixelBuffer::new(width, height, 3, data).unwrap()
}

// =========================================================================
// Transforms
// =========================================================================

/// Mirror a buffer left to right.
pub fn flip_horizontal(buffer: &PixelBuffer) -> PixelBuffer {
    let (w, h, c) = (
        buffer.width() as usize,
        buffer.height() as usize,
        buffer.channels() as usize,
    );
    let src = buffer.data();
    let mut data = Vec::with_capacity(src.len());
    for y in 0..h {
        for x in (0..w).rev() {
            let idx = (y * w + x) * c;
            data.extend_from_slice(&src[idx..idx + c]);
        }
    }
    PixelBuffer::new(buffer.width(), buffer.height(), buffer.channels(), data).unwrap()
}
