//! Sharpness scoring by Laplacian variance.
//!
//! The score reads the first channel of the full-resolution buffer. For
//! each interior pixel the 4-neighbour Laplacian is
//! `|4·center − top − bottom − left − right|`; the mean of its square over
//! all interior pixels is the variance, and
//!
//! ```text
//! score = round(min(cap, sqrt(variance) / divisor))
//! ```
//!
//! `divisor` (10) and `cap` (100) come from [`QualityConfig`]. They are
//! heuristics that spread typical photos over 0–100, not calibrated units.
//!
//! Cost is linear in pixels, so buffers above
//! [`QualityConfig::max_pixels`] are refused here. Downsampling them first
//! is [`operations::score_quality`](crate::operations::score_quality)'s job.

use crate::config::QualityConfig;
use crate::pixel::PixelBuffer;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QualityError {
    #[error("buffer has {pixels} pixels, above the {max} pixel ceiling")]
    TooLarge { pixels: u64, max: u64 },
}

/// Sharpness score, 0 (flat) to 100 (full of edges).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QualityScore(u8);

impl QualityScore {
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Mean squared Laplacian over interior pixels.
///
/// `None` when the buffer is narrower or shorter than 3 pixels, since it
/// then has no interior.
pub fn laplacian_variance(buffer: &PixelBuffer) -> Option<f64> {
    let (w, h) = (buffer.width(), buffer.height());
    if w < 3 || h < 3 {
        return None;
    }

    let px = |x: u32, y: u32| buffer.first_channel(x, y) as i32;
    let mut sum: u64 = 0;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let lap = 4 * px(x, y) - px(x, y - 1) - px(x, y + 1) - px(x - 1, y) - px(x + 1, y);
            sum += (lap.unsigned_abs() as u64).pow(2);
        }
    }

    let interior = (w as u64 - 2) * (h as u64 - 2);
    Some(sum as f64 / interior as f64)
}

/// Score a buffer that is within the configured pixel ceiling.
pub fn calculate_quality_score(
    buffer: &PixelBuffer,
    config: &QualityConfig,
) -> Result<QualityScore, QualityError> {
    let pixels = buffer.pixel_count() as u64;
    if let Some(max) = config.pixel_ceiling() {
        if pixels > max {
            return Err(QualityError::TooLarge { pixels, max });
        }
    }

    let Some(variance) = laplacian_variance(buffer) else {
        return Ok(QualityScore(0));
    };
    let score = (variance.sqrt() / config.divisor).min(config.cap).round();
    Ok(QualityScore::new(score as u8))
}
