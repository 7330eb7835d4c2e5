//! Color values and hex conversion.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex color: {0:?} (expected 6 hex digits, optional leading '#')")]
    InvalidHex(String),
}

/// An RGB color with its canonical hex encoding.
///
/// `hex` is derived from `(r, g, b)` on construction and there are no
/// setters, so it can never disagree with the channels. `count` and
/// `percentage` are present when the color came out of a quantizer.
///
/// `==` compares every field, frequency included: a quantized `#ff0000`
/// with a count is not equal to a bare `#ff0000`. Use
/// [`same_color`](Color::same_color) to compare the color alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    percentage: Option<f64>,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            hex: rgb_to_hex(r, g, b),
            count: None,
            percentage: None,
        }
    }

    /// A color that represents `count` out of `total` sampled pixels.
    pub fn with_count(rgb: [u8; 3], count: u32, total: usize) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        Self {
            count: Some(count),
            percentage: Some(percentage),
            ..Self::from(rgb)
        }
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn count(&self) -> Option<u32> {
        self.count
    }

    /// Share of the sample this color stands for, in percent (0–100).
    pub fn percentage(&self) -> Option<f64> {
        self.percentage
    }

    /// True when both colors have the same channels, ignoring count and share.
    pub fn same_color(&self, other: &Color) -> bool {
        self.rgb() == other.rgb()
    }

    /// HSL saturation, 0 for black.
    pub fn saturation(&self) -> f64 {
        let (max, min) = max_min(self.rgb());
        if max == 0.0 { 0.0 } else { (max - min) / max }
    }

    /// HSL lightness.
    pub fn lightness(&self) -> f64 {
        let (max, min) = max_min(self.rgb());
        (max + min) / 2.0
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

/// Max and min of the channels normalized to `[0, 1]`.
fn max_min(rgb: [u8; 3]) -> (f64, f64) {
    let max = rgb.iter().copied().max().unwrap_or(0) as f64 / 255.0;
    let min = rgb.iter().copied().min().unwrap_or(0) as f64 / 255.0;
    (max, min)
}

/// Lowercase `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parse `rrggbb` or `#rrggbb`, any case.
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8), ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColorError::InvalidHex(hex.to_string()))
    };
    Ok((channel(0)?, channel(2)?, channel(4)?))
}
