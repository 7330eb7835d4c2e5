//! Color palettes: quantize a sample, then classify the result.
//!
//! [`ColorPalette`] is the ranked color set with its dominant and average
//! colors. [`ColorAnalysis`] adds the vibrant picks and the grayscale and
//! monochromatic flags on top.

mod classify;
mod quantize;

pub use classify::{
    GRAY_TOLERANCE, GRAYSCALE_SHARE, average_color, dark_vibrant, is_gray_pixel, is_grayscale,
    light_vibrant, vibrant,
};
pub use quantize::{bucket, kmeans, quantize};

use crate::color::Color;
use crate::config::PaletteConfig;
use serde::Serialize;

/// Ranked colors of a pixel sample.
///
/// `dominant_color` is `colors[0]`; both it and `average_color` are `None`
/// for an empty sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorPalette {
    pub colors: Vec<Color>,
    pub dominant_color: Option<Color>,
    pub average_color: Option<Color>,
    /// Number of pixels the palette was built from.
    pub sample_size: usize,
}

impl ColorPalette {
    pub fn from_sample(pixels: &[[u8; 3]], config: &PaletteConfig) -> Self {
        let colors = quantize(pixels, config);
        Self {
            dominant_color: colors.first().cloned(),
            average_color: average_color(pixels),
            sample_size: pixels.len(),
            colors,
        }
    }

    /// Fraction (0–1) of the sample covered by the dominant color.
    pub fn dominant_share(&self) -> f64 {
        match (&self.dominant_color, self.sample_size) {
            (Some(c), n) if n > 0 => c.count().unwrap_or(0) as f64 / n as f64,
            _ => 0.0,
        }
    }

    /// True when the dominant color covers at least `threshold` of the sample.
    pub fn is_monochromatic(&self, threshold: f64) -> bool {
        self.dominant_color.is_some() && self.dominant_share() >= threshold
    }
}

/// Palette plus every derived color and flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorAnalysis {
    pub palette: ColorPalette,
    pub vibrant: Option<Color>,
    pub dark_vibrant: Option<Color>,
    pub light_vibrant: Option<Color>,
    pub is_grayscale: bool,
    pub is_monochromatic: bool,
}

impl ColorAnalysis {
    pub fn from_sample(pixels: &[[u8; 3]], config: &PaletteConfig) -> Self {
        let palette = ColorPalette::from_sample(pixels, config);
        Self {
            vibrant: vibrant(&palette.colors),
            dark_vibrant: dark_vibrant(&palette.colors),
            light_vibrant: light_vibrant(&palette.colors),
            is_grayscale: is_grayscale(pixels),
            is_monochromatic: palette.is_monochromatic(config.monochromatic_threshold),
            palette,
        }
    }
}
