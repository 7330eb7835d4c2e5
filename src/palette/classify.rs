//! Derived colors and flags over a ranked palette.
//!
//! Every function here is pure. Selection functions return `None` when
//! no color qualifies; ties go to the earlier (more frequent) color.

use crate::color::Color;

/// Channel spread a pixel may have and still count as gray.
pub const GRAY_TOLERANCE: u8 = 5;

/// Share of gray pixels above which a sample is grayscale.
pub const GRAYSCALE_SHARE: f64 = 0.9;

const DARK_LIGHTNESS: f64 = 0.4;
const LIGHT_LIGHTNESS: f64 = 0.6;
const VIBRANT_SATURATION: f64 = 0.3;

/// Mean R/G/B over every sampled pixel, rounded.
pub fn average_color(pixels: &[[u8; 3]]) -> Option<Color> {
    if pixels.is_empty() {
        return None;
    }
    let mut sums = [0u64; 3];
    for px in pixels {
        for ch in 0..3 {
            sums[ch] += px[ch] as u64;
        }
    }
    let n = pixels.len() as f64;
    Some(Color::from(sums.map(|s| (s as f64 / n).round() as u8)))
}

/// The most saturated color.
pub fn vibrant(colors: &[Color]) -> Option<Color> {
    best_by(colors, |c| Some(c.saturation()))
}

/// Saturated and dark: maximizes `saturation × (0.4 − lightness)`.
pub fn dark_vibrant(colors: &[Color]) -> Option<Color> {
    best_by(colors, |c| {
        let (s, l) = (c.saturation(), c.lightness());
        (l < DARK_LIGHTNESS && s > VIBRANT_SATURATION).then(|| s * (DARK_LIGHTNESS - l))
    })
}

/// Saturated and light: maximizes `saturation × (lightness − 0.6)`.
pub fn light_vibrant(colors: &[Color]) -> Option<Color> {
    best_by(colors, |c| {
        let (s, l) = (c.saturation(), c.lightness());
        (l > LIGHT_LIGHTNESS && s > VIBRANT_SATURATION).then(|| s * (l - LIGHT_LIGHTNESS))
    })
}

fn best_by(colors: &[Color], score: impl Fn(&Color) -> Option<f64>) -> Option<Color> {
    let mut best: Option<(&Color, f64)> = None;
    for color in colors {
        if let Some(s) = score(color) {
            if best.is_none_or(|(_, b)| s > b) {
                best = Some((color, s));
            }
        }
    }
    best.map(|(color, _)| color.clone())
}

pub fn is_gray_pixel([r, g, b]: [u8; 3]) -> bool {
    r.abs_diff(g) <= GRAY_TOLERANCE
        && g.abs_diff(b) <= GRAY_TOLERANCE
        && r.abs_diff(b) <= GRAY_TOLERANCE
}

/// More than 90% of the sample is gray. An empty sample is not grayscale.
pub fn is_grayscale(pixels: &[[u8; 3]]) -> bool {
    if pixels.is_empty() {
        return false;
    }
    let gray = pixels.iter().filter(|&&px| is_gray_pixel(px)).count();
    gray as f64 / pixels.len() as f64 > GRAYSCALE_SHARE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(rgbs: &[[u8; 3]]) -> Vec<Color> {
        rgbs.iter().map(|&rgb| Color::from(rgb)).collect()
    }

    // =========================================================================
    // average_color
    // =========================================================================

    #[test]
    fn average_of_empty_is_none() {
        assert_eq!(average_color(&[]), None);
    }

    #[test]
    fn average_uses_every_pixel() {
        let avg = average_color(&[[0, 0, 0], [255, 255, 255], [255, 255, 255]]).unwrap();
        assert_eq!(avg.rgb(), [170, 170, 170]);
        assert_eq!(avg.count(), None);
    }

    // =========================================================================
    // vibrant selection
    // =========================================================================

    #[test]
    fn vibrant_picks_highest_saturation() {
        let colors = ranked(&[[128, 128, 128], [200, 100, 100], [255, 0, 0]]);
        assert_eq!(vibrant(&colors).unwrap().hex(), "#ff0000");
    }

    #[test]
    fn vibrant_tie_keeps_first() {
        let colors = ranked(&[[0, 0, 255], [255, 0, 0]]);
        assert_eq!(vibrant(&colors).unwrap().hex(), "#0000ff");
    }

    #[test]
    fn vibrant_of_empty_is_none() {
        assert_eq!(vibrant(&[]), None);
    }

    #[test]
    fn dark_vibrant_requires_dark_and_saturated() {
        // #800000: saturation 1, lightness ~0.25
        let colors = ranked(&[[255, 0, 0], [128, 0, 0], [20, 20, 20]]);
        assert_eq!(dark_vibrant(&colors).unwrap().hex(), "#800000");
        assert_eq!(dark_vibrant(&ranked(&[[20, 20, 20], [255, 0, 0]])), None);
    }

    #[test]
    fn light_vibrant_requires_light_and_saturated() {
        // #ff8080: saturation ~0.5, lightness ~0.75
        let colors = ranked(&[[255, 0, 0], [255, 128, 128], [240, 240, 240]]);
        assert_eq!(light_vibrant(&colors).unwrap().hex(), "#ff8080");
        assert_eq!(light_vibrant(&ranked(&[[240, 240, 240]])), None);
    }

    // =========================================================================
    // grayscale
    // =========================================================================

    #[test]
    fn gray_pixel_tolerance() {
        assert!(is_gray_pixel([100, 105, 100]));
        assert!(!is_gray_pixel([100, 106, 100]));
        assert!(!is_gray_pixel([100, 103, 106]));
    }

    #[test]
    fn grayscale_needs_more_than_ninety_percent() {
        let mut pixels = vec![[50, 50, 50]; 9];
        pixels.push([255, 0, 0]);
        assert!(!is_grayscale(&pixels), "exactly 90% is not enough");
        pixels.extend([[60, 60, 60]; 10]);
        assert!(is_grayscale(&pixels));
    }

    #[test]
    fn empty_sample_is_not_grayscale() {
        assert!(!is_grayscale(&[]));
    }
}
