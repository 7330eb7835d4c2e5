//! Pure calculation functions for sample dimensions.
//!
//! All functions here are pure and testable without any pixels.

/// Calculate dimensions that fit inside `bounds` while keeping the aspect ratio.
///
/// Never upscales: a source that already fits is returned unchanged. Neither
/// output edge drops below 1 pixel unless the source edge was 0.
///
/// # Examples
/// ```
/// # use pixprint::imaging::calculate_fit_dimensions;
/// // 4000x3000 into a 100px box → 100x75
/// assert_eq!(calculate_fit_dimensions((4000, 3000), (100, 100)), (100, 75));
///
/// // Already small enough → untouched
/// assert_eq!(calculate_fit_dimensions((64, 48), (100, 100)), (64, 48));
/// ```
pub fn calculate_fit_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if src_w <= max_w && src_h <= max_h {
        return source;
    }

    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1.min(src_w), max_w.max(1));
    let h = ((src_h as f64 * scale).round() as u32).clamp(1.min(src_h), max_h.max(1));
    (w, h)
}

/// Calculate the largest dimensions with the source aspect ratio whose pixel
/// count stays at or below `max_pixels`.
///
/// Never upscales. Edges are floored so the product cannot overshoot.
pub fn calculate_ceiling_dimensions(source: (u32, u32), max_pixels: u64) -> (u32, u32) {
    let (src_w, src_h) = source;
    let pixels = src_w as u64 * src_h as u64;

    if pixels <= max_pixels {
        return source;
    }

    let scale = (max_pixels as f64 / pixels as f64).sqrt();
    let mut w = ((src_w as f64 * scale).floor() as u32).max(1);
    let mut h = ((src_h as f64 * scale).floor() as u32).max(1);

    // An edge clamped to 1 hands the whole budget to the other edge.
    if w == 1 {
        h = max_pixels.min(src_h as u64).max(1) as u32;
    } else if h == 1 {
        w = max_pixels.min(src_w as u64).max(1) as u32;
    }
    while w as u64 * h as u64 > max_pixels && (w > 1 || h > 1) {
        if w >= h { w -= 1 } else { h -= 1 }
    }
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // calculate_fit_dimensions tests
    // =========================================================================

    #[test]
    fn fit_landscape_into_square() {
        assert_eq!(calculate_fit_dimensions((4000, 3000), (100, 100)), (100, 75));
    }

    #[test]
    fn fit_portrait_into_square() {
        assert_eq!(calculate_fit_dimensions((3000, 4000), (100, 100)), (75, 100));
    }

    #[test]
    fn fit_never_upscales() {
        assert_eq!(calculate_fit_dimensions((50, 20), (100, 100)), (50, 20));
        assert_eq!(calculate_fit_dimensions((100, 100), (100, 100)), (100, 100));
    }

    #[test]
    fn fit_extreme_aspect_keeps_one_pixel() {
        // 10000x10 into 100x100 → 100x0.1, clamped to 1
        assert_eq!(calculate_fit_dimensions((10000, 10), (100, 100)), (100, 1));
    }

    #[test]
    fn fit_rounds_short_edge() {
        // 1000x333 → scale 0.1 → 100x33.3
        assert_eq!(calculate_fit_dimensions((1000, 333), (100, 100)), (100, 33));
    }

    #[test]
    fn fit_empty_source_is_untouched() {
        assert_eq!(calculate_fit_dimensions((0, 0), (100, 100)), (0, 0));
    }

    // =========================================================================
    // calculate_ceiling_dimensions tests
    // =========================================================================

    #[test]
    fn ceiling_under_limit_unchanged() {
        assert_eq!(calculate_ceiling_dimensions((100, 100), 10_000), (100, 100));
    }

    #[test]
    fn ceiling_scales_to_pixel_budget() {
        // 400x400 = 160000 px, budget 10000 → scale 0.25 → 100x100
        assert_eq!(calculate_ceiling_dimensions((400, 400), 10_000), (100, 100));
    }

    #[test]
    fn ceiling_never_overshoots() {
        for (w, h, max) in [(1920, 1080, 100_000), (333, 777, 5_000), (7, 100_000, 999)] {
            let (cw, ch) = calculate_ceiling_dimensions((w, h), max);
            assert!(cw as u64 * ch as u64 <= max, "{cw}x{ch} exceeds {max}");
            assert!(cw >= 1 && ch >= 1);
        }
    }
}
