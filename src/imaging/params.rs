//! Parameter types for codec operations.
//!
//! These structs describe *what* the codec should produce, not *how*. They
//! sit between the analysis code (which decides what size of sample it needs)
//! and the [`backend`](super::backend) that does the pixel work, so the codec
//! can be swapped for a mock in tests without touching analysis logic.

/// How a resize treats the source aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Fit inside the target box, keep aspect ratio, never upscale.
    Fit,
    /// Produce exactly the target size, stretching if needed.
    Fill,
}

/// Parameters for a resize operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeParams {
    pub width: u32,
    pub height: u32,
    pub mode: ResizeMode,
}

impl ResizeParams {
    /// Fit inside `width × height` without upscaling.
    pub fn fit(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mode: ResizeMode::Fit,
        }
    }

    /// Exactly `width × height`, aspect ratio ignored.
    pub fn fill(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mode: ResizeMode::Fill,
        }
    }
}
