//! Pure Rust codec built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::load_from_memory` |
//! | Resize (fit) | [`calculate_fit_dimensions`] + `DynamicImage::resize_exact`, Lanczos3 |
//! | Resize (fill) | `DynamicImage::resize_exact`, Lanczos3 |
//! | Grayscale | `DynamicImage::to_luma8` |
//!
//! Decoded images with 16-bit or float samples are narrowed to 8 bits,
//! keeping their gray/color and alpha layout.

use super::backend::{CodecError, ImageCodec};
use super::calculations::calculate_fit_dimensions;
use super::params::{ResizeMode, ResizeParams};
use crate::pixel::{BufferError, PixelBuffer};
use image::imageops::FilterType;
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

/// Codec backed by the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a pixel buffer as a `DynamicImage` with the matching color type.
fn to_dynamic(buffer: &PixelBuffer) -> Result<DynamicImage, CodecError> {
    let (w, h) = (buffer.width(), buffer.height());
    let data = buffer.data().to_vec();
    let img = match buffer.channels() {
        1 => GrayImage::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(w, h, data).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        n => return Err(BufferError::UnsupportedChannels(n).into()),
    };
    img.ok_or_else(|| CodecError::Resize(format!("buffer does not match {w}x{h}")))
}

/// Flatten a `DynamicImage` into an 8-bit pixel buffer.
fn into_buffer(img: DynamicImage) -> Result<PixelBuffer, CodecError> {
    let (width, height) = (img.width(), img.height());
    let (channels, data) = match img {
        DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
        DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
        other => {
            let color = other.color();
            match (color.has_color(), color.has_alpha()) {
                (false, false) => (1, other.to_luma8().into_raw()),
                (false, true) => (2, other.to_luma_alpha8().into_raw()),
                (true, false) => (3, other.to_rgb8().into_raw()),
                (true, true) => (4, other.to_rgba8().into_raw()),
            }
        }
    };
    Ok(PixelBuffer::new(width, height, channels, data)?)
}

impl ImageCodec for RustBackend {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
        let img = image::load_from_memory(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;
        into_buffer(img)
    }

    fn resize(
        &self,
        buffer: &PixelBuffer,
        params: &ResizeParams,
    ) -> Result<PixelBuffer, CodecError> {
        let source = (buffer.width(), buffer.height());
        let (width, height) = match params.mode {
            ResizeMode::Fit => calculate_fit_dimensions(source, (params.width, params.height)),
            ResizeMode::Fill => (params.width, params.height),
        };
        if buffer.is_empty() {
            return Err(CodecError::Resize("cannot resize an empty buffer".into()));
        }
        if width == 0 || height == 0 {
            return Err(CodecError::Resize(format!(
                "invalid target size {width}x{height}"
            )));
        }
        if (width, height) == source {
            return Ok(buffer.clone());
        }

        let img = to_dynamic(buffer)?;
        into_buffer(img.resize_exact(width, height, FilterType::Lanczos3))
    }

    fn to_grayscale(&self, buffer: &PixelBuffer) -> Result<PixelBuffer, CodecError> {
        if buffer.channels() == 1 {
            return Ok(buffer.clone());
        }
        let gray = to_dynamic(buffer)?.to_luma8();
        into_buffer(DynamicImage::ImageLuma8(gray))
    }
}
