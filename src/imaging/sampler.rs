//! Bounded pixel samples for clustering and hashing.

use super::backend::{CodecError, ImageCodec};
use super::calculations::calculate_fit_dimensions;
use super::params::ResizeParams;
use crate::pixel::PixelBuffer;
use std::borrow::Cow;

/// Shrink `buffer` to fit inside `max_dim × max_dim`, keeping aspect ratio.
///
/// A buffer that already fits is borrowed as-is and the codec is not called.
/// Zero-area buffers (`200×0`, `0×0`, ...) are also borrowed, whatever their
/// edge lengths, since there is nothing to resample. Codec failures are
/// returned unchanged.
pub fn sample<'a>(
    codec: &impl ImageCodec,
    buffer: &'a PixelBuffer,
    max_dim: u32,
) -> Result<Cow<'a, PixelBuffer>, CodecError> {
    let source = (buffer.width(), buffer.height());
    if buffer.is_empty() || calculate_fit_dimensions(source, (max_dim, max_dim)) == source {
        return Ok(Cow::Borrowed(buffer));
    }
    let sampled = codec.resize(buffer, &ResizeParams::fit(max_dim, max_dim))?;
    tracing::debug!(
        from_width = source.0,
        from_height = source.1,
        width = sampled.width(),
        height = sampled.height(),
        "sampled buffer"
    );
    Ok(Cow::Owned(sampled))
}
