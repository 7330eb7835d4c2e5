//! Image codec trait and shared types.
//!
//! The [`ImageCodec`] trait is the single boundary between the analysis core
//! and anything that understands image files. It defines the three operations
//! the core needs: decode, resize, and grayscale conversion.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording [`MockCodec`](tests::MockCodec).

use super::params::ResizeParams;
use crate::pixel::{BufferError, PixelBuffer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// The bytes could not be decoded into pixels. Never retried.
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Resize failed: {0}")]
    Resize(String),
    #[error("Codec produced an invalid buffer: {0}")]
    InvalidBuffer(#[from] BufferError),
}

/// Trait for image codecs.
///
/// Implementations must be `Sync` so batch operations can share one codec
/// across rayon workers.
pub trait ImageCodec: Sync {
    /// Decode encoded image bytes (JPEG, PNG, ...) into a pixel buffer.
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, CodecError>;

    /// Resize a buffer. The channel layout of the result matches the input.
    fn resize(
        &self,
        buffer: &PixelBuffer,
        params: &ResizeParams,
    ) -> Result<PixelBuffer, CodecError>;

    /// Convert to a single-channel intensity buffer.
    fn to_grayscale(&self, buffer: &PixelBuffer) -> Result<PixelBuffer, CodecError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::calculations::calculate_fit_dimensions;
    use crate::imaging::params::ResizeMode;
    use std::sync::Mutex;

    /// Mock codec that records operations and does nearest-neighbour pixel work.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockCodec {
        pub decode_results: Mutex<Vec<PixelBuffer>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(usize),
        Resize {
            from: (u32, u32),
            width: u32,
            height: u32,
            mode: ResizeMode,
        },
        Grayscale {
            channels: u8,
        },
    }

    impl MockCodec {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_decoded(buffers: Vec<PixelBuffer>) -> Self {
            Self {
                decode_results: Mutex::new(buffers),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageCodec for MockCodec {
        fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode(bytes.len()));

            self.decode_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| CodecError::Decode("No mock buffer".to_string()))
        }

        fn resize(
            &self,
            buffer: &PixelBuffer,
            params: &ResizeParams,
        ) -> Result<PixelBuffer, CodecError> {
            let from = (buffer.width(), buffer.height());
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                from,
                width: params.width,
                height: params.height,
                mode: params.mode,
            });

            let (dw, dh) = match params.mode {
                ResizeMode::Fit => calculate_fit_dimensions(from, (params.width, params.height)),
                ResizeMode::Fill => (params.width, params.height),
            };
            if buffer.is_empty() || dw == 0 || dh == 0 {
                return Err(CodecError::Resize("empty resize".to_string()));
            }

            let c = buffer.channels() as usize;
            let mut data = Vec::with_capacity(dw as usize * dh as usize * c);
            for y in 0..dh {
                let sy = (y as u64 * from.1 as u64 / dh as u64) as usize;
                for x in 0..dw {
                    let sx = (x as u64 * from.0 as u64 / dw as u64) as usize;
                    let idx = (sy * from.0 as usize + sx) * c;
                    data.extend_from_slice(&buffer.data()[idx..idx + c]);
                }
            }
            Ok(PixelBuffer::new(dw, dh, buffer.channels(), data)?)
        }

        fn to_grayscale(&self, buffer: &PixelBuffer) -> Result<PixelBuffer, CodecError> {
            self.operations.lock().unwrap().push(RecordedOp::Grayscale {
                channels: buffer.channels(),
            });

            // BT.601 integer luma
            let data = (0..buffer.pixel_count())
                .map(|i| {
                    let [r, g, b] = buffer.rgb_at(i);
                    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
                })
                .collect();
            Ok(PixelBuffer::new(buffer.width(), buffer.height(), 1, data)?)
        }
    }

    #[test]
    fn mock_records_decode_and_errors_when_empty() {
        let codec = MockCodec::with_decoded(vec![PixelBuffer::filled(2, 2, [1, 2, 3])]);

        let buf = codec.decode(b"abc").unwrap();
        assert_eq!(buf.width(), 2);
        assert!(matches!(codec.decode(b""), Err(CodecError::Decode(_))));

        let ops = codec.get_operations();
        assert_eq!(ops, vec![RecordedOp::Decode(3), RecordedOp::Decode(0)]);
    }

    #[test]
    fn mock_fill_resize_is_exact() {
        let codec = MockCodec::new();
        let out = codec
            .resize(&PixelBuffer::filled(100, 50, [9, 9, 9]), &ResizeParams::fill(9, 8))
            .unwrap();
        assert_eq!((out.width(), out.height(), out.channels()), (9, 8, 3));
        assert!(matches!(
            &codec.get_operations()[0],
            RecordedOp::Resize {
                from: (100, 50),
                width: 9,
                height: 8,
                mode: ResizeMode::Fill,
            }
        ));
    }

    #[test]
    fn mock_fit_resize_keeps_aspect() {
        let codec = MockCodec::new();
        let out = codec
            .resize(&PixelBuffer::filled(400, 200, [0, 0, 0]), &ResizeParams::fit(100, 100))
            .unwrap();
        assert_eq!((out.width(), out.height()), (100, 50));
    }

    #[test]
    fn mock_grayscale_single_channel() {
        let codec = MockCodec::new();
        let out = codec
            .to_grayscale(&PixelBuffer::filled(3, 3, [255, 255, 255]))
            .unwrap();
        assert_eq!(out.channels(), 1);
        assert!(out.data().iter().all(|&v| v == 255));
    }
}
