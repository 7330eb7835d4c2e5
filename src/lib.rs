//! # pixprint
//!
//! Image fingerprinting and color analysis over decoded pixel buffers:
//! representative palettes, perceptual hashes for near-duplicate detection,
//! and a sharpness score.
//!
//! # Architecture: Two Paths From One Buffer
//!
//! Decoding and resampling sit behind the [`imaging::ImageCodec`] trait.
//! Everything after that is pure functions over a [`pixel::PixelBuffer`]:
//!
//! ```text
//! color path:   buffer → sample (≤100px) → quantize → classify   → ColorAnalysis
//! hash path:    buffer → sample → grayscale → 9×8 / 8×8 grid → hash → compare
//! quality path: full-resolution buffer → Laplacian variance       → QualityScore
//! ```
//!
//! Palettes and hashes work on a bounded sample, so their cost does not grow
//! with resolution. Quality scoring needs every pixel and is bounded by a
//! configurable pixel ceiling instead.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pixel`] | `PixelBuffer`, the validated input type |
//! | [`color`] | `Color`, hex conversion, saturation and lightness |
//! | [`palette`] | Color quantization (k-means or bucket) and classification |
//! | [`hash`] | dHash / aHash, Hamming similarity, duplicate grouping |
//! | [`quality`] | Laplacian-variance sharpness score |
//! | [`imaging`] | Codec boundary: decode, resize, grayscale, bounded sampling |
//! | [`operations`] | Entry points that wire sampling to the analyses, plus rayon batches |
//! | [`config`] | `pixprint.toml` loading, merging and validation |
//! | [`output`] | CLI text formatting |
//!
//! # Design Decisions
//!
//! ## Deterministic Clustering
//!
//! The k-means quantizer seeds centroids at evenly spaced sample indices and
//! runs a fixed number of passes. The same image always produces the same
//! palette, which keeps golden tests stable and makes palettes cacheable.
//!
//! ## Codec Behind a Trait
//!
//! The analyses never touch an image file. [`imaging::RustBackend`] decodes
//! with the `image` crate; tests swap in a recording mock and assert on the
//! exact resize and grayscale calls. Hash grids are resized with fill
//! semantics, so aspect ratio does not change which cells are compared.
//!
//! ## Hex Hashes
//!
//! Hashes are flat 64-bit strings packed as 16 hex digits, most significant
//! bit first. There is no integer byte order involved, so a hash printed by
//! the CLI can be stored, compared and re-parsed anywhere.

pub mod color;
pub mod config;
pub mod hash;
pub mod imaging;
pub mod operations;
pub mod output;
pub mod palette;
pub mod pixel;
pub mod quality;

#[cfg(test)]
pub(crate) mod test_helpers;
