//! High-level entry points: sample, then analyze.
//!
//! Each function takes the codec as `&impl ImageCodec` so tests can pass a
//! recording mock and production code passes [`RustBackend`](crate::imaging::RustBackend).
//! Nothing here keeps state between calls; every function can run
//! concurrently with any other.
//!
//! | Function | Path |
//! |---|---|
//! | [`extract_palette`] | sample → quantize |
//! | [`analyze_colors`] | sample → quantize → classify |
//! | [`compute_hash`] | sample → grayscale → fill to grid → hash |
//! | [`compare_images`], [`are_similar`] | two hashes → compare |
//! | [`find_duplicates`] | N hashes (parallel) → pairwise groups |
//! | [`score_quality`] | full buffer (downsampled above the ceiling) → Laplacian |
//!
//! Batch functions fan out with rayon on the global pool, which the binary
//! sizes from `processing.max_processes`.

use crate::config::{HashConfig, OversizePolicy, PaletteConfig, QualityConfig};
use crate::hash::{
    DuplicateGroup, HashAlgorithm, HashError, PerceptualHash, SimilarityResult,
    find_duplicate_hashes, hash_grid,
};
use crate::imaging::{
    CodecError, ImageCodec, ResizeParams, calculate_ceiling_dimensions, sample,
};
use crate::palette::{ColorAnalysis, ColorPalette};
use crate::pixel::PixelBuffer;
use crate::quality::{QualityError, QualityScore, calculate_quality_score};
use rayon::prelude::*;
use thiserror::Error;

/// Longest edge of the sample a hash grid is reduced from.
pub const HASH_SAMPLE_DIM: u32 = 100;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Hash(#[from] HashError),
    #[error(transparent)]
    Quality(#[from] QualityError),
}

/// Ranked colors of a buffer, from a sample no larger than
/// `config.sample_size` on either edge.
pub fn extract_palette(
    codec: &impl ImageCodec,
    buffer: &PixelBuffer,
    config: &PaletteConfig,
) -> Result<ColorPalette, CodecError> {
    let pixels = sample(codec, buffer, config.sample_size)?.rgb_pixels();
    let palette = ColorPalette::from_sample(&pixels, config);
    tracing::debug!(
        sample = pixels.len(),
        colors = palette.colors.len(),
        "extracted palette"
    );
    Ok(palette)
}

/// Palette plus vibrant picks and grayscale/monochromatic flags.
pub fn analyze_colors(
    codec: &impl ImageCodec,
    buffer: &PixelBuffer,
    config: &PaletteConfig,
) -> Result<ColorAnalysis, CodecError> {
    let pixels = sample(codec, buffer, config.sample_size)?.rgb_pixels();
    Ok(ColorAnalysis::from_sample(&pixels, config))
}

/// Perceptual hash of a buffer.
///
/// The grid is resized with fill semantics: aspect ratio is not kept, so
/// a 16:9 and a 4:3 crop of the same scene still line up cell for cell.
/// An empty buffer fails at the resize step with [`CodecError::Resize`].
pub fn compute_hash(
    codec: &impl ImageCodec,
    buffer: &PixelBuffer,
    algorithm: HashAlgorithm,
) -> Result<PerceptualHash, AnalysisError> {
    let sampled = sample(codec, buffer, HASH_SAMPLE_DIM)?;
    let gray = codec.to_grayscale(&sampled)?;
    let (width, height) = algorithm.grid_size();
    let grid = codec.resize(&gray, &ResizeParams::fill(width, height))?;
    let hash = hash_grid(&grid, algorithm)?;
    tracing::debug!(algorithm = %algorithm, hash = %hash.hash, "computed hash");
    Ok(hash)
}

/// Hash every buffer in parallel. Output order matches input order.
pub fn hash_batch(
    codec: &impl ImageCodec,
    buffers: &[PixelBuffer],
    algorithm: HashAlgorithm,
) -> Result<Vec<PerceptualHash>, AnalysisError> {
    buffers
        .par_iter()
        .map(|buffer| compute_hash(codec, buffer, algorithm))
        .collect()
}

/// Hash both buffers with `algorithm` and compare.
pub fn compare_images(
    codec: &impl ImageCodec,
    a: &PixelBuffer,
    b: &PixelBuffer,
    algorithm: HashAlgorithm,
) -> Result<SimilarityResult, AnalysisError> {
    let (ha, hb) = rayon::join(
        || compute_hash(codec, a, algorithm),
        || compute_hash(codec, b, algorithm),
    );
    Ok(ha?.compare(&hb?)?)
}

/// True when the two buffers' similarity reaches `config.similarity_threshold`.
pub fn are_similar(
    codec: &impl ImageCodec,
    a: &PixelBuffer,
    b: &PixelBuffer,
    config: &HashConfig,
) -> Result<bool, AnalysisError> {
    let result = compare_images(codec, a, b, config.algorithm)?;
    Ok(result.similarity >= config.similarity_threshold)
}

/// Hash all buffers, then group near-duplicates pairwise.
///
/// See [`find_duplicate_hashes`] for the grouping rules.
pub fn find_duplicates(
    codec: &impl ImageCodec,
    buffers: &[PixelBuffer],
    config: &HashConfig,
) -> Result<Vec<DuplicateGroup>, AnalysisError> {
    let hashes = hash_batch(codec, buffers, config.algorithm)?;
    let groups = find_duplicate_hashes(&hashes, config.similarity_threshold)?;
    tracing::debug!(images = buffers.len(), groups = groups.len(), "duplicate scan done");
    Ok(groups)
}

/// Sharpness of the full-resolution buffer.
///
/// Above the pixel ceiling the [`OversizePolicy`] decides: `Reject` returns
/// [`QualityError::TooLarge`], `Downsample` shrinks the buffer to the
/// ceiling through the codec and scores the result.
pub fn score_quality(
    codec: &impl ImageCodec,
    buffer: &PixelBuffer,
    config: &QualityConfig,
) -> Result<QualityScore, AnalysisError> {
    let pixels = buffer.pixel_count() as u64;
    match config.pixel_ceiling() {
        Some(max) if pixels > max && config.oversize == OversizePolicy::Downsample => {
            let (width, height) =
                calculate_ceiling_dimensions((buffer.width(), buffer.height()), max);
            tracing::warn!(
                pixels,
                max,
                width,
                height,
                "buffer above quality ceiling, downsampling before scoring"
            );
            let reduced = codec.resize(buffer, &ResizeParams::fill(width, height))?;
            Ok(calculate_quality_score(&reduced, config)?)
        }
        _ => Ok(calculate_quality_score(buffer, config)?),
    }
}

/// Score every buffer in parallel. One result per input, in input order.
pub fn score_quality_batch(
    codec: &impl ImageCodec,
    buffers: &[PixelBuffer],
    config: &QualityConfig,
) -> Vec<Result<QualityScore, AnalysisError>> {
    buffers
        .par_iter()
        .map(|buffer| score_quality(codec, buffer, config))
        .collect()
}
