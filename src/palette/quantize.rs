//! Color quantization: reduce a pixel sample to a few representative colors.
//!
//! Two strategies, selected by [`QuantizeStrategy`]:
//!
//! - [`kmeans`] (default): K centroids seeded at evenly spaced sample
//!   positions, then a fixed number of assign/update passes. No randomness,
//!   so the same sample always yields the same palette.
//! - [`bucket`]: round every channel to a step, count, keep the most frequent.
//!   One pass, no iteration, coarser colors.
//!
//! Both return colors ordered by descending pixel count, each carrying its
//! count and share of the sample.

use crate::color::Color;
use crate::config::{PaletteConfig, QuantizeStrategy};
use std::collections::BTreeMap;

/// Run the configured strategy over `pixels`.
pub fn quantize(pixels: &[[u8; 3]], config: &PaletteConfig) -> Vec<Color> {
    match config.strategy {
        QuantizeStrategy::KMeans => kmeans(pixels, config.color_count, config.iterations),
        QuantizeStrategy::Bucket => bucket(pixels, config.color_count, config.bucket_step),
    }
}

/// Iterative clustering with index-based seeding.
///
/// Runs exactly `iterations` passes; there is no convergence check, which
/// keeps the cost fixed at `iterations × pixels × k` distance evaluations.
/// Centroids that end with no pixels are dropped, so fewer than `k` colors
/// come back when the sample has fewer distinct clusters.
pub fn kmeans(pixels: &[[u8; 3]], k: usize, iterations: usize) -> Vec<Color> {
    if pixels.is_empty() || k == 0 {
        return Vec::new();
    }
    let n = pixels.len();
    let k = k.min(n);

    let mut centroids: Vec<[u8; 3]> = (0..k).map(|i| pixels[i * n / k]).collect();
    let mut assignments = vec![0usize; n];
    let mut counts = vec![0u32; k];

    for _ in 0..iterations {
        for (slot, &px) in assignments.iter_mut().zip(pixels) {
            *slot = nearest(&centroids, px);
        }

        let mut sums = vec![[0u64; 3]; k];
        counts.iter_mut().for_each(|c| *c = 0);
        for (&cluster, px) in assignments.iter().zip(pixels) {
            counts[cluster] += 1;
            for ch in 0..3 {
                sums[cluster][ch] += px[ch] as u64;
            }
        }

        for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
            if count > 0 {
                *centroid = sum.map(|s| (s as f64 / count as f64).round() as u8);
            }
        }
    }

    rank(centroids.into_iter().zip(counts), n)
}

/// Index of the closest centroid; ties go to the lowest index.
fn nearest(centroids: &[[u8; 3]], px: [u8; 3]) -> usize {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, c) in centroids.iter().enumerate() {
        let dist = distance_sq(*c, px);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

fn distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(&b)
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

/// Frequency counting after rounding each channel to the nearest multiple of `step`.
pub fn bucket(pixels: &[[u8; 3]], k: usize, step: u8) -> Vec<Color> {
    if pixels.is_empty() || k == 0 || step == 0 {
        return Vec::new();
    }
    let step = step as u32;
    let round = |v: u8| ((v as u32 + step / 2) / step * step).min(255) as u8;

    // BTreeMap keeps tie order stable across runs.
    let mut counts: BTreeMap<[u8; 3], u32> = BTreeMap::new();
    for px in pixels {
        *counts.entry(px.map(round)).or_default() += 1;
    }

    let mut colors = rank(counts, pixels.len());
    colors.truncate(k);
    colors
}

/// Sort `(color, count)` pairs by descending count, dropping empty ones.
/// The sort is stable: equal counts keep their input order.
fn rank(entries: impl IntoIterator<Item = ([u8; 3], u32)>, total: usize) -> Vec<Color> {
    let mut entries: Vec<_> = entries.into_iter().filter(|(_, c)| *c > 0).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
        .into_iter()
        .map(|(rgb, count)| Color::with_count(rgb, count, total))
        .collect()
}
