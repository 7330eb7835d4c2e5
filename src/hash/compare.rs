//! Hamming distance, similarity, and pairwise duplicate grouping.

use super::bits::hex_to_bits;
use super::{HashError, PerceptualHash};
use serde::Serialize;

/// Outcome of comparing two hashes.
///
/// `similarity == 1 - distance / bit_length`, so identical hashes give 1.0
/// and fully inverted ones 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityResult {
    pub similarity: f64,
    pub distance: u32,
}

/// One image and the later images that match it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub index: usize,
    pub duplicates: Vec<usize>,
}

/// Compare two hex hashes bit by bit.
///
/// Lengths are checked before content, so `"abc"` vs `"ab"` is a
/// [`HashError::LengthMismatch`] even though both are valid hex.
pub fn compare_hashes(a: &str, b: &str) -> Result<SimilarityResult, HashError> {
    if a.len() != b.len() {
        return Err(HashError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.is_empty() {
        return Err(HashError::Empty);
    }

    let (bits_a, bits_b) = (hex_to_bits(a)?, hex_to_bits(b)?);
    let distance = bits_a.iter().zip(&bits_b).filter(|(x, y)| x != y).count();
    let bit_length = bits_a.len();

    Ok(SimilarityResult {
        similarity: 1.0 - distance as f64 / bit_length as f64,
        distance: distance as u32,
    })
}

/// Group hashes whose similarity reaches `threshold`.
///
/// Every unordered pair is compared once, from the lower index, so a match
/// between 0 and 1 appears as `{index: 0, duplicates: [1]}` and never under
/// index 1. Indices with no matches are left out.
pub fn find_duplicate_hashes(
    hashes: &[PerceptualHash],
    threshold: f64,
) -> Result<Vec<DuplicateGroup>, HashError> {
    let mut groups = Vec::new();
    for (i, a) in hashes.iter().enumerate() {
        let mut duplicates = Vec::new();
        for (j, b) in hashes.iter().enumerate().skip(i + 1) {
            if a.compare(b)?.similarity >= threshold {
                duplicates.push(j);
            }
        }
        if !duplicates.is_empty() {
            groups.push(DuplicateGroup {
                index: i,
                duplicates,
            });
        }
    }
    Ok(groups)
}
