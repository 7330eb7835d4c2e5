//! Perceptual hashing and similarity.
//!
//! A hash is 64 bits packed as 16 lowercase hex digits. Both algorithms work
//! on a tiny grayscale grid produced by the codec, so the bit pattern depends
//! on coarse structure and not on resolution or compression noise.
//!
//! | Algorithm | Grid | Bit `i` is set when |
//! |---|---|---|
//! | dHash | 9×8 | pixel is darker than its right neighbour |
//! | aHash | 8×8 | pixel is at least the grid mean |
//!
//! Hashes are orientation-sensitive: a mirrored image hashes differently.

mod bits;
mod compare;
mod engine;

pub use bits::{bits_to_hex, hex_to_bits};
pub use compare::{DuplicateGroup, SimilarityResult, compare_hashes, find_duplicate_hashes};
pub use engine::{ahash_from_grid, dhash_from_grid, hash_grid};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Bits per hash for both algorithms.
pub const HASH_BITS: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("hash lengths differ: {left} vs {right} hex digits")]
    LengthMismatch { left: usize, right: usize },
    #[error("invalid hex digit in hash {0:?}")]
    InvalidHex(String),
    #[error("cannot compare empty hashes")]
    Empty,
    #[error("expected a {expected_width}x{expected_height} single-channel grid, got {width}x{height} with {channels} channels")]
    GridSize {
        width: u32,
        height: u32,
        channels: u8,
        expected_width: u32,
        expected_height: u32,
    },
    #[error("cannot compare a {left} hash with a {right} hash")]
    AlgorithmMismatch {
        left: HashAlgorithm,
        right: HashAlgorithm,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// Difference hash over horizontal neighbours.
    #[default]
    DHash,
    /// Average hash against the grid mean.
    AHash,
}

impl HashAlgorithm {
    /// Grid `(width, height)` the codec must produce for this algorithm.
    pub fn grid_size(self) -> (u32, u32) {
        match self {
            HashAlgorithm::DHash => (9, 8),
            HashAlgorithm::AHash => (8, 8),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::DHash => "dhash",
            HashAlgorithm::AHash => "ahash",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A packed hash and the algorithm that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerceptualHash {
    pub hash: String,
    pub algorithm: HashAlgorithm,
}

impl PerceptualHash {
    /// Compare against another hash of the same algorithm.
    pub fn compare(&self, other: &PerceptualHash) -> Result<SimilarityResult, HashError> {
        if self.algorithm != other.algorithm {
            return Err(HashError::AlgorithmMismatch {
                left: self.algorithm,
                right: other.algorithm,
            });
        }
        compare_hashes(&self.hash, &other.hash)
    }
}
