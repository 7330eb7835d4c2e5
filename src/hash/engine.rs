//! Hash computation over a prepared grid.
//!
//! The grid must already be grayscale and exactly the algorithm's
//! [`grid_size`](super::HashAlgorithm::grid_size). Producing it is the
//! codec's job (see [`operations::compute_hash`](crate::operations::compute_hash)).

use super::bits::bits_to_hex;
use super::{HashAlgorithm, HashError, PerceptualHash};
use crate::pixel::PixelBuffer;

/// Hash a prepared grid with the given algorithm.
pub fn hash_grid(grid: &PixelBuffer, algorithm: HashAlgorithm) -> Result<PerceptualHash, HashError> {
    match algorithm {
        HashAlgorithm::DHash => dhash_from_grid(grid),
        HashAlgorithm::AHash => ahash_from_grid(grid),
    }
}

/// Difference hash: for each of the 8 rows, bit = left < right over the
/// 8 adjacent pairs. Row-major, left to right.
pub fn dhash_from_grid(grid: &PixelBuffer) -> Result<PerceptualHash, HashError> {
    check_grid(grid, HashAlgorithm::DHash)?;
    let (w, h) = (grid.width(), grid.height());

    let mut bits = Vec::with_capacity(((w - 1) * h) as usize);
    for y in 0..h {
        for x in 0..w - 1 {
            bits.push(grid.first_channel(x, y) < grid.first_channel(x + 1, y));
        }
    }

    Ok(PerceptualHash {
        hash: bits_to_hex(&bits),
        algorithm: HashAlgorithm::DHash,
    })
}

/// Average hash: bit = pixel ≥ mean of the 64 grid pixels. Row-major.
pub fn ahash_from_grid(grid: &PixelBuffer) -> Result<PerceptualHash, HashError> {
    check_grid(grid, HashAlgorithm::AHash)?;
    let values = grid.data();
    let total: u64 = values.iter().map(|&v| v as u64).sum();
    let n = values.len() as u64;

    // v >= total / n, kept in integers
    let bits: Vec<bool> = values.iter().map(|&v| v as u64 * n >= total).collect();

    Ok(PerceptualHash {
        hash: bits_to_hex(&bits),
        algorithm: HashAlgorithm::AHash,
    })
}

fn check_grid(grid: &PixelBuffer, algorithm: HashAlgorithm) -> Result<(), HashError> {
    let (expected_width, expected_height) = algorithm.grid_size();
    if grid.width() != expected_width || grid.height() != expected_height || grid.channels() != 1 {
        return Err(HashError::GridSize {
            width: grid.width(),
            height: grid.height(),
            channels: grid.channels(),
            expected_width,
            expected_height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_grid(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> PixelBuffer {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        PixelBuffer::new(width, height, 1, data).unwrap()
    }

    // =========================================================================
    // dHash
    // =========================================================================

    #[test]
    fn dhash_uniform_is_all_zero() {
        let hash = dhash_from_grid(&gray_grid(9, 8, |_, _| 77)).unwrap();
        assert_eq!(hash.hash, "0000000000000000");
        assert_eq!(hash.algorithm, HashAlgorithm::DHash);
    }

    #[test]
    fn dhash_increasing_rows_is_all_one() {
        let hash = dhash_from_grid(&gray_grid(9, 8, |x, _| (x * 20) as u8)).unwrap();
        assert_eq!(hash.hash, "ffffffffffffffff");
    }

    #[test]
    fn dhash_mirrored_grid_differs() {
        let ramp = gray_grid(9, 8, |x, y| (x * 20 + y) as u8);
        let mirrored = gray_grid(9, 8, |x, y| ((8 - x) * 20 + y) as u8);
        assert_ne!(
            dhash_from_grid(&ramp).unwrap().hash,
            dhash_from_grid(&mirrored).unwrap().hash
        );
    }

    #[test]
    fn dhash_bit_order_is_row_major() {
        // Only the first pair of the first row increases.
        let hash = dhash_from_grid(&gray_grid(9, 8, |x, y| if (x, y) == (1, 0) { 10 } else { 0 }))
            .unwrap();
        assert_eq!(hash.hash, "8000000000000000");
    }

    #[test]
    fn dhash_rejects_wrong_grid() {
        let err = dhash_from_grid(&gray_grid(8, 8, |_, _| 0)).unwrap_err();
        assert!(matches!(
            err,
            HashError::GridSize {
                width: 8,
                expected_width: 9,
                ..
            }
        ));
        let rgb = PixelBuffer::filled(9, 8, [0, 0, 0]);
        assert!(matches!(
            dhash_from_grid(&rgb),
            Err(HashError::GridSize { channels: 3, .. })
        ));
    }

    // =========================================================================
    // aHash
    // =========================================================================

    #[test]
    fn ahash_uniform_is_all_one() {
        let hash = ahash_from_grid(&gray_grid(8, 8, |_, _| 200)).unwrap();
        assert_eq!(hash.hash, "ffffffffffffffff");
        assert_eq!(hash.algorithm, HashAlgorithm::AHash);
    }

    #[test]
    fn ahash_bright_top_half() {
        let hash = ahash_from_grid(&gray_grid(8, 8, |_, y| if y < 4 { 255 } else { 0 })).unwrap();
        assert_eq!(hash.hash, "ffffffff00000000");
    }

    #[test]
    fn ahash_rejects_dhash_grid() {
        assert!(ahash_from_grid(&gray_grid(9, 8, |_, _| 0)).is_err());
    }

    #[test]
    fn hash_grid_dispatches() {
        let grid = gray_grid(8, 8, |_, _| 1);
        assert_eq!(hash_grid(&grid, HashAlgorithm::AHash).unwrap().algorithm, HashAlgorithm::AHash);
        assert!(hash_grid(&grid, HashAlgorithm::DHash).is_err());
    }
}
