//! Bit string ↔ hex packing.
//!
//! Bits are grouped into nibbles in emission order, most significant bit
//! first, one hex digit per nibble. There is no byte order to get wrong.

use super::HashError;

/// Pack bits into lowercase hex. A trailing partial nibble is zero-filled
/// on the right.
pub fn bits_to_hex(bits: &[bool]) -> String {
    bits.chunks(4)
        .map(|nibble| {
            let value = nibble
                .iter()
                .enumerate()
                .fold(0u32, |acc, (i, &bit)| acc | ((bit as u32) << (3 - i)));
            char::from_digit(value, 16).unwrap_or('0')
        })
        .collect()
}

/// Unpack hex into bits, exactly 4 per digit so leading zeros survive.
pub fn hex_to_bits(hex: &str) -> Result<Vec<bool>, HashError> {
    let mut bits = Vec::with_capacity(hex.len() * 4);
    for c in hex.chars() {
        let value = c
            .to_digit(16)
            .ok_or_else(|| HashError::InvalidHex(hex.to_string()))?;
        bits.extend((0..4).rev().map(|shift| (value >> shift) & 1 == 1));
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_msb_first() {
        let bits = [true, false, false, false, false, false, false, true];
        assert_eq!(bits_to_hex(&bits), "81");
    }

    #[test]
    fn partial_nibble_is_zero_filled() {
        assert_eq!(bits_to_hex(&[true, true]), "c");
    }

    #[test]
    fn unpacking_keeps_leading_zeros() {
        let bits = hex_to_bits("01").unwrap();
        assert_eq!(bits.len(), 8);
        assert_eq!(bits.iter().filter(|&&b| b).count(), 1);
        assert!(bits[7]);
    }

    #[test]
    fn unpacking_accepts_uppercase() {
        assert_eq!(hex_to_bits("F").unwrap(), vec![true; 4]);
    }

    #[test]
    fn unpacking_rejects_non_hex() {
        assert_eq!(
            hex_to_bits("0g"),
            Err(HashError::InvalidHex("0g".to_string()))
        );
    }

    #[test]
    fn pack_of_unpack_is_lowercase_identity() {
        let hex = "00ff1234abcdEF90";
        assert_eq!(bits_to_hex(&hex_to_bits(hex).unwrap()), hex.to_lowercase());
    }
}
