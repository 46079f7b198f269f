//! Crypt-style base64
//!
//! The alphabet is `./0-9A-Za-z` and groups are little-endian: three input
//! bytes `b0 b1 b2` form the 24-bit value `b0 | b1 << 8 | b2 << 16`, which is
//! written six bits at a time starting from the least significant end. This
//! is the encoding of every `$`-tagged method that is not bcrypt.

/// The crypt base64 alphabet.
pub const ITOA64: &[u8; 64] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Append `n` characters encoding the 24-bit group `b0 | b1 << 8 | b2 << 16`.
pub fn encode_group(out: &mut Vec<u8>, b0: u8, b1: u8, b2: u8, n: usize) {
    let mut w = u32::from(b0) | (u32::from(b1) << 8) | (u32::from(b2) << 16);
    for _ in 0..n {
        out.push(ITOA64[(w & 0x3f) as usize]);
        w >>= 6;
    }
}

/// Encode a byte string. A trailing partial group of one byte produces two
/// characters, of two bytes three.
pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        match *chunk {
            [b0, b1, b2] => encode_group(&mut out, b0, b1, b2, 4),
            [b0, b1] => encode_group(&mut out, b0, b1, 0, 3),
            [b0] => encode_group(&mut out, b0, 0, 0, 2),
            _ => unreachable!("chunks(3) yields 1..=3 bytes"),
        }
    }
    out
}

/// Encode `bytes` after reordering them by `offsets`.
pub fn encode_transposed(bytes: &[u8], offsets: &[usize]) -> Vec<u8> {
    let permuted: Vec<u8> = offsets.iter().map(|&i| bytes[i]).collect();
    encode_bytes(&permuted)
}

/// Single character for a value below 64.
pub fn encode_int6(value: u32) -> u8 {
    ITOA64[(value & 0x3f) as usize]
}

/// Five characters for a 30-bit value, least significant first.
pub fn encode_int30(value: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(5);
    let mut w = value;
    for _ in 0..5 {
        out.push(ITOA64[(w & 0x3f) as usize]);
        w >>= 6;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_order() {
        assert_eq!(encode_int6(0), b'.');
        assert_eq!(encode_int6(1), b'/');
        assert_eq!(encode_int6(2), b'0');
        assert_eq!(encode_int6(12), b'A');
        assert_eq!(encode_int6(38), b'a');
        assert_eq!(encode_int6(63), b'z');
    }

    #[test]
    fn test_int30_is_little_endian() {
        assert_eq!(encode_int30(8), b"6....");
        assert_eq!(encode_int30(1), b"/....");
        assert_eq!(encode_int30(64), b"./...");
    }

    #[test]
    fn test_encoded_lengths() {
        assert_eq!(encode_bytes(&[0u8; 16]).len(), 22);
        assert_eq!(encode_bytes(&[0u8; 32]).len(), 43);
        assert_eq!(encode_bytes(&[0u8; 3]), b"....");
    }

    #[test]
    fn test_group_low_bits_first() {
        // 0x000001 -> '/' followed by three zero digits
        assert_eq!(encode_bytes(&[1, 0, 0]), b"/...");
        // bit 6 lands in the second character
        assert_eq!(encode_bytes(&[0x40, 0, 0]), b"./..");
    }

    #[test]
    fn test_transposed_uses_offsets() {
        // [1, 0, 0] reordered to [0, 0, 1] is the value 1 << 16
        let bytes = [1u8, 0, 0];
        assert_eq!(encode_transposed(&bytes, &[1, 2, 0]), b"..E.");
    }
}
