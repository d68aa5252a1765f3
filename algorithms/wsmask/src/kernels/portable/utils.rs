//! Word-wise XOR primitives shared by every backend for narrow widths.
//!
//! All loads and stores go through byte arrays, so no alignment is required.

use crate::kernels::tail::invalid_width;
use crate::types::MaskKey;

/// XOR an 8-byte word with `pattern`.
#[inline(always)]
#[allow(clippy::inline_always)]
pub const fn xor_u64(word: &mut [u8], pattern: u64) {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(word);
    word.copy_from_slice(&(u64::from_ne_bytes(buf) ^ pattern).to_ne_bytes());
}

/// XOR a 4-byte word with `pattern`.
#[inline(always)]
#[allow(clippy::inline_always)]
pub const fn xor_u32(word: &mut [u8], pattern: u32) {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(word);
    word.copy_from_slice(&(u32::from_ne_bytes(buf) ^ pattern).to_ne_bytes());
}

/// XOR a 2-byte word with `pattern`.
#[inline(always)]
#[allow(clippy::inline_always)]
pub const fn xor_u16(word: &mut [u8], pattern: u16) {
    let mut buf = [0u8; 2];
    buf.copy_from_slice(word);
    word.copy_from_slice(&(u16::from_ne_bytes(buf) ^ pattern).to_ne_bytes());
}

/// XOR every 8-byte word of `chunk` (length a multiple of 8).
#[inline(always)]
#[allow(clippy::inline_always)]
pub fn xor_words(chunk: &mut [u8], pattern: u64) {
    for word in chunk.chunks_exact_mut(8) {
        xor_u64(word, pattern);
    }
}

/// Applier for the widths below one vector register: 8, 4, 2 and 1 bytes.
#[inline(always)]
#[allow(clippy::inline_always)]
pub fn xor_narrow(chunk: &mut [u8], key: MaskKey) {
    match chunk.len() {
        8 => xor_u64(chunk, key.pattern64()),
        4 => xor_u32(chunk, key.pattern32()),
        2 => xor_u16(chunk, key.pattern16()),
        1 => chunk[0] ^= key.byte(0),
        width => invalid_width(width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_widths_use_key_prefix() {
        let key = MaskKey::new(0x0403_0201);
        for (width, expected) in [
            (1, &[0x01][..]),
            (2, &[0x01, 0x02][..]),
            (4, &[0x01, 0x02, 0x03, 0x04][..]),
            (8, &[0x01, 0x02, 0x03, 0x04, 0x01, 0x02, 0x03, 0x04][..]),
        ] {
            let mut buf = vec![0u8; width];
            xor_narrow(&mut buf, key);
            assert_eq!(buf, expected, "width {width}");
        }
    }

    #[test]
    fn words_cover_whole_chunk() {
        let key = MaskKey::new(0xA0B0_C0D0);
        let mut buf = [0xFFu8; 32];
        xor_words(&mut buf, key.pattern64());
        for (i, b) in buf.iter().enumerate() {
            assert_eq!(*b, 0xFF ^ key.byte(i), "byte {i}");
        }
    }
}
