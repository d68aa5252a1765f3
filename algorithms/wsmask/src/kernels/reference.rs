//! Scalar reference implementation.
//!
//! One byte at a time, no decomposition. Used as the oracle in tests, fuzz
//! targets and benchmarks.

use crate::types::MaskKey;

/// `payload[i] ^= key.byte(i)` for every byte.
pub fn mask(payload: &mut [u8], key: MaskKey) {
    let bytes = key.to_bytes();
    for (i, b) in payload.iter_mut().enumerate() {
        *b ^= bytes[i & 3];
    }
}
