//! Portable implementation of the masking kernel.
//!
//! Pure Rust, no SIMD: the bulk loop XORs 64-bit words, which compilers
//! auto-vectorize where they can. Produces byte-identical results to the
//! vector backends on every target and byte order.

pub(crate) mod utils;

use self::utils::{xor_narrow, xor_words};
use crate::kernels::constants::BULK_CHUNK;
use crate::kernels::tail::{self, Applier};
use crate::types::MaskKey;

// =============================================================================
// FIXED-WIDTH APPLIER
// =============================================================================

/// Fixed-width applier built on 64-bit words.
pub struct Portable;

#[allow(unsafe_code)]
impl Applier for Portable {
    #[inline(always)]
    #[allow(clippy::inline_always)]
    unsafe fn apply(chunk: &mut [u8], key: MaskKey) {
        match chunk.len() {
            16 | 32 | 64 | 128 => xor_words(chunk, key.pattern64()),
            _ => xor_narrow(chunk, key),
        }
    }
}

// =============================================================================
// KERNEL
// =============================================================================

/// Mask `payload` in place (first byte at phase 0).
#[allow(unsafe_code)]
pub fn mask(payload: &mut [u8], key: MaskKey) {
    let pattern = key.pattern64();

    let mut chunks = payload.chunks_exact_mut(BULK_CHUNK);
    for chunk in &mut chunks {
        xor_words(chunk, pattern);
    }

    // SAFETY: The portable applier has no CPU requirements.
    unsafe { tail::dispatch::<Portable>(chunks.into_remainder(), key, 0) }
}
