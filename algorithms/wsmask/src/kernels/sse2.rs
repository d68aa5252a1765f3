//! SSE2 Kernel
//!
//! 128-bit implementation, the baseline on every `x86_64` CPU. The bulk loop
//! covers a 256-byte chunk as two halves of eight XMM lanes.

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_ptr_alignment)]

use crate::kernels::constants::{BULK_CHUNK, PREFETCH_DISTANCE};
use crate::kernels::portable::utils::xor_narrow;
use crate::kernels::tail::{self, Applier};
use crate::types::MaskKey;

#[cfg(target_arch = "x86")]
use core::arch::x86::{
    __m128i, _mm_loadu_si128, _mm_prefetch, _mm_set1_epi32, _mm_storeu_si128, _mm_xor_si128,
    _MM_HINT_NTA,
};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{
    __m128i, _mm_loadu_si128, _mm_prefetch, _mm_set1_epi32, _mm_storeu_si128, _mm_xor_si128,
    _MM_HINT_NTA,
};

/// Width of one XMM lane.
const XMM_WIDTH: usize = 16;

// =============================================================================
// FIXED-WIDTH APPLIER
// =============================================================================

/// Fixed-width applier built on XMM registers.
pub struct Sse2;

impl Applier for Sse2 {
    // SAFETY: Requires SSE2 (enforced by dispatcher). Lane count is derived
    // from `chunk.len()`, so every access stays inside `chunk`.
    #[inline(always)]
    #[allow(clippy::inline_always)]
    unsafe fn apply(chunk: &mut [u8], key: MaskKey) {
        match chunk.len() {
            width @ (16 | 32 | 64 | 128) => {
                let key128 = _mm_set1_epi32(key.pattern32() as i32);
                let lanes = chunk.as_mut_ptr().cast::<__m128i>();
                for i in 0..width / XMM_WIDTH {
                    let lane = lanes.add(i);
                    _mm_storeu_si128(lane, _mm_xor_si128(_mm_loadu_si128(lane), key128));
                }
            }
            _ => xor_narrow(chunk, key),
        }
    }
}

/// XOR eight consecutive 16-byte lanes starting at `lanes`.
#[inline(always)]
#[allow(clippy::inline_always)]
unsafe fn xor_half(lanes: *mut __m128i, key128: __m128i) {
    let d0 = _mm_xor_si128(_mm_loadu_si128(lanes), key128);
    let d1 = _mm_xor_si128(_mm_loadu_si128(lanes.add(1)), key128);
    let d2 = _mm_xor_si128(_mm_loadu_si128(lanes.add(2)), key128);
    let d3 = _mm_xor_si128(_mm_loadu_si128(lanes.add(3)), key128);
    let d4 = _mm_xor_si128(_mm_loadu_si128(lanes.add(4)), key128);
    let d5 = _mm_xor_si128(_mm_loadu_si128(lanes.add(5)), key128);
    let d6 = _mm_xor_si128(_mm_loadu_si128(lanes.add(6)), key128);
    let d7 = _mm_xor_si128(_mm_loadu_si128(lanes.add(7)), key128);

    _mm_storeu_si128(lanes, d0);
    _mm_storeu_si128(lanes.add(1), d1);
    _mm_storeu_si128(lanes.add(2), d2);
    _mm_storeu_si128(lanes.add(3), d3);
    _mm_storeu_si128(lanes.add(4), d4);
    _mm_storeu_si128(lanes.add(5), d5);
    _mm_storeu_si128(lanes.add(6), d6);
    _mm_storeu_si128(lanes.add(7), d7);
}

// =============================================================================
// BULK LOOP
// =============================================================================

/// Mask `payload` in place (first byte at phase 0).
///
/// # Safety
/// The CPU must support SSE2.
// SAFETY: Both halves stay inside each `BULK_CHUNK` slice. The prefetch
// address may point past the buffer; it is never dereferenced.
#[target_feature(enable = "sse2")]
pub unsafe fn mask(payload: &mut [u8], key: MaskKey) {
    let key128 = _mm_set1_epi32(key.pattern32() as i32);

    let mut chunks = payload.chunks_exact_mut(BULK_CHUNK);
    for chunk in &mut chunks {
        let ptr = chunk.as_mut_ptr();
        let lanes = ptr.cast::<__m128i>();

        xor_half(lanes, key128);
        _mm_prefetch::<_MM_HINT_NTA>(ptr.wrapping_add(PREFETCH_DISTANCE).cast::<i8>());
        xor_half(lanes.add(8), key128);
    }

    tail::dispatch::<Sse2>(chunks.into_remainder(), key, 0);
}
