//! AVX2 Kernel
//!
//! 256-bit implementation: the bulk loop XORs eight 32-byte lanes per
//! 256-byte chunk, the applier serves 128/64/32 bytes with YMM registers and
//! 16 bytes with an XMM register.

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_ptr_alignment)]

use crate::kernels::constants::{BULK_CHUNK, LANE_WIDTH, PREFETCH_DISTANCE};
use crate::kernels::portable::utils::xor_narrow;
use crate::kernels::tail::{self, Applier};
use crate::types::MaskKey;

#[cfg(target_arch = "x86")]
use core::arch::x86::{
    __m128i, __m256i, _mm256_loadu_si256, _mm256_set1_epi32, _mm256_storeu_si256,
    _mm256_xor_si256, _mm_loadu_si128, _mm_prefetch, _mm_set1_epi32, _mm_storeu_si128,
    _mm_xor_si128, _MM_HINT_NTA,
};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{
    __m128i, __m256i, _mm256_loadu_si256, _mm256_set1_epi32, _mm256_storeu_si256,
    _mm256_xor_si256, _mm_loadu_si128, _mm_prefetch, _mm_set1_epi32, _mm_storeu_si128,
    _mm_xor_si128, _MM_HINT_NTA,
};

// =============================================================================
// FIXED-WIDTH APPLIER
// =============================================================================

/// Fixed-width applier built on YMM registers.
pub struct Avx2;

impl Applier for Avx2 {
    // SAFETY: Requires AVX2 (enforced by dispatcher). Every access stays inside
    // `chunk`, whose length selects the lane count.
    #[inline(always)]
    #[allow(clippy::inline_always)]
    unsafe fn apply(chunk: &mut [u8], key: MaskKey) {
        let ptr = chunk.as_mut_ptr();
        match chunk.len() {
            128 => xor_lanes::<4>(ptr, _mm256_set1_epi32(key.pattern32() as i32)),
            64 => xor_lanes::<2>(ptr, _mm256_set1_epi32(key.pattern32() as i32)),
            32 => xor_lanes::<1>(ptr, _mm256_set1_epi32(key.pattern32() as i32)),
            16 => {
                let key128 = _mm_set1_epi32(key.pattern32() as i32);
                let lane = ptr.cast::<__m128i>();
                _mm_storeu_si128(lane, _mm_xor_si128(_mm_loadu_si128(lane), key128));
            }
            _ => xor_narrow(chunk, key),
        }
    }
}

/// XOR `N` consecutive 32-byte lanes starting at `ptr`.
#[inline(always)]
#[allow(clippy::inline_always)]
unsafe fn xor_lanes<const N: usize>(ptr: *mut u8, key256: __m256i) {
    for i in 0..N {
        let lane = ptr.add(i * LANE_WIDTH).cast::<__m256i>();
        _mm256_storeu_si256(lane, _mm256_xor_si256(_mm256_loadu_si256(lane), key256));
    }
}

// =============================================================================
// BULK LOOP
// =============================================================================

/// Mask `payload` in place (first byte at phase 0).
///
/// # Safety
/// The CPU must support AVX2.
// SAFETY: Loads and stores stay inside each `BULK_CHUNK` slice. The prefetch
// address may point past the buffer; it is never dereferenced.
#[target_feature(enable = "avx2")]
pub unsafe fn mask(payload: &mut [u8], key: MaskKey) {
    let key256 = _mm256_set1_epi32(key.pattern32() as i32);

    let mut chunks = payload.chunks_exact_mut(BULK_CHUNK);
    for chunk in &mut chunks {
        let ptr = chunk.as_mut_ptr();
        let lanes = ptr.cast::<__m256i>();

        let d0 = _mm256_xor_si256(_mm256_loadu_si256(lanes), key256);
        let d1 = _mm256_xor_si256(_mm256_loadu_si256(lanes.add(1)), key256);
        let d2 = _mm256_xor_si256(_mm256_loadu_si256(lanes.add(2)), key256);
        let d3 = _mm256_xor_si256(_mm256_loadu_si256(lanes.add(3)), key256);
        let d4 = _mm256_xor_si256(_mm256_loadu_si256(lanes.add(4)), key256);
        let d5 = _mm256_xor_si256(_mm256_loadu_si256(lanes.add(5)), key256);
        let d6 = _mm256_xor_si256(_mm256_loadu_si256(lanes.add(6)), key256);
        let d7 = _mm256_xor_si256(_mm256_loadu_si256(lanes.add(7)), key256);

        _mm_prefetch::<_MM_HINT_NTA>(ptr.wrapping_add(PREFETCH_DISTANCE).cast::<i8>());

        _mm256_storeu_si256(lanes, d0);
        _mm256_storeu_si256(lanes.add(1), d1);
        _mm256_storeu_si256(lanes.add(2), d2);
        _mm256_storeu_si256(lanes.add(3), d3);
        _mm256_storeu_si256(lanes.add(4), d4);
        _mm256_storeu_si256(lanes.add(5), d5);
        _mm256_storeu_si256(lanes.add(6), d6);
        _mm256_storeu_si256(lanes.add(7), d7);
    }

    tail::dispatch::<Avx2>(chunks.into_remainder(), key, 0);
}
