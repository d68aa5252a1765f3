//! NEON Kernel
//!
//! 128-bit implementation for aarch64, where NEON is always present. There is
//! no stable prefetch intrinsic on this target, so the bulk loop runs without
//! a read-ahead hint.

#![allow(unsafe_code)]

use crate::kernels::constants::{BULK_CHUNK, KEY_SIZE};
use crate::kernels::portable::utils::xor_narrow;
use crate::kernels::tail::{self, Applier};
use crate::types::MaskKey;

use core::arch::aarch64::{uint8x16_t, veorq_u8, vld1q_u8, vst1q_u8};

/// Width of one Q register.
const Q_WIDTH: usize = 16;

/// Load the key pattern replicated over a Q register.
#[inline(always)]
#[allow(clippy::inline_always)]
unsafe fn broadcast(key: MaskKey) -> uint8x16_t {
    let bytes = key.to_bytes();
    let pattern: [u8; Q_WIDTH] = core::array::from_fn(|i| bytes[i % KEY_SIZE]);
    vld1q_u8(pattern.as_ptr())
}

/// XOR `count` consecutive 16-byte lanes starting at `ptr`.
#[inline(always)]
#[allow(clippy::inline_always)]
unsafe fn xor_lanes(ptr: *mut u8, count: usize, key128: uint8x16_t) {
    for i in 0..count {
        let lane = ptr.add(i * Q_WIDTH);
        vst1q_u8(lane, veorq_u8(vld1q_u8(lane), key128));
    }
}

// =============================================================================
// FIXED-WIDTH APPLIER
// =============================================================================

/// Fixed-width applier built on Q registers.
pub struct Neon;

impl Applier for Neon {
    // SAFETY: NEON is mandatory on aarch64. Lane count is derived from
    // `chunk.len()`, so every access stays inside `chunk`.
    #[inline(always)]
    #[allow(clippy::inline_always)]
    unsafe fn apply(chunk: &mut [u8], key: MaskKey) {
        match chunk.len() {
            width @ (16 | 32 | 64 | 128) => {
                xor_lanes(chunk.as_mut_ptr(), width / Q_WIDTH, broadcast(key));
            }
            _ => xor_narrow(chunk, key),
        }
    }
}

// =============================================================================
// BULK LOOP
// =============================================================================

/// Mask `payload` in place (first byte at phase 0).
///
/// # Safety
/// The CPU must support NEON.
#[target_feature(enable = "neon")]
pub unsafe fn mask(payload: &mut [u8], key: MaskKey) {
    let key128 = broadcast(key);

    let mut chunks = payload.chunks_exact_mut(BULK_CHUNK);
    for chunk in &mut chunks {
        let ptr = chunk.as_mut_ptr();

        let d0 = veorq_u8(vld1q_u8(ptr), key128);
        let d1 = veorq_u8(vld1q_u8(ptr.add(16)), key128);
        let d2 = veorq_u8(vld1q_u8(ptr.add(32)), key128);
        let d3 = veorq_u8(vld1q_u8(ptr.add(48)), key128);
        let d4 = veorq_u8(vld1q_u8(ptr.add(64)), key128);
        let d5 = veorq_u8(vld1q_u8(ptr.add(80)), key128);
        let d6 = veorq_u8(vld1q_u8(ptr.add(96)), key128);
        let d7 = veorq_u8(vld1q_u8(ptr.add(112)), key128);

        vst1q_u8(ptr, d0);
        vst1q_u8(ptr.add(16), d1);
        vst1q_u8(ptr.add(32), d2);
        vst1q_u8(ptr.add(48), d3);
        vst1q_u8(ptr.add(64), d4);
        vst1q_u8(ptr.add(80), d5);
        vst1q_u8(ptr.add(96), d6);
        vst1q_u8(ptr.add(112), d7);

        xor_lanes(ptr.add(128), 8, key128);
    }

    tail::dispatch::<Neon>(chunks.into_remainder(), key, 0);
}
