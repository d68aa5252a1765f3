//! Public API Layer
//!
use crate::engine::{dispatcher, parallel};
use crate::types::{Backend, MaskKey, UnsupportedBackend};

// =============================================================================
// MASKING
// =============================================================================

/// XOR `payload` in place with the repeating 4-byte `key`.
///
/// `payload[0]` is masked with key byte 0 (the least significant byte of a
/// `u32` key). Masking twice with the same key restores the input.
///
/// # Example
/// ```rust
/// let mut payload = [0u8; 5];
/// wsmask::mask(&mut payload, 0x0403_0201_u32);
/// assert_eq!(payload, [0x01, 0x02, 0x03, 0x04, 0x01]);
/// ```
#[inline]
pub fn mask(payload: &mut [u8], key: impl Into<MaskKey>) {
    if payload.is_empty() {
        return;
    }
    let kernel = dispatcher::get_best_kernel();
    kernel(payload, key.into());
}

/// Undo [`mask`]. XOR masking is its own inverse.
#[inline]
pub fn unmask(payload: &mut [u8], key: impl Into<MaskKey>) {
    mask(payload, key);
}

/// Mask a sub-range that starts `offset` bytes into a longer message.
///
/// Equivalent to rotating the key to phase `offset % 4` and calling [`mask`].
///
/// # Example
/// ```rust
/// let key = 0x0403_0201_u32;
/// let mut whole = [0u8; 10];
/// wsmask::mask(&mut whole, key);
///
/// let mut parts = [0u8; 10];
/// let (head, tail) = parts.split_at_mut(3);
/// wsmask::mask_at(head, key, 0);
/// wsmask::mask_at(tail, key, 3);
/// assert_eq!(whole, parts);
/// ```
#[inline]
pub fn mask_at(payload: &mut [u8], key: impl Into<MaskKey>, offset: u64) {
    mask(payload, key.into().at_offset(offset));
}

/// Mask with an explicitly chosen backend instead of the detected one.
///
/// # Errors
/// Returns `UnsupportedBackend` if the CPU cannot run `backend`; the payload
/// is left untouched in that case.
///
/// # Example
/// ```rust
/// use wsmask::{mask_with, Backend};
///
/// let mut payload = *b"frame";
/// mask_with(Backend::Portable, &mut payload, 0xA1B2_C3D4_u32)?;
/// # Ok::<(), wsmask::UnsupportedBackend>(())
/// ```
pub fn mask_with(
    backend: Backend,
    payload: &mut [u8],
    key: impl Into<MaskKey>,
) -> Result<(), UnsupportedBackend> {
    let kernel = backend.kernel()?;
    kernel(payload, key.into());
    Ok(())
}

// =============================================================================
// PARALLEL
// =============================================================================

/// Mask using multiple threads for large payloads.
///
/// Payloads shorter than `PARALLEL_THRESHOLD` are masked on the calling
/// thread, so this is always safe to call. Output is identical to [`mask`].
#[inline]
pub fn mask_parallel(payload: &mut [u8], key: impl Into<MaskKey>) {
    if payload.len() < parallel::PARALLEL_THRESHOLD {
        mask(payload, key);
        return;
    }
    parallel::mask_chunks(payload, key.into());
}
