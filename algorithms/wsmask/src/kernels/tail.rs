//! Tail Dispatcher
//!
//! Masks the `0..=255` bytes left over after the bulk loop. The tail length is
//! split into its set bits, widest first, and each piece goes to the
//! backend's fixed-width applier with the key rotated to the phase of the
//! piece's first byte.

use crate::kernels::constants::{MAX_TAIL, TAIL_WIDTHS};
use crate::types::MaskKey;

// =============================================================================
// APPLIER INTERFACE
// =============================================================================

/// Fixed-width applier of one backend.
#[allow(unsafe_code)]
pub trait Applier {
    /// XOR `chunk` with `key`, starting at key byte 0.
    ///
    /// `chunk.len()` must be one of [`TAIL_WIDTHS`]; any other length panics.
    ///
    /// # Safety
    /// The CPU must support the instruction set the implementor is built on.
    unsafe fn apply(chunk: &mut [u8], key: MaskKey);
}

/// Abort on a chunk width no applier serves.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn invalid_width(width: usize) -> ! {
    panic!("no fixed-width applier for a {width}-byte chunk")
}

// =============================================================================
// DECOMPOSITION
// =============================================================================

/// Split a tail length into `(offset, width)` pieces, widest first.
///
/// Only meaningful for `len <= MAX_TAIL`; higher bits are ignored.
pub fn decompose(len: usize) -> impl Iterator<Item = (usize, usize)> {
    let mut offset = 0;
    TAIL_WIDTHS
        .into_iter()
        .filter(move |width| len & width != 0)
        .map(move |width| {
            let at = offset;
            offset += width;
            (at, width)
        })
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Mask `tail`, whose first byte sits at key phase `phase`.
///
/// # Panics
/// Panics if `tail` is longer than `MAX_TAIL` bytes or if the decomposition
/// does not cover it exactly.
///
/// # Safety
/// Same contract as [`Applier::apply`] for `A`.
#[inline(always)]
#[allow(clippy::inline_always, unsafe_code)]
pub unsafe fn dispatch<A: Applier>(tail: &mut [u8], key: MaskKey, phase: usize) {
    let len = tail.len();
    assert!(len <= MAX_TAIL, "tail of {len} bytes exceeds {MAX_TAIL}");

    let mut covered = 0;
    for (at, width) in decompose(len) {
        A::apply(&mut tail[at..at + width], key.rotate(phase + at));
        covered = at + width;
    }

    assert!(covered == len, "tail decomposition covered {covered} of {len} bytes");
}
