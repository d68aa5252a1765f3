#![cfg_attr(not(feature = "std"), no_std)]

//! # wsmask
//!
//! In-place XOR masking with a repeating 4-byte key, as used for WebSocket
//! client frames. Accelerated by AVX2, SSE2 or NEON with a portable fallback.

//! # Usage
//! ```rust
//! // 1. One-shot masking
//! let mut payload = *b"Hello, frame";
//! wsmask::mask(&mut payload, 0x37fa_213d_u32);
//! wsmask::unmask(&mut payload, 0x37fa_213d_u32);
//! assert_eq!(&payload, b"Hello, frame");
//!
//! // 2. Streaming (one socket read at a time)
//! use wsmask::{MaskKey, Masker};
//!
//! let key: MaskKey = "0x37fa213d".parse()?;
//! let mut masker = Masker::new(key);
//! let mut first = *b"Hello";
//! let mut second = *b", frame";
//! masker.apply(&mut first);
//! masker.apply(&mut second);
//! # Ok::<(), wsmask::ParseKeyError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

mod engine;
#[cfg(feature = "std")]
mod ffi;
#[doc(hidden)]
pub mod kernels; // Public for test/bench use only
mod oneshot;
mod streaming;
pub(crate) mod types;

// =============================================================================
// EXPORTS
// =============================================================================

pub use engine::parallel::{PARALLEL_CHUNK, PARALLEL_THRESHOLD};
pub use oneshot::{mask, mask_at, mask_parallel, mask_with, unmask};
pub use streaming::Masker;
pub use types::{Backend, MaskFn, MaskKey, ParseKeyError, UnsupportedBackend};

/// Returns the name of the hardware backend currently in use.
#[must_use]
pub fn active_backend() -> &'static str {
    engine::get_active_backend_name()
}
