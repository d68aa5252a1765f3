//! Parallel Execution Engine
//!
//! Large payloads are cut into `PARALLEL_CHUNK` pieces and masked
//! independently (via Rayon if the `multithread` feature is enabled,
//! otherwise serially). Every piece starts at a multiple of the key size, so
//! each one begins at phase 0 and no key rotation is needed.

use static_assertions::const_assert;

use crate::engine::dispatcher;
use crate::kernels::constants::{BULK_CHUNK, KEY_SIZE};
use crate::types::MaskKey;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Work unit per parallel task: 256 KB (L2-cache friendly).
pub const PARALLEL_CHUNK: usize = 256 * 1024;

/// Payloads below 1 MB are masked on the calling thread.
pub const PARALLEL_THRESHOLD: usize = 1024 * 1024;

const_assert!(PARALLEL_CHUNK.is_multiple_of(KEY_SIZE));
const_assert!(PARALLEL_CHUNK.is_multiple_of(BULK_CHUNK));
const_assert!(PARALLEL_THRESHOLD >= PARALLEL_CHUNK);

// =============================================================================
// PARALLEL MASKING
// =============================================================================

/// Mask `payload` in `PARALLEL_CHUNK` pieces on the worker pool.
pub fn mask_chunks(payload: &mut [u8], key: MaskKey) {
    let kernel = dispatcher::get_best_kernel();
    payload.process_chunks(PARALLEL_CHUNK, |chunk| kernel(chunk, key));
}

/// Helper for feature-agnostic chunk processing
trait ChunkProcessor {
    fn process_chunks<F>(self, chunk_size: usize, f: F)
    where
        F: Fn(&mut [u8]) + Sync + Send;
}

impl ChunkProcessor for &mut [u8] {
    fn process_chunks<F>(self, chunk_size: usize, f: F)
    where
        F: Fn(&mut [u8]) + Sync + Send,
    {
        #[cfg(feature = "multithread")]
        {
            use rayon::prelude::*;
            self.par_chunks_mut(chunk_size).for_each(f);
        }
        #[cfg(not(feature = "multithread"))]
        {
            self.chunks_mut(chunk_size).for_each(f);
        }
    }
}
