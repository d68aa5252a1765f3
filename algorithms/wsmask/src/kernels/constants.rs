//! Kernel Constants
//!
//! Chunk geometry shared by every backend. All sizes are multiples of the
//! key length, so phase is 0 at every bulk chunk boundary.

use static_assertions::const_assert;

// =============================================================================
// KEY
// =============================================================================

/// Length of the repeating mask pattern (in bytes).
pub const KEY_SIZE: usize = 4;

// =============================================================================
// BULK LOOP
// =============================================================================

/// Bytes processed per bulk iteration.
pub const BULK_CHUNK: usize = 256;

/// Width of one bulk lane on the widest backend (AVX2).
pub const LANE_WIDTH: usize = 32;

/// Lanes per bulk chunk on the widest backend.
pub const BULK_LANES: usize = BULK_CHUNK / LANE_WIDTH;

/// Read-ahead distance of the prefetch hint: the start of the next chunk.
pub const PREFETCH_DISTANCE: usize = BULK_CHUNK;

// =============================================================================
// TAIL DISPATCH
// =============================================================================

/// Fixed-width applier sizes, widest first. One entry per bit of a tail length.
pub const TAIL_WIDTHS: [usize; 8] = [128, 64, 32, 16, 8, 4, 2, 1];

/// Largest tail the dispatcher accepts (`BULK_CHUNK - 1`).
pub const MAX_TAIL: usize = BULK_CHUNK - 1;

const_assert!(BULK_CHUNK.is_multiple_of(KEY_SIZE));
const_assert!(BULK_CHUNK.is_multiple_of(LANE_WIDTH));
const_assert!(TAIL_WIDTHS[0] * 2 == BULK_CHUNK);
const_assert!(TAIL_WIDTHS[7] == 1);
