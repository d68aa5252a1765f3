//! Streaming Masker
//!
//! Tracks the absolute offset into a message so that it can be masked in
//! arbitrary pieces (e.g. one socket read at a time). The kernels always
//! start at phase 0; this type rotates the key before each piece instead.

use crate::oneshot;
use crate::types::MaskKey;

// =============================================================================
// STREAMING MASKER
// =============================================================================

/// Masks a message piece by piece.
///
/// Feeding a message through one `Masker` in any split produces the same
/// bytes as a single [`mask`](crate::mask) over the whole message.
///
/// # Example
/// ```rust
/// use wsmask::Masker;
///
/// let mut masker = Masker::new(0x0403_0201_u32.into());
/// let mut first = [0u8; 3];
/// let mut second = [0u8; 2];
/// masker.apply(&mut first);
/// masker.apply(&mut second);
/// assert_eq!(first, [0x01, 0x02, 0x03]);
/// assert_eq!(second, [0x04, 0x01]);
/// assert_eq!(masker.offset(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Masker {
    /// Key at offset 0 of the message
    key: MaskKey,
    /// Bytes masked so far
    offset: u64,
}

impl Masker {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Start masking a new message.
    #[must_use]
    pub const fn new(key: MaskKey) -> Self {
        Self::with_offset(key, 0)
    }

    /// Resume masking a message `offset` bytes in.
    #[must_use]
    pub const fn with_offset(key: MaskKey, offset: u64) -> Self {
        Self { key, offset }
    }

    // =========================================================================
    // STATE MODIFICATION
    // =========================================================================

    /// Mask the next piece of the message in place.
    pub fn apply(&mut self, chunk: &mut [u8]) {
        oneshot::mask(chunk, self.key.at_offset(self.offset));
        self.offset = self.offset.wrapping_add(chunk.len() as u64);
    }

    /// Start over at offset 0 with the same key.
    pub const fn reset(&mut self) {
        self.offset = 0;
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Bytes masked so far.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Key at offset 0 of the message.
    #[must_use]
    pub const fn key(&self) -> MaskKey {
        self.key
    }
}
