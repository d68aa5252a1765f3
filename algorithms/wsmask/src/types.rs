//! Shared types used across the wsmask library.

use core::fmt;
use core::num::ParseIntError;
use core::str::FromStr;
#[cfg(feature = "std")]
use std::error;

use crate::kernels::constants::KEY_SIZE;

// =============================================================================
// KERNEL INTERFACE
// =============================================================================

/// Unified kernel function signature: `(payload, key)`, masks in place.
///
/// Every backend (AVX2, SSE2, NEON) and the portable fallback implement
/// this same signature so the dispatcher can swap them at runtime.
/// The first byte of `payload` is always treated as key phase 0.
pub type MaskFn = fn(&mut [u8], MaskKey);

// =============================================================================
// MASK KEY
// =============================================================================

/// A 4-byte repeating XOR pattern.
///
/// Byte `i` of the pattern is bits `8i..8i+7` of the wrapped `u32`, i.e. the
/// key is read little-endian regardless of the host byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaskKey(u32);

impl MaskKey {
    /// Wrap a 32-bit key.
    #[must_use]
    pub const fn new(key: u32) -> Self {
        Self(key)
    }

    /// Build a key from its four pattern bytes, in the order they are applied.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    /// The raw 32-bit key.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The four pattern bytes, in the order they are applied.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; KEY_SIZE] {
        self.0.to_le_bytes()
    }

    /// Key byte applied at `phase` (taken modulo 4).
    #[must_use]
    pub const fn byte(self, phase: usize) -> u8 {
        self.to_bytes()[phase & (KEY_SIZE - 1)]
    }

    /// Rotate the pattern so that its byte 0 is the current byte `phase`.
    ///
    /// Masking a buffer with `key.rotate(p)` is the same as masking it as if
    /// its first byte sat at phase `p` of `key`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn rotate(self, phase: usize) -> Self {
        Self(self.0.rotate_right(8 * (phase & (KEY_SIZE - 1)) as u32))
    }

    /// Key to use for a sub-range starting `offset` bytes into a message.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn at_offset(self, offset: u64) -> Self {
        self.rotate((offset & (KEY_SIZE as u64 - 1)) as usize)
    }

    /// `true` for the all-zero key, which leaves every payload unchanged.
    #[must_use]
    pub const fn is_identity(self) -> bool {
        self.0 == 0
    }

    /// The pattern as a native-endian 16-bit word (first two bytes).
    #[inline]
    pub(crate) const fn pattern16(self) -> u16 {
        let b = self.to_bytes();
        u16::from_ne_bytes([b[0], b[1]])
    }

    /// The pattern as a native-endian 32-bit word.
    #[inline]
    pub(crate) const fn pattern32(self) -> u32 {
        u32::from_ne_bytes(self.to_bytes())
    }

    /// The pattern repeated twice as a native-endian 64-bit word.
    #[inline]
    pub(crate) const fn pattern64(self) -> u64 {
        let half = self.pattern32() as u64;
        (half << 32) | half
    }
}

impl From<u32> for MaskKey {
    fn from(key: u32) -> Self {
        Self(key)
    }
}

impl From<[u8; KEY_SIZE]> for MaskKey {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<MaskKey> for u32 {
    fn from(key: MaskKey) -> Self {
        key.0
    }
}

impl fmt::Display for MaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl FromStr for MaskKey {
    type Err = ParseKeyError;

    /// Accepts `0x`-prefixed hex (`0x04030201`) or plain decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .map_or_else(|| s.parse::<u32>(), |hex| u32::from_str_radix(hex, 16));
        parsed.map(Self).map_err(|source| ParseKeyError { source })
    }
}

// =============================================================================
// BACKENDS
// =============================================================================

/// Hardware backends able to run the masking kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// 256-bit AVX2 lanes (`x86`/`x86_64`, runtime detected)
    Avx2,
    /// 128-bit SSE2 lanes (`x86_64` baseline)
    Sse2,
    /// 128-bit NEON lanes (`aarch64` baseline)
    Neon,
    /// 64-bit word XOR, available everywhere
    Portable,
}

impl Backend {
    /// All backends, fastest first.
    pub const ALL: [Self; 4] = [Self::Avx2, Self::Sse2, Self::Neon, Self::Portable];

    /// Human-readable backend name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Avx2 => "AVX2",
            Self::Sse2 => "SSE2",
            Self::Neon => "NEON",
            Self::Portable => "Portable",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Error for a backend the running CPU (or target) cannot execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedBackend {
    backend: Backend,
}

impl UnsupportedBackend {
    /// Create a new `UnsupportedBackend` for the rejected backend.
    pub const fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// The backend that was requested.
    pub const fn backend(&self) -> Backend {
        self.backend
    }
}

impl fmt::Display for UnsupportedBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "backend '{}' is not supported on this CPU or target",
            self.backend
        )
    }
}

#[cfg(feature = "std")]
impl error::Error for UnsupportedBackend {}

/// Error returned when a mask key string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError {
    source: ParseIntError,
}

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid mask key: {}", self.source)
    }
}

#[cfg(feature = "std")]
impl error::Error for ParseKeyError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.source)
    }
}
