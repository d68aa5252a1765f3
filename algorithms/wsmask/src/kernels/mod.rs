//! Kernel Dispatcher
//!
//! Hardware-specific implementations of the masking kernel. Each backend
//! pairs a 256-byte bulk loop with a fixed-width applier driven by the
//! shared tail dispatcher.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx2;
pub mod constants;
#[cfg(target_arch = "aarch64")]
pub mod neon;
pub mod portable;
pub mod reference;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod sse2;
pub mod tail;
