//! Hardware Dispatcher
//!
//! Selects the fastest available kernel (AVX2, SSE2, NEON, or portable) for
//! the current CPU. With `std` the choice is made once at runtime and cached;
//! without `std` it follows the compile-time target features.

use crate::kernels;
use crate::types::{Backend, MaskFn, MaskKey, UnsupportedBackend};

// =============================================================================
// FEATURE DETECTION
// =============================================================================

cfg_if::cfg_if! {
    if #[cfg(all(feature = "std", any(target_arch = "x86", target_arch = "x86_64")))] {
        fn has_avx2() -> bool {
            is_x86_feature_detected!("avx2")
        }

        fn has_sse2() -> bool {
            is_x86_feature_detected!("sse2")
        }
    } else {
        const fn has_avx2() -> bool {
            cfg!(all(
                any(target_arch = "x86", target_arch = "x86_64"),
                target_feature = "avx2"
            ))
        }

        const fn has_sse2() -> bool {
            cfg!(all(
                any(target_arch = "x86", target_arch = "x86_64"),
                target_feature = "sse2"
            ))
        }
    }
}

impl Backend {
    /// Whether this backend can run on the current CPU (or target, without `std`).
    #[must_use]
    pub fn is_supported(self) -> bool {
        match self {
            Self::Avx2 => has_avx2(),
            Self::Sse2 => has_sse2(),
            Self::Neon => cfg!(target_arch = "aarch64"),
            Self::Portable => true,
        }
    }

    /// The fastest supported backend.
    #[must_use]
    pub fn detect() -> Self {
        Self::ALL
            .into_iter()
            .find(|backend| backend.is_supported())
            .unwrap_or(Self::Portable)
    }

    /// Backends usable on this machine, fastest first.
    pub fn supported() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|backend| backend.is_supported())
    }

    /// Kernel for this backend, or an error if the CPU cannot run it.
    ///
    /// # Errors
    /// Returns `UnsupportedBackend` if [`Backend::is_supported`] is `false`.
    pub fn kernel(self) -> Result<MaskFn, UnsupportedBackend> {
        if !self.is_supported() {
            return Err(UnsupportedBackend::new(self));
        }
        Ok(self.kernel_unchecked())
    }

    /// Kernel for this backend; only call after a support check.
    const fn kernel_unchecked(self) -> MaskFn {
        match self {
            Self::Avx2 => safe_avx2_wrapper,
            Self::Sse2 => safe_sse2_wrapper,
            Self::Neon => safe_neon_wrapper,
            Self::Portable => kernels::portable::mask,
        }
    }
}

// =============================================================================
// DISPATCHER
// =============================================================================

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        use std::sync::OnceLock;

        static ACTIVE: OnceLock<Backend> = OnceLock::new();

        /// Backend in use, detected on first call.
        pub fn active() -> Backend {
            *ACTIVE.get_or_init(|| {
                let backend = Backend::detect();
                #[cfg(feature = "tracing")]
                tracing::debug!(backend = backend.name(), "selected mask backend");
                backend
            })
        }
    } else {
        /// Backend in use, fixed by the compile-time target features.
        pub fn active() -> Backend {
            Backend::detect()
        }
    }
}

/// Returns the fastest kernel for this CPU.
#[must_use]
pub fn get_best_kernel() -> MaskFn {
    active().kernel_unchecked()
}

/// Returns the name of the active hardware backend.
#[must_use]
pub fn get_active_backend_name() -> &'static str {
    active().name()
}

// =============================================================================
// WRAPPERS
// =============================================================================

/// AVX2 wrapper: 8 × 32-byte bulk lanes, YMM/XMM tail appliers.
#[inline]
#[allow(unsafe_code)]
#[allow(unused_variables)]
fn safe_avx2_wrapper(payload: &mut [u8], key: MaskKey) {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    // SAFETY: Only reachable after CPUID validation (AVX2).
    unsafe {
        kernels::avx2::mask(payload, key);
    }
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    unreachable!("CPUID escape");
}

/// SSE2 wrapper: 16 × 16-byte bulk lanes, XMM tail appliers.
#[inline]
#[allow(unsafe_code)]
#[allow(unused_variables)]
fn safe_sse2_wrapper(payload: &mut [u8], key: MaskKey) {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    // SAFETY: Only reachable after CPUID validation (SSE2).
    unsafe {
        kernels::sse2::mask(payload, key);
    }
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    unreachable!("CPUID escape");
}

/// NEON wrapper: 16 × 16-byte bulk lanes, Q-register tail appliers.
#[inline]
#[allow(unsafe_code)]
#[allow(unused_variables)]
fn safe_neon_wrapper(payload: &mut [u8], key: MaskKey) {
    #[cfg(target_arch = "aarch64")]
    // SAFETY: NEON is mandatory on aarch64.
    unsafe {
        kernels::neon::mask(payload, key);
    }
    #[cfg(not(target_arch = "aarch64"))]
    unreachable!("CPUID escape");
}
