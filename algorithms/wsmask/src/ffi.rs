//! C-API Bindings
//!
//! Exposes the masking engine to C/C++ via FFI with pointer checks and panic
//! boundaries.

#![allow(unsafe_code)]

use crate::streaming::Masker;
use crate::types::{Backend, MaskKey};
use crate::{engine::dispatcher, oneshot};

use std::ffi::{c_char, CStr};
use std::panic::{self, AssertUnwindSafe};
use std::slice;

// =============================================================================
// RETURN CODES
// =============================================================================

/// Success
pub const WSMASK_OK: i32 = 0;
/// `payload` was null while `size` was non-zero
pub const WSMASK_ERR_NULL: i32 = -1;
/// A panic was caught at the boundary
pub const WSMASK_ERR_PANIC: i32 = -2;

/// Run `f` over `size` bytes at `payload`, translating null pointers and panics.
unsafe fn with_payload(payload: *mut u8, size: usize, f: impl FnOnce(&mut [u8])) -> i32 {
    if size == 0 {
        return WSMASK_OK;
    }
    if payload.is_null() {
        return WSMASK_ERR_NULL;
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        f(slice::from_raw_parts_mut(payload, size));
    }));

    match result {
        Ok(()) => WSMASK_OK,
        Err(_) => WSMASK_ERR_PANIC,
    }
}

// =============================================================================
// ONE-SHOT API
// =============================================================================

/// Mask `size` bytes at `payload` in place with `key`.
///
/// # Safety
/// - `payload` must be valid for `size` writable bytes (may be null if `size == 0`)
/// - no other thread may access the region during the call
///
/// # Returns
/// - `0`: Success
/// - `-1`: Null pointer
/// - `-2`: Panic
#[no_mangle]
pub unsafe extern "C" fn wsmask_apply(payload: *mut u8, size: usize, key: u32) -> i32 {
    with_payload(payload, size, |buf| oneshot::mask(buf, key))
}

/// Mask `size` bytes at `payload`, which start `offset` bytes into a message.
///
/// # Safety
/// Same as [`wsmask_apply`].
///
/// # Returns
/// Same as [`wsmask_apply`].
#[no_mangle]
pub unsafe extern "C" fn wsmask_apply_at(
    payload: *mut u8,
    size: usize,
    key: u32,
    offset: u64,
) -> i32 {
    with_payload(payload, size, |buf| oneshot::mask_at(buf, key, offset))
}

// =============================================================================
// STREAMING API
// =============================================================================

/// Opaque masker handle for C.
pub struct WsMaskerPtr(Masker);

/// Create a new masker for a message masked with `key`.
/// Caller must free with `wsmask_masker_free`.
#[no_mangle]
pub extern "C" fn wsmask_masker_new(key: u32) -> *mut WsMaskerPtr {
    Box::into_raw(Box::new(WsMaskerPtr(Masker::new(MaskKey::new(key)))))
}

/// Mask the next `size` bytes of the message.
///
/// # Safety
/// - `state_ptr` must be a valid pointer obtained from `wsmask_masker_new`
/// - `payload` must be valid for `size` writable bytes
///
/// # Returns
/// Same as [`wsmask_apply`], plus `-1` for a null `state_ptr`.
#[no_mangle]
pub unsafe extern "C" fn wsmask_masker_apply(
    state_ptr: *mut WsMaskerPtr,
    payload: *mut u8,
    size: usize,
) -> i32 {
    if state_ptr.is_null() {
        return WSMASK_ERR_NULL;
    }
    let masker = &mut (*state_ptr).0;
    with_payload(payload, size, |buf| masker.apply(buf))
}

/// Bytes masked so far by `state_ptr` (0 for null).
///
/// # Safety
/// `state_ptr` must be a valid pointer obtained from `wsmask_masker_new`, or null.
#[no_mangle]
pub const unsafe extern "C" fn wsmask_masker_offset(state_ptr: *const WsMaskerPtr) -> u64 {
    if state_ptr.is_null() {
        return 0;
    }
    (*state_ptr).0.offset()
}

/// Free a masker.
///
/// # Safety
/// `state_ptr` must be a valid pointer obtained from `wsmask_masker_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn wsmask_masker_free(state_ptr: *mut WsMaskerPtr) {
    if !state_ptr.is_null() {
        drop(Box::from_raw(state_ptr));
    }
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Get the name of the active backend.
///
/// # Returns
/// A pointer to a static, null-terminated C string (e.g. `"AVX2"`). Must NOT be freed by the caller.
#[no_mangle]
pub extern "C" fn wsmask_active_backend() -> *const c_char {
    backend_c_name(dispatcher::active()).as_ptr()
}

const fn backend_c_name(backend: Backend) -> &'static CStr {
    match backend {
        Backend::Avx2 => c"AVX2",
        Backend::Sse2 => c"SSE2",
        Backend::Neon => c"NEON",
        Backend::Portable => c"Portable",
    }
}
