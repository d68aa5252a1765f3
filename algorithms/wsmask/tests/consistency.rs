//! Consistency & Regression Tests
//!
//! Verifies that the alternate entry points agree with one-shot masking.
//! - Streaming vs One-shot consistency
//! - Parallel API Fallback & Consistency
//! - Offsets past `u32`

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used)]

use wsmask::{mask, mask_at, mask_parallel, MaskKey, Masker, PARALLEL_CHUNK, PARALLEL_THRESHOLD};

const KEY: u32 = 0x37fa_213d;

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

fn masked(len: usize) -> Vec<u8> {
    let mut out = payload(len);
    mask(&mut out, KEY);
    out
}

// =============================================================================
// STREAMING CONSISTENCY
// =============================================================================

#[test]
fn test_streaming_consistency() {
    for len in [0, 1, 255, 256, 257, 4096 + 3] {
        for piece in [1, 3, 4, 100, 255, 256, 1000] {
            let mut buf = payload(len);
            let mut masker = Masker::new(KEY.into());
            for chunk in buf.chunks_mut(piece) {
                masker.apply(chunk);
            }
            assert_eq!(buf, masked(len), "len {len}, piece {piece}");
            assert_eq!(masker.offset(), len as u64);
        }
    }
}

#[test]
fn test_streaming_resumes_large_offset() {
    let offset = u64::from(u32::MAX) + 3;
    let key = MaskKey::new(KEY);

    let mut a = payload(50);
    Masker::with_offset(key, offset).apply(&mut a);

    let mut b = payload(50);
    mask_at(&mut b, key, offset);
    assert_eq!(a, b);

    // 2^32 + 2 sits at phase 2
    let phase = (offset % 4) as usize;
    assert_eq!(phase, 2);
    let mut c = payload(50);
    mask(&mut c, key.rotate(phase));
    assert_eq!(a, c);

    let bytes = key.to_bytes();
    let expected: Vec<u8> = payload(50)
        .iter()
        .enumerate()
        .map(|(i, b)| b ^ bytes[(phase + i) % 4])
        .collect();
    assert_eq!(a, expected);
}

// =============================================================================
// PARALLEL CONSISTENCY
// =============================================================================

#[test]
fn test_parallel_fallback() {
    let len = PARALLEL_THRESHOLD - 1;
    let mut buf = payload(len);
    mask_parallel(&mut buf, KEY);
    assert_eq!(buf, masked(len));
}

#[test]
fn test_parallel_consistency() {
    let sizes = [
        PARALLEL_THRESHOLD,
        PARALLEL_THRESHOLD + 1,
        PARALLEL_THRESHOLD + PARALLEL_CHUNK / 2 + 123,
        4 * PARALLEL_THRESHOLD + 255,
    ];

    for len in sizes {
        let mut buf = payload(len);
        mask_parallel(&mut buf, KEY);
        assert!(buf == masked(len), "parallel mismatch at len {len}");
    }
}
