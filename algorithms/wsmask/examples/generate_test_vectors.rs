//! Generator for wsmask test vectors
//!
//! Generates the canonical JSON test vectors used by `tests/test_vectors.json`.
//! Expected output comes from the scalar reference kernel, never the SIMD paths.
#![allow(clippy::unwrap_used)]
use serde_json::json;
use wsmask::kernels::reference;
use wsmask::MaskKey;

fn vector(name: &str, key: u32, offset: u64, input: &str, bytes: &[u8]) -> serde_json::Value {
    let key = MaskKey::new(key);
    let mut masked = bytes.to_vec();
    reference::mask(&mut masked, key.at_offset(offset));
    json!({
        "name": name,
        "key": key.to_string(),
        "offset": offset,
        "input": input,
        "masked": hex::encode(masked)
    })
}

fn main() {
    let ramp = |len: usize| (0..=255u8).cycle().take(len).collect::<Vec<_>>();
    let mut vectors = Vec::new();

    // =========================================================================
    // 1. TAIL-ONLY PAYLOADS
    // =========================================================================

    vectors.push(vector("Five Zero Bytes", 0x0403_0201, 0, "ZERO_5", &[0; 5]));
    // 64 + 32 + 16 + 8 + 2 + 1, last byte at phase 2
    vectors.push(vector("Tail Phase 123", 0x0403_0201, 0, "ZERO_123", &[0; 123]));
    vectors.push(vector("Max Tail 255", 0xa1b2_c3d4, 0, "ZERO_255", &[0; 255]));

    // =========================================================================
    // 2. BULK BOUNDARIES
    // =========================================================================

    vectors.push(vector("Exact Chunk 256", 0xa1b2_c3d4, 0, "ZERO_256", &[0; 256]));
    vectors.push(vector("Chunk Plus One", 0x37fa_213d, 0, "RAMP_257", &ramp(257)));
    vectors.push(vector("Ramp 300", 0xdead_beef, 0, "RAMP_300", &ramp(300)));

    // =========================================================================
    // 3. TEXT & KEYS
    // =========================================================================

    vectors.push(vector("ASCII Text", 0x37fa_213d, 0, "Hello", b"Hello"));
    vectors.push(vector("Identity Key", 0, 0, "Hello", b"Hello"));

    // =========================================================================
    // 4. OFFSETS
    // =========================================================================

    vectors.push(vector("Offset One", 0x0403_0201, 1, "ZERO_5", &[0; 5]));
    vectors.push(vector("Offset Seven", 0x0403_0201, 7, "ZERO_123", &[0; 123]));

    let output = json!({ "vectors": vectors });
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
