#![no_main]

use libfuzzer_sys::fuzz_target;
use wsmask::MaskKey;

fuzz_target!(|data: &[u8]| {
    // Key from the first four bytes, message offset from the fifth
    let Some((key, rest)) = data.split_first_chunk::<4>() else {
        return;
    };
    let Some((&offset, payload)) = rest.split_first() else {
        return;
    };
    let key_bytes = *key;
    let key = MaskKey::from_bytes(key_bytes);
    let phase = usize::from(offset);

    // Byte-at-a-time oracle, independent of the key rotation helpers
    let expected: Vec<u8> = payload
        .iter()
        .enumerate()
        .map(|(i, b)| b ^ key_bytes[(phase + i) % 4])
        .collect();

    let mut actual = payload.to_vec();
    wsmask::mask_at(&mut actual, key, u64::from(offset));
    assert_eq!(actual, expected, "Vectorized and scalar masking differ!");

    wsmask::mask_at(&mut actual, key, u64::from(offset));
    assert_eq!(actual, payload, "Masking is not an involution!");
});
