#![no_main]

use libfuzzer_sys::fuzz_target;
use wsmask::{MaskKey, Masker};

fuzz_target!(|data: &[u8]| {
    // Key from the first four bytes, piece size (1 to 256) from the fifth
    let Some((key, rest)) = data.split_first_chunk::<4>() else {
        return;
    };
    let Some((&piece, payload)) = rest.split_first() else {
        return;
    };
    let key = MaskKey::from_bytes(*key);
    let piece = usize::from(piece) + 1;

    let mut reference = payload.to_vec();
    wsmask::mask(&mut reference, key);

    let mut streamed = payload.to_vec();
    let mut masker = Masker::new(key);
    for chunk in streamed.chunks_mut(piece) {
        masker.apply(chunk);
    }

    // They must be identical
    assert_eq!(
        reference, streamed,
        "Streaming and one-shot masking differ!"
    );
});
