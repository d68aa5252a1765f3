use bolero::check;
use wsmask::kernels::reference;
use wsmask::{mask, mask_at, mask_with, unmask, Backend, MaskKey};

#[test]
fn fuzz_reference_equivalence() {
    check!()
        .with_type::<(u32, Vec<u8>)>()
        .for_each(|(key, data)| {
            // =============================================================================
            // SCALAR REFERENCE
            // =============================================================================
            let mut expected = data.clone();
            reference::mask(&mut expected, MaskKey::new(*key));

            // =============================================================================
            // DISPATCHED + EVERY SUPPORTED BACKEND
            // =============================================================================
            let mut actual = data.clone();
            mask(&mut actual, *key);
            assert_eq!(actual, expected, "Dispatched kernel mismatch");

            for backend in Backend::supported() {
                let mut buf = data.clone();
                if mask_with(backend, &mut buf, *key).is_ok() {
                    assert_eq!(buf, expected, "{backend} mismatch");
                }
            }

            // =============================================================================
            // INVOLUTION
            // =============================================================================
            unmask(&mut actual, *key);
            assert_eq!(&actual, data, "Masking twice must restore the input");
        });
}

#[test]
fn fuzz_offset_equivalence() {
    check!()
        .with_type::<(u32, u64, Vec<u8>)>()
        .for_each(|(key, offset, data)| {
            // Byte-at-a-time oracle, independent of the key rotation helpers
            let key_bytes = key.to_le_bytes();
            let phase = (*offset % 4) as usize;
            let expected: Vec<u8> = data
                .iter()
                .enumerate()
                .map(|(i, b)| b ^ key_bytes[(phase + i) % 4])
                .collect();

            let mut actual = data.clone();
            mask_at(&mut actual, *key, *offset);
            assert_eq!(actual, expected, "Offset {offset} mismatch");
        });
}
