use bolero::check;
use wsmask::{mask, MaskKey, Masker};

#[test]
fn fuzz_streaming_consistency() {
    check!()
        .with_type::<(u32, u8, Vec<u8>)>()
        .for_each(|(key, piece, data)| {
            // =============================================================================
            // BASELINE (ONE-SHOT)
            // =============================================================================
            let mut expected = data.clone();
            mask(&mut expected, *key);

            // =============================================================================
            // STREAMING VARIATIONS
            // =============================================================================

            // 1. Fixed piece size (1 to 256)
            let piece = usize::from(*piece) + 1;
            let mut buf = data.clone();
            let mut masker = Masker::new(MaskKey::new(*key));
            for chunk in buf.chunks_mut(piece) {
                masker.apply(chunk);
            }
            assert_eq!(buf, expected, "Streaming with {piece}-byte pieces mismatch");
            assert_eq!(masker.offset(), data.len() as u64);

            // 2. Arbitrary Split Points
            if data.len() > 1 {
                for split_idx in [1, data.len() / 2, data.len() - 1] {
                    let mut buf = data.clone();
                    let mut masker = Masker::new(MaskKey::new(*key));
                    let (first, second) = buf.split_at_mut(split_idx);
                    masker.apply(first);
                    masker.apply(second);
                    assert_eq!(buf, expected, "Split at {split_idx} mismatch");
                }
            }
        });
}
