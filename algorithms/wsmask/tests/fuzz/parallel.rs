use bolero::check;
use wsmask::{mask, mask_parallel};

#[test]
fn fuzz_parallel_consistency() {
    check!()
        .with_type::<(u32, Vec<u8>)>()
        .for_each(|(key, data)| {
            // =============================================================================
            // PARALLEL EXECUTION (RAYON)
            // =============================================================================

            // Small inputs take the single-thread fallback; this exercises the
            // threshold check rather than the worker pool.
            let mut parallel = data.clone();
            mask_parallel(&mut parallel, *key);

            // =============================================================================
            // SEQUENTIAL REFERENCE
            // =============================================================================
            let mut sequential = data.clone();
            mask(&mut sequential, *key);

            assert_eq!(
                parallel, sequential,
                "Parallel mask mismatch (Rayon vs Sequential)"
            );
        });
}
