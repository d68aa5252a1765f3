//! Check Command
//!
//! Verify that one file is another masked with a given key.

use super::BUFFER_SIZE;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;
use wsmask::{MaskKey, Masker};

// =============================================================================
// CHECK
// =============================================================================

/// Fill `buf` as far as possible; returns the bytes read (short only at EOF).
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Compare two streams; `None` when `masked` is `original` masked with `key`,
/// otherwise a description of the first difference.
fn first_mismatch(
    original: &mut impl Read,
    masked: &mut impl Read,
    key: MaskKey,
) -> Result<Option<String>> {
    let mut masker = Masker::new(key);
    let mut expected = vec![0u8; BUFFER_SIZE];
    let mut actual = vec![0u8; BUFFER_SIZE];

    loop {
        let n = read_full(original, &mut expected)?;
        let m = read_full(masked, &mut actual)?;
        let offset = masker.offset();
        masker.apply(&mut expected[..n]);

        if let Some(i) = expected[..n.min(m)]
            .iter()
            .zip(&actual[..n.min(m)])
            .position(|(a, b)| a != b)
        {
            return Ok(Some(format!(
                "byte {} is {}, expected {}",
                offset + i as u64,
                hex::encode([actual[i]]),
                hex::encode([expected[i]])
            )));
        }
        if n != m {
            return Ok(Some(format!(
                "length differs after {} bytes",
                offset + n.min(m) as u64
            )));
        }
        if n == 0 {
            debug!(bytes = offset, "streams match");
            return Ok(None);
        }
    }
}

/// Verify `masked` against `original`; prints `OK`/`FAILED` and returns the verdict.
pub fn check_mode(key: MaskKey, original: &Path, masked: &Path) -> Result<bool> {
    let mut original_file = File::open(original)
        .with_context(|| format!("Failed to open: {}", original.display()))?;
    let mut masked_file =
        File::open(masked).with_context(|| format!("Failed to open: {}", masked.display()))?;

    match first_mismatch(&mut original_file, &mut masked_file, key)? {
        None => {
            println!("{}: OK", masked.display());
            Ok(true)
        }
        Some(reason) => {
            println!("{}: FAILED ({})", masked.display(), reason);
            Ok(false)
        }
    }
}
