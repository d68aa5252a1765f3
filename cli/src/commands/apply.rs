//! Apply Command
//!
//! File masking with automatic parallelization via Rayon. Each file is
//! streamed through its own `Masker`, so read boundaries never disturb the
//! key phase.

use super::BUFFER_SIZE;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;
use wsmask::{MaskKey, Masker};

/// Settings shared by every file of one invocation.
pub struct ApplyOptions {
    pub key: MaskKey,
    pub offset: u64,
    pub in_place: bool,
}

impl ApplyOptions {
    fn masker(&self) -> Masker {
        Masker::with_offset(self.key, self.offset)
    }
}

// =============================================================================
// STREAMING
// =============================================================================

/// Mask everything from `reader` into `writer`, returning the byte count.
fn copy_masked(reader: &mut impl Read, writer: &mut impl Write, masker: &mut Masker) -> Result<u64> {
    let mut buffer = vec![0u8; BUFFER_SIZE];
    let start = masker.offset();

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        masker.apply(&mut buffer[..n]);
        writer.write_all(&buffer[..n])?;
    }

    writer.flush()?;
    Ok(masker.offset() - start)
}

/// Mask a file over itself, one buffer at a time.
fn mask_in_place(file: &mut File, masker: &mut Masker) -> Result<u64> {
    let mut buffer = vec![0u8; BUFFER_SIZE];
    let start = masker.offset();

    loop {
        let n = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        masker.apply(&mut buffer[..n]);
        file.seek(SeekFrom::Current(-i64::try_from(n)?))?;
        file.write_all(&buffer[..n])?;
    }

    file.flush()?;
    Ok(masker.offset() - start)
}

fn masked_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".masked");
    PathBuf::from(name)
}

// =============================================================================
// FILES
// =============================================================================

fn mask_file(path: &Path, options: &ApplyOptions) -> Result<PathBuf> {
    let mut masker = options.masker();

    let (dest, bytes) = if options.in_place {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .with_context(|| format!("Failed to open: {}", path.display()))?;
        let bytes = mask_in_place(&mut file, &mut masker)
            .with_context(|| format!("Failed to mask: {}", path.display()))?;
        (path.to_path_buf(), bytes)
    } else {
        let dest = masked_path(path);
        let mut input =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let output = File::create(&dest)
            .with_context(|| format!("Failed to create: {}", dest.display()))?;
        let bytes = copy_masked(&mut input, &mut BufWriter::new(output), &mut masker)
            .with_context(|| format!("Failed to mask: {}", path.display()))?;
        (dest, bytes)
    };

    debug!(file = %path.display(), bytes, "masked");
    Ok(dest)
}

fn mask_stdio(options: &ApplyOptions) -> Result<()> {
    let mut masker = options.masker();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let bytes = copy_masked(&mut stdin.lock(), &mut stdout.lock(), &mut masker)
        .context("Failed to mask stdin")?;
    debug!(bytes, "masked stdin");
    Ok(())
}

/// Mask files (Rayon parallelizes across files), or stdin when given `-`.
pub fn mask_files(files: &[PathBuf], options: &ApplyOptions) -> Result<()> {
    let stdio = files.iter().filter(|p| p.as_os_str() == "-").count();
    if stdio > 0 {
        if files.len() > 1 {
            anyhow::bail!("`-` cannot be combined with other files");
        }
        return mask_stdio(options);
    }

    let results = Mutex::new(Vec::with_capacity(files.len()));
    let errors = Mutex::new(Vec::new());

    files.par_iter().enumerate().for_each(|(index, file_path)| {
        match mask_file(file_path, options) {
            Ok(dest) => {
                if let Ok(mut results) = results.lock() {
                    results.push((index, dest));
                }
            }
            Err(e) => {
                if let Ok(mut errors) = errors.lock() {
                    errors.push((file_path.clone(), e));
                }
            }
        }
    });

    // Print in original order
    let mut results = results.into_inner().unwrap_or_default();
    results.sort_by_key(|(index, _)| *index);

    for (_, dest) in results {
        println!("{}", dest.display());
    }

    let errors = errors.into_inner().unwrap_or_default();
    for (file_path, error) in &errors {
        eprintln!("Error: {}: {:#}", file_path.display(), error);
    }

    if !errors.is_empty() {
        anyhow::bail!("Failed to mask {} file(s)", errors.len());
    }

    Ok(())
}
