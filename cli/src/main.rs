//! wsmask CLI
//!
//! Masks files or stdin with a repeating 4-byte XOR key.

mod commands;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use commands::{check_mode, mask_files, print_backends, ApplyOptions};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use wsmask::MaskKey;

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "wsmask")]
#[command(about = "XOR-mask files with a 4-byte key (AVX2 / SSE2 / NEON)", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Files to mask (if no subcommand); `-` streams stdin to stdout
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Mask key, `0x`-prefixed hex or decimal
    #[arg(short, long, value_name = "KEY")]
    key: Option<MaskKey>,

    /// Byte offset of the input within the masked message
    #[arg(long, default_value_t = 0)]
    offset: u64,

    /// Overwrite each file instead of writing `FILE.masked`
    #[arg(long)]
    in_place: bool,

    /// Log more (`-v` for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the active backend and every backend this CPU supports
    Backend,
    /// Verify that MASKED is FILE masked with KEY
    Check {
        /// Mask key, `0x`-prefixed hex or decimal
        #[arg(short, long, value_name = "KEY")]
        key: MaskKey,

        #[arg(value_name = "FILE")]
        original: PathBuf,

        #[arg(value_name = "MASKED")]
        masked: PathBuf,
    },
}

// =============================================================================
// LOGGING
// =============================================================================

fn init_tracing(verbose: u8) -> Result<()> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    if verbose > 0 {
        filter = filter.add_directive("debug".parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

fn warn_identity(key: MaskKey) {
    if key.is_identity() {
        warn!(%key, "mask key is zero, output will equal input");
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match &cli.command {
        Some(Commands::Backend) => print_backends(),
        Some(Commands::Check {
            key,
            original,
            masked,
        }) => {
            warn_identity(*key);
            if !check_mode(*key, original, masked)? {
                std::process::exit(1);
            }
        }
        None => {
            if cli.files.is_empty() {
                eprintln!("Error: No files specified");
                eprintln!("Usage: wsmask --key KEY [FILE]... or wsmask --help");
                std::process::exit(1);
            }
            let key = cli.key.context("--key is required when masking files")?;
            warn_identity(key);

            let options = ApplyOptions {
                key,
                offset: cli.offset,
                in_place: cli.in_place,
            };
            mask_files(&cli.files, &options)?;
        }
    }

    Ok(())
}
