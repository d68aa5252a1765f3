//! CLI Commands
//!
//! All wsmask CLI commands organized as separate modules.

mod apply;
mod backend;
mod check;

/// Read size for streaming files through a `Masker`.
const BUFFER_SIZE: usize = 128 * 1024;

pub use apply::{mask_files, ApplyOptions};
pub use backend::print_backends;
pub use check::check_mode;
