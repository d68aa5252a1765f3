//! Backend Command
//!
//! Reports which kernel the dispatcher picked.

use wsmask::Backend;

/// Print the active backend followed by every backend this CPU supports.
pub fn print_backends() {
    let supported: Vec<&str> = Backend::supported().map(Backend::name).collect();
    println!("active:    {}", wsmask::active_backend());
    println!("supported: {}", supported.join(", "));
}
