//! wsmask Basic Example
//!
//! Minimal usage: `wsmask::mask(&mut payload, key);`

#![allow(clippy::pedantic, clippy::nursery)]

fn main() {
    // Zero boilerplate:
    let mut payload = *b"Hello, World!";
    let key = 0x37fa_213d_u32;
    wsmask::mask(&mut payload, key);

    println!("Backend: {}", wsmask::active_backend());
    println!("Masked:  {}", hex::encode(payload));

    wsmask::unmask(&mut payload, key);
    println!("Data:    {:?}", String::from_utf8_lossy(&payload));
}
