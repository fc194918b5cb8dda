//! Sample library generator for trying out the `hdfm` tool by hand.
//!
//! Writes a few small `.itl` files built around the recorded iTunes headers.
//! The payloads are synthetic; only the headers come from real libraries.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_samples -p hdfm-tests -- [OUTPUT_DIR]
//! ```
//!
//! # Generated files
//!
//! | File                 | Contents                                        |
//! |----------------------|-------------------------------------------------|
//! | itunes6.itl          | iTunes 6.0.4 header, plain payload              |
//! | itunes8.itl          | iTunes 8.0 header, zlib payload                 |
//! | corrupt_payload.itl  | iTunes 8.0 header, zlib payload with bad Adler  |
//! | truncated_header.itl | First 40 bytes of the iTunes 8.0 header only    |

#![allow(clippy::pedantic)]

use std::path::{Path, PathBuf};

use hdfm_codec::deflate;
use hdfm_tests::{HDFM6_HEADER, HDFM8_HEADER, library_records, with_payload};

fn main() {
    let out_dir = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("samples"), PathBuf::from);
    std::fs::create_dir_all(&out_dir).expect("failed to create output directory");

    let records = library_records(256 * 1024);
    let compressed = deflate(&records).expect("deflate into memory");

    write(&out_dir, "itunes6.itl", &with_payload(&HDFM6_HEADER, &records));
    write(&out_dir, "itunes8.itl", &with_payload(&HDFM8_HEADER, &compressed));

    let mut corrupt = compressed.clone();
    let last = corrupt.len() - 1;
    corrupt[last] ^= 0xFF;
    write(&out_dir, "corrupt_payload.itl", &with_payload(&HDFM8_HEADER, &corrupt));

    write(&out_dir, "truncated_header.itl", &HDFM8_HEADER[..40]);

    println!("All samples written to {}", out_dir.display());
}

fn write(dir: &Path, name: &str, bytes: &[u8]) {
    let path = dir.join(name);
    std::fs::write(&path, bytes)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    println!("  {name:<22} {} bytes", bytes.len());
}
