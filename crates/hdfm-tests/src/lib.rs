//! Shared fixtures for the HDFM integration tests and benchmarks.
//!
//! The two sample headers are the first 132 bytes of real library files
//! written by iTunes 6.0.4 and iTunes 8.0. Everything after the header is
//! synthesised by the helpers below.

use hdfm_wire::{Hdfm, HdfmHeader};

/// Header block of an iTunes 6.0.4 library (version string `"6.0.4"`).
pub const HDFM6_HEADER: [u8; 132] = [
    0x68, 0x64, 0x66, 0x6D, 0x00, 0x00, 0x00, 0x84,
    0x00, 0x68, 0x65, 0x7C, 0x00, 0x08, 0x00, 0x03,
    0x05, 0x36, 0x2E, 0x30, 0x2E, 0x34, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x03, 0xB9, 0x18, 0x5C, 0xFD,
    0xBD, 0xBC, 0x46, 0x06, 0x00, 0x00, 0x00, 0x09,
    0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
];

/// Header block of an iTunes 8.0 library (version string `"8.0"`).
pub const HDFM8_HEADER: [u8; 132] = [
    0x68, 0x64, 0x66, 0x6D, 0x00, 0x00, 0x00, 0x84,
    0x00, 0x00, 0xED, 0x1B, 0x00, 0x0E, 0x00, 0x01,
    0x03, 0x38, 0x2E, 0x30, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x06, 0xEF, 0x96, 0x71, 0xAC,
    0x74, 0x72, 0xD9, 0x7B, 0x00, 0x00, 0x00, 0x22,
    0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
];

/// Total size of the iTunes 6 sample file the header was taken from.
pub const HDFM6_FILE_LEN: usize = 6_841_724;

/// Total size of the iTunes 8 sample file the header was taken from.
pub const HDFM8_FILE_LEN: usize = 60_699;

/// A zero-filled file of `total_len` bytes that starts with `header`.
///
/// # Panics
///
/// Panics if `total_len` is smaller than the header.
pub fn whole_file(header: &[u8], total_len: usize) -> Vec<u8> {
    let mut file = vec![0u8; total_len];
    file[..header.len()].copy_from_slice(header);
    file
}

/// `header` followed by exactly `payload`.
pub fn with_payload(header: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut file = Vec::with_capacity(header.len() + payload.len());
    file.extend_from_slice(header);
    file.extend_from_slice(payload);
    file
}

/// Bytes shaped loosely like a library database: repeated record tags and
/// text, so they compress the way real payloads do.
pub fn library_records(len: usize) -> Vec<u8> {
    b"mhbd\x00\x00\x00\x68mhit\x00\x00\x01\x9cSome Track Title\x00Artist\x00Album\x00"
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

/// Encode a complete file with a fresh header for `version`.
///
/// # Panics
///
/// Panics if `version` does not fit a default header.
pub fn encode_file(version: &str, file_data: Vec<u8>) -> Vec<u8> {
    let hdfm = Hdfm {
        header: HdfmHeader::new(version).expect("version fits a default header"),
        file_data,
    };
    let mut bytes = Vec::new();
    hdfm.write_to(&mut bytes).expect("writing to memory");
    bytes
}
