#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use hdfm_wire::{Hdfm, HdfmHeader};

#[derive(Arbitrary, Debug)]
struct Input {
    reserved: [u8; 8],
    version: Vec<u8>,
    padding: Vec<u8>,
    file_data: Vec<u8>,
}

// Fuzz target: Hdfm write->read roundtrip.
//
// Builds a header from arbitrary fields, serializes the whole file,
// deserializes it, and asserts every field survives.
fuzz_target!(|input: Input| {
    let version: String = input
        .version
        .iter()
        .take(255)
        .map(|&b| char::from(b & 0x7F))
        .collect();

    let header = HdfmHeader {
        header_length: (17 + version.len() + input.padding.len()) as u32,
        reserved: input.reserved,
        version,
        padding: input.padding,
    };
    let hdfm = Hdfm {
        header,
        file_data: input.file_data,
    };

    let mut buf = Vec::new();
    hdfm.write_to(&mut buf).unwrap();

    let parsed = Hdfm::from_bytes(&buf).unwrap();
    assert_eq!(parsed, hdfm);
});
