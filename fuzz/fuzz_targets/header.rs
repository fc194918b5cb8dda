#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: HdfmHeader::read_from and Hdfm::read.
//
// Catches bugs in:
// - Declared header lengths shorter than the fixed fields
// - Version lengths running past the header
// - Total lengths shorter than the declared header
fuzz_target!(|data: &[u8]| {
    let _ = hdfm_wire::HdfmHeader::read_from(&mut &data[..]);

    if let Ok(hdfm) = hdfm_wire::Hdfm::from_bytes(data) {
        assert_eq!(hdfm.total_length(), data.len() as u64);
    }
});
