#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: payload inflation.
//
// Arbitrary bytes either pass through unchanged, inflate, or fail with a
// DecompressionError. The limit keeps zip bombs from exhausting memory.
fuzz_target!(|data: &[u8]| {
    match hdfm_codec::inflate_with_limit(data, Some(16 * 1024 * 1024)) {
        Ok(out) if !hdfm_codec::is_zlib_header(data) => assert_eq!(out.as_ref(), data),
        _ => {}
    }
});
