#![no_main]

use libfuzzer_sys::fuzz_target;

use hdfm_decoder::{DecoderConfig, HdfmDecoder};

// Fuzz target: full decode, header then payload.
fuzz_target!(|data: &[u8]| {
    let config = DecoderConfig {
        max_inflated_size: Some(16 * 1024 * 1024),
        ..DecoderConfig::default()
    };
    let _ = HdfmDecoder::decode_bytes(data, &config);
});
