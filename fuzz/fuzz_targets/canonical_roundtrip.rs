#![no_main]

use libfuzzer_sys::fuzz_target;

use vellum_cbor::{decode_value_with, encode_canonical, DecodeOptions};

fuzz_target!(|data: &[u8]| {
    // Duplicates stay allowed here: float width narrowing can merge distinct
    // decoded keys into one canonical encoding, and the fixed-point property
    // must hold regardless.
    let options = DecodeOptions {
        allow_duplicate_map_keys: true,
        max_depth: 64,
        max_indefinite_chunks: 1 << 12,
        ..DecodeOptions::default()
    };
    if let Ok(value) = decode_value_with(data, &options) {
        // Canonical encoding must be a fixed point of decode -> encode.
        let canonical = encode_canonical(&value);
        let reparsed =
            decode_value_with(&canonical, &options).expect("canonical bytes must decode");
        assert_eq!(encode_canonical(&reparsed), canonical);
    }
});
