#![no_main]

use libfuzzer_sys::fuzz_target;

use vellum_cbor::{decode_value_with, DecodeOptions};

fn fuzz_options() -> DecodeOptions {
    // Tight limits keep pathological inputs from allocating their way out of
    // the interesting search space.
    DecodeOptions {
        max_depth: 64,
        max_indefinite_chunks: 1 << 12,
        ..DecodeOptions::default()
    }
}

fuzz_target!(|data: &[u8]| {
    let options = fuzz_options();
    if let Ok(value) = decode_value_with(data, &options) {
        // A decoded tree must render and re-encode without panicking.
        let _ = value.to_string();
        let _ = vellum_cbor::encode_value(&value);
    }
});
