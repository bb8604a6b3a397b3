use vellum_cbor::{decode_value_with, DecodeOptions, Error, Value};

fn strict() -> DecodeOptions {
    DecodeOptions::strict()
}

fn assert_non_canonical(bytes: &[u8]) {
    // Lenient mode accepts the encoding...
    decode_value_with(bytes, &DecodeOptions::default())
        .unwrap_or_else(|e| panic!("{bytes:02x?} should decode leniently: {e}"));
    // ...strict mode rejects it.
    let err = decode_value_with(bytes, &strict()).unwrap_err();
    assert!(
        matches!(err, Error::InvalidFormat(_)),
        "{bytes:02x?} should be non-canonical, got {err:?}"
    );
}

#[test]
fn non_shortest_integer_arguments() {
    assert_non_canonical(&[0x18, 0x00]);
    assert_non_canonical(&[0x18, 0x17]);
    assert_non_canonical(&[0x19, 0x00, 0x01]);
    assert_non_canonical(&[0x19, 0x00, 0xff]);
    assert_non_canonical(&[0x1a, 0x00, 0x00, 0xff, 0xff]);
    assert_non_canonical(&[0x1b, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff]);
    // Negative integers run through the same argument decoding.
    assert_non_canonical(&[0x38, 0x17]);
}

#[test]
fn shortest_forms_pass_strict_mode() {
    let cases: &[(&[u8], u64)] = &[
        (&[0x17], 23),
        (&[0x18, 0x18], 24),
        (&[0x18, 0xff], 255),
        (&[0x19, 0x01, 0x00], 256),
        (&[0x19, 0xff, 0xff], 65535),
        (&[0x1a, 0x00, 0x01, 0x00, 0x00], 65536),
        (&[0x1b, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00], 1 << 32),
    ];
    for (bytes, expected) in cases {
        assert_eq!(
            decode_value_with(bytes, &strict()).unwrap(),
            Value::Unsigned(*expected)
        );
    }
}

#[test]
fn non_shortest_string_lengths() {
    // 2-byte text with a one-byte length argument.
    assert_non_canonical(&[0x78, 0x02, 0x68, 0x69]);
    // 1-byte byte string with a two-byte length argument.
    assert_non_canonical(&[0x59, 0x00, 0x01, 0xaa]);
}

#[test]
fn non_shortest_container_lengths() {
    assert_non_canonical(&[0x98, 0x01, 0x00]);
    assert_non_canonical(&[0xb8, 0x01, 0x61, 0x61, 0x01]);
}

#[test]
fn non_shortest_tag_numbers() {
    // Tag 1 written with the one-byte form; content satisfies the tag.
    assert_non_canonical(&[0xd8, 0x01, 0x01]);
}

#[test]
fn non_shortest_simple_value_follow_byte() {
    // Simple value 20 (false) through the two-byte form.
    assert_non_canonical(&[0xf8, 0x14]);
}

#[test]
fn strict_mode_rejects_unregistered_tags() {
    // Tag 999 is not registered.
    let bytes = [0xd9, 0x03, 0xe7, 0x00];
    assert_eq!(
        decode_value_with(&bytes, &DecodeOptions::default()).unwrap(),
        Value::Tagged(999, Box::new(Value::Unsigned(0)))
    );
    assert_eq!(
        decode_value_with(&bytes, &strict()).unwrap_err(),
        Error::TagNotSupported(999)
    );
}

#[test]
fn strict_mode_still_accepts_indefinite_items() {
    // Indefinite length is a wire feature, not a shortest-form violation.
    let bytes = [0x9f, 0x01, 0x02, 0xff];
    assert_eq!(
        decode_value_with(&bytes, &strict()).unwrap(),
        Value::Array(vec![Value::Unsigned(1), Value::Unsigned(2)])
    );
}

#[test]
fn canonical_output_survives_strict_decode() {
    let value = Value::Array(vec![
        Value::Unsigned(24),
        Value::from_i64(-1000),
        Value::Text("hello".to_owned()),
        Value::Float64(1.5),
    ]);
    let bytes = vellum_cbor::encode_canonical(&value);
    let decoded = decode_value_with(&bytes, &strict()).unwrap();
    assert_eq!(vellum_cbor::encode_canonical(&decoded), bytes);
}
