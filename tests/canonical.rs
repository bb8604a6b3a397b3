use half::f16;
use vellum_cbor::{
    decode_value, encode_canonical, encode_value, encode_value_with, EncodeOptions, Map, Value,
};

#[test]
fn integers_use_shortest_form() {
    assert_eq!(encode_canonical(&Value::Unsigned(0)), vec![0x00]);
    assert_eq!(encode_canonical(&Value::Unsigned(23)), vec![0x17]);
    assert_eq!(encode_canonical(&Value::Unsigned(24)), vec![0x18, 0x18]);
    assert_eq!(encode_canonical(&Value::Unsigned(255)), vec![0x18, 0xff]);
    assert_eq!(
        encode_canonical(&Value::Unsigned(256)),
        vec![0x19, 0x01, 0x00]
    );
    assert_eq!(
        encode_canonical(&Value::Unsigned(1_000_000_000_000)),
        vec![0x1b, 0x00, 0x00, 0x00, 0xe8, 0xd4, 0xa5, 0x10, 0x00]
    );
    assert_eq!(
        encode_canonical(&Value::from_i64(-1000)),
        vec![0x39, 0x03, 0xe7]
    );
}

#[test]
fn nan_collapses_to_canonical_half_nan() {
    assert_eq!(
        encode_canonical(&Value::Float64(f64::NAN)),
        vec![0xf9, 0x7e, 0x00]
    );
    assert_eq!(
        encode_canonical(&Value::Float32(f32::NAN)),
        vec![0xf9, 0x7e, 0x00]
    );
    // A NaN with a payload still collapses.
    assert_eq!(
        encode_canonical(&Value::Float64(f64::from_bits(0x7ff8_0000_0000_beef))),
        vec![0xf9, 0x7e, 0x00]
    );
    assert_eq!(
        encode_canonical(&Value::Float16(f16::from_bits(0x7e01))),
        vec![0xf9, 0x7e, 0x00]
    );
}

#[test]
fn infinities_encode_as_half() {
    assert_eq!(
        encode_canonical(&Value::Float64(f64::INFINITY)),
        vec![0xf9, 0x7c, 0x00]
    );
    assert_eq!(
        encode_canonical(&Value::Float64(f64::NEG_INFINITY)),
        vec![0xf9, 0xfc, 0x00]
    );
}

#[test]
fn signed_zero_is_preserved() {
    assert_eq!(
        encode_canonical(&Value::Float64(0.0)),
        vec![0xf9, 0x00, 0x00]
    );
    assert_eq!(
        encode_canonical(&Value::Float64(-0.0)),
        vec![0xf9, 0x80, 0x00]
    );
}

#[test]
fn floats_narrow_losslessly() {
    assert_eq!(
        encode_canonical(&Value::Float64(1.5)),
        vec![0xf9, 0x3e, 0x00]
    );
    // 100000.0 fits single but not half precision.
    assert_eq!(
        encode_canonical(&Value::Float64(100_000.0)),
        vec![0xfa, 0x47, 0xc3, 0x50, 0x00]
    );
    // 1.1 is not exact in any narrower width.
    assert_eq!(
        encode_canonical(&Value::Float64(1.1)),
        vec![0xfb, 0x3f, 0xf1, 0x99, 0x99, 0x99, 0x99, 0x99, 0x9a]
    );
    // Width narrowing applies to stated-width values too.
    assert_eq!(
        encode_canonical(&Value::Float32(1.0)),
        vec![0xf9, 0x3c, 0x00]
    );
}

#[test]
fn non_canonical_mode_keeps_float_width_and_nan_payload() {
    assert_eq!(
        encode_value(&Value::Float64(1.5)),
        vec![0xfb, 0x3f, 0xf8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        encode_value(&Value::Float32(1.0)),
        vec![0xfa, 0x3f, 0x80, 0x00, 0x00]
    );
    let payload_nan = f64::from_bits(0x7ff8_0000_0000_beef);
    let bytes = encode_value(&Value::Float64(payload_nan));
    assert_eq!(bytes[0], 0xfb);
    assert_eq!(bytes[1..], payload_nan.to_bits().to_be_bytes());
}

#[test]
fn map_keys_sort_by_encoded_length_then_bytes() {
    let mut map = Map::new();
    map.insert(Value::from("aa"), Value::Unsigned(1));
    map.insert(Value::from("b"), Value::Unsigned(2));
    map.insert(Value::from("aaa"), Value::Unsigned(3));
    map.insert(Value::from("z"), Value::Unsigned(4));

    let bytes = encode_canonical(&Value::Map(map));
    assert_eq!(
        bytes,
        vec![
            0xa4, // 4 entries: b, z, aa, aaa
            0x61, 0x62, 0x02, // "b": 2
            0x61, 0x7a, 0x04, // "z": 4
            0x62, 0x61, 0x61, 0x01, // "aa": 1
            0x63, 0x61, 0x61, 0x61, 0x03, // "aaa": 3
        ]
    );
}

#[test]
fn mixed_key_types_sort_by_encoded_bytes() {
    // Encoded forms: 10 -> [0x0a], 100 -> [0x18,0x64], -1 -> [0x20],
    // "z" -> [0x61,0x7a], [1] -> [0x81,0x01].
    let mut map = Map::new();
    map.insert(Value::Array(vec![Value::Unsigned(1)]), Value::Unsigned(0));
    map.insert(Value::from("z"), Value::Unsigned(1));
    map.insert(Value::Unsigned(100), Value::Unsigned(2));
    map.insert(Value::Unsigned(10), Value::Unsigned(3));
    map.insert(Value::from_i64(-1), Value::Unsigned(4));

    let bytes = encode_canonical(&Value::Map(map));
    assert_eq!(
        bytes,
        vec![
            0xa5, //
            0x0a, 0x03, // 10: 3
            0x20, 0x04, // -1: 4
            0x18, 0x64, 0x02, // 100: 2
            0x61, 0x7a, 0x01, // "z": 1
            0x81, 0x01, 0x00, // [1]: 0
        ]
    );
}

#[test]
fn insertion_order_is_deterministically_erased() {
    let mut forward = Map::new();
    forward.insert(Value::from("a"), Value::Unsigned(1));
    forward.insert(Value::from("b"), Value::Unsigned(2));

    let mut reverse = Map::new();
    reverse.insert(Value::from("b"), Value::Unsigned(2));
    reverse.insert(Value::from("a"), Value::Unsigned(1));

    assert_eq!(
        encode_canonical(&Value::Map(forward)),
        encode_canonical(&Value::Map(reverse))
    );
}

#[test]
fn non_canonical_mode_keeps_insertion_order() {
    let mut map = Map::new();
    map.insert(Value::from("b"), Value::Unsigned(2));
    map.insert(Value::from("a"), Value::Unsigned(1));
    assert_eq!(
        encode_value(&Value::Map(map)),
        vec![0xa2, 0x61, 0x62, 0x02, 0x61, 0x61, 0x01]
    );
}

#[test]
fn sort_keys_without_canonical_keeps_float_widths() {
    let mut map = Map::new();
    map.insert(Value::from("b"), Value::Float64(1.0));
    map.insert(Value::from("a"), Value::Unsigned(1));

    let options = EncodeOptions {
        sort_keys: true,
        ..EncodeOptions::default()
    };
    let bytes = encode_value_with(&Value::Map(map), &options);
    assert_eq!(
        bytes,
        vec![
            0xa2, //
            0x61, 0x61, 0x01, // "a": 1
            0x61, 0x62, 0xfb, 0x3f, 0xf0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // "b": 1.0
        ]
    );
}

#[test]
fn canonical_reencode_is_a_fixed_point() {
    let value = Value::Array(vec![
        Value::Tagged(1, Box::new(Value::Float64(1_363_896_240.5))),
        Value::Float32(0.5),
        Value::Bytes(vec![0xde, 0xad]),
        Value::from("text"),
    ]);
    let first = encode_canonical(&value);
    let reencoded = encode_canonical(&decode_value(&first).unwrap());
    assert_eq!(first, reencoded);
}

#[test]
fn nested_maps_sort_at_every_level() {
    let mut inner = Map::new();
    inner.insert(Value::from("y"), Value::Unsigned(1));
    inner.insert(Value::from("x"), Value::Unsigned(2));

    let mut outer = Map::new();
    outer.insert(Value::from("bb"), Value::Map(inner));
    outer.insert(Value::from("a"), Value::Unsigned(0));

    let bytes = encode_canonical(&Value::Map(outer));
    assert_eq!(
        bytes,
        vec![
            0xa2, //
            0x61, 0x61, 0x00, // "a": 0
            0x62, 0x62, 0x62, // "bb":
            0xa2, 0x61, 0x78, 0x02, 0x61, 0x79, 0x01, // {"x": 2, "y": 1}
        ]
    );
}
