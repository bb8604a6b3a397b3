// Property tests for round-tripping and canonical determinism.
//
// Sizes and depths are deliberately small to keep CI fast; the interesting
// boundaries (argument widths, float narrowing, key ordering) are all
// reachable at these sizes.
#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use proptest::prelude::*;
use vellum_cbor::{
    decode_value, decode_value_prefix, decode_value_with, encode_canonical, encode_value,
    DecodeOptions, Map, SimpleValue, Value,
};

/// Tags whose registered requirement admits any content.
const SAFE_TAGS: &[u64] = &[21, 22, 23, 28, 39, 55799];

fn arb_f16() -> impl Strategy<Value = half::f16> {
    any::<u16>().prop_filter_map("exclude NaN payloads", |bits| {
        let is_nan = (bits & 0x7c00) == 0x7c00 && (bits & 0x03ff) != 0;
        if is_nan {
            None
        } else {
            Some(half::f16::from_bits(bits))
        }
    })
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<u64>().prop_map(Value::Unsigned),
        any::<u64>().prop_map(Value::Negative),
        proptest::collection::vec(any::<u8>(), 0..24).prop_map(Value::Bytes),
        "[a-z0-9]{0,12}".prop_map(Value::from),
        Just(Value::Simple(SimpleValue::False)),
        Just(Value::Simple(SimpleValue::True)),
        Just(Value::Simple(SimpleValue::Null)),
        Just(Value::Simple(SimpleValue::Undefined)),
        (32u8..=255u8).prop_map(|n| Value::Simple(SimpleValue::Unassigned(n))),
        arb_f16().prop_map(Value::Float16),
        any::<f32>()
            .prop_filter("exclude NaN", |f| !f.is_nan())
            .prop_map(Value::Float32),
        any::<f64>()
            .prop_filter("exclude NaN", |f| !f.is_nan())
            .prop_map(Value::Float64),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            proptest::collection::vec((arb_leaf(), inner.clone()), 0..6).prop_map(|entries| {
                // Drop keys that collide under canonical encoding (a stricter
                // condition than Key equality, since width narrowing can merge
                // distinct float keys) so every generated map survives both
                // plain and canonical re-decoding with duplicates disallowed.
                let mut seen = HashSet::new();
                let mut map = Map::new();
                for (k, v) in entries {
                    if seen.insert(encode_canonical(&k)) {
                        map.insert(k, v);
                    }
                }
                Value::Map(map)
            }),
            (proptest::sample::select(SAFE_TAGS), inner)
                .prop_map(|(tag, v)| Value::Tagged(tag, Box::new(v))),
        ]
    })
}

proptest! {
    #[test]
    fn round_trip_preserves_structure(v in arb_value()) {
        let bytes = encode_value(&v);
        let back = decode_value(&bytes).unwrap();
        prop_assert_eq!(back, v);
    }

    #[test]
    fn canonical_encoding_is_deterministic_and_strict_clean(v in arb_value()) {
        let canonical = encode_canonical(&v);
        // Canonical output is already shortest-form everywhere, so a strict
        // decode must accept it.
        let back = decode_value_with(&canonical, &DecodeOptions::strict()).unwrap();
        prop_assert_eq!(encode_canonical(&back), canonical);
    }

    #[test]
    fn prefix_decode_consumes_exactly_the_encoding(v in arb_value()) {
        let bytes = encode_value(&v);
        let (_, consumed) = decode_value_prefix(&bytes, &DecodeOptions::default()).unwrap();
        prop_assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn canonical_and_plain_encodings_decode_alike(v in arb_value()) {
        // Width narrowing changes the tree, so compare canonical bytes, which
        // erase exactly that difference.
        let plain = decode_value(&encode_value(&v)).unwrap();
        let canon = decode_value(&encode_canonical(&v)).unwrap();
        prop_assert_eq!(encode_canonical(&plain), encode_canonical(&canon));
    }
}
