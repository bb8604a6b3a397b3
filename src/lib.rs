//! # vellum-cbor
//!
//! An RFC 8949 CBOR codec built around an owned value tree.
//!
//! ## Design principles
//!
//! - **One tree, every distinction.** [`Value`] preserves everything the wire
//!   format distinguishes: the unsigned/negative split, byte versus text
//!   strings, all three float widths, tags, and simple values.
//! - **Validation happens at the boundary.** The decoder enforces depth
//!   limits, UTF-8 validity, duplicate-key rejection, indefinite-length chunk
//!   typing, and per-tag content shapes from the IANA registry before a value
//!   ever reaches the caller. Strict mode additionally rejects every
//!   non-shortest-form encoding and unregistered tag.
//! - **Determinism is an encoder property.** [`encode_canonical`] produces
//!   byte-identical output for structurally equal values: shortest-form
//!   arguments, lossless float narrowing with the canonical NaN, and map
//!   entries sorted by encoded key.
//!
//! ## Feature flags
//!
//! - `serde` *(default)*: the generic bridge ([`to_vec`], [`from_slice`],
//!   [`to_value`], [`from_value`] and their `_with` variants).
//!
//! ## Example
//!
//! ```
//! use vellum_cbor::{decode_value, encode_canonical, Value};
//!
//! let value = decode_value(&[0x83, 0x01, 0x02, 0x03])?;
//! assert_eq!(
//!     value,
//!     Value::Array(vec![
//!         Value::Unsigned(1),
//!         Value::Unsigned(2),
//!         Value::Unsigned(3),
//!     ])
//! );
//! assert_eq!(encode_canonical(&value), vec![0x83, 0x01, 0x02, 0x03]);
//! # Ok::<(), vellum_cbor::Error>(())
//! ```
//!
//! ## Safety
//!
//! This crate forbids `unsafe` code.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod encode;
mod error;
mod float;
mod options;
mod order;
mod scanner;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod tags;
mod value;
mod wire;

pub use crate::encode::{
    encode_canonical, encode_value, encode_value_with, ArrayBuilder, Encoder, MapBuilder,
};
pub use crate::error::Error;
pub use crate::options::{
    DataDecodingStrategy, DataEncodingStrategy, DecodeOptions, EncodeOptions,
    NonConformingFloatStrategy, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INDEFINITE_CHUNKS,
};
pub use crate::order::cmp_encoded_keys;
pub use crate::scanner::{decode_value, decode_value_prefix, decode_value_with};
pub use crate::value::{Key, Map, SimpleValue, Value};

#[cfg(feature = "serde")]
pub use crate::serde_impl::{from_slice, from_slice_with, from_value, to_value, to_vec, to_vec_with};
