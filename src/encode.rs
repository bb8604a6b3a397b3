use half::f16;

use crate::float::{narrow, Narrowed, CANONICAL_NAN_F16_BITS};
use crate::options::EncodeOptions;
use crate::order::cmp_encoded_keys;
use crate::value::{SimpleValue, Value};
use crate::wire::write_head;

/// Encode a value with default options: insertion-ordered map keys, floats at
/// their stated width, NaN payloads preserved.
#[must_use]
pub fn encode_value(value: &Value) -> Vec<u8> {
    encode_value_with(value, &EncodeOptions::default())
}

/// Encode a value with the given options.
#[must_use]
pub fn encode_value_with(value: &Value, options: &EncodeOptions) -> Vec<u8> {
    let mut e = Encoder::with_options(options.clone());
    e.value(value);
    e.into_vec()
}

/// Encode a value deterministically.
///
/// Two structurally equal values produce byte-identical output: integers and
/// lengths use shortest form, floats narrow to the smallest lossless width
/// with the canonical NaN, and map entries sort by encoded key.
#[must_use]
pub fn encode_canonical(value: &Value) -> Vec<u8> {
    encode_value_with(value, &EncodeOptions::canonical())
}

/// A streaming CBOR writer.
///
/// Primitive emitters append directly to the output buffer; aggregates go
/// through [`Encoder::array`] and [`Encoder::map`], which buffer each child's
/// encoding and write the header on `finish()`. Buffering is what lets the
/// map builder sort entries for deterministic output without rewriting
/// already-emitted bytes.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
    options: EncodeOptions,
}

impl Encoder {
    /// Create an encoder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with the given options.
    #[must_use]
    pub fn with_options(options: EncodeOptions) -> Self {
        Self {
            buf: Vec::new(),
            options,
        }
    }

    /// Consume the encoder and return the encoded bytes.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    /// Borrow the bytes emitted so far.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Emit `null`.
    pub fn null(&mut self) {
        self.buf.push(0xf6);
    }

    /// Emit `undefined`.
    pub fn undefined(&mut self) {
        self.buf.push(0xf7);
    }

    /// Emit a boolean.
    pub fn bool(&mut self, v: bool) {
        self.buf.push(if v { 0xf5 } else { 0xf4 });
    }

    /// Emit an unsigned integer in shortest form.
    pub fn uint(&mut self, v: u64) {
        write_head(&mut self.buf, 0, v);
    }

    /// Emit a signed integer, selecting major type 0 or 1 by sign.
    pub fn int(&mut self, v: i64) {
        if v >= 0 {
            #[allow(clippy::cast_sign_loss)]
            self.uint(v as u64);
        } else {
            #[allow(clippy::cast_sign_loss)]
            self.negative((-1 - v) as u64);
        }
    }

    /// Emit a major-1 negative integer from its raw argument.
    ///
    /// The encoded logical value is `-1 - raw`; this is the full-range
    /// counterpart of [`Encoder::int`].
    pub fn negative(&mut self, raw: u64) {
        write_head(&mut self.buf, 1, raw);
    }

    /// Emit a definite-length byte string.
    pub fn bytes(&mut self, v: &[u8]) {
        write_head(&mut self.buf, 2, v.len() as u64);
        self.buf.extend_from_slice(v);
    }

    /// Emit a definite-length text string.
    pub fn text(&mut self, v: &str) {
        write_head(&mut self.buf, 3, v.len() as u64);
        self.buf.extend_from_slice(v.as_bytes());
    }

    /// Emit a tag head; the next item emitted becomes the tag content.
    pub fn tag(&mut self, tag: u64) {
        write_head(&mut self.buf, 6, tag);
    }

    /// Emit a simple value.
    ///
    /// Values `20..=23` use their one-byte encodings; unassigned values use
    /// the two-byte form. Unassigned values below 32 are reserved on the wire
    /// and never produced by the decoder.
    pub fn simple(&mut self, v: SimpleValue) {
        match v {
            SimpleValue::False => self.buf.push(0xf4),
            SimpleValue::True => self.buf.push(0xf5),
            SimpleValue::Null => self.buf.push(0xf6),
            SimpleValue::Undefined => self.buf.push(0xf7),
            SimpleValue::Unassigned(n) => {
                self.buf.push(0xf8);
                self.buf.push(n);
            }
        }
    }

    /// Emit a half-precision float.
    ///
    /// Canonical mode replaces any NaN payload with the canonical NaN.
    pub fn float16(&mut self, v: f16) {
        let bits = if self.options.canonical && v.is_nan() {
            CANONICAL_NAN_F16_BITS
        } else {
            v.to_bits()
        };
        self.buf.push(0xf9);
        self.buf.extend_from_slice(&bits.to_be_bytes());
    }

    /// Emit a single-precision float, narrowing in canonical mode.
    pub fn float32(&mut self, v: f32) {
        if self.options.canonical {
            self.narrowed(narrow(f64::from(v)));
        } else {
            self.buf.push(0xfa);
            self.buf.extend_from_slice(&v.to_bits().to_be_bytes());
        }
    }

    /// Emit a double-precision float, narrowing in canonical mode.
    pub fn float64(&mut self, v: f64) {
        if self.options.canonical {
            self.narrowed(narrow(v));
        } else {
            self.buf.push(0xfb);
            self.buf.extend_from_slice(&v.to_bits().to_be_bytes());
        }
    }

    fn narrowed(&mut self, n: Narrowed) {
        match n {
            Narrowed::Half(bits) => {
                self.buf.push(0xf9);
                self.buf.extend_from_slice(&bits.to_be_bytes());
            }
            Narrowed::Single(v) => {
                self.buf.push(0xfa);
                self.buf.extend_from_slice(&v.to_bits().to_be_bytes());
            }
            Narrowed::Double(v) => {
                self.buf.push(0xfb);
                self.buf.extend_from_slice(&v.to_bits().to_be_bytes());
            }
        }
    }

    /// Start an array; children accumulate in the builder until `finish()`.
    pub fn array(&mut self) -> ArrayBuilder<'_> {
        ArrayBuilder {
            enc: self,
            children: Vec::new(),
        }
    }

    /// Start a map; entries accumulate in the builder until `finish()`.
    pub fn map(&mut self) -> MapBuilder<'_> {
        MapBuilder {
            enc: self,
            pairs: Vec::new(),
        }
    }

    /// Emit a whole value tree.
    pub fn value(&mut self, v: &Value) {
        match v {
            Value::Unsigned(n) => self.uint(*n),
            Value::Negative(raw) => self.negative(*raw),
            Value::Bytes(b) => self.bytes(b),
            Value::Text(s) => self.text(s),
            Value::Array(items) => {
                let mut a = self.array();
                for item in items {
                    a.push_value(item);
                }
                a.finish();
            }
            Value::Map(m) => {
                let mut b = self.map();
                for (key, value) in m.iter() {
                    b.entry_values(key, value);
                }
                b.finish();
            }
            Value::Tagged(tag, inner) => {
                self.tag(*tag);
                self.value(inner);
            }
            Value::Simple(s) => self.simple(*s),
            Value::Float16(f) => self.float16(*f),
            Value::Float32(f) => self.float32(*f),
            Value::Float64(f) => self.float64(*f),
        }
    }

    fn child(&self) -> Self {
        Self::with_options(self.options.clone())
    }
}

/// Builder for an array under construction.
///
/// Each child is encoded into its own buffer; `finish()` emits the definite
/// header with the observed count followed by the children in order.
#[derive(Debug)]
pub struct ArrayBuilder<'a> {
    enc: &'a mut Encoder,
    children: Vec<Vec<u8>>,
}

impl ArrayBuilder<'_> {
    /// Append one child, filled in by the closure.
    pub fn push(&mut self, f: impl FnOnce(&mut Encoder)) {
        let mut child = self.enc.child();
        f(&mut child);
        self.children.push(child.into_vec());
    }

    /// Append one child value tree.
    pub fn push_value(&mut self, v: &Value) {
        self.push(|e| e.value(v));
    }

    /// Number of children buffered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if no children have been buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Emit the header and the buffered children into the parent encoder.
    pub fn finish(self) {
        write_head(&mut self.enc.buf, 4, self.children.len() as u64);
        for child in &self.children {
            self.enc.buf.extend_from_slice(child);
        }
    }
}

/// Builder for a map under construction.
///
/// Key and value bytes are buffered per entry; `finish()` sorts the pairs by
/// encoded key when canonical output or key sorting is requested, then emits
/// the definite header followed by each pair.
#[derive(Debug)]
pub struct MapBuilder<'a> {
    enc: &'a mut Encoder,
    pairs: Vec<(Vec<u8>, Vec<u8>)>,
}

impl MapBuilder<'_> {
    /// Append one entry, key and value each filled in by a closure.
    pub fn entry(&mut self, key: impl FnOnce(&mut Encoder), value: impl FnOnce(&mut Encoder)) {
        let mut k = self.enc.child();
        key(&mut k);
        let mut v = self.enc.child();
        value(&mut v);
        self.pairs.push((k.into_vec(), v.into_vec()));
    }

    /// Append one entry from value trees.
    pub fn entry_values(&mut self, key: &Value, value: &Value) {
        self.entry(|e| e.value(key), |e| e.value(value));
    }

    /// Number of entries buffered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no entries have been buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Emit the header and the buffered entries into the parent encoder.
    pub fn finish(mut self) {
        if self.enc.options.canonical || self.enc.options.sort_keys {
            self.pairs.sort_by(|a, b| cmp_encoded_keys(&a.0, &b.0));
        }
        write_head(&mut self.enc.buf, 5, self.pairs.len() as u64);
        for (key, value) in &self.pairs {
            self.enc.buf.extend_from_slice(key);
            self.enc.buf.extend_from_slice(value);
        }
    }
}
