use std::collections::HashSet;

use half::f16;

use crate::options::DecodeOptions;
use crate::tags;
use crate::value::{Key, Map, SimpleValue, Value};
use crate::wire::{read_be_u16, read_be_u32, read_be_u64, read_exact, read_u8, read_uint};
use crate::Error;

/// Decode exactly one CBOR data item with default options.
///
/// # Errors
///
/// Returns an error if the input is not a single well-formed data item or if
/// any validation (depth, UTF-8, duplicate keys, tag content) fails.
pub fn decode_value(bytes: &[u8]) -> Result<Value, Error> {
    decode_value_with(bytes, &DecodeOptions::default())
}

/// Decode exactly one CBOR data item with the given options.
///
/// # Errors
///
/// Returns an error if the input is not a single well-formed data item, if
/// trailing bytes follow it, or if any configured validation fails.
pub fn decode_value_with(bytes: &[u8], options: &DecodeOptions) -> Result<Value, Error> {
    let (value, consumed) = decode_value_prefix(bytes, options)?;
    if consumed != bytes.len() {
        return Err(Error::InvalidFormat(format!(
            "{} trailing bytes after the data item",
            bytes.len() - consumed
        )));
    }
    Ok(value)
}

/// Decode one CBOR data item from the front of `bytes`.
///
/// Returns the value together with the number of bytes consumed; trailing
/// bytes are left untouched.
///
/// # Errors
///
/// Returns an error if the leading item is malformed or fails validation.
pub fn decode_value_prefix(bytes: &[u8], options: &DecodeOptions) -> Result<(Value, usize), Error> {
    let mut s = Scanner::new(bytes, options);
    match s.parse_item(1)? {
        Decoded::Value(value) => Ok((value, s.pos)),
        Decoded::Break => Err(Error::InvalidIndefiniteLength),
    }
}

/// Internal decode result distinguishing the break marker from data items.
///
/// `Break` never leaves this module, so a finished [`Value`] cannot contain
/// the sentinel by construction.
enum Decoded {
    Value(Value),
    Break,
}

struct Scanner<'a, 'o> {
    data: &'a [u8],
    pos: usize,
    options: &'o DecodeOptions,
}

impl<'a, 'o> Scanner<'a, 'o> {
    const fn new(data: &'a [u8], options: &'o DecodeOptions) -> Self {
        Self {
            data,
            pos: 0,
            options,
        }
    }

    fn read_uint(&mut self, info: u8) -> Result<u64, Error> {
        read_uint(self.data, &mut self.pos, info, self.options.strict)
    }

    fn read_len(&mut self, info: u8) -> Result<usize, Error> {
        let len = self.read_uint(info)?;
        usize::try_from(len)
            .map_err(|_| Error::MalformedData(format!("length {len} overflows usize")))
    }

    /// Parse one item in a position where the break marker would be invalid.
    fn parse_value(&mut self, depth: usize) -> Result<Value, Error> {
        match self.parse_item(depth)? {
            Decoded::Value(v) => Ok(v),
            Decoded::Break => Err(Error::InvalidIndefiniteLength),
        }
    }

    #[allow(clippy::too_many_lines)]
    fn parse_item(&mut self, depth: usize) -> Result<Decoded, Error> {
        if depth > self.options.max_depth {
            return Err(Error::DepthLimitExceeded);
        }

        let ib = read_u8(self.data, &mut self.pos)?;
        let major = ib >> 5;
        let info = ib & 0x1f;

        let value = match major {
            0 => Value::Unsigned(self.read_uint(info)?),
            1 => Value::Negative(self.read_uint(info)?),
            2 => {
                if info == 31 {
                    Value::Bytes(self.parse_indefinite_bytes()?)
                } else {
                    let len = self.read_len(info)?;
                    Value::Bytes(read_exact(self.data, &mut self.pos, len)?.to_vec())
                }
            }
            3 => {
                if info == 31 {
                    Value::Text(self.parse_indefinite_text()?)
                } else {
                    let len = self.read_len(info)?;
                    let bytes = read_exact(self.data, &mut self.pos, len)?;
                    let s = core::str::from_utf8(bytes).map_err(|_| Error::IncorrectUtf8String)?;
                    Value::Text(s.to_owned())
                }
            }
            4 => {
                if info == 31 {
                    let mut items = Vec::new();
                    loop {
                        match self.parse_item(depth + 1)? {
                            Decoded::Break => break,
                            Decoded::Value(v) => items.push(v),
                        }
                    }
                    Value::Array(items)
                } else {
                    let len = self.read_len(info)?;
                    let mut items = Vec::new();
                    for _ in 0..len {
                        items.push(self.parse_value(depth + 1)?);
                    }
                    Value::Array(items)
                }
            }
            5 => Value::Map(self.parse_map(info, depth)?),
            6 => {
                let tag = self.read_uint(info)?;
                let content = self.parse_value(depth + 1)?;
                tags::validate(tag, &content, self.options.strict)?;
                Value::Tagged(tag, Box::new(content))
            }
            7 => return self.parse_major_seven(info),
            _ => unreachable!("major type out of range"),
        };
        Ok(Decoded::Value(value))
    }

    fn parse_major_seven(&mut self, info: u8) -> Result<Decoded, Error> {
        let value = match info {
            0..=19 => return Err(Error::UnassignedSimpleValue(info)),
            20 => Value::Simple(SimpleValue::False),
            21 => Value::Simple(SimpleValue::True),
            22 => Value::Simple(SimpleValue::Null),
            23 => Value::Simple(SimpleValue::Undefined),
            24 => {
                let v = read_u8(self.data, &mut self.pos)?;
                if v < 20 {
                    return Err(Error::UnassignedSimpleValue(v));
                }
                if let Some(simple) = SimpleValue::from_assigned(v) {
                    if self.options.strict {
                        return Err(Error::InvalidFormat(format!(
                            "simple value {v} uses the one-byte form but fits the header byte"
                        )));
                    }
                    Value::Simple(simple)
                } else if v < 32 {
                    return Err(Error::ReservedSimpleValue(v));
                } else {
                    Value::Simple(SimpleValue::Unassigned(v))
                }
            }
            25 => Value::Float16(f16::from_bits(read_be_u16(self.data, &mut self.pos)?)),
            26 => Value::Float32(f32::from_bits(read_be_u32(self.data, &mut self.pos)?)),
            27 => Value::Float64(f64::from_bits(read_be_u64(self.data, &mut self.pos)?)),
            28..=30 => {
                return Err(Error::InvalidFormat(format!(
                    "reserved additional-info value {info}"
                )))
            }
            31 => return Ok(Decoded::Break),
            _ => unreachable!("additional info out of range"),
        };
        Ok(Decoded::Value(value))
    }

    fn parse_map(&mut self, info: u8, depth: usize) -> Result<Map, Error> {
        let mut map;
        let mut seen: Option<HashSet<Key>> = (!self.options.allow_duplicate_map_keys)
            .then(HashSet::new);

        if info == 31 {
            map = Map::new();
            loop {
                let key = match self.parse_item(depth + 1)? {
                    Decoded::Break => break,
                    Decoded::Value(k) => k,
                };
                let value = match self.parse_item(depth + 1)? {
                    Decoded::Break => {
                        return Err(Error::InvalidFormat(
                            "map has a key but no value".to_owned(),
                        ))
                    }
                    Decoded::Value(v) => v,
                };
                Self::check_duplicate(seen.as_mut(), &key)?;
                map.insert(key, value);
            }
        } else {
            let len = self.read_len(info)?;
            map = Map::new();
            for _ in 0..len {
                let key = self.parse_value(depth + 1)?;
                let value = self.parse_value(depth + 1)?;
                Self::check_duplicate(seen.as_mut(), &key)?;
                map.insert(key, value);
            }
        }
        Ok(map)
    }

    fn check_duplicate(seen: Option<&mut HashSet<Key>>, key: &Value) -> Result<(), Error> {
        if let Some(seen) = seen {
            if !seen.insert(Key(key.clone())) {
                return Err(Error::DuplicateMapKey);
            }
        }
        Ok(())
    }

    fn parse_indefinite_bytes(&mut self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        let mut chunks = 0usize;
        loop {
            let ib = read_u8(self.data, &mut self.pos)?;
            if ib == 0xff {
                return Ok(out);
            }
            let chunk = self.parse_chunk(ib, 2, &mut chunks)?;
            push_checked(&mut out, chunk)?;
        }
    }

    fn parse_indefinite_text(&mut self) -> Result<String, Error> {
        let mut out = String::new();
        let mut chunks = 0usize;
        loop {
            let ib = read_u8(self.data, &mut self.pos)?;
            if ib == 0xff {
                return Ok(out);
            }
            let chunk = self.parse_chunk(ib, 3, &mut chunks)?;
            // Each chunk must be valid UTF-8 on its own.
            let s = core::str::from_utf8(chunk).map_err(|_| Error::IncorrectUtf8String)?;
            out.push_str(s);
        }
    }

    /// Read one definite-length chunk of an indefinite string.
    fn parse_chunk(&mut self, ib: u8, major: u8, chunks: &mut usize) -> Result<&'a [u8], Error> {
        let info = ib & 0x1f;
        if ib >> 5 != major || info == 31 {
            return Err(Error::WrongTypeInsideIndefiniteLength);
        }
        *chunks += 1;
        if *chunks > self.options.max_indefinite_chunks {
            return Err(Error::TooLongIndefiniteLength);
        }
        let len = self.read_len(info)?;
        read_exact(self.data, &mut self.pos, len)
    }
}

fn push_checked(out: &mut Vec<u8>, chunk: &[u8]) -> Result<(), Error> {
    out.len()
        .checked_add(chunk.len())
        .ok_or_else(|| Error::MalformedData("concatenated string length overflows".to_owned()))?;
    out.extend_from_slice(chunk);
    Ok(())
}
