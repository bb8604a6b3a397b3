//! The generic bridge between Rust types and the CBOR value tree.
//!
//! Serialization produces a [`Value`] first and hands it to the encoder, so
//! canonical ordering and float narrowing stay the encoder's business.
//! Deserialization walks a borrowed [`Value`]. Tags annotate rather than
//! reshape: the deserializer looks through `Tagged` wrappers when the caller
//! asks for the content's shape.

use core::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::de::{
    DeserializeOwned, DeserializeSeed, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor,
};
use serde::ser::{
    SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant, SerializeTuple,
    SerializeTupleStruct, SerializeTupleVariant,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::options::{
    DataDecodingStrategy, DataEncodingStrategy, DecodeOptions, EncodeOptions,
    NonConformingFloatStrategy,
};
use crate::scanner::decode_value_with;
use crate::value::{Map, SimpleValue, Value};
use crate::{encode_value_with, Error};

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Message(msg.to_string())
    }
}

/// Convert a Rust value into a [`Value`] tree.
///
/// # Errors
///
/// Returns an error if an integer falls outside the CBOR integer range or if
/// the type's `Serialize` implementation fails.
pub fn to_value<T: Serialize>(value: &T) -> Result<Value, Error> {
    value.serialize(ValueSerializer {
        data_strategy: DataEncodingStrategy::ByteString,
    })
}

/// Serialize a Rust value to CBOR bytes with default options.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as CBOR.
pub fn to_vec<T: Serialize>(value: &T) -> Result<Vec<u8>, Error> {
    to_vec_with(value, &EncodeOptions::default())
}

/// Serialize a Rust value to CBOR bytes with the given options.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as CBOR.
pub fn to_vec_with<T: Serialize>(value: &T, options: &EncodeOptions) -> Result<Vec<u8>, Error> {
    let tree = value.serialize(ValueSerializer {
        data_strategy: options.data_strategy,
    })?;
    Ok(encode_value_with(&tree, options))
}

/// Deserialize a Rust value from a borrowed [`Value`] tree.
///
/// # Errors
///
/// Returns an error if the tree does not match the requested type.
pub fn from_value<'de, T: Deserialize<'de>>(value: &'de Value) -> Result<T, Error> {
    T::deserialize(ValueDeserializer::new(value, &DecodeOptions::default()))
}

/// Deserialize a Rust value from CBOR bytes with default options.
///
/// # Errors
///
/// Returns an error if decoding fails or the decoded tree does not match the
/// requested type.
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    from_slice_with(bytes, &DecodeOptions::default())
}

/// Deserialize a Rust value from CBOR bytes with the given options.
///
/// # Errors
///
/// Returns an error if decoding fails or the decoded tree does not match the
/// requested type.
pub fn from_slice_with<T: DeserializeOwned>(
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<T, Error> {
    let value = decode_value_with(bytes, options)?;
    T::deserialize(ValueDeserializer::new(&value, options))
}

#[derive(Clone, Copy)]
struct ValueSerializer {
    data_strategy: DataEncodingStrategy,
}

fn variant_map(variant: &'static str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(Value::Text(variant.to_owned()), value);
    Value::Map(map)
}

impl Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SeqSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = TupleVariantSerializer;
    type SerializeMap = MapSerializer;
    type SerializeStruct = StructSerializer;
    type SerializeStructVariant = StructVariantSerializer;

    fn is_human_readable(&self) -> bool {
        false
    }

    fn serialize_bool(self, v: bool) -> Result<Value, Error> {
        Ok(Value::from(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, Error> {
        Ok(Value::from_i64(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, Error> {
        Ok(Value::from_i64(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, Error> {
        Ok(Value::from_i64(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, Error> {
        Ok(Value::from_i64(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, Error> {
        Value::from_i128(v)
            .ok_or_else(|| Error::ValueOutOfRange(format!("{v} is outside the CBOR integer range")))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, Error> {
        Ok(Value::Unsigned(u64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, Error> {
        Ok(Value::Unsigned(u64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, Error> {
        Ok(Value::Unsigned(u64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, Error> {
        Ok(Value::Unsigned(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, Error> {
        u64::try_from(v)
            .map(Value::Unsigned)
            .map_err(|_| Error::ValueOutOfRange(format!("{v} is outside the CBOR integer range")))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, Error> {
        Ok(Value::Float32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, Error> {
        Ok(Value::Float64(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, Error> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, Error> {
        Ok(Value::Text(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, Error> {
        Ok(match self.data_strategy {
            DataEncodingStrategy::ByteString => Value::Bytes(v.to_vec()),
            DataEncodingStrategy::Base64Text => Value::Text(BASE64.encode(v)),
        })
    }

    fn serialize_none(self) -> Result<Value, Error> {
        Ok(Value::Simple(SimpleValue::Null))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value, Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, Error> {
        Ok(Value::Simple(SimpleValue::Null))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, Error> {
        Ok(Value::Simple(SimpleValue::Null))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, Error> {
        Ok(Value::Text(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, Error> {
        Ok(variant_map(variant, value.serialize(self)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, Error> {
        Ok(SeqSerializer {
            ser: self,
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant, Error> {
        Ok(TupleVariantSerializer {
            ser: self,
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap, Error> {
        Ok(MapSerializer {
            ser: self,
            map: Map::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, Error> {
        Ok(StructSerializer {
            ser: self,
            map: Map::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant, Error> {
        Ok(StructVariantSerializer {
            ser: self,
            variant,
            map: Map::with_capacity(len),
        })
    }
}

struct SeqSerializer {
    ser: ValueSerializer,
    items: Vec<Value>,
}

impl SerializeSeq for SeqSerializer {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.items.push(value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(Value::Array(self.items))
    }
}

impl SerializeTuple for SeqSerializer {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, Error> {
        SerializeSeq::end(self)
    }
}

impl SerializeTupleStruct for SeqSerializer {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, Error> {
        SerializeSeq::end(self)
    }
}

struct TupleVariantSerializer {
    ser: ValueSerializer,
    variant: &'static str,
    items: Vec<Value>,
}

impl SerializeTupleVariant for TupleVariantSerializer {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.items.push(value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(variant_map(self.variant, Value::Array(self.items)))
    }
}

struct MapSerializer {
    ser: ValueSerializer,
    map: Map,
    pending_key: Option<Value>,
}

impl SerializeMap for MapSerializer {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), Error> {
        self.pending_key = Some(key.serialize(self.ser)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::Message("map value serialized before its key".to_owned()))?;
        self.map.insert(key, value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(Value::Map(self.map))
    }
}

struct StructSerializer {
    ser: ValueSerializer,
    map: Map,
}

impl SerializeStruct for StructSerializer {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        self.map
            .insert(Value::Text(key.to_owned()), value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(Value::Map(self.map))
    }
}

struct StructVariantSerializer {
    ser: ValueSerializer,
    variant: &'static str,
    map: Map,
}

impl SerializeStructVariant for StructVariantSerializer {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        self.map
            .insert(Value::Text(key.to_owned()), value.serialize(self.ser)?);
        Ok(())
    }

    fn end(self) -> Result<Value, Error> {
        Ok(variant_map(self.variant, Value::Map(self.map)))
    }
}

struct ValueDeserializer<'de, 'o> {
    value: &'de Value,
    options: &'o DecodeOptions,
}

impl<'de, 'o> ValueDeserializer<'de, 'o> {
    const fn new(value: &'de Value, options: &'o DecodeOptions) -> Self {
        Self { value, options }
    }

    /// Look through tag wrappers; tags annotate, they don't change shape.
    fn untagged(&self) -> &'de Value {
        let mut v = self.value;
        while let Value::Tagged(_, inner) = v {
            v = inner;
        }
        v
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::TypeMismatch {
            expected,
            found: self.untagged().type_name().to_owned(),
        }
    }

    fn integer(&self) -> Result<i128, Error> {
        self.untagged()
            .as_i128()
            .ok_or_else(|| self.mismatch("an integer"))
    }

    fn float(&self) -> Result<f64, Error> {
        match self.untagged() {
            Value::Float16(v) => Ok(f64::from(*v)),
            Value::Float32(v) => Ok(f64::from(*v)),
            Value::Float64(v) => Ok(*v),
            Value::Text(s)
                if self.options.float_strategy == NonConformingFloatStrategy::FromText =>
            {
                match s.as_str() {
                    "NaN" => Ok(f64::NAN),
                    "Infinity" => Ok(f64::INFINITY),
                    "-Infinity" => Ok(f64::NEG_INFINITY),
                    other => other
                        .parse()
                        .map_err(|_| self.mismatch("a float or numeric text")),
                }
            }
            _ => Err(self.mismatch("a float")),
        }
    }
}

fn out_of_range<T: fmt::Display>(v: T, target: &str) -> Error {
    Error::ValueOutOfRange(format!("{v} does not fit {target}"))
}

macro_rules! deserialize_int {
    ($method:ident, $visit:ident, $ty:ty) => {
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
            let v = self.integer()?;
            visitor.$visit(<$ty>::try_from(v).map_err(|_| out_of_range(v, stringify!($ty)))?)
        }
    };
}

impl<'de, 'o> Deserializer<'de> for ValueDeserializer<'de, 'o> {
    type Error = Error;

    fn is_human_readable(&self) -> bool {
        false
    }

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.untagged() {
            Value::Unsigned(n) => visitor.visit_u64(*n),
            Value::Negative(raw) => {
                if let Some(v) = self.untagged().as_i64() {
                    visitor.visit_i64(v)
                } else {
                    visitor.visit_i128(-1 - i128::from(*raw))
                }
            }
            Value::Bytes(b) => visitor.visit_borrowed_bytes(b),
            Value::Text(s) => visitor.visit_borrowed_str(s),
            Value::Array(_) => self.deserialize_seq(visitor),
            Value::Map(_) => self.deserialize_map(visitor),
            Value::Simple(SimpleValue::False) => visitor.visit_bool(false),
            Value::Simple(SimpleValue::True) => visitor.visit_bool(true),
            Value::Simple(SimpleValue::Null | SimpleValue::Undefined) => visitor.visit_unit(),
            Value::Simple(SimpleValue::Unassigned(n)) => Err(Error::Message(format!(
                "cannot deserialize unassigned simple value {n}"
            ))),
            Value::Float16(v) => visitor.visit_f32(f32::from(*v)),
            Value::Float32(v) => visitor.visit_f32(*v),
            Value::Float64(v) => visitor.visit_f64(*v),
            Value::Tagged(..) => unreachable!("untagged() strips tags"),
        }
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        self.untagged()
            .as_bool()
            .ok_or_else(|| self.mismatch("a boolean"))
            .and_then(|v| visitor.visit_bool(v))
    }

    deserialize_int!(deserialize_i8, visit_i8, i8);
    deserialize_int!(deserialize_i16, visit_i16, i16);
    deserialize_int!(deserialize_i32, visit_i32, i32);
    deserialize_int!(deserialize_i64, visit_i64, i64);
    deserialize_int!(deserialize_u8, visit_u8, u8);
    deserialize_int!(deserialize_u16, visit_u16, u16);
    deserialize_int!(deserialize_u32, visit_u32, u32);
    deserialize_int!(deserialize_u64, visit_u64, u64);

    fn deserialize_i128<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_i128(self.integer()?)
    }

    fn deserialize_u128<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        let v = self.integer()?;
        visitor.visit_u128(u128::try_from(v).map_err(|_| out_of_range(v, "u128"))?)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_f32(self.float()? as f32)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_f64(self.float()?)
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.untagged() {
            Value::Text(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => visitor.visit_char(c),
                    _ => Err(self.mismatch("a single-character string")),
                }
            }
            _ => Err(self.mismatch("a single-character string")),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.untagged() {
            Value::Text(s) => visitor.visit_borrowed_str(s),
            _ => Err(self.mismatch("a text string")),
        }
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.untagged() {
            Value::Bytes(b) => visitor.visit_borrowed_bytes(b),
            Value::Text(s) if self.options.data_strategy == DataDecodingStrategy::Base64Text => {
                let decoded = BASE64
                    .decode(s)
                    .map_err(|_| Error::InvalidFormat("text is not valid base64".to_owned()))?;
                visitor.visit_byte_buf(decoded)
            }
            _ => Err(self.mismatch("a byte string")),
        }
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.untagged() {
            Value::Simple(SimpleValue::Null | SimpleValue::Undefined) => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.untagged() {
            Value::Simple(SimpleValue::Null | SimpleValue::Undefined) => visitor.visit_unit(),
            _ => Err(self.mismatch("null")),
        }
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.untagged() {
            Value::Array(items) => visitor.visit_seq(SeqDeserializer {
                iter: items.iter(),
                options: self.options,
            }),
            _ => Err(self.mismatch("an array")),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value, Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.untagged() {
            Value::Map(m) => visitor.visit_map(MapDeserializer {
                iter: m.entries().iter(),
                value: None,
                options: self.options,
            }),
            _ => Err(self.mismatch("a map")),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        match self.untagged() {
            Value::Text(_) => visitor.visit_enum(EnumDeserializer {
                variant: self.untagged(),
                value: None,
                options: self.options,
            }),
            Value::Map(m) if m.len() == 1 => {
                let (key, value) = &m.entries()[0];
                visitor.visit_enum(EnumDeserializer {
                    variant: key,
                    value: Some(value),
                    options: self.options,
                })
            }
            _ => Err(self.mismatch("an enum (text or single-entry map)")),
        }
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_unit()
    }
}

struct SeqDeserializer<'de, 'o> {
    iter: core::slice::Iter<'de, Value>,
    options: &'o DecodeOptions,
}

impl<'de, 'o> SeqAccess<'de> for SeqDeserializer<'de, 'o> {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, Error> {
        match self.iter.next() {
            Some(item) => seed
                .deserialize(ValueDeserializer::new(item, self.options))
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer<'de, 'o> {
    iter: core::slice::Iter<'de, (Value, Value)>,
    value: Option<&'de Value>,
    options: &'o DecodeOptions,
}

impl<'de, 'o> MapAccess<'de> for MapDeserializer<'de, 'o> {
    type Error = Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>, Error> {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(key, self.options))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, Error> {
        let value = self
            .value
            .take()
            .ok_or_else(|| Error::Message("map value requested before its key".to_owned()))?;
        seed.deserialize(ValueDeserializer::new(value, self.options))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer<'de, 'o> {
    variant: &'de Value,
    value: Option<&'de Value>,
    options: &'o DecodeOptions,
}

impl<'de, 'o> EnumAccess<'de> for EnumDeserializer<'de, 'o> {
    type Error = Error;
    type Variant = VariantDeserializer<'de, 'o>;

    fn variant_seed<V: DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, Self::Variant), Error> {
        let variant = seed.deserialize(ValueDeserializer::new(self.variant, self.options))?;
        Ok((
            variant,
            VariantDeserializer {
                value: self.value,
                options: self.options,
            },
        ))
    }
}

struct VariantDeserializer<'de, 'o> {
    value: Option<&'de Value>,
    options: &'o DecodeOptions,
}

impl<'de, 'o> VariantAccess<'de> for VariantDeserializer<'de, 'o> {
    type Error = Error;

    fn unit_variant(self) -> Result<(), Error> {
        match self.value {
            None => Ok(()),
            Some(value) => {
                Deserialize::deserialize(ValueDeserializer::new(value, self.options))
            }
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value, Error> {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value, self.options)),
            None => Err(Error::Message(
                "newtype variant is missing its content".to_owned(),
            )),
        }
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value, Error> {
        match self.value {
            Some(value) => ValueDeserializer::new(value, self.options).deserialize_seq(visitor),
            None => Err(Error::Message(
                "tuple variant is missing its content".to_owned(),
            )),
        }
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        match self.value {
            Some(value) => ValueDeserializer::new(value, self.options).deserialize_map(visitor),
            None => Err(Error::Message(
                "struct variant is missing its content".to_owned(),
            )),
        }
    }
}
