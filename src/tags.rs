//! The IANA CBOR tag registry and per-tag content validation.
//!
//! The decoder calls [`validate`] after a tag's content has been parsed and
//! before the `Tagged` value is constructed. An unregistered tag passes in
//! lenient mode and fails [`crate::Error::TagNotSupported`] in strict mode; a
//! registered tag always has its content checked against the registered
//! shape, plus the handful of deeper semantic checks in `check_semantics`.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::value::Value;
use crate::Error;

/// Shape requirement for the content of a registered tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataItemRequirement {
    /// Any content is admissible.
    Any,
    /// Must be an unsigned integer.
    Unsigned,
    /// Must be an unsigned or negative integer.
    Integer,
    /// Must be an integer or a float of any width.
    Numeric,
    /// Must be a byte string, optionally of an exact length.
    ByteString {
        /// Exact required length, if any.
        length: Option<usize>,
    },
    /// Must be a text string.
    TextString,
    /// Must be an array, optionally of an exact element count.
    Array {
        /// Exact required element count, if any.
        elements: Option<usize>,
    },
    /// Must be a map.
    Map,
    /// Must be a nested tag of the given number.
    Tagged(u64),
    /// The tag itself is reserved; any use is an error.
    Invalid,
}

/// A registered tag: its number, registered name, and content requirement.
#[derive(Debug, Clone, Copy)]
pub struct TagDefinition {
    /// The tag number.
    pub number: u64,
    /// The registered semantics, as named by the IANA registry.
    pub name: &'static str,
    /// The shape the tag's content must have.
    pub expects: DataItemRequirement,
}

use self::DataItemRequirement as Req;

const ANY: Req = Req::Any;
const BSTR: Req = Req::ByteString { length: None };
const TSTR: Req = Req::TextString;
const ARRAY: Req = Req::Array { elements: None };
const PAIR: Req = Req::Array { elements: Some(2) };

const fn def(number: u64, name: &'static str, expects: Req) -> TagDefinition {
    TagDefinition {
        number,
        name,
        expects,
    }
}

#[rustfmt::skip]
const REGISTERED: &[TagDefinition] = &[
    def(0, "standard date/time string", TSTR),
    def(1, "epoch-based date/time", Req::Numeric),
    def(2, "unsigned bignum", BSTR),
    def(3, "negative bignum", BSTR),
    def(4, "decimal fraction", PAIR),
    def(5, "bigfloat", PAIR),
    def(16, "COSE single recipient encrypted data object", ARRAY),
    def(17, "COSE MACed data object without recipients", ARRAY),
    def(18, "COSE single signer data object", ARRAY),
    def(19, "COSE standalone countersignature", ARRAY),
    def(21, "expected conversion to base64url encoding", ANY),
    def(22, "expected conversion to base64 encoding", ANY),
    def(23, "expected conversion to base16 encoding", ANY),
    def(24, "encoded CBOR data item", BSTR),
    def(25, "reference the nth previously seen string", Req::Unsigned),
    def(26, "serialised Perl object", ARRAY),
    def(27, "serialised language-independent object", ARRAY),
    def(28, "mark value as (potentially) shared", ANY),
    def(29, "reference nth marked value", Req::Unsigned),
    def(30, "rational number", PAIR),
    def(31, "absent value in a CBOR array", ANY),
    def(32, "URI", TSTR),
    def(33, "base64url-encoded text", TSTR),
    def(34, "base64-encoded text", TSTR),
    def(35, "regular expression", TSTR),
    def(36, "MIME message", TSTR),
    def(37, "binary UUID", Req::ByteString { length: Some(16) }),
    def(38, "language-tagged string", PAIR),
    def(39, "identifier", ANY),
    def(40, "multi-dimensional array, row-major order", PAIR),
    def(41, "homogeneous array", ARRAY),
    def(42, "IPLD content identifier", BSTR),
    def(43, "YANG bits datatype", TSTR),
    def(44, "YANG enumeration datatype", TSTR),
    def(45, "YANG identityref datatype", ANY),
    def(46, "YANG instance-identifier datatype", ANY),
    def(47, "YANG schema item identifier", Req::Unsigned),
    def(52, "IPv4 address or prefix", ANY),
    def(54, "IPv6 address or prefix", ANY),
    def(61, "CBOR Web Token", ANY),
    def(64, "uint8 typed array", BSTR),
    def(65, "uint16 big-endian typed array", BSTR),
    def(66, "uint32 big-endian typed array", BSTR),
    def(67, "uint64 big-endian typed array", BSTR),
    def(68, "uint8 clamped typed array", BSTR),
    def(69, "uint16 little-endian typed array", BSTR),
    def(70, "uint32 little-endian typed array", BSTR),
    def(71, "uint64 little-endian typed array", BSTR),
    def(72, "sint8 typed array", BSTR),
    def(73, "sint16 big-endian typed array", BSTR),
    def(74, "sint32 big-endian typed array", BSTR),
    def(75, "sint64 big-endian typed array", BSTR),
    def(76, "reserved", Req::Invalid),
    def(77, "sint16 little-endian typed array", BSTR),
    def(78, "sint32 little-endian typed array", BSTR),
    def(79, "sint64 little-endian typed array", BSTR),
    def(80, "float16 big-endian typed array", BSTR),
    def(81, "float32 big-endian typed array", BSTR),
    def(82, "float64 big-endian typed array", BSTR),
    def(83, "float128 big-endian typed array", BSTR),
    def(84, "float16 little-endian typed array", BSTR),
    def(85, "float32 little-endian typed array", BSTR),
    def(86, "float64 little-endian typed array", BSTR),
    def(87, "float128 little-endian typed array", BSTR),
    def(96, "COSE encrypted data object", ARRAY),
    def(97, "COSE MACed data object", ARRAY),
    def(98, "COSE signed data object", ARRAY),
    def(100, "date as days since the epoch", Req::Integer),
    def(101, "alternatives", ANY),
    def(103, "geographic coordinates", ARRAY),
    def(104, "geographic coordinate reference system", ANY),
    def(110, "relative object identifier", BSTR),
    def(111, "object identifier", BSTR),
    def(112, "private enterprise number relative object identifier", BSTR),
    def(120, "Internet of Things data point", ANY),
    def(200, "Gordian Envelope", ANY),
    def(201, "enclosed dCBOR", ANY),
    def(256, "mark value as having string references", ANY),
    def(257, "binary MIME message", BSTR),
    def(258, "mathematical finite set", ARRAY),
    def(259, "map with key-value operations", Req::Map),
    def(260, "network address", BSTR),
    def(261, "network address plus prefix length", Req::Map),
    def(262, "embedded JSON object", BSTR),
    def(263, "hexadecimal string", BSTR),
    def(264, "decimal fraction with arbitrary exponent", PAIR),
    def(265, "bigfloat with arbitrary exponent", PAIR),
    def(266, "internationalized resource identifier", TSTR),
    def(267, "internationalized resource identifier reference", TSTR),
    def(1001, "extended time", Req::Map),
    def(1002, "duration", Req::Map),
    def(1003, "period", Req::Map),
    def(1040, "multi-dimensional array, column-major order", PAIR),
    def(40000, "application extension point", ANY),
    def(40001, "application extension point", ANY),
    def(55799, "self-described CBOR", ANY),
    def(15_309_736, "RAINS message", Req::Map),
    def(65535, "always invalid", Req::Invalid),
    def(0xffff_ffff, "always invalid", Req::Invalid),
    def(u64::MAX, "always invalid", Req::Invalid),
];

/// The full tag registry, keyed by tag number.
#[must_use]
pub fn registry() -> &'static HashMap<u64, TagDefinition> {
    static REGISTRY: OnceLock<HashMap<u64, TagDefinition>> = OnceLock::new();
    REGISTRY.get_or_init(|| REGISTERED.iter().map(|d| (d.number, *d)).collect())
}

/// Look up a tag definition by number.
#[must_use]
pub fn lookup(tag: u64) -> Option<&'static TagDefinition> {
    registry().get(&tag)
}

/// Check a decoded tag content against the registry.
///
/// Unregistered tags pass in lenient mode and fail in strict mode; registered
/// tags are checked regardless of mode.
pub(crate) fn validate(tag: u64, content: &Value, strict: bool) -> Result<(), Error> {
    let Some(tag_def) = lookup(tag) else {
        if strict {
            return Err(Error::TagNotSupported(tag));
        }
        return Ok(());
    };
    check_requirement(tag_def, content)?;
    check_semantics(tag_def, content)
}

fn fail(tag_def: &TagDefinition, why: &str) -> Error {
    Error::InvalidFormat(format!("tag {} ({}): {why}", tag_def.number, tag_def.name))
}

fn check_requirement(tag_def: &TagDefinition, content: &Value) -> Result<(), Error> {
    let ok = match tag_def.expects {
        Req::Any => true,
        Req::Unsigned => content.is_unsigned(),
        Req::Integer => content.is_integer(),
        Req::Numeric => content.is_integer() || content.is_float(),
        Req::ByteString { length } => match content {
            Value::Bytes(b) => length.map_or(true, |n| b.len() == n),
            _ => false,
        },
        Req::TextString => content.is_text(),
        Req::Array { elements } => match content {
            Value::Array(items) => elements.map_or(true, |n| items.len() == n),
            _ => false,
        },
        Req::Map => content.is_map(),
        Req::Tagged(n) => matches!(content, Value::Tagged(t, _) if *t == n),
        Req::Invalid => return Err(fail(tag_def, "tag is reserved and always invalid")),
    };
    if ok {
        Ok(())
    } else {
        Err(fail(
            tag_def,
            &format!(
                "content must be {}, found {}",
                describe(tag_def.expects),
                content.type_name()
            ),
        ))
    }
}

fn describe(expects: Req) -> String {
    match expects {
        Req::Any => "any data item".to_owned(),
        Req::Unsigned => "an unsigned integer".to_owned(),
        Req::Integer => "an integer".to_owned(),
        Req::Numeric => "an integer or float".to_owned(),
        Req::ByteString { length: None } => "a byte string".to_owned(),
        Req::ByteString { length: Some(n) } => format!("a byte string of length {n}"),
        Req::TextString => "a text string".to_owned(),
        Req::Array { elements: None } => "an array".to_owned(),
        Req::Array { elements: Some(n) } => format!("an array of {n} elements"),
        Req::Map => "a map".to_owned(),
        Req::Tagged(n) => format!("a value tagged {n}"),
        Req::Invalid => "nothing".to_owned(),
    }
}

/// Deeper checks for tags whose registration constrains more than the shape.
fn check_semantics(tag_def: &TagDefinition, content: &Value) -> Result<(), Error> {
    match tag_def.number {
        // Crude RFC 3339 shape check: every date/time string has a date/time
        // separator.
        0 => match content {
            Value::Text(s) if s.contains(['T', 't']) => Ok(()),
            _ => Err(fail(tag_def, "text is not an RFC 3339 date/time")),
        },
        4 | 5 => match content.as_array() {
            Some([exponent, mantissa]) => {
                if !exponent.is_integer() {
                    return Err(fail(tag_def, "exponent must be an integer"));
                }
                if tag_def.number == 4 && !is_integer_or_bignum(mantissa) {
                    return Err(fail(tag_def, "mantissa must be an integer or bignum"));
                }
                Ok(())
            }
            _ => Ok(()),
        },
        30 => match content.as_array() {
            Some(items) if items.iter().all(is_integer_or_bignum) => Ok(()),
            _ => Err(fail(
                tag_def,
                "numerator and denominator must be integers or bignums",
            )),
        },
        38 => match content.as_array() {
            Some(items) if items.iter().all(Value::is_text) => Ok(()),
            _ => Err(fail(tag_def, "both elements must be text strings")),
        },
        260 => match content {
            Value::Bytes(b) if b.len() == 4 || b.len() == 16 => Ok(()),
            _ => Err(fail(tag_def, "address must be 4 or 16 bytes")),
        },
        _ => Ok(()),
    }
}

fn is_integer_or_bignum(v: &Value) -> bool {
    v.is_integer() || matches!(v, Value::Tagged(2 | 3, _))
}
