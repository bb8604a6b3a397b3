use thiserror::Error;

/// Errors produced while decoding, encoding, or bridging CBOR data.
///
/// Every error aborts the current top-level call; no partial output is ever
/// returned. Messages are meant for diagnostics, not for parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Structural or semantic violation caught during decode.
    ///
    /// This also covers non-canonical encodings rejected in strict mode and
    /// tag content that fails its registered shape requirement.
    #[error("invalid CBOR: {0}")]
    InvalidFormat(String),

    /// The byte stream ended in the middle of a data item.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A chunk inside an indefinite-length string was not a definite-length
    /// string of the same major type.
    #[error("indefinite-length string contains a chunk of the wrong type")]
    WrongTypeInsideIndefiniteLength,

    /// An indefinite-length string exceeded the configured chunk cap.
    #[error("indefinite-length string has too many chunks")]
    TooLongIndefiniteLength,

    /// Text string bytes are not valid UTF-8.
    #[error("text string is not valid UTF-8")]
    IncorrectUtf8String,

    /// A map contains two equal keys and duplicates are disallowed.
    #[error("duplicate map key")]
    DuplicateMapKey,

    /// Strict mode encountered a tag absent from the registry.
    #[error("tag {0} is not in the tag registry")]
    TagNotSupported(u64),

    /// Nesting exceeded the configured maximum depth.
    #[error("maximum nesting depth exceeded")]
    DepthLimitExceeded,

    /// A break marker appeared outside an indefinite-length item.
    #[error("break marker outside an indefinite-length item")]
    InvalidIndefiniteLength,

    /// A simple value in the unassigned range `0..=19`.
    #[error("unassigned simple value {0}")]
    UnassignedSimpleValue(u8),

    /// A simple-value follow byte in the reserved range `24..=31`.
    #[error("reserved simple value {0}")]
    ReservedSimpleValue(u8),

    /// Arithmetic overflow or another integrity failure.
    #[error("malformed data: {0}")]
    MalformedData(String),

    /// The value tree holds a different shape than the caller requested.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The shape the caller asked for.
        expected: &'static str,
        /// The shape actually present in the value tree.
        found: String,
    },

    /// An integer does not fit the narrower requested type.
    #[error("value out of range: {0}")]
    ValueOutOfRange(String),

    /// Free-form error raised through the serde bridge.
    #[error("{0}")]
    Message(String),
}
