//! Decode- and encode-time configuration.
//!
//! Limits are enforced deterministically during the call that holds the
//! options; nothing here depends on shared state or background timers.

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default cap on the number of chunks within one indefinite-length string.
pub const DEFAULT_MAX_INDEFINITE_CHUNKS: usize = 1_000_000;

/// Configuration for [`crate::decode_value_with`] and the serde facade.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Reject non-shortest-form arguments and unregistered tags.
    ///
    /// Strict mode applies the shortest-form rule everywhere an argument is
    /// read: integer values, string/array/map lengths, tag numbers, and
    /// simple-value follow bytes.
    pub strict: bool,

    /// Permit maps whose serialized form repeats a key.
    ///
    /// When set, both entries are kept in the decoded map and lookup returns
    /// the later one. When unset (the default), a repeated key fails the
    /// decode with [`crate::Error::DuplicateMapKey`].
    pub allow_duplicate_map_keys: bool,

    /// Maximum nesting depth, counted per item on the decode call stack.
    pub max_depth: usize,

    /// Maximum chunk count inside one indefinite-length string.
    pub max_indefinite_chunks: usize,

    /// How the serde facade surfaces byte strings requested from text.
    pub data_strategy: DataDecodingStrategy,

    /// How the serde facade treats text where a float was requested.
    pub float_strategy: NonConformingFloatStrategy,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict: false,
            allow_duplicate_map_keys: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_indefinite_chunks: DEFAULT_MAX_INDEFINITE_CHUNKS,
            data_strategy: DataDecodingStrategy::ByteString,
            float_strategy: NonConformingFloatStrategy::Error,
        }
    }
}

impl DecodeOptions {
    /// Options with strict mode enabled and everything else at its default.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}

/// Configuration for [`crate::encode_value_with`] and the serde facade.
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    /// Produce deterministic output.
    ///
    /// Canonical mode narrows floats to the smallest lossless width, collapses
    /// every NaN to the canonical half-precision NaN, sorts map entries by
    /// encoded key, and emits definite-length items only.
    pub canonical: bool,

    /// Sort map entries by encoded key without the float rules of canonical
    /// mode. Implied by `canonical`.
    pub sort_keys: bool,

    /// How the serde facade emits byte strings.
    pub data_strategy: DataEncodingStrategy,
}

impl EncodeOptions {
    /// Options with canonical encoding enabled.
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            canonical: true,
            ..Self::default()
        }
    }
}

/// How the serde facade decodes a requested byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataDecodingStrategy {
    /// Require a CBOR byte string.
    #[default]
    ByteString,
    /// Accept a text string holding standard base64 and decode it.
    Base64Text,
}

/// How the serde facade encodes a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataEncodingStrategy {
    /// Emit a CBOR byte string.
    #[default]
    ByteString,
    /// Emit a text string holding standard base64.
    Base64Text,
}

/// How the serde facade treats a text string where a float was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonConformingFloatStrategy {
    /// Fail with a type mismatch.
    #[default]
    Error,
    /// Parse `"NaN"`, `"Infinity"`, `"-Infinity"`, or a decimal literal.
    FromText,
}
