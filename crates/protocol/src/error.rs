//! Decode error types
//!
//! Errors that can occur when decoding a line. Every variant that points into
//! the line carries the absolute byte offset of the offending token.

use thiserror::Error;

use crate::value::ValueType;

/// Errors that can occur while decoding a line or a value token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The line has no bytes at all
    #[error("empty line")]
    EmptyLine,

    /// The line does not split into the expected number of fields
    #[error("wrong field count: expected {expected}, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// The record tag field is not exactly one byte
    #[error("record tag must be a single byte, got {len} bytes")]
    InvalidRecordTag { len: usize },

    /// The identifier field is not a canonical hyphenated UUID
    #[error("invalid identifier at offset {offset}: {len} bytes, expected 36-byte hyphenated UUID")]
    InvalidIdentifier { offset: usize, len: usize },

    /// The metric name field is empty
    #[error("empty metric name at offset {offset}")]
    EmptyMetricName { offset: usize },

    /// The value field has no type tag
    #[error("missing value type tag at offset {offset}")]
    MissingValueType { offset: usize },

    /// The value type tag is not one of the known tags
    #[error("unknown value type tag {tag:#04x} at offset {offset}")]
    UnknownValueType { tag: u8, offset: usize },

    /// The value payload is not well formed for its type
    #[error("malformed {value_type} value at offset {offset}")]
    NumericFormat { value_type: ValueType, offset: usize },

    /// The value payload is well formed but out of range for its type
    #[error("{value_type} value out of range at offset {offset}")]
    NumericOverflow { value_type: ValueType, offset: usize },

    /// A string value is not valid UTF-8 (only when UTF-8 is required)
    #[error("invalid UTF-8 in string value at offset {offset}")]
    InvalidUtf8 { offset: usize },
}

/// Broad classification of a [`DecodeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong token count, missing delimiter or truncated line
    Structural,
    /// Identifier token has the wrong length or invalid characters
    IdentifierFormat,
    /// Metric name token is empty
    EmptyMetricName,
    /// Value type tag is not recognized
    UnknownValueType,
    /// Value payload has extraneous characters, is empty or not fully consumed
    NumericFormat,
    /// Value payload exceeds the width of its type
    NumericOverflow,
    /// String value failed the UTF-8 check
    Encoding,
}

impl ErrorKind {
    /// All kinds, in declaration order
    pub const ALL: [ErrorKind; 7] = [
        Self::Structural,
        Self::IdentifierFormat,
        Self::EmptyMetricName,
        Self::UnknownValueType,
        Self::NumericFormat,
        Self::NumericOverflow,
        Self::Encoding,
    ];

    /// Get the string name of this kind
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::IdentifierFormat => "identifier_format",
            Self::EmptyMetricName => "empty_metric_name",
            Self::UnknownValueType => "unknown_value_type",
            Self::NumericFormat => "numeric_format",
            Self::NumericOverflow => "numeric_overflow",
            Self::Encoding => "encoding",
        }
    }

    /// Position of this kind in [`ErrorKind::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl DecodeError {
    /// Create a field count error
    #[inline]
    pub fn field_count(expected: usize, found: usize) -> Self {
        Self::FieldCount { expected, found }
    }

    /// Create a numeric format error
    #[inline]
    pub fn numeric_format(value_type: ValueType, offset: usize) -> Self {
        Self::NumericFormat { value_type, offset }
    }

    /// Create a numeric overflow error
    #[inline]
    pub fn numeric_overflow(value_type: ValueType, offset: usize) -> Self {
        Self::NumericOverflow { value_type, offset }
    }

    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyLine
            | Self::FieldCount { .. }
            | Self::InvalidRecordTag { .. }
            | Self::MissingValueType { .. } => ErrorKind::Structural,
            Self::InvalidIdentifier { .. } => ErrorKind::IdentifierFormat,
            Self::EmptyMetricName { .. } => ErrorKind::EmptyMetricName,
            Self::UnknownValueType { .. } => ErrorKind::UnknownValueType,
            Self::NumericFormat { .. } => ErrorKind::NumericFormat,
            Self::NumericOverflow { .. } => ErrorKind::NumericOverflow,
            Self::InvalidUtf8 { .. } => ErrorKind::Encoding,
        }
    }

    /// Byte offset of the offending token, if the error points into the line
    pub const fn offset(&self) -> Option<usize> {
        match *self {
            Self::EmptyLine | Self::FieldCount { .. } => None,
            Self::InvalidRecordTag { .. } => Some(0),
            Self::InvalidIdentifier { offset, .. }
            | Self::EmptyMetricName { offset }
            | Self::MissingValueType { offset }
            | Self::UnknownValueType { offset, .. }
            | Self::NumericFormat { offset, .. }
            | Self::NumericOverflow { offset, .. }
            | Self::InvalidUtf8 { offset } => Some(offset),
        }
    }
}
