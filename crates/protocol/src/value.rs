//! Typed value decoding
//!
//! The last field of a data line is a value token: one type tag byte followed
//! by the encoded value, running to the end of the line.
//!
//! | Tag | Type | Payload |
//! |-----|------|---------|
//! | `-` | absent | empty |
//! | `i` | int32 | optional sign, base-10 digits |
//! | `I` | uint32 | base-10 digits |
//! | `l` | int64 | optional sign, base-10 digits |
//! | `L` | uint64 | base-10 digits |
//! | `n` | double | IEEE-754 text |
//! | `s` | string | raw bytes, no unescaping |
//!
//! Numeric payloads must be consumed entirely: `i12abc` is a format error,
//! not the value 12.

use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::options::DecodeOptions;
use crate::slice::LineSlice;
use crate::{DecodeError, Result};

// =============================================================================
// Value Types
// =============================================================================

/// Value type selected by the tag byte of a value token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueType {
    Absent = b'-',
    Int32 = b'i',
    UInt32 = b'I',
    Int64 = b'l',
    UInt64 = b'L',
    Double = b'n',
    String = b's',
}

impl ValueType {
    /// All value types, in tag table order
    pub const ALL: [ValueType; 7] = [
        Self::Absent,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Double,
        Self::String,
    ];

    /// Parse from a tag byte
    #[inline]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'-' => Some(Self::Absent),
            b'i' => Some(Self::Int32),
            b'I' => Some(Self::UInt32),
            b'l' => Some(Self::Int64),
            b'L' => Some(Self::UInt64),
            b'n' => Some(Self::Double),
            b's' => Some(Self::String),
            _ => None,
        }
    }

    /// Get the tag byte
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Check if this type carries an integer or a double
    #[inline]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Absent | Self::String)
    }

    /// Get string representation
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Double => "double",
            Self::String => "string",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Typed Value
// =============================================================================

/// A decoded value; exactly one variant is active
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedValue<'a> {
    /// No value was reported
    Absent,
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Double(f64),
    /// Raw string payload, borrowed from the line
    String(LineSlice<'a>),
}

impl<'a> TypedValue<'a> {
    /// Get the type of this value
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Absent => ValueType::Absent,
            Self::Int32(_) => ValueType::Int32,
            Self::UInt32(_) => ValueType::UInt32,
            Self::Int64(_) => ValueType::Int64,
            Self::UInt64(_) => ValueType::UInt64,
            Self::Double(_) => ValueType::Double,
            Self::String(_) => ValueType::String,
        }
    }

    /// Check if this is the absent value
    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Numeric value widened to f64 (lossy above 2^53 for 64-bit integers)
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int32(v) => Some(f64::from(v)),
            Self::UInt32(v) => Some(f64::from(v)),
            Self::Int64(v) => Some(v as f64),
            Self::UInt64(v) => Some(v as f64),
            Self::Double(v) => Some(v),
            Self::Absent | Self::String(_) => None,
        }
    }

    /// String payload, if this is a string value
    #[inline]
    pub const fn as_slice(&self) -> Option<LineSlice<'a>> {
        match self {
            Self::String(s) => Some(*s),
            _ => None,
        }
    }
}

// =============================================================================
// Value Parser
// =============================================================================

/// Parse a value token with default options
///
/// Offsets in errors and in string slices are relative to the token.
///
/// # Example
///
/// ```
/// use tally_protocol::{TypedValue, parse_value};
///
/// assert_eq!(parse_value(b"l-42").unwrap(), TypedValue::Int64(-42));
/// assert!(parse_value(b"I-1").is_err());
/// ```
pub fn parse_value(token: &[u8]) -> Result<TypedValue<'_>> {
    parse_value_at(token, 0, &DecodeOptions::new())
}

/// Parse a value token with explicit options
pub fn parse_value_with<'a>(token: &'a [u8], options: &DecodeOptions) -> Result<TypedValue<'a>> {
    parse_value_at(token, 0, options)
}

/// Parse a value token located at `base` within its line
pub(crate) fn parse_value_at<'a>(
    token: &'a [u8],
    base: usize,
    options: &DecodeOptions,
) -> Result<TypedValue<'a>> {
    let Some((&tag, payload)) = token.split_first() else {
        return Err(DecodeError::MissingValueType { offset: base });
    };
    let value_type =
        ValueType::from_tag(tag).ok_or(DecodeError::UnknownValueType { tag, offset: base })?;

    // Payload starts right after the tag byte
    let offset = base + 1;

    match value_type {
        ValueType::Absent => {
            if payload.is_empty() {
                Ok(TypedValue::Absent)
            } else {
                Err(DecodeError::numeric_format(value_type, offset))
            }
        }
        ValueType::Int32 => parse_integer(payload, true, value_type, offset).map(TypedValue::Int32),
        ValueType::UInt32 => {
            parse_integer(payload, false, value_type, offset).map(TypedValue::UInt32)
        }
        ValueType::Int64 => parse_integer(payload, true, value_type, offset).map(TypedValue::Int64),
        ValueType::UInt64 => {
            parse_integer(payload, false, value_type, offset).map(TypedValue::UInt64)
        }
        ValueType::Double => parse_double(payload, offset, options).map(TypedValue::Double),
        ValueType::String => parse_string(payload, offset, options).map(TypedValue::String),
    }
}

/// Parse a base-10 integer, consuming the whole payload
///
/// The digit check runs first so the standard parser only ever sees an
/// optional sign followed by ASCII digits; its error then only reports range.
fn parse_integer<T>(payload: &[u8], signed: bool, value_type: ValueType, offset: usize) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    let format_error = || DecodeError::numeric_format(value_type, offset);

    let digits = match payload.split_first() {
        Some((b'+' | b'-', rest)) if signed => rest,
        _ => payload,
    };
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(format_error());
    }

    let text = std::str::from_utf8(payload).map_err(|_| format_error())?;
    text.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            DecodeError::numeric_overflow(value_type, offset)
        }
        _ => format_error(),
    })
}

fn parse_double(payload: &[u8], offset: usize, options: &DecodeOptions) -> Result<f64> {
    let format_error = || DecodeError::numeric_format(ValueType::Double, offset);

    let text = std::str::from_utf8(payload).map_err(|_| format_error())?;
    let value: f64 = text.parse().map_err(|_| format_error())?;

    if !value.is_finite() && !options.allow_non_finite {
        // `nan`/`inf` spelled out is a format the producer should not emit;
        // digits that round to infinity are a range problem
        return Err(if is_non_finite_literal(text) {
            format_error()
        } else {
            DecodeError::numeric_overflow(ValueType::Double, offset)
        });
    }
    Ok(value)
}

fn is_non_finite_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.bytes().all(|b| b.is_ascii_alphabetic())
}

fn parse_string<'a>(
    payload: &'a [u8],
    offset: usize,
    options: &DecodeOptions,
) -> Result<LineSlice<'a>> {
    if options.require_utf8
        && let Err(e) = std::str::from_utf8(payload)
    {
        return Err(DecodeError::InvalidUtf8 {
            offset: offset + e.valid_up_to(),
        });
    }
    Ok(LineSlice::new(payload, offset))
}
