//! Data line decoding
//!
//! A data line is a fixed sequence of delimiter-separated fields:
//!
//! ```text
//! record-tag  identifier  [agent-name]  metric-name  value-token
//! ```
//!
//! The agent-name field is present iff the caller says so. Only the
//! delimiter separates fields; surrounding whitespace belongs to the field.

use uuid::Uuid;

use crate::options::DecodeOptions;
use crate::slice::LineSlice;
use crate::value::{TypedValue, parse_value_at};
use crate::{
    DecodeError, FIELDS_WITH_AGENT, FIELDS_WITHOUT_AGENT, IDENTIFIER_TEXT_LENGTH, Result,
};

/// A fully decoded data line
///
/// Names and string values borrow from the decoded line. A `DecodedLine` is
/// only ever produced complete; a failed decode yields a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedLine<'a> {
    /// Record tag byte (first field)
    pub record_type: u8,
    /// Check identifier, copied out of the line
    pub identifier: Uuid,
    /// Reporting agent; `None` when the line has no agent field,
    /// an empty slice when the field is present but blank
    pub agent_name: Option<LineSlice<'a>>,
    /// Metric name, never empty
    pub metric_name: LineSlice<'a>,
    /// Typed value from the last field
    pub value: TypedValue<'a>,
    /// Bytes of the line consumed by the decode
    pub consumed: usize,
}

/// Line decoder configured with [`DecodeOptions`]
///
/// Holds no state between calls; one decoder can be shared across threads.
///
/// # Example
///
/// ```
/// use tally_protocol::{DecodeOptions, LineDecoder, TypedValue};
///
/// let decoder = LineDecoder::with_options(DecodeOptions::new().with_delimiter(b'|'));
/// let line = b"M|550e8400-e29b-41d4-a716-446655440000|disk.free|L1024";
/// let decoded = decoder.decode(line, false).unwrap();
/// assert_eq!(decoded.value, TypedValue::UInt64(1024));
/// assert!(decoded.agent_name.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineDecoder {
    options: DecodeOptions,
}

impl LineDecoder {
    /// Create a decoder with default options
    #[inline]
    pub const fn new() -> Self {
        Self {
            options: DecodeOptions::new(),
        }
    }

    /// Create a decoder with explicit options
    #[inline]
    pub const fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Get the decoder options
    #[inline]
    pub const fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode one complete line
    ///
    /// `payload` must not include the line terminator.
    pub fn decode<'a>(&self, payload: &'a [u8], has_agent_name: bool) -> Result<DecodedLine<'a>> {
        if payload.is_empty() {
            return Err(DecodeError::EmptyLine);
        }

        let expected = if has_agent_name {
            FIELDS_WITH_AGENT
        } else {
            FIELDS_WITHOUT_AGENT
        };
        let fields = split_fields(payload, self.options.delimiter, expected)?;

        let tag = fields[0];
        if tag.len() != 1 {
            return Err(DecodeError::InvalidRecordTag { len: tag.len() });
        }
        let record_type = tag.as_bytes()[0];

        let identifier = parse_identifier(&fields[1])?;

        let (agent_name, metric_name, value) = if has_agent_name {
            (Some(fields[2]), fields[3], fields[4])
        } else {
            (None, fields[2], fields[3])
        };

        if metric_name.is_empty() {
            return Err(DecodeError::EmptyMetricName {
                offset: metric_name.offset(),
            });
        }

        let value = parse_value_at(value.as_bytes(), value.offset(), &self.options)?;

        Ok(DecodedLine {
            record_type,
            identifier,
            agent_name,
            metric_name,
            value,
            consumed: payload.len(),
        })
    }
}

/// Decode a line with default options
///
/// # Example
///
/// ```
/// use tally_protocol::{TypedValue, decode_line};
///
/// let line = b"M\t550e8400-e29b-41d4-a716-446655440000\tagent1\tcpu.load\tn0.75";
/// let decoded = decode_line(line, true).unwrap();
/// assert_eq!(decoded.agent_name.unwrap(), "agent1");
/// assert_eq!(decoded.value, TypedValue::Double(0.75));
/// ```
#[inline]
pub fn decode_line(payload: &[u8], has_agent_name: bool) -> Result<DecodedLine<'_>> {
    LineDecoder::new().decode(payload, has_agent_name)
}

/// Decode a line with explicit options
#[inline]
pub fn decode_line_with<'a>(
    payload: &'a [u8],
    has_agent_name: bool,
    options: &DecodeOptions,
) -> Result<DecodedLine<'a>> {
    LineDecoder::with_options(*options).decode(payload, has_agent_name)
}

/// Split a line into exactly `expected` fields
///
/// Fields land in a fixed array; the whole line is still scanned so the
/// reported count is exact when it is wrong.
fn split_fields(
    payload: &[u8],
    delimiter: u8,
    expected: usize,
) -> Result<[LineSlice<'_>; FIELDS_WITH_AGENT]> {
    let mut fields = [LineSlice::empty(0); FIELDS_WITH_AGENT];
    let mut found = 0;
    let mut offset = 0;

    for token in payload.split(|&b| b == delimiter) {
        if found < FIELDS_WITH_AGENT {
            fields[found] = LineSlice::new(token, offset);
        }
        found += 1;
        offset += token.len() + 1;
    }

    if found != expected {
        return Err(DecodeError::field_count(expected, found));
    }
    Ok(fields)
}

fn parse_identifier(field: &LineSlice<'_>) -> Result<Uuid> {
    let invalid = || DecodeError::InvalidIdentifier {
        offset: field.offset(),
        len: field.len(),
    };

    // The length check pins the accepted form to 8-4-4-4-12 hyphenated text
    if field.len() != IDENTIFIER_TEXT_LENGTH {
        return Err(invalid());
    }
    Uuid::try_parse_ascii(field.as_bytes()).map_err(|_| invalid())
}
