//! Line encoding
//!
//! Builds wire-format lines from structured fields. Used by producers, test
//! fixtures and benchmarks; the output decodes back to the same fields with
//! [`LineDecoder`](crate::LineDecoder) configured with the same delimiter.
//!
//! # Usage
//!
//! ```
//! use tally_protocol::{BytesMut, LineEncoder, TypedValue, Uuid, decode_line};
//!
//! let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
//! let mut buf = BytesMut::new();
//! let agent = Some(b"agent1".as_slice());
//! LineEncoder::new()
//!     .encode(&mut buf, b'M', id, agent, b"cpu.load", &TypedValue::Double(0.75))
//!     .unwrap();
//!
//! let decoded = decode_line(&buf, true).unwrap();
//! assert_eq!(decoded.identifier, id);
//! ```

use std::borrow::Cow;

use bytes::BufMut;
use thiserror::Error;
use uuid::Uuid;

use crate::DEFAULT_DELIMITER;
use crate::value::TypedValue;

/// Errors that can occur when encoding a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Metric names must be non-empty
    #[error("metric name is empty")]
    EmptyMetricName,

    /// A field contains the delimiter and would split on decode
    #[error("{field} contains the field delimiter")]
    DelimiterInField { field: &'static str },

    /// NaN and infinities are refused by a default decoder
    #[error("double value is not finite")]
    NonFiniteDouble,
}

/// Encoder for data and timestamp lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEncoder {
    delimiter: u8,
}

impl LineEncoder {
    /// Create an encoder using the default delimiter
    #[inline]
    pub const fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Create an encoder using a custom delimiter
    #[inline]
    pub const fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Append one data line to `buf`, without a line terminator
    ///
    /// Nothing is written if the fields cannot be encoded.
    pub fn encode<B: BufMut>(
        &self,
        buf: &mut B,
        record_type: u8,
        identifier: Uuid,
        agent_name: Option<&[u8]>,
        metric_name: &[u8],
        value: &TypedValue<'_>,
    ) -> Result<(), EncodeError> {
        if metric_name.is_empty() {
            return Err(EncodeError::EmptyMetricName);
        }
        self.check_field("record tag", &[record_type])?;
        if let Some(agent) = agent_name {
            self.check_field("agent name", agent)?;
        }
        self.check_field("metric name", metric_name)?;
        if let TypedValue::Double(v) = value
            && !v.is_finite()
        {
            return Err(EncodeError::NonFiniteDouble);
        }

        // Identifier and numbers are checked as rendered; a custom delimiter
        // may be a hex digit, a sign or a decimal point
        let mut id_text = Uuid::encode_buffer();
        let id_text = identifier.hyphenated().encode_lower(&mut id_text);
        self.check_field("identifier", id_text.as_bytes())?;

        let payload = value_payload(value);
        self.check_field("value", &[value.value_type().tag()])?;
        self.check_field("value", &payload)?;

        buf.put_u8(record_type);
        buf.put_u8(self.delimiter);
        buf.put_slice(id_text.as_bytes());
        buf.put_u8(self.delimiter);
        if let Some(agent) = agent_name {
            buf.put_slice(agent);
            buf.put_u8(self.delimiter);
        }
        buf.put_slice(metric_name);
        buf.put_u8(self.delimiter);
        buf.put_u8(value.value_type().tag());
        buf.put_slice(&payload);
        Ok(())
    }

    /// Append a timestamp line to `buf`, without a line terminator
    pub fn encode_timestamp<B: BufMut>(&self, buf: &mut B, epoch_ms: u64) {
        buf.put_slice(epoch_ms.to_string().as_bytes());
    }

    fn check_field(&self, field: &'static str, bytes: &[u8]) -> Result<(), EncodeError> {
        if bytes.contains(&self.delimiter) {
            return Err(EncodeError::DelimiterInField { field });
        }
        Ok(())
    }
}

impl Default for LineEncoder {
    fn default() -> Self {
        Self::new()
    }
}

fn value_payload<'a>(value: &TypedValue<'a>) -> Cow<'a, [u8]> {
    let text = match value {
        TypedValue::Absent => return Cow::Borrowed(&[]),
        TypedValue::String(s) => return Cow::Borrowed(s.as_bytes()),
        TypedValue::Int32(v) => v.to_string(),
        TypedValue::UInt32(v) => v.to_string(),
        TypedValue::Int64(v) => v.to_string(),
        TypedValue::UInt64(v) => v.to_string(),
        // Display for f64 is the shortest text that parses back to the same bits
        TypedValue::Double(v) => v.to_string(),
    };
    Cow::Owned(text.into_bytes())
}
