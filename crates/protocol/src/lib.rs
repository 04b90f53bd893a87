//! Tally Protocol - Zero-copy metric line decoding
//!
//! This crate decodes single lines of the tally metric wire protocol. Each
//! data line carries one observation:
//!
//! ```text
//! M<TAB>550e8400-e29b-41d4-a716-446655440000<TAB>agent1<TAB>cpu.load<TAB>n0.75
//! ^     ^                                         ^           ^           ^
//! tag   check identifier                          agent name  metric name value token
//! ```
//!
//! Timestamp lines (a bare epoch value in milliseconds) interleave with data
//! lines and are recognized by [`is_timestamp_line`].
//!
//! # Design Principles
//!
//! - **Zero-copy**: names and string values are [`LineSlice`] views into the
//!   caller's buffer; only the 16-byte identifier is copied out
//! - **Stateless**: every call depends only on its input, nothing is retained
//! - **Total**: malformed input produces a [`DecodeError`], never a panic
//! - **No side effects**: no I/O, no logging; the caller decides what to do
//!   with a rejected line
//!
//! # Example
//!
//! ```
//! use tally_protocol::{TypedValue, decode_line, is_timestamp_line};
//!
//! let line = b"M\t550e8400-e29b-41d4-a716-446655440000\tagent1\tcpu.load\tn0.75";
//! assert!(!is_timestamp_line(line));
//!
//! let decoded = decode_line(line, true).unwrap();
//! assert_eq!(decoded.metric_name, "cpu.load");
//! assert_eq!(decoded.value, TypedValue::Double(0.75));
//! ```

mod encode;
mod error;
mod line;
mod options;
mod slice;
mod timestamp;
mod value;

pub use encode::{EncodeError, LineEncoder};
pub use error::{DecodeError, ErrorKind};
pub use line::{DecodedLine, LineDecoder, decode_line, decode_line_with};
pub use options::DecodeOptions;
pub use slice::LineSlice;
pub use timestamp::{is_timestamp_line, parse_timestamp_line};
pub use value::{TypedValue, ValueType, parse_value, parse_value_with};

// Re-export for callers that build identifiers or encode into BytesMut
pub use bytes::{Bytes, BytesMut};
pub use uuid::Uuid;

/// Result type for decode operations
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Default field delimiter (horizontal tab)
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// Length of the canonical hyphenated identifier text
pub const IDENTIFIER_TEXT_LENGTH: usize = 36;

/// Field count of a data line without an agent name
pub const FIELDS_WITHOUT_AGENT: usize = 4;

/// Field count of a data line with an agent name
pub const FIELDS_WITH_AGENT: usize = 5;

/// Record tag conventionally used for metric lines
pub const METRIC_RECORD_TAG: u8 = b'M';

// Test modules - only compiled during testing
#[cfg(test)]
mod encode_test;
