//! Decode options
//!
//! Knobs for the parts of the wire format that differ between producers.

use crate::DEFAULT_DELIMITER;

/// Options controlling how lines and values are decoded
///
/// The defaults match the reference producer: tab-delimited fields, finite
/// doubles only, string values passed through as raw bytes.
///
/// # Example
///
/// ```
/// use tally_protocol::DecodeOptions;
///
/// let options = DecodeOptions::new().with_allow_non_finite(true);
/// assert_eq!(options.delimiter, b'\t');
/// assert!(options.allow_non_finite);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Byte separating fields on a line
    pub delimiter: u8,

    /// Accept `nan`, `inf` and values that overflow to infinity in doubles
    pub allow_non_finite: bool,

    /// Reject string values that are not valid UTF-8
    pub require_utf8: bool,
}

impl DecodeOptions {
    /// Create options with default settings
    #[inline]
    pub const fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            allow_non_finite: false,
            require_utf8: false,
        }
    }

    /// Set the field delimiter
    #[inline]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Allow or reject non-finite doubles
    #[inline]
    pub const fn with_allow_non_finite(mut self, allow: bool) -> Self {
        self.allow_non_finite = allow;
        self
    }

    /// Require or skip UTF-8 validation of string values
    #[inline]
    pub const fn with_require_utf8(mut self, require: bool) -> Self {
        self.require_utf8 = require;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}
