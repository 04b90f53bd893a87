//! Decoder configuration
//!
//! Wire format settings that vary between producers.

use serde::Deserialize;
use tally_protocol::{DEFAULT_DELIMITER, DecodeOptions};

use crate::error::{ConfigError, Result};

/// Decoder configuration
///
/// # Example
///
/// ```toml
/// [decoder]
/// delimiter = "\t"
/// allow_non_finite = false
/// require_utf8 = false
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DecoderConfig {
    /// Field delimiter, a single ASCII character
    /// Default: tab
    pub delimiter: String,

    /// Accept `nan`/`inf` doubles
    /// Default: false
    pub allow_non_finite: bool,

    /// Reject string values that are not valid UTF-8
    /// Default: false
    pub require_utf8: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            delimiter: char::from(DEFAULT_DELIMITER).to_string(),
            allow_non_finite: false,
            require_utf8: false,
        }
    }
}

impl DecoderConfig {
    /// Get the delimiter as a byte
    ///
    /// The delimiter cannot be a character that occurs in an identifier
    /// (hex digits, `-`) or a line terminator.
    pub fn delimiter_byte(&self) -> Result<u8> {
        let &[byte] = self.delimiter.as_bytes() else {
            return Err(ConfigError::invalid_value(
                "decoder",
                "delimiter",
                format!(
                    "must be a single ASCII character, got {:?}",
                    self.delimiter
                ),
            ));
        };

        if byte.is_ascii_hexdigit() || byte == b'-' || byte == b'\n' || byte == b'\r' {
            return Err(ConfigError::invalid_value(
                "decoder",
                "delimiter",
                format!(
                    "{:?} would be ambiguous with identifiers or line framing",
                    char::from(byte)
                ),
            ));
        }

        Ok(byte)
    }

    /// Build decode options from this configuration
    pub fn to_options(&self) -> Result<DecodeOptions> {
        Ok(DecodeOptions::new()
            .with_delimiter(self.delimiter_byte()?)
            .with_allow_non_finite(self.allow_non_finite)
            .with_require_utf8(self.require_utf8))
    }
}
