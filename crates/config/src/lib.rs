//! Tally Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! An empty file is a valid configuration; only specify what you change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use tally_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[decoder]\ndelimiter = \"|\"").unwrap();
//! assert_eq!(config.decoder.delimiter_byte().unwrap(), b'|');
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! [decoder]
//! delimiter = "\t"
//! allow_non_finite = false
//! require_utf8 = false
//!
//! [processor]
//! has_agent_name = true
//! error_log_interval_secs = 10
//! max_logged_line_bytes = 256
//!
//! [log]
//! level = "info"
//! format = "console"
//! output = "stdout"
//! ```

mod decoder;
mod error;
mod logging;
mod processor;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use decoder::DecoderConfig;
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel, LogOutput};
pub use processor::{
    DEFAULT_ERROR_LOG_INTERVAL_SECS, DEFAULT_MAX_LOGGED_LINE_BYTES, ProcessorConfig,
};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Wire format settings
    pub decoder: DecoderConfig,

    /// Stream loop settings
    pub processor: ProcessorConfig,

    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, contains invalid TOML or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
