//! Configuration validation
//!
//! Validates config consistency:
//! - Decoder delimiter is a single unambiguous ASCII byte
//! - Log file output has a path

use crate::Config;
use crate::error::{ConfigError, Result};

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    config.decoder.delimiter_byte()?;
    validate_log(config)?;
    Ok(())
}

fn validate_log(config: &Config) -> Result<()> {
    if let Some(path) = config.log.output.file_path()
        && path.trim().is_empty()
    {
        return Err(ConfigError::invalid_value(
            "log",
            "output",
            "file path is empty",
        ));
    }
    Ok(())
}
