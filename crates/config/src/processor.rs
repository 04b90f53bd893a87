//! Line processor configuration
//!
//! Controls how the stream loop feeds lines to the decoder and how it
//! reports lines it had to drop.

use std::time::Duration;

use serde::Deserialize;

/// Default interval between malformed-line log messages (10 seconds)
pub const DEFAULT_ERROR_LOG_INTERVAL_SECS: u64 = 10;

/// Default cap on line bytes echoed into a log message
pub const DEFAULT_MAX_LOGGED_LINE_BYTES: usize = 256;

/// Line processor configuration
///
/// # Example
///
/// ```toml
/// [processor]
/// has_agent_name = true
/// error_log_interval_secs = 10
/// max_logged_line_bytes = 256
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Data lines carry an agent-name field
    /// Default: true
    pub has_agent_name: bool,

    /// Minimum seconds between malformed-line log messages (0 logs every one)
    /// Default: 10
    pub error_log_interval_secs: u64,

    /// Maximum bytes of a rejected line included in its log message
    /// Default: 256
    pub max_logged_line_bytes: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            has_agent_name: true,
            error_log_interval_secs: DEFAULT_ERROR_LOG_INTERVAL_SECS,
            max_logged_line_bytes: DEFAULT_MAX_LOGGED_LINE_BYTES,
        }
    }
}

impl ProcessorConfig {
    /// Get the malformed-line log interval as a Duration
    #[inline]
    pub fn error_log_interval(&self) -> Duration {
        Duration::from_secs(self.error_log_interval_secs)
    }
}
