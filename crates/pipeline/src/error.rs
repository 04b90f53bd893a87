//! Pipeline error types
//!
//! Errors for building a line processor and for sinks refusing observations.
//! Malformed lines are not errors at this level; they are counted and logged.

use std::io;

use tally_config::ConfigError;
use thiserror::Error;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration could not be turned into a processor
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Log subscriber could not be installed
    #[error("logging setup failed: {0}")]
    Logging(String),

    /// Log file could not be opened
    #[error("failed to open log file '{path}': {source}")]
    LogFile {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    /// Create a logging setup error
    #[inline]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging(message.into())
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors a sink may return when refusing an observation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// Sink has reached its capacity
    #[error("sink full: capacity {capacity}")]
    Full { capacity: usize },

    /// Sink refused the observation
    #[error("sink rejected observation: {0}")]
    Rejected(String),
}

impl SinkError {
    /// Create a rejection error
    #[inline]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}
