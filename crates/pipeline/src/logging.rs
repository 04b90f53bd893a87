//! Log subscriber setup
//!
//! Installs the global `tracing` subscriber described by `[log]`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tally_config::{LogConfig, LogFormat, LogOutput};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::prelude::*;

use crate::error::{PipelineError, Result};

/// Install the global subscriber
///
/// Fails if the filter does not parse, the log file cannot be opened, or a
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let writer = make_writer(&config.output)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Console => registry
            .with(fmt::layer().with_target(true).with_writer(writer))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init(),
    };

    installed.map_err(|e| PipelineError::logging(e.to_string()))
}

pub(crate) fn build_filter(config: &LogConfig) -> Result<EnvFilter> {
    let directive = config.filter_directive();
    EnvFilter::try_new(directive)
        .map_err(|e| PipelineError::logging(format!("invalid log filter {directive:?}: {e}")))
}

pub(crate) fn make_writer(output: &LogOutput) -> Result<BoxMakeWriter> {
    let writer = match output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| PipelineError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            BoxMakeWriter::new(Mutex::new(file))
        }
    };
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tally_config::LogLevel;

    #[test]
    fn test_filter_from_level() {
        let config = LogConfig {
            level: LogLevel::Debug,
            ..Default::default()
        };
        let filter = build_filter(&config).unwrap();
        assert!(filter.to_string().contains("debug"));
    }

    #[test]
    fn test_filter_from_directives() {
        let config = LogConfig {
            filter: Some("tally_pipeline=trace".to_string()),
            ..Default::default()
        };
        let filter = build_filter(&config).unwrap();
        assert!(filter.to_string().contains("tally_pipeline=trace"));
    }

    #[test]
    fn test_file_writer_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.log");
        let output = LogOutput::File(path.display().to_string());

        assert!(make_writer(&output).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_file_writer_missing_directory() {
        let output = LogOutput::File("/nonexistent/dir/tally.log".to_string());
        let err = make_writer(&output).unwrap_err();
        assert!(matches!(err, PipelineError::LogFile { .. }));
    }

    #[test]
    fn test_console_writers() {
        assert!(make_writer(&LogOutput::Stdout).is_ok());
        assert!(make_writer(&LogOutput::Stderr).is_ok());
    }
}
