//! `[log]` section
//!
//! Where the line processor's structured logs go. The decoder never logs;
//! everything here configures the subscriber that `tally-pipeline` installs.

use serde::Deserialize;

/// Minimum severity written when no `filter` is given
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Levels from most to least verbose
    pub const ALL: [LogLevel; 5] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
    ];

    /// Directive text understood by an `EnvFilter`
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Event rendering
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Console,
    /// One JSON object per event, for log shippers
    Json,
}

/// Event destination: `"stdout"`, `"stderr"`, or any other string as a file path
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    #[serde(untagged)]
    File(String),
}

impl LogOutput {
    /// Path of the log file, for file output
    pub fn file_path(&self) -> Option<&str> {
        match self {
            Self::File(path) => Some(path.as_str()),
            Self::Stdout | Self::Stderr => None,
        }
    }
}

/// Logging configuration
///
/// ```toml
/// [log]
/// level = "info"
/// format = "json"
/// output = "/var/log/tally/processor.log"
/// filter = "tally_pipeline=debug,info"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,

    /// `EnvFilter` directives; take precedence over `level` when non-blank
    pub filter: Option<String>,
}

impl LogConfig {
    /// Directive string for the subscriber's filter
    pub fn filter_directive(&self) -> &str {
        match self.filter.as_deref() {
            Some(filter) if !filter.trim().is_empty() => filter,
            _ => self.level.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_section_logs_info_to_stdout() {
        let config: LogConfig = toml::from_str("").unwrap();
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.filter_directive(), "info");
        assert_eq!(config.output.file_path(), None);
    }

    #[test]
    fn test_json_to_file() {
        let toml = r#"
format = "json"
output = "/var/log/tally/processor.log"
"#;
        let config: LogConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(
            config.output.file_path(),
            Some("/var/log/tally/processor.log")
        );
    }

    #[test]
    fn test_named_outputs_are_not_paths() {
        let config: LogConfig = toml::from_str(r#"output = "stderr""#).unwrap();
        assert_eq!(config.output, LogOutput::Stderr);
        assert_eq!(config.output.file_path(), None);
    }

    #[test]
    fn test_filter_takes_precedence_over_level() {
        let toml = r#"
level = "warn"
filter = "tally_pipeline=trace,info"
"#;
        let config: LogConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.filter_directive(), "tally_pipeline=trace,info");
    }

    #[test]
    fn test_blank_filter_ignored() {
        let config = LogConfig {
            level: LogLevel::Error,
            filter: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.filter_directive(), "error");
    }

    #[test]
    fn test_level_names_match_serde() {
        for level in LogLevel::ALL {
            let toml = format!("level = \"{}\"", level.as_str());
            let config: LogConfig = toml::from_str(&toml).unwrap();
            assert_eq!(config.level, level);
            assert_eq!(config.filter_directive(), level.as_str());
        }
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert!(toml::from_str::<LogConfig>(r#"level = "verbose""#).is_err());
    }
}
