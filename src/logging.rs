// ABOUTME: Logging configuration and structured logging setup for the analysis pipeline
// ABOUTME: Configures log levels, formatters, and output destinations via tracing-subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured logging configuration with environment-driven setup.

use std::env;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output for development
    Pretty,
    /// Single-line output for terminals
    Compact,
    /// Structured JSON for log aggregation
    Json,
}

impl LogFormat {
    /// Parse a format name, falling back to `Compact` for unknown values
    #[must_use]
    pub fn from_env_value(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level directive (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Compact,
        }
    }
}

impl LoggingConfig {
    /// Build a logging configuration from `RUST_LOG` / `LOG_FORMAT`
    #[must_use]
    pub fn from_environment() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = env::var("LOG_FORMAT")
            .map(|value| LogFormat::from_env_value(&value))
            .unwrap_or(LogFormat::Compact);
        Self { level, format }
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once at binary startup. Subsequent calls return an error from the
/// subscriber registry, which the caller may ignore in tests.
///
/// The pretty format is a fully-decorated default-format layer (file,
/// line number, target) rather than the `Pretty` formatter, which is
/// unavailable without the subscriber's `ansi` feature.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true),
            )
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_file(false)
                    .with_line_number(false)
                    .with_target(false),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!(LogFormat::from_env_value("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_env_value("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value("bogus"), LogFormat::Compact);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Compact);
    }

    // The only test in this binary that installs a subscriber, so the
    // first (and only) init must succeed.
    #[test]
    fn test_init_pretty_format() {
        let config = LoggingConfig {
            level: "debug".into(),
            format: LogFormat::Pretty,
        };
        assert!(init(&config).is_ok());
    }
}
