//! Structured logging through `tracing`.
//!
//! Output goes to stderr so command output on stdout stays machine-readable.
//! `RUST_LOG`, when set, takes precedence over the configured level.

use crate::config::types::ObservabilityConfig;
use crate::errors::ObservabilityError;
use tracing_subscriber::{fmt, EnvFilter};

/// Levels accepted in configuration, lowest to highest severity.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Log format for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON format for machine parsing.
    Json,
    /// Human-readable format.
    #[default]
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    /// Parse from string, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" | "human" => Ok(Self::Pretty),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Install the global subscriber from configuration strings.
pub fn init_tracing_from_config(config: &ObservabilityConfig) -> Result<(), ObservabilityError> {
    let format = config.log_format.parse().unwrap_or_default();
    init_tracing(&config.log_level, format)
}

/// Install the global subscriber.
///
/// Fails if one is already installed.
pub fn init_tracing(log_level: &str, format: LogFormat) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    }
    .map_err(|e| ObservabilityError::Init(e.to_string()))
}
