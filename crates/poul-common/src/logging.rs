//! Structured logging infrastructure for Poul Le Fun

use crate::{PoulError, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "poul_i18n=trace")
    pub level: String,
    /// Whether to emit one JSON object per event
    pub json_format: bool,
    /// Optional file path for log output; stdout when unset
    pub file_path: Option<PathBuf>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_path: None,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Build the event filter, falling back to `info` for an unparsable level
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Fails if a global subscriber is already installed or the log file cannot
/// be opened.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let installed = match (config.json_format, config.file_path) {
        (true, Some(path)) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .json()
                .with_target(config.include_targets)
                .with_writer(file);
            registry.with(layer).try_init()
        }
        (true, None) => {
            let layer = fmt::layer().json().with_target(config.include_targets);
            registry.with(layer).try_init()
        }
        (false, Some(path)) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(config.include_targets)
                .with_writer(file);
            registry.with(layer).try_init()
        }
        (false, None) => {
            let layer = fmt::layer().with_target(config.include_targets);
            registry.with(layer).try_init()
        }
    };

    installed.map_err(|e| PoulError::logging_with_source("failed to install tracing subscriber", e))
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<()> {
    init_logging(LoggingConfig::default())
}
