//! Error types and utilities for Poul Le Fun

use thiserror::Error;

/// Result type alias for Poul Le Fun operations
pub type Result<T> = std::result::Result<T, PoulError>;

/// Main error type for application-level operations
#[derive(Error, Debug)]
pub enum PoulError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internationalization and localization errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Logging could not be installed
    #[error("Logging error: {message}")]
    Logging {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PoulError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new localization error
    pub fn localization(msg: impl Into<String>, locale: Option<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale,
            source: None,
        }
    }

    /// Create a new localization error with source
    pub fn localization_with_source(
        msg: impl Into<String>,
        locale: Option<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Localization {
            message: msg.into(),
            locale,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new logging error with source
    pub fn logging_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Logging {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Localization { .. } => "localization",
            Self::Logging { .. } => "logging",
            Self::Io(_) => "io",
            Self::Generic { .. } => "generic",
        }
    }
}
