//! Application configuration structures

use poul_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Display text settings
    #[validate]
    pub i18n: I18nSettings,

    /// Logging configuration
    #[validate]
    pub logging: LoggingSettings,
}

/// Display text configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct I18nSettings {
    /// Locale active at startup
    #[validate(custom(function = "crate::validation::validate_locale_tag", message = "Default locale must be a valid language identifier"))]
    pub default_locale: String,

    /// Whether the language switcher may change the active locale.
    /// Off in the shipped product, which is French only.
    pub allow_locale_switching: bool,

    /// Directory of `<tag>.json` catalogs replacing the built-in content
    pub catalog_dir: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directives, e.g. `info` or `info,poul_i18n=debug`
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be off, error, warn, info, debug or trace"))]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,

    /// Append logs to this file instead of stdout
    pub file: Option<PathBuf>,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_locale: "fr".to_string(),
            allow_locale_switching: false,
            catalog_dir: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl LoggingSettings {
    /// Settings for the shared logging bootstrap
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            json_format: self.json,
            file_path: self.file.clone(),
            ..LoggingConfig::default()
        }
    }
}
