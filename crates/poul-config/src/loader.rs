//! Configuration loading utilities

use crate::Config;
use poul_common::{PoulError, Result as PoulResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "POUL_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for PoulError {
    fn from(err: ConfigError) -> Self {
        PoulError::config_with_source("failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        debug!("Loading configuration file: {:?}", path.as_ref());
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content, |key| env::var(key).ok())
    }

    /// Parse YAML, apply overrides from `lookup`, then validate
    pub fn from_yaml_str<F>(content: &str, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)?
        };
        Self::apply_overrides(&mut config, lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables and files.
    ///
    /// Looks at `POUL_CONFIG_PATH`, then `poul.yaml` and `poul.yml` in the
    /// working directory, and otherwise starts from defaults. Environment
    /// overrides apply in every case.
    pub fn load() -> PoulResult<Config> {
        let config = match Self::config_file() {
            Some(path) => {
                info!("Using configuration file {:?}", path);
                Self::load_config(path)?
            }
            None => {
                info!("No configuration file found, using defaults");
                Self::from_yaml_str("", |key| env::var(key).ok())?
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PoulResult<Config> {
        Ok(Self::load_config(path)?)
    }

    fn config_file() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(path));
        }
        ["poul.yaml", "poul.yml"]
            .into_iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // I18n configuration overrides
        if let Some(locale) = lookup("POUL_LOCALE") {
            config.i18n.default_locale = locale;
        }

        if let Some(allow) = lookup("POUL_ALLOW_LOCALE_SWITCHING") {
            config.i18n.allow_locale_switching = parse_var("POUL_ALLOW_LOCALE_SWITCHING", &allow)?;
        }

        if let Some(dir) = lookup("POUL_CATALOG_DIR") {
            config.i18n.catalog_dir = Some(PathBuf::from(dir));
        }

        // Logging configuration overrides
        if let Some(level) = lookup("POUL_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(json) = lookup("POUL_LOG_JSON") {
            config.logging.json = parse_var("POUL_LOG_JSON", &json)?;
        }

        if let Some(file) = lookup("POUL_LOG_FILE") {
            config.logging.file = Some(PathBuf::from(file));
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}
