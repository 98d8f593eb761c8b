//! Configuration management for Poul Le Fun

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{Config, I18nSettings, LoggingSettings};
