//! # Poul Le Fun application bootstrap
//!
//! Turns a loaded [`Config`] into an [`AppContext`]: logging installed, the
//! catalog built once, the locale state initialized and an [`I18nManager`]
//! ready to hand to UI collaborators.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use anyhow::Context;
use poul_common::init_logging;
use poul_config::{Config, ConfigLoader};
use poul_i18n::{Catalog, CatalogAudit, I18nManager, LocaleState, SwitchPolicy};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything a running frontend needs, built once at startup.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Validated configuration the context was built from
    pub config: Config,
    /// Shared display text facade
    pub i18n: I18nManager,
}

impl AppContext {
    /// Load configuration from the environment and build the context
    pub fn load() -> anyhow::Result<Self> {
        let config = ConfigLoader::load().context("Failed to load configuration")?;
        Self::init(config)
    }

    /// Install logging, then build the context.
    ///
    /// A subscriber that is already installed is kept; logging setup failing
    /// for that reason is not fatal.
    pub fn init(config: Config) -> anyhow::Result<Self> {
        if let Err(e) = init_logging(config.logging.to_logging_config()) {
            if e.category() == "io" {
                return Err(e).context("Failed to open log file");
            }
            warn!("Logging not reinitialized: {}", e);
        }

        info!("Starting Poul Le Fun");
        Self::from_config(config)
    }

    /// Build the context without touching the global subscriber
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let catalog = match &config.i18n.catalog_dir {
            Some(dir) => Arc::new(
                Catalog::from_dir(dir)
                    .with_context(|| format!("Failed to load catalog from {}", dir.display()))?,
            ),
            None => Catalog::builtin(),
        };

        let audit = CatalogAudit::run(&catalog);
        for locale in audit.locales.iter().filter(|audit| !audit.is_consistent()) {
            warn!(
                locale = %locale.locale,
                missing = locale.missing.len(),
                not_a_leaf = locale.not_a_leaf.len(),
                placeholder_mismatches = locale.placeholder_mismatches.len(),
                "Catalog locale diverges from the others"
            );
        }

        let policy = SwitchPolicy::from_flag(config.i18n.allow_locale_switching);
        let state = LocaleState::from_setting(Some(&config.i18n.default_locale), policy);
        let i18n = I18nManager::new(catalog, Arc::new(state));

        Ok(Self { config, i18n })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let context = AppContext::from_config(Config::default()).unwrap();
        assert_eq!(context.i18n.language().as_str(), "fr");
        assert!(context.i18n.locale_state().is_locked());
        assert_eq!(context.i18n.t("nav.rankings"), "🏆 Classement");
    }

    #[test]
    fn test_switching_flag_reaches_state() {
        let mut config = Config::default();
        config.i18n.allow_locale_switching = true;
        let context = AppContext::from_config(config).unwrap();
        assert_eq!(context.i18n.locale_state().policy(), SwitchPolicy::Allowed);
    }

    #[test]
    fn test_missing_catalog_dir_fails() {
        let mut config = Config::default();
        config.i18n.catalog_dir = Some("/definitely/not/a/catalog/dir".into());
        let err = AppContext::from_config(config).unwrap_err();
        assert!(err.to_string().contains("Failed to load catalog"));
    }
}
