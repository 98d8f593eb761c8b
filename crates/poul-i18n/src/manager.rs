//! Internationalization manager

use crate::catalog::Catalog;
use crate::locale::{Language, LocaleTag};
use crate::params::Params;
use crate::resolver::resolve;
use crate::state::{LocaleRequest, LocaleState};
use std::sync::Arc;
use tracing::{info, warn};

/// What UI collaborators hold to turn dot-paths into display strings.
///
/// Cloning is cheap; every clone shares the same catalog and locale state.
#[derive(Debug, Clone)]
pub struct I18nManager {
    catalog: Arc<Catalog>,
    state: Arc<LocaleState>,
}

impl I18nManager {
    /// Bind a catalog and a locale state together
    pub fn new(catalog: Arc<Catalog>, state: Arc<LocaleState>) -> Self {
        let current = state.current();
        if !catalog.contains_locale(current.as_str()) {
            warn!(
                "Active locale {} has no catalog; every string will show its key",
                current
            );
        }
        info!(
            "I18nManager initialized with locale {} (available: {:?}, {:?})",
            current,
            catalog.locales(),
            state.policy()
        );
        Self { catalog, state }
    }

    /// Resolve `path` in the active locale
    pub fn t(&self, path: &str) -> String {
        resolve(&self.catalog, self.state.current().as_str(), path, None)
    }

    /// Resolve `path` in the active locale, substituting `params`
    pub fn t_with(&self, path: &str, params: &Params) -> String {
        resolve(&self.catalog, self.state.current().as_str(), path, Some(params))
    }

    /// Whether `path` names text in the active locale
    pub fn has_message(&self, path: &str) -> bool {
        self.catalog
            .lookup(self.state.current().as_str(), path)
            .is_ok()
    }

    /// The active locale
    pub fn language(&self) -> LocaleTag {
        self.state.current()
    }

    /// Ask for a different language.
    ///
    /// Forwards to [`LocaleState::request`]. When switching is allowed, tags
    /// the catalog has no content for are refused.
    pub fn set_language(&self, tag: &str) -> LocaleRequest {
        if self.state.is_locked() {
            return self.state.request(tag);
        }

        match LocaleTag::parse(tag) {
            Ok(parsed) if self.catalog.contains_locale(parsed.as_str()) => {
                self.state.request(parsed.as_str())
            }
            Ok(parsed) => {
                warn!("No catalog for requested locale {}, keeping {}", parsed, self.language());
                LocaleRequest::Rejected
            }
            Err(e) => {
                warn!("Rejected locale change request: {}", e);
                LocaleRequest::Rejected
            }
        }
    }

    /// Languages a switcher can offer, sorted by tag
    pub fn available_languages(&self) -> Vec<Language> {
        self.catalog
            .locales()
            .into_iter()
            .map(Language::from_tag)
            .collect()
    }

    /// The shared catalog
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// The shared locale state
    pub fn locale_state(&self) -> &Arc<LocaleState> {
        &self.state
    }
}
