//! The process-wide active locale
//!
//! The product currently ships a single language, so the locale is locked
//! after startup and [`LocaleState::request`] only logs. The request path is
//! kept so that language switcher call sites stay unchanged if switching is
//! ever enabled through [`SwitchPolicy::Allowed`]. When it is, the new tag is
//! published with one atomic store: readers see either the old or the new
//! tag, never anything in between.

use crate::locale::LocaleTag;
use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Whether locale change requests take effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchPolicy {
    /// Requests are ignored; the initial locale stays active
    #[default]
    Locked,
    /// Requests replace the active locale
    Allowed,
}

impl SwitchPolicy {
    /// Map the `allow_locale_switching` configuration flag
    pub fn from_flag(allow: bool) -> Self {
        if allow {
            Self::Allowed
        } else {
            Self::Locked
        }
    }
}

/// What happened to a locale change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleRequest {
    /// Switching is disabled; nothing changed
    Locked,
    /// The requested locale was already active
    Unchanged,
    /// The active locale changed
    Switched {
        /// Locale active before the request
        from: LocaleTag,
        /// Locale active after the request
        to: LocaleTag,
    },
    /// The tag was invalid or has no content; nothing changed
    Rejected,
}

/// Holder of the single active locale tag.
#[derive(Debug)]
pub struct LocaleState {
    current: ArcSwap<LocaleTag>,
    policy: SwitchPolicy,
}

impl Default for LocaleState {
    fn default() -> Self {
        Self::new(LocaleTag::fallback(), SwitchPolicy::Locked)
    }
}

impl LocaleState {
    /// Create the state with its initial locale
    pub fn new(initial: LocaleTag, policy: SwitchPolicy) -> Self {
        debug!("Locale state initialized to {} ({:?})", initial, policy);
        Self {
            current: ArcSwap::from_pointee(initial),
            policy,
        }
    }

    /// Create the state from a configured tag, falling back to the default
    /// locale when none is configured or the tag does not parse
    pub fn from_setting(tag: Option<&str>, policy: SwitchPolicy) -> Self {
        let initial = match tag.map(LocaleTag::parse) {
            Some(Ok(tag)) => tag,
            Some(Err(e)) => {
                warn!("{}, using default locale {}", e, LocaleTag::fallback());
                LocaleTag::fallback()
            }
            None => LocaleTag::fallback(),
        };
        Self::new(initial, policy)
    }

    /// The active locale
    pub fn current(&self) -> LocaleTag {
        LocaleTag::clone(&self.current.load())
    }

    /// The configured switch policy
    pub fn policy(&self) -> SwitchPolicy {
        self.policy
    }

    /// Whether requests are ignored
    pub fn is_locked(&self) -> bool {
        self.policy == SwitchPolicy::Locked
    }

    /// Ask for a different active locale.
    ///
    /// With [`SwitchPolicy::Locked`] this only logs. It never fails.
    pub fn request(&self, tag: &str) -> LocaleRequest {
        if self.is_locked() {
            info!(
                requested = tag,
                "Language locked to {}, ignoring change request",
                self.current.load().as_str()
            );
            return LocaleRequest::Locked;
        }

        let tag = match LocaleTag::parse(tag) {
            Ok(tag) => tag,
            Err(e) => {
                warn!("Rejected locale change request: {}", e);
                return LocaleRequest::Rejected;
            }
        };

        let previous = self.current.swap(Arc::new(tag.clone()));
        if *previous == tag {
            return LocaleRequest::Unchanged;
        }

        info!("Active locale switched from {} to {}", previous, tag);
        LocaleRequest::Switched {
            from: LocaleTag::clone(&previous),
            to: tag,
        }
    }
}
