//! Error types for catalog construction and resolution diagnostics

use poul_common::PoulError;
use thiserror::Error;

/// Errors raised while building a catalog or parsing a locale tag.
///
/// These only occur at startup. Resolution itself never returns an error;
/// see [`ResolveIssue`] for what it reports instead.
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLocale(String),

    /// A catalog node is neither text nor a nested object
    #[error("Malformed catalog for locale {locale} at '{path}': {reason}")]
    MalformedCatalog {
        /// Locale whose document is malformed
        locale: String,
        /// Dot-path of the offending node, empty for the root
        path: String,
        /// What was wrong with it
        reason: String,
    },

    /// A catalog document is not valid JSON
    #[error("Failed to parse catalog for locale {locale}: {source}")]
    CatalogParse {
        /// Locale whose document failed to parse
        locale: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Failed to load a resource file or directory
    #[error("Failed to load resource file: {path}")]
    ResourceLoad {
        /// File or directory that could not be read
        path: String,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

impl From<I18nError> for PoulError {
    fn from(err: I18nError) -> Self {
        let locale = match &err {
            I18nError::MalformedCatalog { locale, .. } | I18nError::CatalogParse { locale, .. } => {
                Some(locale.clone())
            }
            I18nError::InvalidLocale(tag) => Some(tag.clone()),
            I18nError::ResourceLoad { .. } | I18nError::Io(_) => None,
        };
        PoulError::localization_with_source("catalog initialization failed", locale, err)
    }
}

/// Something that went wrong while resolving a display string.
///
/// Issues are recovered locally: a missing locale, key or leaf echoes the
/// requested path, an unbound parameter leaves its token in place. They are
/// logged, never returned to the caller as errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveIssue {
    /// The active locale has no catalog
    #[error("Locale '{locale}' not found while resolving '{path}'")]
    LocaleNotFound {
        /// Requested locale
        locale: String,
        /// Requested dot-path
        path: String,
    },

    /// A path segment does not exist at its depth
    #[error("Translation key not found: {path} (locale {locale}, missing segment '{segment}')")]
    KeyNotFound {
        /// Locale searched
        locale: String,
        /// Full requested dot-path
        path: String,
        /// First segment with no matching child
        segment: String,
    },

    /// The path names a group of messages, not displayable text
    #[error("Translation value is not a string: {path} (locale {locale})")]
    NotALeaf {
        /// Locale searched
        locale: String,
        /// Dot-path naming the group
        path: String,
    },

    /// A template token has no matching parameter
    #[error("Unbound parameter '{name}' in {path} (locale {locale})")]
    UnboundParameter {
        /// Locale of the template
        locale: String,
        /// Dot-path of the template
        path: String,
        /// Token name as written between the braces
        name: String,
    },
}

impl ResolveIssue {
    /// Short machine-readable name used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LocaleNotFound { .. } => "locale_not_found",
            Self::KeyNotFound { .. } => "key_not_found",
            Self::NotALeaf { .. } => "not_a_leaf",
            Self::UnboundParameter { .. } => "unbound_parameter",
        }
    }

    /// Whether this issue made the resolver fall back to echoing the path
    pub fn echoes_path(&self) -> bool {
        !matches!(self, Self::UnboundParameter { .. })
    }

    /// Locale the failing lookup ran against
    pub fn locale(&self) -> &str {
        match self {
            Self::LocaleNotFound { locale, .. }
            | Self::KeyNotFound { locale, .. }
            | Self::NotALeaf { locale, .. }
            | Self::UnboundParameter { locale, .. } => locale,
        }
    }

    /// Full dot-path that was requested
    pub fn path(&self) -> &str {
        match self {
            Self::LocaleNotFound { path, .. }
            | Self::KeyNotFound { path, .. }
            | Self::NotALeaf { path, .. }
            | Self::UnboundParameter { path, .. } => path,
        }
    }
}
