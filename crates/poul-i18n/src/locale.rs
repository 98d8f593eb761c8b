//! Locale tags and language metadata

use crate::error::{I18nError, I18nResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Locale the product ships with and falls back to.
pub const DEFAULT_LOCALE: &str = "fr";

/// A language tag selecting one variant of the catalog (e.g. `"fr"`, `"en"`).
///
/// Tags built with [`LocaleTag::parse`] are validated and stored in canonical
/// form, so `"FR"` and `"fr"` name the same catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleTag(String);

impl LocaleTag {
    /// Parse and canonicalize a language identifier
    pub fn parse(tag: &str) -> I18nResult<Self> {
        let langid: LanguageIdentifier = tag
            .trim()
            .parse()
            .map_err(|_| I18nError::InvalidLocale(tag.to_string()))?;
        if langid.language.is_empty() {
            return Err(I18nError::InvalidLocale(tag.to_string()));
        }
        Ok(Self(langid.to_string()))
    }

    /// The hard-coded default locale
    pub fn fallback() -> Self {
        Self(DEFAULT_LOCALE.to_string())
    }

    /// Borrow the tag as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`"fr"` for `"fr-CA"`)
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl Default for LocaleTag {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleTag {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocaleTag {
    type Error = I18nError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocaleTag> for String {
    fn from(tag: LocaleTag) -> Self {
        tag.0
    }
}

impl AsRef<str> for LocaleTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A selectable language as shown by a language switcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Catalog key
    pub tag: String,
    /// Short button label, e.g. `"FR"`
    pub label: String,
    /// Native language name, e.g. `"Français"`
    pub name: String,
}

impl Language {
    /// Describe a catalog locale
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split('-').next().unwrap_or(tag);
        let name = match primary {
            "fr" => "Français",
            "en" => "English",
            "es" => "Español",
            "de" => "Deutsch",
            _ => tag,
        };
        Self {
            tag: tag.to_string(),
            label: primary.to_uppercase(),
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonicalizes() {
        assert_eq!(LocaleTag::parse("FR").unwrap().as_str(), "fr");
        assert_eq!(LocaleTag::parse("en-us").unwrap().as_str(), "en-US");
        assert_eq!(LocaleTag::parse(" en ").unwrap().as_str(), "en");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(LocaleTag::parse("").is_err());
        assert!(LocaleTag::parse("not a locale").is_err());
        assert!(matches!(
            LocaleTag::parse("123456789"),
            Err(I18nError::InvalidLocale(_))
        ));
    }

    #[test]
    fn test_fallback_is_french() {
        assert_eq!(LocaleTag::default().as_str(), DEFAULT_LOCALE);
        assert_eq!(LocaleTag::fallback().as_str(), "fr");
    }

    #[test]
    fn test_primary_language() {
        assert_eq!(LocaleTag::parse("fr-CA").unwrap().language(), "fr");
        assert_eq!(LocaleTag::parse("en").unwrap().language(), "en");
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let tag: LocaleTag = serde_json::from_str("\"EN\"").unwrap();
        assert_eq!(tag.as_str(), "en");
        assert!(serde_json::from_str::<LocaleTag>("\"!!\"").is_err());
    }

    #[test]
    fn test_language_labels() {
        let fr = Language::from_tag("fr");
        assert_eq!(fr.label, "FR");
        assert_eq!(fr.name, "Français");

        let unknown = Language::from_tag("nl");
        assert_eq!(unknown.label, "NL");
        assert_eq!(unknown.name, "nl");
    }
}
