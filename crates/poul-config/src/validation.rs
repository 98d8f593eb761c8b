//! Validation helpers used by the configuration structures

use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use unic_langid::LanguageIdentifier;
use validator::ValidationError;

/// Validate a BCP-47 language identifier such as `fr` or `en-GB`
pub fn validate_locale_tag(tag: &str) -> Result<(), ValidationError> {
    if tag.trim().is_empty() {
        return Err(ValidationError::new("empty_locale"));
    }

    match LanguageIdentifier::from_str(tag.trim()) {
        Ok(langid) if !langid.language.is_empty() => Ok(()),
        _ => Err(ValidationError::new("invalid_locale")),
    }
}

/// Validate a comma-separated list of `level` or `target=level` directives
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if level.trim().is_empty() {
        return Err(ValidationError::new("empty_log_level"));
    }

    let valid = level.split(',').all(|directive| {
        let level = directive.rsplit('=').next().unwrap_or(directive).trim();
        LevelFilter::from_str(level).is_ok()
    });

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}
