//! Path-based resolution of display strings
//!
//! # Invariants
//!
//! 1. **Never fails the caller**: every failure degrades to a visible literal.
//!    A missing locale, a missing segment, or a path naming a group all
//!    resolve to the requested path itself.
//! 2. **Single pass**: `{{name}}` tokens are replaced in one left-to-right
//!    scan of the template. Inserted values are never scanned again.
//! 3. **Unbound tokens stay**: a token without a parameter is emitted exactly
//!    as written.
//! 4. **Pure**: the output depends only on the catalog, the locale, the path
//!    and the parameters.

use crate::catalog::Catalog;
use crate::error::ResolveIssue;
use crate::params::Params;
use std::collections::BTreeSet;
use tracing::warn;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Outcome of a resolution, with the diagnostics it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Finished display string
    pub text: String,
    /// Everything that went wrong, in the order it was found
    pub issues: Vec<ResolveIssue>,
}

impl Resolution {
    /// Whether the path resolved to a leaf and every token was bound
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Result of substituting parameters into one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolated {
    /// Template with every bound token replaced
    pub text: String,
    /// Names of tokens left in place, one entry per occurrence
    pub unbound: Vec<String>,
}

enum Piece<'a> {
    Literal(&'a str),
    Token { name: &'a str, raw: &'a str },
}

/// Splits a template into literal runs and `{{name}}` tokens.
///
/// The name is whatever sits between the innermost `{{` and the next `}}`.
/// An opening `{{` with no closing `}}` is literal text.
struct Pieces<'a> {
    rest: &'a str,
    pending: Option<Piece<'a>>,
}

impl<'a> Pieces<'a> {
    fn new(template: &'a str) -> Self {
        Self {
            rest: template,
            pending: None,
        }
    }
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(piece) = self.pending.take() {
            return Some(piece);
        }
        if self.rest.is_empty() {
            return None;
        }

        let rest = self.rest;
        let token = rest.find(OPEN).and_then(|open| {
            let close = rest[open + OPEN.len()..].find(CLOSE)? + open + OPEN.len();
            let start = open + rest[open..close].rfind(OPEN).unwrap_or(0);
            Some((start, close))
        });

        let Some((start, close)) = token else {
            self.rest = "";
            return Some(Piece::Literal(rest));
        };

        let end = close + CLOSE.len();
        let token = Piece::Token {
            name: &rest[start + OPEN.len()..close],
            raw: &rest[start..end],
        };
        self.rest = &rest[end..];

        if start == 0 {
            Some(token)
        } else {
            self.pending = Some(token);
            Some(Piece::Literal(&rest[..start]))
        }
    }
}

/// Substitute `params` into every `{{name}}` token of `template`.
pub fn interpolate(template: &str, params: &Params) -> Interpolated {
    let mut text = String::with_capacity(template.len());
    let mut unbound = Vec::new();

    for piece in Pieces::new(template) {
        match piece {
            Piece::Literal(literal) => text.push_str(literal),
            Piece::Token { name, raw } => match params.get(name) {
                Some(value) => text.push_str(&value.to_string()),
                None => {
                    text.push_str(raw);
                    unbound.push(name.to_string());
                }
            },
        }
    }

    Interpolated { text, unbound }
}

/// Names of all `{{name}}` tokens in `template`
pub fn placeholders(template: &str) -> BTreeSet<String> {
    Pieces::new(template)
        .filter_map(|piece| match piece {
            Piece::Token { name, .. } => Some(name.to_string()),
            Piece::Literal(_) => None,
        })
        .collect()
}

/// Resolve `path` and report every diagnostic instead of logging it.
pub fn resolve_detailed(
    catalog: &Catalog,
    locale: &str,
    path: &str,
    params: Option<&Params>,
) -> Resolution {
    let template = match catalog.lookup(locale, path) {
        Ok(template) => template,
        Err(issue) => {
            return Resolution {
                text: path.to_string(),
                issues: vec![issue],
            }
        }
    };

    let Some(params) = params else {
        return Resolution {
            text: template.to_string(),
            issues: Vec::new(),
        };
    };

    let Interpolated { text, unbound } = interpolate(template, params);
    let issues = unbound
        .into_iter()
        .map(|name| ResolveIssue::UnboundParameter {
            locale: locale.to_string(),
            path: path.to_string(),
            name,
        })
        .collect();

    Resolution { text, issues }
}

/// Resolve `path` in `locale` to a finished display string.
///
/// Diagnostics are logged at warn level, one event per issue. The returned
/// string is always usable: on any lookup failure it is `path` itself.
pub fn resolve(catalog: &Catalog, locale: &str, path: &str, params: Option<&Params>) -> String {
    let Resolution { text, issues } = resolve_detailed(catalog, locale, path, params);
    for issue in &issues {
        warn!(
            locale = issue.locale(),
            path = issue.path(),
            kind = issue.kind(),
            "{}",
            issue
        );
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Node;
    use crate::params;

    fn catalog() -> Catalog {
        Catalog::builder()
            .locale(
                "en",
                Node::group([
                    ("ready", Node::leaf("Ready: {{count}}")),
                    ("twice", Node::leaf("{{x}} and {{x}}")),
                    ("hello", Node::leaf("Hello {{name}}")),
                    ("plain", Node::leaf("No tokens here")),
                    ("home", Node::group([("title", Node::leaf("Home"))])),
                ]),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_leaf_without_params_is_verbatim() {
        let catalog = catalog();
        assert_eq!(resolve(&catalog, "en", "hello", None), "Hello {{name}}");
        assert_eq!(resolve(&catalog, "en", "home.title", None), "Home");
    }

    #[test]
    fn test_numeric_parameter() {
        let catalog = catalog();
        let params = params!["count" => 3];
        assert_eq!(resolve(&catalog, "en", "ready", Some(&params)), "Ready: 3");
    }

    #[test]
    fn test_repeated_token() {
        let catalog = catalog();
        let params = params!["x" => "A"];
        assert_eq!(resolve(&catalog, "en", "twice", Some(&params)), "A and A");
    }

    #[test]
    fn test_unbound_token_is_left_alone() {
        let catalog = catalog();
        let resolution = resolve_detailed(&catalog, "en", "hello", Some(&Params::new()));
        assert_eq!(resolution.text, "Hello {{name}}");
        assert_eq!(
            resolution.issues,
            vec![ResolveIssue::UnboundParameter {
                locale: "en".to_string(),
                path: "hello".to_string(),
                name: "name".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_path_echoes_with_one_issue() {
        let catalog = catalog();
        let resolution = resolve_detailed(&catalog, "en", "home.subtitle", None);
        assert_eq!(resolution.text, "home.subtitle");
        assert_eq!(resolution.issues.len(), 1);
        assert!(resolution.issues[0].echoes_path());
    }

    #[test]
    fn test_group_path_echoes() {
        let catalog = catalog();
        let resolution = resolve_detailed(&catalog, "en", "home", Some(&params!["x" => 1]));
        assert_eq!(resolution.text, "home");
        assert_eq!(resolution.issues[0].kind(), "not_a_leaf");
    }

    #[test]
    fn test_unknown_locale_echoes() {
        let catalog = catalog();
        assert_eq!(resolve(&catalog, "fr", "home.title", None), "home.title");
    }

    #[test]
    fn test_substitution_is_single_pass() {
        let catalog = catalog();
        let params = params!["name" => "{{name}}"];
        assert_eq!(
            resolve(&catalog, "en", "hello", Some(&params)),
            "Hello {{name}}"
        );
        let resolution = resolve_detailed(&catalog, "en", "hello", Some(&params));
        assert!(resolution.is_clean());
    }

    #[test]
    fn test_interpolation_edge_cases() {
        let params = params!["a" => "1", "b" => "2"];
        assert_eq!(interpolate("{{a}}{{b}}", &params).text, "12");
        assert_eq!(interpolate("{{a}}}", &params).text, "1}");
        assert_eq!(interpolate("{{{a}}", &params).text, "{1");
        assert_eq!(interpolate("{{ {{a}}", &params).text, "{{ 1");
        assert_eq!(interpolate("open {{a", &params).text, "open {{a");
        assert_eq!(interpolate("{a}", &params).text, "{a}");
        assert_eq!(interpolate("", &params).text, "");

        let empty = interpolate("{{}}", &params);
        assert_eq!(empty.text, "{{}}");
        assert_eq!(empty.unbound, vec![String::new()]);
    }

    #[test]
    fn test_values_are_rendered_with_display() {
        let params = params!["int" => -7, "float" => 2.5, "text" => "ok"];
        assert_eq!(
            interpolate("{{int}} {{float}} {{text}}", &params).text,
            "-7 2.5 ok"
        );
    }

    #[test]
    fn test_identifier_is_not_trimmed() {
        let params = params!["name" => "Poulette"];
        let out = interpolate("Hi {{ name }}", &params);
        assert_eq!(out.text, "Hi {{ name }}");
        assert_eq!(out.unbound, vec![" name ".to_string()]);
    }

    #[test]
    fn test_each_unbound_occurrence_is_reported() {
        let out = interpolate("{{x}} / {{x}} / {{y}}", &params!["y" => 0]);
        assert_eq!(out.text, "{{x}} / {{x}} / 0");
        assert_eq!(out.unbound, vec!["x".to_string(), "x".to_string()]);
    }

    #[test]
    fn test_placeholders() {
        let names = placeholders("Deleted {{teams}} teams, {{games}} games, {{teams}} again");
        assert_eq!(
            names.into_iter().collect::<Vec<_>>(),
            vec!["games".to_string(), "teams".to_string()]
        );
        assert!(placeholders("no tokens").is_empty());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let catalog = catalog();
        let params = params!["count" => 12];
        let first = resolve_detailed(&catalog, "en", "ready", Some(&params));
        let second = resolve_detailed(&catalog, "en", "ready", Some(&params));
        assert_eq!(first, second);
    }
}
