//! Cross-locale consistency report.
//!
//! Locales are allowed to diverge at runtime; the resolver simply echoes the
//! path of anything missing. The audit makes that divergence visible so it
//! can be caught in tests instead of on screen.

use crate::catalog::{Catalog, Node};
use crate::resolver::placeholders;
use std::collections::{BTreeMap, BTreeSet};

/// A leaf whose tokens differ from the reference locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatch {
    /// Dot-path of the leaf
    pub path: String,
    /// Locale the expected set was taken from
    pub reference_locale: String,
    /// Token names in the reference locale
    pub expected: BTreeSet<String>,
    /// Token names in the audited locale
    pub found: BTreeSet<String>,
}

/// Findings for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleAudit {
    /// Locale tag
    pub locale: String,
    /// Leaf paths other locales define and this one does not
    pub missing: Vec<String>,
    /// Paths that are text elsewhere but a group here
    pub not_a_leaf: Vec<String>,
    /// Leaves whose token names disagree with the reference locale
    pub placeholder_mismatches: Vec<PlaceholderMismatch>,
}

impl LocaleAudit {
    /// Whether this locale agrees with all the others
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty() && self.not_a_leaf.is_empty() && self.placeholder_mismatches.is_empty()
    }
}

/// Report over every locale of a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogAudit {
    /// Number of distinct leaf paths across all locales
    pub total_paths: usize,
    /// Per-locale findings, sorted by tag
    pub locales: Vec<LocaleAudit>,
}

impl CatalogAudit {
    /// Audit `catalog`.
    ///
    /// The reference token set for a path comes from the first locale, in tag
    /// order, that defines the path as text.
    pub fn run(catalog: &Catalog) -> Self {
        let mut reference: BTreeMap<String, (String, BTreeSet<String>)> = BTreeMap::new();
        for locale in catalog.locales() {
            for path in catalog.leaf_paths(locale) {
                if reference.contains_key(&path) {
                    continue;
                }
                let tokens = catalog
                    .lookup(locale, &path)
                    .map(placeholders)
                    .unwrap_or_default();
                reference.insert(path, (locale.to_string(), tokens));
            }
        }

        let locales = catalog
            .locales()
            .into_iter()
            .map(|locale| {
                let mut audit = LocaleAudit {
                    locale: locale.to_string(),
                    missing: Vec::new(),
                    not_a_leaf: Vec::new(),
                    placeholder_mismatches: Vec::new(),
                };

                for (path, (reference_locale, expected)) in &reference {
                    match catalog.node(locale, path) {
                        None => audit.missing.push(path.clone()),
                        Some(Node::Group(_)) => audit.not_a_leaf.push(path.clone()),
                        Some(Node::Leaf(text)) => {
                            let found = placeholders(text);
                            if &found != expected {
                                audit.placeholder_mismatches.push(PlaceholderMismatch {
                                    path: path.clone(),
                                    reference_locale: reference_locale.clone(),
                                    expected: expected.clone(),
                                    found,
                                });
                            }
                        }
                    }
                }

                audit
            })
            .collect();

        Self {
            total_paths: reference.len(),
            locales,
        }
    }

    /// Whether every locale defines the same leaves with the same tokens
    pub fn is_consistent(&self) -> bool {
        self.locales.iter().all(LocaleAudit::is_consistent)
    }

    /// Findings for one locale
    pub fn locale(&self, tag: &str) -> Option<&LocaleAudit> {
        self.locales.iter().find(|audit| audit.locale == tag)
    }
}
