//! The language-keyed tree of display templates
//!
//! A [`Catalog`] maps each locale tag to a root group of [`Node`]s. It is
//! built once at startup, either from the content shipped in this crate
//! ([`Catalog::builtin`]) or from a directory of `<tag>.json` files
//! ([`Catalog::from_dir`]), and is read-only afterwards.
//!
//! Catalog documents are nested JSON objects whose leaves are strings.
//! Anything else (numbers, booleans, null, arrays) is a content defect and
//! fails construction with [`I18nError::MalformedCatalog`].

use crate::error::{I18nError, I18nResult, ResolveIssue};
use crate::locale::LocaleTag;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

const BUILTIN_SOURCES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("fr", include_str!("../locales/fr.json")),
];

static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| {
    let catalog = Catalog::from_json_sources(BUILTIN_SOURCES.iter().copied())
        .unwrap_or_else(|e| panic!("built-in catalog is malformed: {e}"));
    Arc::new(catalog)
});

/// One node of the catalog tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Displayable template, possibly containing `{{name}}` tokens
    Leaf(String),
    /// Named children, no text of its own
    Group(BTreeMap<String, Node>),
}

impl Node {
    /// Create a leaf
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    /// Create a group from `(name, child)` pairs
    pub fn group<K, I>(children: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Node)>,
    {
        Self::Group(
            children
                .into_iter()
                .map(|(name, child)| (name.into(), child))
                .collect(),
        )
    }

    /// Text of a leaf
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            Self::Group(_) => None,
        }
    }

    /// Child named `segment`, if this is a group
    pub fn child(&self, segment: &str) -> Option<&Node> {
        match self {
            Self::Group(children) => children.get(segment),
            Self::Leaf(_) => None,
        }
    }

    fn from_json(value: Value, locale: &str, path: &mut Vec<String>) -> I18nResult<Self> {
        match value {
            Value::String(text) => Ok(Self::Leaf(text)),
            Value::Object(map) => {
                let mut children = BTreeMap::new();
                for (name, child) in map {
                    path.push(name.clone());
                    check_key(&name, locale, path)?;
                    let node = Self::from_json(child, locale, path)?;
                    path.pop();
                    children.insert(name, node);
                }
                Ok(Self::Group(children))
            }
            other => Err(I18nError::MalformedCatalog {
                locale: locale.to_string(),
                path: path.join("."),
                reason: format!("expected text or object, found {}", json_kind(&other)),
            }),
        }
    }

    fn check_keys(&self, locale: &str, path: &mut Vec<String>) -> I18nResult<()> {
        if let Self::Group(children) = self {
            for (name, child) in children {
                path.push(name.clone());
                check_key(name, locale, path)?;
                child.check_keys(locale, path)?;
                path.pop();
            }
        }
        Ok(())
    }

    fn collect_leaf_paths(&self, prefix: &mut Vec<String>, out: &mut Vec<String>) {
        match self {
            Self::Leaf(_) => out.push(prefix.join(".")),
            Self::Group(children) => {
                for (name, child) in children {
                    prefix.push(name.clone());
                    child.collect_leaf_paths(prefix, out);
                    prefix.pop();
                }
            }
        }
    }
}

/// Keys are path segments, so a `.` inside one could never be reached.
fn check_key(name: &str, locale: &str, path: &[String]) -> I18nResult<()> {
    if name.contains('.') {
        return Err(I18nError::MalformedCatalog {
            locale: locale.to_string(),
            path: path.join("."),
            reason: "key contains '.'".to_string(),
        });
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "text",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Immutable, language-keyed tree of display templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    locales: BTreeMap<String, Node>,
}

impl Catalog {
    /// Start building a catalog
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The catalog shipped with the application, built once per process.
    ///
    /// # Panics
    ///
    /// Panics if the embedded content is malformed. That content is under
    /// developer control, so this is a build defect rather than a runtime
    /// condition.
    pub fn builtin() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    /// Build a catalog from `(tag, json)` documents
    pub fn from_json_sources<'a, I>(sources: I) -> I18nResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        sources
            .into_iter()
            .fold(Self::builder(), |builder, (tag, json)| builder.json(tag, json))
            .build()
    }

    /// Load every `<tag>.json` file found directly inside `dir`.
    ///
    /// The directory must hold only catalogs: any `*.json` whose stem parses
    /// as a language identifier (`package.json` does) becomes a locale.
    /// Stems that do not parse are skipped.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> I18nResult<Self> {
        let dir = dir.as_ref();
        debug!("Loading catalog directory: {:?}", dir);

        if !dir.is_dir() {
            warn!("Catalog directory does not exist: {:?}", dir);
            return Err(I18nError::ResourceLoad {
                path: dir.to_string_lossy().to_string(),
            });
        }

        let mut builder = Self::builder();
        let mut found = 0_usize;
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(tag) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if LocaleTag::parse(tag).is_err() {
                debug!("Skipping {:?}: file stem is not a locale tag", path);
                continue;
            }
            let content = fs::read_to_string(&path).map_err(|_| I18nError::ResourceLoad {
                path: path.to_string_lossy().to_string(),
            })?;
            debug!("Taking {:?} as the catalog for locale {}", path, tag);
            builder = builder.json(tag, content);
            found += 1;
        }

        if found == 0 {
            warn!("No catalog files found in {:?}", dir);
            return Err(I18nError::ResourceLoad {
                path: dir.to_string_lossy().to_string(),
            });
        }

        let catalog = builder.build()?;
        info!(
            "Loaded catalog from {:?} with locales: {:?}",
            dir,
            catalog.locales()
        );
        Ok(catalog)
    }

    /// Root group of a locale
    pub fn root(&self, locale: &str) -> Option<&Node> {
        self.locales.get(locale)
    }

    /// Whether the catalog holds content for `locale`
    pub fn contains_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Locale tags, sorted
    pub fn locales(&self) -> Vec<&str> {
        self.locales.keys().map(String::as_str).collect()
    }

    /// Number of locales
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Whether the catalog has no locales at all
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Node at `path`, whatever its kind
    pub fn node(&self, locale: &str, path: &str) -> Option<&Node> {
        path.split('.')
            .try_fold(self.root(locale)?, |node, segment| node.child(segment))
    }

    /// Walk `path` down to a leaf and return its template.
    ///
    /// The error names exactly why the walk stopped; the resolver turns it
    /// into a diagnostic and a path echo.
    pub fn lookup(&self, locale: &str, path: &str) -> Result<&str, ResolveIssue> {
        let root = self
            .root(locale)
            .ok_or_else(|| ResolveIssue::LocaleNotFound {
                locale: locale.to_string(),
                path: path.to_string(),
            })?;

        let mut node = root;
        for segment in path.split('.') {
            node = node
                .child(segment)
                .ok_or_else(|| ResolveIssue::KeyNotFound {
                    locale: locale.to_string(),
                    path: path.to_string(),
                    segment: segment.to_string(),
                })?;
        }

        node.as_text().ok_or_else(|| ResolveIssue::NotALeaf {
            locale: locale.to_string(),
            path: path.to_string(),
        })
    }

    /// Dot-paths of every leaf in `locale`, sorted
    pub fn leaf_paths(&self, locale: &str) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(root) = self.root(locale) {
            root.collect_leaf_paths(&mut Vec::new(), &mut out);
        }
        out.sort_unstable();
        out
    }
}

enum Source {
    Json(String),
    Tree(Node),
}

/// Collects locale content and validates it in [`CatalogBuilder::build`].
#[derive(Default)]
pub struct CatalogBuilder {
    sources: Vec<(String, Source)>,
}

impl CatalogBuilder {
    /// Add a locale from a JSON document
    #[must_use]
    pub fn json(mut self, tag: &str, json: impl Into<String>) -> Self {
        self.sources.push((tag.to_string(), Source::Json(json.into())));
        self
    }

    /// Add a locale from an already built tree; the root must be a group
    #[must_use]
    pub fn locale(mut self, tag: &str, root: Node) -> Self {
        self.sources.push((tag.to_string(), Source::Tree(root)));
        self
    }

    /// Validate every source and freeze the catalog.
    ///
    /// Later sources for the same tag replace earlier ones.
    pub fn build(self) -> I18nResult<Catalog> {
        let mut locales = BTreeMap::new();

        for (tag, source) in self.sources {
            let tag = LocaleTag::parse(&tag)?;
            let root = match source {
                Source::Json(json) => {
                    let value: Value =
                        serde_json::from_str(&json).map_err(|source| I18nError::CatalogParse {
                            locale: tag.to_string(),
                            source,
                        })?;
                    Node::from_json(value, tag.as_str(), &mut Vec::new())?
                }
                Source::Tree(root) => {
                    root.check_keys(tag.as_str(), &mut Vec::new())?;
                    root
                }
            };

            if !matches!(root, Node::Group(_)) {
                return Err(I18nError::MalformedCatalog {
                    locale: tag.to_string(),
                    path: String::new(),
                    reason: "catalog root must be an object".to_string(),
                });
            }

            if locales.insert(tag.to_string(), root).is_some() {
                warn!("Locale {} defined more than once, keeping the last definition", tag);
            }
        }

        debug!("Built catalog with {} locales", locales.len());
        Ok(Catalog { locales })
    }
}
