// crates/hearth-i18n/src/catalog.rs
// ============================================================================
// Module: Locale Catalogs
// Description: Nested key-to-string trees and the per-locale catalog set.
// Purpose: Hold translated copy and answer key-path lookups.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Catalog`] is a tree of string leaves addressed by dot-delimited key
//! paths such as `settings.btn.copy`. A [`CatalogSet`] holds exactly one
//! catalog per [`LocaleId`].
//!
//! ## Invariants
//! - Segment names are non-empty and never contain `.`.
//! - Tree depth never exceeds [`MAX_CATALOG_DEPTH`].
//! - A [`CatalogSet`] always contains every supported locale.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::locale::LOCALE_COUNT;
use crate::locale::LocaleId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Separator between key path segments.
pub const KEY_SEPARATOR: char = '.';
/// Maximum nesting depth accepted for catalog trees.
pub const MAX_CATALOG_DEPTH: usize = 16;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Catalog construction errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Catalog source could not be parsed.
    #[error("catalog parse error: {0}")]
    Parse(String),
    /// Catalog content violates structural limits.
    #[error("invalid catalog: {0}")]
    Invalid(String),
    /// The same key path was supplied twice.
    #[error("duplicate catalog key: {0}")]
    Duplicate(String),
    /// A key path is used both as a leaf and as a branch.
    #[error("conflicting catalog key: {0}")]
    Conflict(String),
    /// A catalog set is missing a supported locale.
    #[error("catalog set missing locale: {0}")]
    MissingLocale(LocaleId),
}

// ============================================================================
// SECTION: Catalog Tree
// ============================================================================

/// Node in a catalog tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogNode {
    /// Translated template string.
    Leaf(String),
    /// Named children.
    Branch(BTreeMap<String, CatalogNode>),
}

/// Translated copy for one locale.
///
/// # Invariants
/// - Constructed only through validating constructors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    /// Top-level feature areas (`tabs`, `common`, ...).
    root: BTreeMap<String, CatalogNode>,
}

impl Catalog {
    /// Parses a catalog from a nested JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the JSON is malformed, contains
    /// non-string leaves, or violates segment and depth limits.
    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        let root: BTreeMap<String, CatalogNode> =
            serde_json::from_str(source).map_err(|err| CatalogError::Parse(err.to_string()))?;
        let catalog = Self {
            root,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Builds a catalog from flat `(key path, template)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on duplicate keys, leaf/branch conflicts, or
    /// invalid key paths.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut root = BTreeMap::new();
        for (key, template) in entries {
            let segments = split_key(key)
                .ok_or_else(|| CatalogError::Invalid(format!("malformed key path: `{key}`")))?;
            if segments.len() > MAX_CATALOG_DEPTH {
                return Err(CatalogError::Invalid(format!("key path too deep: {key}")));
            }
            insert_path(&mut root, &segments, key, template)?;
        }
        Ok(Self {
            root,
        })
    }

    /// Returns the template stored at `key`, if the path ends on a leaf.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let segments = split_key(key)?;
        let (last, parents) = segments.split_last()?;
        let mut level = &self.root;
        for segment in parents {
            match level.get(*segment)? {
                CatalogNode::Branch(children) => level = children,
                CatalogNode::Leaf(_) => return None,
            }
        }
        match level.get(*last)? {
            CatalogNode::Leaf(template) => Some(template.as_str()),
            CatalogNode::Branch(_) => None,
        }
    }

    /// Returns true when `key` addresses a leaf.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns every leaf as `(key path, template)` in sorted path order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        collect_leaves(&self.root, &mut String::new(), &mut out);
        out
    }

    /// Returns every leaf key path in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries().into_iter().map(|(key, _)| key).collect()
    }

    /// Returns the number of leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        count_leaves(&self.root)
    }

    /// Returns true when the catalog has no leaves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks segment names and depth.
    fn validate(&self) -> Result<(), CatalogError> {
        validate_level(&self.root, 1, "")
    }
}

// ============================================================================
// SECTION: Catalog Set
// ============================================================================

/// One catalog per supported locale.
///
/// # Invariants
/// - Every [`LocaleId`] has exactly one catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSet {
    /// Catalogs indexed in [`LocaleId::ALL`] order.
    catalogs: [Catalog; LOCALE_COUNT],
}

impl CatalogSet {
    /// Builds a catalog set, requiring a catalog for every supported locale.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingLocale`] when any locale is absent.
    pub fn new(mut catalogs: BTreeMap<LocaleId, Catalog>) -> Result<Self, CatalogError> {
        if let Some(missing) = LocaleId::ALL.iter().find(|locale| !catalogs.contains_key(locale)) {
            return Err(CatalogError::MissingLocale(*missing));
        }
        let catalogs = LocaleId::ALL.map(|locale| catalogs.remove(&locale).unwrap_or_default());
        Ok(Self {
            catalogs,
        })
    }

    /// Returns the catalog for `locale`.
    #[must_use]
    pub const fn catalog(&self, locale: LocaleId) -> &Catalog {
        &self.catalogs[locale_index(locale)]
    }

    /// Iterates catalogs in [`LocaleId::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (LocaleId, &Catalog)> {
        LocaleId::ALL.into_iter().zip(self.catalogs.iter())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps a locale to its slot in [`CatalogSet`].
const fn locale_index(locale: LocaleId) -> usize {
    match locale {
        LocaleId::Hr => 0,
        LocaleId::En => 1,
        LocaleId::De => 2,
        LocaleId::Fr => 3,
        LocaleId::It => 4,
        LocaleId::Es => 5,
        LocaleId::Sl => 6,
        LocaleId::Sr => 7,
    }
}

/// Splits a key path into segments, rejecting empty paths and segments.
pub(crate) fn split_key(key: &str) -> Option<Vec<&str>> {
    if key.is_empty() {
        return None;
    }
    let segments: Vec<&str> = key.split(KEY_SEPARATOR).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return None;
    }
    Some(segments)
}

/// Inserts a leaf at `segments`, creating branches as needed.
fn insert_path(
    level: &mut BTreeMap<String, CatalogNode>,
    segments: &[&str],
    key: &str,
    template: &str,
) -> Result<(), CatalogError> {
    let Some((first, rest)) = segments.split_first() else {
        return Err(CatalogError::Invalid(format!("malformed key path: `{key}`")));
    };
    if rest.is_empty() {
        return match level.get(*first) {
            Some(CatalogNode::Leaf(_)) => Err(CatalogError::Duplicate(key.to_string())),
            Some(CatalogNode::Branch(_)) => Err(CatalogError::Conflict(key.to_string())),
            None => {
                level.insert((*first).to_string(), CatalogNode::Leaf(template.to_string()));
                Ok(())
            }
        };
    }
    let node = level
        .entry((*first).to_string())
        .or_insert_with(|| CatalogNode::Branch(BTreeMap::new()));
    match node {
        CatalogNode::Branch(children) => insert_path(children, rest, key, template),
        CatalogNode::Leaf(_) => Err(CatalogError::Conflict(key.to_string())),
    }
}

/// Validates one tree level and recurses into branches.
fn validate_level(
    level: &BTreeMap<String, CatalogNode>,
    depth: usize,
    prefix: &str,
) -> Result<(), CatalogError> {
    if depth > MAX_CATALOG_DEPTH {
        return Err(CatalogError::Invalid(format!("catalog nesting too deep at {prefix}")));
    }
    for (name, node) in level {
        if name.is_empty() || name.contains(KEY_SEPARATOR) {
            return Err(CatalogError::Invalid(format!(
                "invalid segment name `{name}` under `{prefix}`"
            )));
        }
        if let CatalogNode::Branch(children) = node {
            validate_level(children, depth + 1, &join_key(prefix, name))?;
        }
    }
    Ok(())
}

/// Appends leaves beneath `level` to `out`.
fn collect_leaves<'a>(
    level: &'a BTreeMap<String, CatalogNode>,
    prefix: &mut String,
    out: &mut Vec<(String, &'a str)>,
) {
    for (name, node) in level {
        let restore = prefix.len();
        if !prefix.is_empty() {
            prefix.push(KEY_SEPARATOR);
        }
        prefix.push_str(name);
        match node {
            CatalogNode::Leaf(template) => out.push((prefix.clone(), template.as_str())),
            CatalogNode::Branch(children) => collect_leaves(children, prefix, out),
        }
        prefix.truncate(restore);
    }
}

/// Counts leaves beneath `level`.
fn count_leaves(level: &BTreeMap<String, CatalogNode>) -> usize {
    level
        .values()
        .map(|node| match node {
            CatalogNode::Leaf(_) => 1,
            CatalogNode::Branch(children) => count_leaves(children),
        })
        .sum()
}

/// Joins a key prefix and segment.
fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() { name.to_string() } else { format!("{prefix}{KEY_SEPARATOR}{name}") }
}
