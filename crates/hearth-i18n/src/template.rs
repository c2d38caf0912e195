// crates/hearth-i18n/src/template.rs
// ============================================================================
// Module: Template Substitution
// Description: `{{name}}` placeholder rendering and parsing.
// Purpose: Replace named placeholders in catalog leaves with caller values.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Catalog leaves may contain `{{name}}` placeholders. [`render`] replaces
//! each one with the matching value from [`Substitutions`] in a single pass.
//!
//! ## Invariants
//! - A placeholder without a supplied value is emitted verbatim (`{{name}}`).
//! - Whitespace inside the braces is ignored (`{{ name }}` matches `name`).
//! - Substituted values are never re-scanned for placeholders.
//! - An unterminated or stray `{{` is copied through unchanged; a placeholder
//!   opens at the last `{{` before its closing `}}`.
//! - Rendering never fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Placeholder opening delimiter.
const OPEN: &str = "{{";
/// Placeholder closing delimiter.
const CLOSE: &str = "}}";

// ============================================================================
// SECTION: Substitutions
// ============================================================================

/// Named substitution values for a single lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    /// Values keyed by placeholder name.
    values: BTreeMap<String, String>,
}

impl Substitutions {
    /// Creates an empty substitution set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Adds a value and returns the updated set.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns true when no values are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Substitutions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect(),
        }
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders `template`, replacing known placeholders with their values.
#[must_use]
pub fn render(template: &str, substitutions: &Substitutions) -> String {
    if substitutions.is_empty() || !template.contains(OPEN) {
        return template.to_string();
    }
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(first) = rest.find(OPEN) {
        let Some(end) = rest[first + OPEN.len() ..].find(CLOSE) else {
            break;
        };
        let close = first + OPEN.len() + end;
        // The placeholder opens at the last `{{` before its `}}`.
        let start = rest[.. close].rfind(OPEN).unwrap_or(first);
        out.push_str(&rest[.. start]);
        let name = rest[start + OPEN.len() .. close].trim();
        let consumed = close + CLOSE.len();
        match substitutions.get(name) {
            Some(value) if is_placeholder_name(name) => out.push_str(value),
            _ => out.push_str(&rest[start .. consumed]),
        }
        rest = &rest[consumed ..];
    }
    out.push_str(rest);
    out
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Template syntax errors reported by [`placeholder_names`].
///
/// # Invariants
/// - Offsets are byte offsets into the template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// `{{` without a matching `}}`.
    #[error("unclosed placeholder at byte {offset}")]
    Unterminated {
        /// Offset of the opening delimiter.
        offset: usize,
    },
    /// `{{}}` with nothing inside.
    #[error("empty placeholder at byte {offset}")]
    Empty {
        /// Offset of the opening delimiter.
        offset: usize,
    },
    /// Placeholder name outside `[A-Za-z_][A-Za-z0-9_]*`.
    #[error("invalid placeholder name `{name}` at byte {offset}")]
    InvalidName {
        /// Offending name.
        name: String,
        /// Offset of the opening delimiter.
        offset: usize,
    },
}

/// Returns the distinct placeholder names in `template`.
///
/// # Errors
///
/// Returns [`TemplateError`] when a placeholder is unterminated, empty, or
/// uses characters outside the identifier set.
pub fn placeholder_names(template: &str) -> Result<BTreeSet<String>, TemplateError> {
    let mut names = BTreeSet::new();
    let mut offset = 0usize;
    while let Some(found) = template[offset ..].find(OPEN) {
        let start = offset + found;
        let body_start = start + OPEN.len();
        let Some(end) = template[body_start ..].find(CLOSE) else {
            return Err(TemplateError::Unterminated {
                offset: start,
            });
        };
        let name = template[body_start .. body_start + end].trim();
        if name.is_empty() {
            return Err(TemplateError::Empty {
                offset: start,
            });
        }
        if !is_placeholder_name(name) {
            return Err(TemplateError::InvalidName {
                name: name.to_string(),
                offset: start,
            });
        }
        names.insert(name.to_string());
        offset = body_start + end + CLOSE.len();
    }
    Ok(names)
}

/// Returns true when `name` is a valid placeholder identifier.
fn is_placeholder_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
