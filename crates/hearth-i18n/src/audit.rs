// crates/hearth-i18n/src/audit.rs
// ============================================================================
// Module: Catalog Audit
// Description: Completeness and placeholder checks across locale catalogs.
// Purpose: Catch translation gaps and drift mechanically instead of by eye.
// Dependencies: serde, crate::template
// ============================================================================

//! ## Overview
//! [`audit_catalogs`] compares every catalog in a set against a base catalog
//! (normally the fallback locale). Missing keys are tolerated at runtime
//! because the resolver falls back, so they are reported separately from
//! structural defects: keys the base lacks, placeholder drift, and templates
//! that fail to parse.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::catalog::CatalogSet;
use crate::locale::LocaleId;
use crate::template::placeholder_names;

// ============================================================================
// SECTION: Report Types
// ============================================================================

/// Placeholder sets that differ from the base for one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderMismatch {
    /// Key path.
    pub key: String,
    /// Placeholders in the base template.
    pub expected: BTreeSet<String>,
    /// Placeholders in this locale's template.
    pub found: BTreeSet<String>,
}

/// Template that fails placeholder parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedTemplate {
    /// Key path.
    pub key: String,
    /// Parse error message.
    pub error: String,
}

/// Audit findings for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleAudit {
    /// Audited locale.
    pub locale: LocaleId,
    /// Base keys this locale has.
    pub translated: usize,
    /// Base key count.
    pub total: usize,
    /// Base keys this locale lacks.
    pub missing: Vec<String>,
    /// Keys this locale has that the base lacks.
    pub extra: Vec<String>,
    /// Keys whose placeholder sets differ from the base.
    pub placeholder_mismatches: Vec<PlaceholderMismatch>,
    /// Keys whose templates fail to parse.
    pub malformed: Vec<MalformedTemplate>,
}

impl LocaleAudit {
    /// Returns true when only missing keys (if any) were found.
    #[must_use]
    pub fn is_structurally_sound(&self) -> bool {
        self.extra.is_empty() && self.placeholder_mismatches.is_empty() && self.malformed.is_empty()
    }

    /// Returns true when sound and no base key is missing.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_structurally_sound() && self.missing.is_empty()
    }
}

/// Audit findings for a catalog set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Locale the others were compared against.
    pub base: LocaleId,
    /// Per-locale findings in [`LocaleId::ALL`] order.
    pub locales: Vec<LocaleAudit>,
}

impl AuditReport {
    /// Returns the findings for `locale`.
    #[must_use]
    pub fn locale(&self, locale: LocaleId) -> Option<&LocaleAudit> {
        self.locales.iter().find(|audit| audit.locale == locale)
    }

    /// Returns true when no locale has structural defects.
    #[must_use]
    pub fn is_structurally_sound(&self) -> bool {
        self.locales.iter().all(LocaleAudit::is_structurally_sound)
    }

    /// Returns true when every locale is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.locales.iter().all(LocaleAudit::is_complete)
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audits every catalog in `set` against the catalog for `base`.
#[must_use]
pub fn audit_catalogs(set: &CatalogSet, base: LocaleId) -> AuditReport {
    let base_entries: BTreeMap<String, &str> = set.catalog(base).entries().into_iter().collect();
    let locales =
        set.iter().map(|(locale, catalog)| audit_locale(locale, catalog, &base_entries)).collect();
    AuditReport {
        base,
        locales,
    }
}

/// Audits one catalog against the base entries.
fn audit_locale(
    locale: LocaleId,
    catalog: &Catalog,
    base_entries: &BTreeMap<String, &str>,
) -> LocaleAudit {
    let entries: BTreeMap<String, &str> = catalog.entries().into_iter().collect();
    let missing: Vec<String> =
        base_entries.keys().filter(|key| !entries.contains_key(*key)).cloned().collect();
    let extra: Vec<String> =
        entries.keys().filter(|key| !base_entries.contains_key(*key)).cloned().collect();
    let mut placeholder_mismatches = Vec::new();
    let mut malformed = Vec::new();
    for (key, template) in &entries {
        let found = match placeholder_names(template) {
            Ok(found) => found,
            Err(err) => {
                malformed.push(MalformedTemplate {
                    key: key.clone(),
                    error: err.to_string(),
                });
                continue;
            }
        };
        let Some(base_template) = base_entries.get(key) else {
            continue;
        };
        // Base parse failures are reported under the base locale itself.
        let Ok(expected) = placeholder_names(base_template) else {
            continue;
        };
        if expected != found {
            placeholder_mismatches.push(PlaceholderMismatch {
                key: key.clone(),
                expected,
                found,
            });
        }
    }
    LocaleAudit {
        locale,
        translated: base_entries.len() - missing.len(),
        total: base_entries.len(),
        missing,
        extra,
        placeholder_mismatches,
        malformed,
    }
}
