// crates/hearth-i18n/src/bundled.rs
// ============================================================================
// Module: Bundled Catalogs
// Description: Translated copy compiled into the binary.
// Purpose: Supply the catalog set used at process start.
// Dependencies: crate::catalog
// ============================================================================

//! ## Overview
//! Catalog sources live under `locales/` as nested JSON and are embedded at
//! compile time. They are parsed once and shared behind an [`Arc`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::OnceLock;

use crate::catalog::Catalog;
use crate::catalog::CatalogError;
use crate::catalog::CatalogSet;
use crate::locale::LocaleId;

// ============================================================================
// SECTION: Sources
// ============================================================================

/// Returns the embedded JSON source for `locale`.
#[must_use]
pub const fn bundled_source(locale: LocaleId) -> &'static str {
    match locale {
        LocaleId::Hr => include_str!("../locales/hr.json"),
        LocaleId::En => include_str!("../locales/en.json"),
        LocaleId::De => include_str!("../locales/de.json"),
        LocaleId::Fr => include_str!("../locales/fr.json"),
        LocaleId::It => include_str!("../locales/it.json"),
        LocaleId::Es => include_str!("../locales/es.json"),
        LocaleId::Sl => include_str!("../locales/sl.json"),
        LocaleId::Sr => include_str!("../locales/sr.json"),
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Returns the bundled catalog set, parsing it on first use.
///
/// # Errors
///
/// Returns [`CatalogError`] when an embedded catalog fails to parse.
pub fn bundled_catalogs() -> Result<Arc<CatalogSet>, CatalogError> {
    static BUNDLED: OnceLock<Result<Arc<CatalogSet>, CatalogError>> = OnceLock::new();
    BUNDLED.get_or_init(|| parse_bundled().map(Arc::new)).clone()
}

/// Parses every embedded catalog.
fn parse_bundled() -> Result<CatalogSet, CatalogError> {
    let mut catalogs = BTreeMap::new();
    for locale in LocaleId::ALL {
        let catalog = Catalog::from_json_str(bundled_source(locale)).map_err(|err| match err {
            CatalogError::Parse(message) => CatalogError::Parse(format!("{locale}: {message}")),
            other => other,
        })?;
        catalogs.insert(locale, catalog);
    }
    CatalogSet::new(catalogs)
}
