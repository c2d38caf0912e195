// crates/hearth-i18n/src/resolver.rs
// ============================================================================
// Module: Translation Resolver
// Description: Key path lookup with locale fallback and substitution.
// Purpose: Turn (key, locale, substitutions) into display text that never fails.
// Dependencies: crate::catalog, crate::template, crate::telemetry
// ============================================================================

//! ## Overview
//! [`Resolver::resolve`] looks a key up in the requested locale's catalog,
//! then in the fallback locale's catalog, and finally returns the key path
//! itself. The located template is rendered with [`render`].
//!
//! ## Invariants
//! - Resolution never fails and never panics.
//! - Output depends only on the arguments and the catalog set; telemetry is
//!   observe-only.
//! - An empty key resolves to an empty string.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use crate::catalog::CatalogSet;
use crate::locale::LocaleId;
use crate::telemetry::I18nEvent;
use crate::telemetry::I18nTelemetry;
use crate::telemetry::MissingResolution;
use crate::telemetry::NoopTelemetry;
use crate::template::Substitutions;
use crate::template::render;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves key paths against a catalog set.
#[derive(Clone)]
pub struct Resolver {
    /// Catalogs for every supported locale.
    catalogs: Arc<CatalogSet>,
    /// Locale consulted when the requested one lacks a key.
    fallback: LocaleId,
    /// Sink for missing-translation events.
    telemetry: Arc<dyn I18nTelemetry>,
}

impl Resolver {
    /// Creates a resolver with no-op telemetry.
    #[must_use]
    pub fn new(catalogs: Arc<CatalogSet>, fallback: LocaleId) -> Self {
        Self {
            catalogs,
            fallback,
            telemetry: Arc::new(NoopTelemetry),
        }
    }

    /// Replaces the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn I18nTelemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Returns the fallback locale.
    #[must_use]
    pub const fn fallback(&self) -> LocaleId {
        self.fallback
    }

    /// Returns the catalog set.
    #[must_use]
    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    /// Returns the raw template for `key`, applying locale fallback only.
    #[must_use]
    pub fn lookup(&self, key: &str, locale: LocaleId) -> Option<&str> {
        self.catalogs
            .catalog(locale)
            .get(key)
            .or_else(|| self.catalogs.catalog(self.fallback).get(key))
    }

    /// Resolves `key` for `locale` and renders `substitutions` into it.
    #[must_use]
    pub fn resolve(&self, key: &str, locale: LocaleId, substitutions: &Substitutions) -> String {
        if let Some(template) = self.catalogs.catalog(locale).get(key) {
            return render(template, substitutions);
        }
        if key.is_empty() {
            return String::new();
        }
        if let Some(template) = self.catalogs.catalog(self.fallback).get(key) {
            self.report_missing(key, locale, MissingResolution::FallbackLocale);
            return render(template, substitutions);
        }
        self.report_missing(key, locale, MissingResolution::KeyLiteral);
        key.to_string()
    }

    /// Resolves `key` for `locale` without substitutions.
    #[must_use]
    pub fn resolve_plain(&self, key: &str, locale: LocaleId) -> String {
        self.resolve(key, locale, &Substitutions::new())
    }

    /// Reports a lookup that missed the requested locale.
    fn report_missing(&self, key: &str, locale: LocaleId, resolved_from: MissingResolution) {
        self.telemetry.record(I18nEvent::MissingTranslation {
            key: key.to_string(),
            locale,
            fallback: self.fallback,
            resolved_from,
        });
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").field("fallback", &self.fallback).finish_non_exhaustive()
    }
}
