// crates/hearth-i18n/src/tests/resolver.rs
// ============================================================================
// Module: Resolver Tests
// Description: Unit and property tests for key resolution and fallback.
// Purpose: Ensure lookups never fail and fall back in the documented order.
// Dependencies: hearth-i18n resolver module, proptest
// ============================================================================

//! ## Overview
//! Drives the resolver over the bundled catalogs and small hand-built sets to
//! check fallback ordering, substitution, and missing-key telemetry.

use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;

use crate::bundled::bundled_catalogs;
use crate::catalog::Catalog;
use crate::catalog::CatalogSet;
use crate::locale::LocaleId;
use crate::resolver::Resolver;
use crate::telemetry::I18nEvent;
use crate::telemetry::MissingResolution;
use crate::telemetry::RecordingTelemetry;
use crate::template::Substitutions;

fn bundled_resolver() -> Resolver {
    Resolver::new(bundled_catalogs().unwrap(), LocaleId::En)
}

/// Builds a set where only `en` and `de` carry entries.
fn sparse_set() -> Arc<CatalogSet> {
    let mut catalogs: BTreeMap<LocaleId, Catalog> =
        LocaleId::ALL.into_iter().map(|locale| (locale, Catalog::default())).collect();
    catalogs.insert(
        LocaleId::En,
        Catalog::from_entries([("greet", "Hello {{name}}"), ("only.en", "English only")]).unwrap(),
    );
    catalogs.insert(LocaleId::De, Catalog::from_entries([("greet", "Hallo {{name}}")]).unwrap());
    Arc::new(CatalogSet::new(catalogs).unwrap())
}

#[test]
fn resolves_known_keys_per_locale() {
    let resolver = bundled_resolver();
    assert_eq!(resolver.resolve_plain("tasks.claim", LocaleId::Hr), "Preuzmi");
    assert_eq!(resolver.resolve_plain("tasks.claim", LocaleId::En), "Claim");
}

#[test]
fn substitutes_named_values() {
    let resolver = bundled_resolver();
    let subs = Substitutions::new().with("lang", "French");
    assert_eq!(
        resolver.resolve("settings.btn.changeLanguage", LocaleId::En, &subs),
        "Change language (French)"
    );
}

#[test]
fn missing_key_falls_back_to_fallback_catalog() {
    let resolver = bundled_resolver();
    assert_eq!(resolver.resolve_plain("tasks.recurring.weekly", LocaleId::It), "Every week");
    let subs = Substitutions::new().with("points", "5");
    assert_eq!(resolver.resolve("tasks.points", LocaleId::It, &subs), "5 pts");
}

#[test]
fn unknown_key_returns_key_literal() {
    let resolver = bundled_resolver();
    assert_eq!(resolver.resolve_plain("tasks.nope", LocaleId::Hr), "tasks.nope");
    assert_eq!(resolver.resolve_plain("tasks", LocaleId::Hr), "tasks", "branch is not a leaf");
    assert_eq!(resolver.resolve_plain("..", LocaleId::Hr), "..");
}

#[test]
fn empty_key_resolves_to_empty_string() {
    let telemetry = Arc::new(RecordingTelemetry::new());
    let resolver = bundled_resolver().with_telemetry(Arc::clone(&telemetry) as _);
    assert_eq!(resolver.resolve_plain("", LocaleId::En), "");
    assert!(telemetry.events().is_empty());
}

#[test]
fn fallback_locale_is_configurable() {
    let resolver = Resolver::new(sparse_set(), LocaleId::De);
    let subs = Substitutions::new().with("name", "Ana");
    assert_eq!(resolver.resolve("greet", LocaleId::Fr, &subs), "Hallo Ana");
    assert_eq!(resolver.resolve_plain("only.en", LocaleId::Fr), "only.en");
    assert_eq!(resolver.fallback(), LocaleId::De);
}

#[test]
fn lookup_returns_raw_templates() {
    let resolver = Resolver::new(sparse_set(), LocaleId::En);
    assert_eq!(resolver.lookup("greet", LocaleId::De), Some("Hallo {{name}}"));
    assert_eq!(resolver.lookup("greet", LocaleId::Sl), Some("Hello {{name}}"));
    assert_eq!(resolver.lookup("absent", LocaleId::Sl), None);
}

#[test]
fn missing_translations_are_reported() {
    let telemetry = Arc::new(RecordingTelemetry::new());
    let resolver =
        Resolver::new(sparse_set(), LocaleId::En).with_telemetry(Arc::clone(&telemetry) as _);
    let _ = resolver.resolve_plain("greet", LocaleId::De);
    let _ = resolver.resolve_plain("only.en", LocaleId::De);
    let _ = resolver.resolve_plain("absent", LocaleId::De);
    assert_eq!(
        telemetry.events(),
        vec![
            I18nEvent::MissingTranslation {
                key: "only.en".to_string(),
                locale: LocaleId::De,
                fallback: LocaleId::En,
                resolved_from: MissingResolution::FallbackLocale,
            },
            I18nEvent::MissingTranslation {
                key: "absent".to_string(),
                locale: LocaleId::De,
                fallback: LocaleId::En,
                resolved_from: MissingResolution::KeyLiteral,
            },
        ]
    );
}

#[test]
fn every_fallback_key_resolves_in_every_locale() {
    let resolver = bundled_resolver();
    let catalogs = bundled_catalogs().unwrap();
    for key in catalogs.catalog(LocaleId::En).keys() {
        for locale in LocaleId::ALL {
            let text = resolver.resolve_plain(&key, locale);
            assert!(!text.is_empty(), "{key} resolved empty for {locale}");
            assert_ne!(text, key, "{key} fell through to the key literal for {locale}");
        }
    }
}

fn locale_strategy() -> impl Strategy<Value = LocaleId> {
    prop::sample::select(LocaleId::ALL.to_vec())
}

proptest! {
    #[test]
    fn resolve_is_idempotent(
        key in "[a-zA-Z.]{0,24}",
        locale in locale_strategy(),
        value in ".*",
    ) {
        let resolver = bundled_resolver();
        let subs = Substitutions::new().with("name", value);
        let first = resolver.resolve(&key, locale, &subs);
        prop_assert_eq!(first, resolver.resolve(&key, locale, &subs));
    }

    #[test]
    fn non_empty_keys_resolve_non_empty(key in "[a-z.]{1,24}", locale in locale_strategy()) {
        let resolver = bundled_resolver();
        prop_assert!(!resolver.resolve_plain(&key, locale).is_empty());
    }
}
