// crates/hearth-i18n/src/tests/session.rs
// ============================================================================
// Module: Locale Session Tests
// Description: Unit tests for startup restore, locale changes, and persistence.
// Purpose: Pin synchronous visibility and best-effort write behavior.
// Dependencies: hearth-i18n session module, tokio
// ============================================================================

//! ## Overview
//! Builds sessions over in-memory, failing, and gated stores to check the
//! startup precedence and the `set_active` contract.

use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::task::Context;
use std::task::Poll;
use std::task::Waker;

use super::support::FailingStore;
use super::support::GatedStore;
use crate::bundled::bundled_catalogs;
use crate::locale::LocaleId;
use crate::session::DEFAULT_STORAGE_KEY;
use crate::session::LocaleSession;
use crate::session::SessionSettings;
use crate::session::SetActiveOutcome;
use crate::store::InMemoryKeyValueStore;
use crate::store::KeyValueStore;
use crate::telemetry::I18nEvent;
use crate::telemetry::LocaleSource;
use crate::telemetry::RecordingTelemetry;
use crate::template::Substitutions;

async fn session_over(store: Arc<dyn KeyValueStore>) -> LocaleSession {
    LocaleSession::builder(bundled_catalogs().unwrap(), store)
        .with_system_locale(|| Some("de_DE.UTF-8".to_string()))
        .initialize()
        .await
}

#[tokio::test]
async fn empty_store_initializes_to_default() {
    let session = session_over(Arc::new(InMemoryKeyValueStore::new())).await;
    assert_eq!(session.get_active(), LocaleId::Hr);
    assert_eq!(session.initial_source(), LocaleSource::Default);
}

#[tokio::test]
async fn stored_preference_is_restored() {
    let store = InMemoryKeyValueStore::with_entry(DEFAULT_STORAGE_KEY, "sl");
    let session = session_over(Arc::new(store)).await;
    assert_eq!(session.get_active(), LocaleId::Sl);
    assert_eq!(session.initial_source(), LocaleSource::Stored);
}

#[tokio::test]
async fn invalid_stored_value_falls_back_to_default() {
    let telemetry = Arc::new(RecordingTelemetry::new());
    let store = InMemoryKeyValueStore::with_entry(DEFAULT_STORAGE_KEY, "klingon");
    let session = LocaleSession::builder(bundled_catalogs().unwrap(), Arc::new(store))
        .with_telemetry(Arc::clone(&telemetry) as _)
        .initialize()
        .await;
    assert_eq!(session.get_active(), LocaleId::Hr);
    assert_eq!(
        telemetry.events(),
        vec![
            I18nEvent::StoredLocaleRejected {
                value: "klingon".to_string()
            },
            I18nEvent::SessionInitialized {
                locale: LocaleId::Hr,
                source: LocaleSource::Default
            },
        ]
    );
}

#[tokio::test]
async fn unreadable_store_falls_back_to_default() {
    let session = session_over(Arc::new(FailingStore)).await;
    assert_eq!(session.get_active(), LocaleId::Hr);
}

#[tokio::test]
async fn system_locale_is_used_only_when_enabled() {
    let settings = SessionSettings {
        detect_system: true,
        ..SessionSettings::default()
    };
    let session = LocaleSession::builder(
        bundled_catalogs().unwrap(),
        Arc::new(InMemoryKeyValueStore::new()),
    )
    .with_settings(settings.clone())
    .with_system_locale(|| Some("de_DE.UTF-8".to_string()))
    .initialize()
    .await;
    assert_eq!(session.get_active(), LocaleId::De);
    assert_eq!(session.initial_source(), LocaleSource::System);

    let unsupported = LocaleSession::builder(
        bundled_catalogs().unwrap(),
        Arc::new(InMemoryKeyValueStore::new()),
    )
    .with_settings(settings)
    .with_system_locale(|| Some("ja_JP".to_string()))
    .initialize()
    .await;
    assert_eq!(unsupported.get_active(), LocaleId::Hr);
}

#[tokio::test]
async fn stored_preference_beats_system_locale() {
    let settings = SessionSettings {
        detect_system: true,
        ..SessionSettings::default()
    };
    let store = InMemoryKeyValueStore::with_entry(DEFAULT_STORAGE_KEY, "es");
    let session = LocaleSession::builder(bundled_catalogs().unwrap(), Arc::new(store))
        .with_settings(settings)
        .with_system_locale(|| Some("de".to_string()))
        .initialize()
        .await;
    assert_eq!(session.get_active(), LocaleId::Es);
}

#[tokio::test]
async fn custom_default_and_storage_key_are_honored() {
    let store = InMemoryKeyValueStore::with_entry("hearth.locale", "fr");
    let settings = SessionSettings {
        default_locale: LocaleId::It,
        storage_key: "profile.language".to_string(),
        ..SessionSettings::default()
    };
    let session = LocaleSession::builder(bundled_catalogs().unwrap(), Arc::new(store.clone()))
        .with_settings(settings)
        .initialize()
        .await;
    assert_eq!(session.get_active(), LocaleId::It);
    session.set_active(LocaleId::Sr).wait().await;
    assert_eq!(store.get("profile.language").await.unwrap(), Some("sr".to_string()));
    assert_eq!(store.get("hearth.locale").await.unwrap(), Some("fr".to_string()));
}

#[tokio::test]
async fn set_active_is_visible_before_the_write_completes() {
    let store = GatedStore::default();
    let session = session_over(Arc::new(store.clone())).await;
    let pending = session.set_active(LocaleId::Fr);
    assert!(pending.is_scheduled());
    assert_eq!(session.get_active(), LocaleId::Fr);
    assert_eq!(session.translate_plain("tasks.claim"), "Prendre");
    assert_eq!(store.inner.get(DEFAULT_STORAGE_KEY).await.unwrap(), None);
    store.release();
    pending.wait().await;
    assert_eq!(store.inner.get(DEFAULT_STORAGE_KEY).await.unwrap(), Some("fr".to_string()));
}

#[tokio::test]
async fn unsupported_code_is_a_no_op() {
    let telemetry = Arc::new(RecordingTelemetry::new());
    let store = InMemoryKeyValueStore::new();
    let session = LocaleSession::builder(bundled_catalogs().unwrap(), Arc::new(store.clone()))
        .with_telemetry(Arc::clone(&telemetry) as _)
        .initialize()
        .await;
    session.set_active(LocaleId::En).wait().await;
    let _ = telemetry.drain();
    let outcome = session.set_active_code("xx");
    assert!(matches!(outcome, SetActiveOutcome::Rejected));
    assert!(!outcome.is_applied());
    assert_eq!(session.get_active(), LocaleId::En);
    assert_eq!(store.get(DEFAULT_STORAGE_KEY).await.unwrap(), Some("en".to_string()));
    assert_eq!(
        telemetry.events(),
        vec![I18nEvent::LocaleRejected {
            value: "xx".to_string()
        }]
    );
}

#[tokio::test]
async fn set_active_code_reports_previous_locale() {
    let store = InMemoryKeyValueStore::new();
    let session = session_over(Arc::new(store.clone())).await;
    let SetActiveOutcome::Applied {
        previous,
        pending,
    } = session.set_active_code("it-IT")
    else {
        panic!("it-IT should be accepted");
    };
    assert_eq!(previous, LocaleId::Hr);
    pending.wait().await;
    assert_eq!(session.get_active(), LocaleId::It);
    assert_eq!(store.get(DEFAULT_STORAGE_KEY).await.unwrap(), Some("it".to_string()));
}

#[tokio::test]
async fn reselecting_the_active_locale_still_persists() {
    let store = InMemoryKeyValueStore::new();
    let session = session_over(Arc::new(store.clone())).await;
    session.set_active(LocaleId::Hr).wait().await;
    assert_eq!(store.get(DEFAULT_STORAGE_KEY).await.unwrap(), Some("hr".to_string()));
}

#[tokio::test]
async fn write_failures_do_not_affect_the_session() {
    let telemetry = Arc::new(RecordingTelemetry::new());
    let session = LocaleSession::builder(bundled_catalogs().unwrap(), Arc::new(FailingStore))
        .with_telemetry(Arc::clone(&telemetry) as _)
        .initialize()
        .await;
    session.set_active(LocaleId::De).wait().await;
    assert_eq!(session.get_active(), LocaleId::De);
    assert!(
        telemetry
            .events()
            .iter()
            .any(|event| matches!(event, I18nEvent::StoreWriteFailed { .. }))
    );
}

#[tokio::test]
async fn clones_share_the_active_locale() {
    let session = session_over(Arc::new(InMemoryKeyValueStore::new())).await;
    let clone = session.clone();
    let _ = clone.set_active(LocaleId::Es);
    assert_eq!(session.get_active(), LocaleId::Es);
}

#[tokio::test]
async fn clear_preference_keeps_active_locale() {
    let store = InMemoryKeyValueStore::new();
    let session = session_over(Arc::new(store.clone())).await;
    session.set_active(LocaleId::Sr).wait().await;
    session.clear_preference().await;
    assert_eq!(session.get_active(), LocaleId::Sr);
    assert_eq!(store.get(DEFAULT_STORAGE_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn translate_follows_the_active_locale() {
    let session = session_over(Arc::new(InMemoryKeyValueStore::new())).await;
    let subs = Substitutions::new().with("lang", "English");
    assert_eq!(
        session.translate("settings.btn.changeLanguage", &subs),
        "Promijeni jezik (English)"
    );
    let _ = session.set_active(LocaleId::En);
    assert_eq!(
        crate::t!(session, "settings.btn.changeLanguage", lang = "Hrvatski"),
        "Change language (Hrvatski)"
    );
    assert_eq!(crate::t!(session, "tasks.claim"), "Claim");
}

fn write_failures(telemetry: &RecordingTelemetry) -> Vec<String> {
    telemetry
        .events()
        .into_iter()
        .filter_map(|event| match event {
            I18nEvent::StoreWriteFailed {
                key,
                error,
            } => Some(format!("{key}: {error}")),
            _ => None,
        })
        .collect()
}

#[test]
fn set_active_without_runtime_reports_unscheduled_write() {
    let telemetry = Arc::new(RecordingTelemetry::new());
    let builder =
        LocaleSession::builder(bundled_catalogs().unwrap(), Arc::new(InMemoryKeyValueStore::new()))
            .with_telemetry(Arc::clone(&telemetry) as _);
    let mut initialize = pin!(builder.initialize());
    let Poll::Ready(session) =
        initialize.as_mut().poll(&mut Context::from_waker(Waker::noop()))
    else {
        panic!("in-memory initialization should complete without suspending");
    };

    let pending = session.set_active(LocaleId::Fr);
    assert!(!pending.is_scheduled());
    assert_eq!(session.get_active(), LocaleId::Fr);
    let failures = write_failures(&telemetry);
    assert_eq!(failures.len(), 1);
    assert!(failures[0].starts_with("hearth.locale: no async runtime"));
}

#[test]
fn set_active_after_runtime_shutdown_reports_cancelled_write() {
    let telemetry = Arc::new(RecordingTelemetry::new());
    let store = InMemoryKeyValueStore::new();
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let session = runtime.block_on(
        LocaleSession::builder(bundled_catalogs().unwrap(), Arc::new(store.clone()))
            .with_telemetry(Arc::clone(&telemetry) as _)
            .initialize(),
    );
    drop(runtime);

    let pending = session.set_active(LocaleId::Fr);
    assert!(pending.is_scheduled());
    drop(pending);
    assert_eq!(session.get_active(), LocaleId::Fr);
    let failures = write_failures(&telemetry);
    assert_eq!(failures.len(), 1);
    assert!(failures[0].starts_with("hearth.locale: background write cancelled"));

    let check = tokio::runtime::Builder::new_current_thread().build().unwrap();
    assert_eq!(check.block_on(store.get(DEFAULT_STORAGE_KEY)).unwrap(), None);
}

#[tokio::test]
async fn completed_writes_report_no_failure() {
    let telemetry = Arc::new(RecordingTelemetry::new());
    let session =
        LocaleSession::builder(bundled_catalogs().unwrap(), Arc::new(InMemoryKeyValueStore::new()))
            .with_telemetry(Arc::clone(&telemetry) as _)
            .initialize()
            .await;
    session.set_active(LocaleId::Es).wait().await;
    assert!(write_failures(&telemetry).is_empty());
}
