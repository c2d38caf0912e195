// crates/hearth-i18n/src/lib.rs
// ============================================================================
// Module: Hearth i18n Library
// Description: Public API surface for Hearth localization.
// Purpose: Expose catalogs, the resolver, and the locale session.
// Dependencies: crate::{audit, bundled, catalog, locale, resolver, session, store,
//               telemetry, template}
// ============================================================================

//! ## Overview
//! Hearth ships translated copy for eight locales. This crate turns a key
//! path such as `tasks.claim` into display text for the active locale,
//! falling back to a second locale and then to the key itself, so text
//! rendering never fails. The active locale lives in an explicit
//! [`LocaleSession`] that restores the user's choice at startup and persists
//! changes in the background.
//!
//! ```no_run
//! # async fn demo() -> Result<(), hearth_i18n::CatalogError> {
//! use std::sync::Arc;
//!
//! use hearth_i18n::InMemoryKeyValueStore;
//! use hearth_i18n::LocaleSession;
//! use hearth_i18n::bundled_catalogs;
//!
//! let store = Arc::new(InMemoryKeyValueStore::new());
//! let session = LocaleSession::builder(bundled_catalogs()?, store)
//!     .initialize()
//!     .await;
//! let label = hearth_i18n::t!(session, "settings.btn.changeLanguage", lang = "Hrvatski");
//! # let _ = label;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod bundled;
pub mod catalog;
pub mod locale;
mod macros;
pub mod resolver;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod template;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditReport;
pub use audit::LocaleAudit;
pub use audit::audit_catalogs;
pub use bundled::bundled_catalogs;
pub use catalog::Catalog;
pub use catalog::CatalogError;
pub use catalog::CatalogSet;
pub use locale::LocaleId;
pub use locale::UnsupportedLocale;
pub use resolver::Resolver;
pub use session::DEFAULT_FALLBACK_LOCALE;
pub use session::DEFAULT_STORAGE_KEY;
pub use session::DEFAULT_UI_LOCALE;
pub use session::LocaleSession;
pub use session::PendingWrite;
pub use session::SessionBuilder;
pub use session::SessionSettings;
pub use session::SetActiveOutcome;
pub use store::InMemoryKeyValueStore;
pub use store::KeyValueStore;
pub use store::PreferenceStore;
pub use store::StoreError;
pub use telemetry::I18nEvent;
pub use telemetry::I18nTelemetry;
pub use telemetry::JsonLinesTelemetry;
pub use telemetry::LocaleSource;
pub use telemetry::NoopTelemetry;
pub use telemetry::RecordingTelemetry;
pub use template::Substitutions;
