// crates/hearth-i18n/src/session.rs
// ============================================================================
// Module: Locale Session
// Description: Active locale state, startup restore, and change persistence.
// Purpose: Own the locale that every translation lookup is rendered in.
// Dependencies: sys-locale, tokio
// ============================================================================

//! ## Overview
//! A [`LocaleSession`] holds the active locale for the application. It is an
//! explicit value, cheap to clone, handed to whatever renders text; there is
//! no process-global instance.
//!
//! Sessions are only obtainable from [`SessionBuilder::initialize`], so a
//! session in hand has always finished restoring its locale. Startup picks
//! the first of: a valid stored preference, the platform locale (when
//! enabled), and the configured default.
//!
//! ## Invariants
//! - After [`LocaleSession::set_active`] returns, [`LocaleSession::get_active`]
//!   and every translation observe the new locale, whether or not the write
//!   has finished.
//! - Persistence is fire-and-forget; write failures surface only through
//!   telemetry.
//! - Unsupported locale codes leave the active locale unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::catalog::CatalogSet;
use crate::locale::LocaleId;
use crate::resolver::Resolver;
use crate::store::KeyValueStore;
use crate::store::PreferenceStore;
use crate::telemetry::I18nEvent;
use crate::telemetry::I18nTelemetry;
use crate::telemetry::LocaleSource;
use crate::telemetry::NoopTelemetry;
use crate::template::Substitutions;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Storage key for the persisted locale record.
pub const DEFAULT_STORAGE_KEY: &str = "hearth.locale";
/// Locale adopted when nothing is stored.
pub const DEFAULT_UI_LOCALE: LocaleId = LocaleId::Hr;
/// Locale consulted for keys missing from the active catalog.
pub const DEFAULT_FALLBACK_LOCALE: LocaleId = LocaleId::En;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Reads the platform locale string, if one is available.
pub type SystemLocaleProvider = fn() -> Option<String>;

/// Session configuration.
///
/// # Invariants
/// - `default_locale` and `fallback_locale` are independent and may differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Locale adopted when no usable preference is stored.
    pub default_locale: LocaleId,
    /// Locale consulted for keys missing from the active catalog.
    pub fallback_locale: LocaleId,
    /// Storage key for the persisted record.
    pub storage_key: String,
    /// Consult the platform locale before the default.
    pub detect_system: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_UI_LOCALE,
            fallback_locale: DEFAULT_FALLBACK_LOCALE,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            detect_system: false,
        }
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Collects session dependencies ahead of [`SessionBuilder::initialize`].
pub struct SessionBuilder {
    /// Session configuration.
    settings: SessionSettings,
    /// Catalogs for every locale.
    catalogs: Arc<CatalogSet>,
    /// Backend for the persisted record.
    store: Arc<dyn KeyValueStore>,
    /// Sink for absorbed failures and state changes.
    telemetry: Arc<dyn I18nTelemetry>,
    /// Platform locale source.
    system_locale: SystemLocaleProvider,
}

impl SessionBuilder {
    /// Creates a builder with default settings and no-op telemetry.
    #[must_use]
    pub fn new(catalogs: Arc<CatalogSet>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            settings: SessionSettings::default(),
            catalogs,
            store,
            telemetry: Arc::new(NoopTelemetry),
            system_locale: sys_locale::get_locale,
        }
    }

    /// Replaces the session settings.
    #[must_use]
    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn I18nTelemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Replaces the platform locale source.
    #[must_use]
    pub fn with_system_locale(mut self, provider: SystemLocaleProvider) -> Self {
        self.system_locale = provider;
        self
    }

    /// Restores the active locale and returns a ready session.
    ///
    /// Never fails: unreadable or invalid stored values fall through to the
    /// platform locale (when enabled) and then to the configured default.
    pub async fn initialize(self) -> LocaleSession {
        let preferences = PreferenceStore::new(Arc::clone(&self.store))
            .with_telemetry(Arc::clone(&self.telemetry));
        let (locale, source) = self.pick_initial(&preferences).await;
        self.telemetry.record(I18nEvent::SessionInitialized {
            locale,
            source,
        });
        let resolver = Resolver::new(self.catalogs, self.settings.fallback_locale)
            .with_telemetry(Arc::clone(&self.telemetry));
        LocaleSession {
            inner: Arc::new(SessionInner {
                active: RwLock::new(locale),
                initial_source: source,
                resolver,
                preferences,
                settings: self.settings,
                telemetry: self.telemetry,
                runtime: Handle::try_current().ok(),
            }),
        }
    }

    /// Chooses the startup locale and records why.
    async fn pick_initial(&self, preferences: &PreferenceStore) -> (LocaleId, LocaleSource) {
        if let Some(raw) = preferences.get(&self.settings.storage_key).await {
            if let Some(locale) = LocaleId::parse(&raw) {
                return (locale, LocaleSource::Stored);
            }
            self.telemetry.record(I18nEvent::StoredLocaleRejected {
                value: raw,
            });
        }
        if self.settings.detect_system
            && let Some(locale) = (self.system_locale)().as_deref().and_then(LocaleId::parse)
        {
            return (locale, LocaleSource::System);
        }
        (self.settings.default_locale, LocaleSource::Default)
    }
}

impl fmt::Debug for SessionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionBuilder").field("settings", &self.settings).finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Result of a locale change requested by code string.
#[derive(Debug)]
pub enum SetActiveOutcome {
    /// The locale was applied and a write scheduled.
    Applied {
        /// Locale active before the change.
        previous: LocaleId,
        /// Handle to the scheduled write.
        pending: PendingWrite,
    },
    /// The code did not name a supported locale; nothing changed.
    Rejected,
}

impl SetActiveOutcome {
    /// Returns true when the change was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Handle to a fire-and-forget persistence write.
///
/// Dropping the handle detaches the write; it still runs to completion.
#[derive(Debug, Default)]
pub struct PendingWrite {
    /// Spawned write task, absent when nothing was scheduled.
    handle: Option<JoinHandle<()>>,
}

impl PendingWrite {
    /// Returns true when a write task was spawned.
    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        self.handle.is_some()
    }

    /// Waits for the write to finish. Write failures are already absorbed.
    pub async fn wait(self) {
        if let Some(handle) = self.handle {
            let _ = handle.await;
        }
    }
}

/// Shared session state.
struct SessionInner {
    /// Currently active locale.
    active: RwLock<LocaleId>,
    /// How the startup locale was chosen.
    initial_source: LocaleSource,
    /// Translation resolver.
    resolver: Resolver,
    /// Never-fails persistence wrapper.
    preferences: PreferenceStore,
    /// Session configuration.
    settings: SessionSettings,
    /// Sink for state changes.
    telemetry: Arc<dyn I18nTelemetry>,
    /// Runtime used for background writes.
    runtime: Option<Handle>,
}

/// Active locale plus the resolver it drives.
///
/// # Invariants
/// - Clones share state; a change through one clone is seen by all.
#[derive(Clone)]
pub struct LocaleSession {
    /// Shared state.
    inner: Arc<SessionInner>,
}

impl LocaleSession {
    /// Starts building a session over `catalogs` and `store`.
    #[must_use]
    pub fn builder(catalogs: Arc<CatalogSet>, store: Arc<dyn KeyValueStore>) -> SessionBuilder {
        SessionBuilder::new(catalogs, store)
    }

    /// Returns the active locale.
    #[must_use]
    pub fn get_active(&self) -> LocaleId {
        *self.inner.active.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns how the startup locale was chosen.
    #[must_use]
    pub fn initial_source(&self) -> LocaleSource {
        self.inner.initial_source
    }

    /// Returns the session settings.
    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.inner.settings
    }

    /// Returns the resolver.
    #[must_use]
    pub fn resolver(&self) -> &Resolver {
        &self.inner.resolver
    }

    /// Makes `locale` active and schedules its persistence.
    ///
    /// The in-memory change is complete when this returns. Every call writes,
    /// including one that re-selects the current locale.
    pub fn set_active(&self, locale: LocaleId) -> PendingWrite {
        self.apply(locale).1
    }

    /// Parses `code` and makes it active when supported.
    ///
    /// Unsupported codes are a no-op and report [`I18nEvent::LocaleRejected`].
    pub fn set_active_code(&self, code: &str) -> SetActiveOutcome {
        let Some(locale) = LocaleId::parse(code) else {
            self.inner.telemetry.record(I18nEvent::LocaleRejected {
                value: code.to_string(),
            });
            return SetActiveOutcome::Rejected;
        };
        let (previous, pending) = self.apply(locale);
        SetActiveOutcome::Applied {
            previous,
            pending,
        }
    }

    /// Removes the persisted record. The active locale is unchanged.
    pub async fn clear_preference(&self) {
        self.inner.preferences.remove(&self.inner.settings.storage_key).await;
    }

    /// Resolves `key` in the active locale.
    #[must_use]
    pub fn translate(&self, key: &str, substitutions: &Substitutions) -> String {
        self.inner.resolver.resolve(key, self.get_active(), substitutions)
    }

    /// Resolves `key` in the active locale without substitutions.
    #[must_use]
    pub fn translate_plain(&self, key: &str) -> String {
        self.inner.resolver.resolve_plain(key, self.get_active())
    }

    /// Swaps the active locale and schedules the write.
    fn apply(&self, locale: LocaleId) -> (LocaleId, PendingWrite) {
        let previous = {
            let mut guard = self.inner.active.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, locale)
        };
        self.inner.telemetry.record(I18nEvent::LocaleChanged {
            from: previous,
            to: locale,
        });
        (previous, self.persist(locale))
    }

    /// Spawns the background write for `locale`.
    fn persist(&self, locale: LocaleId) -> PendingWrite {
        let key = self.inner.settings.storage_key.clone();
        let Some(runtime) = self.inner.runtime.as_ref() else {
            self.inner.telemetry.record(I18nEvent::StoreWriteFailed {
                key,
                error: "no async runtime available for background write".to_string(),
            });
            return PendingWrite::default();
        };
        let preferences = self.inner.preferences.clone();
        let mut guard = WriteGuard {
            key,
            telemetry: Arc::clone(&self.inner.telemetry),
            finished: false,
        };
        let handle = runtime.spawn(async move {
            preferences.set(&guard.key, locale.as_str()).await;
            guard.finished = true;
        });
        PendingWrite {
            handle: Some(handle),
        }
    }
}

/// Reports a background write whose task was dropped before finishing.
///
/// A runtime that has shut down drops spawned tasks without polling them.
struct WriteGuard {
    /// Storage key being written.
    key: String,
    /// Sink for the dropped write.
    telemetry: Arc<dyn I18nTelemetry>,
    /// Set once the preference store returned.
    finished: bool,
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.telemetry.record(I18nEvent::StoreWriteFailed {
                key: std::mem::take(&mut self.key),
                error: "background write cancelled before completion".to_string(),
            });
        }
    }
}

impl fmt::Debug for LocaleSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleSession")
            .field("active", &self.get_active())
            .field("initial_source", &self.inner.initial_source)
            .finish_non_exhaustive()
    }
}
