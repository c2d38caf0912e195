// crates/hearth-i18n/src/store.rs
// ============================================================================
// Module: Preference Storage
// Description: Async key-value backend interface and the never-fails wrapper.
// Purpose: Persist the chosen locale without letting storage failures escape.
// Dependencies: async-trait, thiserror
// ============================================================================

//! ## Overview
//! [`KeyValueStore`] is the backend seam. Backends report failures honestly
//! through [`StoreError`]. [`PreferenceStore`] wraps a backend and is the one
//! place those failures are absorbed: reads degrade to "absent" and writes are
//! dropped, with each failure reported through [`I18nTelemetry`].
//!
//! ## Invariants
//! - [`PreferenceStore`] methods never return errors and never panic.
//! - A failed read is indistinguishable from "never written" to callers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::telemetry::I18nEvent;
use crate::telemetry::I18nTelemetry;
use crate::telemetry::NoopTelemetry;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Key-value backend errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("preference store io error: {0}")]
    Io(String),
    /// Store data is corrupted or fails integrity checks.
    #[error("preference store corruption: {0}")]
    Corrupt(String),
    /// Store schema version is incompatible.
    #[error("preference store version mismatch: {0}")]
    VersionMismatch(String),
    /// Key or value rejected by the backend.
    #[error("preference store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("preference store error: {0}")]
    Store(String),
}

// ============================================================================
// SECTION: Backend Interface
// ============================================================================

/// Async string key-value backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the removal fails.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// ============================================================================
// SECTION: In-Memory Backend
// ============================================================================

/// In-memory key-value store for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKeyValueStore {
    /// Entries protected by a mutex.
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Creates a store seeded with one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| StoreError::Store("preference store mutex poisoned".to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Store("preference store mutex poisoned".to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Store("preference store mutex poisoned".to_string()))?
            .remove(key);
        Ok(())
    }
}

// ============================================================================
// SECTION: Preference Store
// ============================================================================

/// Never-fails wrapper over a [`KeyValueStore`].
///
/// # Invariants
/// - Backend errors are reported to telemetry and never returned.
#[derive(Clone)]
pub struct PreferenceStore {
    /// Wrapped backend.
    backend: Arc<dyn KeyValueStore>,
    /// Sink for absorbed failures.
    telemetry: Arc<dyn I18nTelemetry>,
}

impl PreferenceStore {
    /// Wraps `backend` with no-op telemetry.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            telemetry: Arc::new(NoopTelemetry),
        }
    }

    /// Replaces the telemetry sink.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn I18nTelemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Reads `key`; any backend failure reads as absent.
    pub async fn get(&self, key: &str) -> Option<String> {
        match self.backend.get(key).await {
            Ok(value) => value,
            Err(err) => {
                self.telemetry.record(I18nEvent::StoreReadFailed {
                    key: key.to_string(),
                    error: err.to_string(),
                });
                None
            }
        }
    }

    /// Writes `key`; failures are dropped without retry.
    pub async fn set(&self, key: &str, value: &str) {
        if let Err(err) = self.backend.set(key, value).await {
            self.record_write_failure(key, &err);
        }
    }

    /// Removes `key`; failures are dropped without retry.
    pub async fn remove(&self, key: &str) {
        if let Err(err) = self.backend.remove(key).await {
            self.record_write_failure(key, &err);
        }
    }

    /// Reports a dropped write.
    fn record_write_failure(&self, key: &str, err: &StoreError) {
        self.telemetry.record(I18nEvent::StoreWriteFailed {
            key: key.to_string(),
            error: err.to_string(),
        });
    }
}

impl fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore").finish_non_exhaustive()
    }
}
