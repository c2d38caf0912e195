// crates/hearth-i18n/src/tests/support.rs
// ============================================================================
// Module: Test Support
// Description: Key-value store doubles for session and store tests.
// Purpose: Simulate failing and slow backends deterministically.
// Dependencies: async-trait, tokio
// ============================================================================

//! ## Overview
//! [`FailingStore`] errors on every call; [`GatedStore`] holds writes until
//! the test releases them.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::store::InMemoryKeyValueStore;
use crate::store::KeyValueStore;
use crate::store::StoreError;

/// Backend that fails every operation.
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Io("disk unavailable".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io("disk full".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Io("disk full".to_string()))
    }
}

/// Backend whose writes wait for [`GatedStore::release`].
#[derive(Clone, Default)]
pub struct GatedStore {
    /// Backing entries.
    pub inner: InMemoryKeyValueStore,
    /// Gate released by the test.
    gate: Arc<Notify>,
}

impl GatedStore {
    /// Lets one pending write proceed.
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl KeyValueStore for GatedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.gate.notified().await;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key).await
    }
}
