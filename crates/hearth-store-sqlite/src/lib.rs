// crates/hearth-store-sqlite/src/lib.rs
// ============================================================================
// Module: Hearth SQLite Store
// Description: Durable KeyValueStore backend using SQLite.
// Purpose: Keep the chosen locale across application restarts.
// Dependencies: hearth-i18n, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`hearth_i18n::KeyValueStore`] for
//! on-device preferences such as the persisted locale. Database contents are
//! treated as untrusted and checked on read.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::MAX_KEY_BYTES;
pub use store::MAX_VALUE_BYTES;
pub use store::SqliteKeyValueStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
