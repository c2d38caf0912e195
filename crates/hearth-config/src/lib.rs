// crates/hearth-config/src/lib.rs
// ============================================================================
// Module: Hearth Config Library
// Description: Configuration model and validation for Hearth localization.
// Purpose: Single source of truth for hearth.toml semantics.
// Dependencies: hearth-i18n, hearth-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `hearth-config` defines the `hearth.toml` model: which locale the UI starts
//! in, which locale fills gaps, where the choice is stored, and which storage
//! backend holds it. Loading is strict and fails closed on unknown fields.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
