// crates/hearth-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic starting point for hearth.toml.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for Hearth configuration. The example is parsed and
//! validated by the test suite so it cannot drift from the model.

/// Returns a canonical example `hearth.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[locale]
default = "hr"
fallback = "en"
storage_key = "hearth.locale"
detect_system = false

[store]
type = "sqlite"
path = "hearth-prefs.sqlite3"
journal_mode = "wal"
sync_mode = "full"
busy_timeout_ms = 5000
"#,
    )
}
