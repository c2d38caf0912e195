//! Store section and file loading tests for hearth-config.
// crates/hearth-config/tests/storage_validation.rs
// =============================================================================
// Module: Storage and Loading Validation Tests
// Description: Validate store backend rules and on-disk loading limits.
// Purpose: Ensure store configuration and config files fail closed.
// =============================================================================

#![allow(clippy::use_debug, reason = "Test failure messages include debug output.")]

use std::fs;
use std::path::PathBuf;

use hearth_config::ConfigError;
use hearth_config::HearthConfig;
use hearth_config::StoreType;
use hearth_store_sqlite::SqliteStoreMode;
use hearth_store_sqlite::SqliteSyncMode;
use tempfile::TempDir;

mod common;

type TestResult = Result<(), String>;

#[test]
fn memory_store_rejects_path() -> TestResult {
    common::assert_invalid(
        HearthConfig::from_toml_str("[store]\ntype = \"memory\"\npath = \"prefs.db\"\n"),
        "memory store must not set path",
    )
}

#[test]
fn sqlite_store_requires_path() -> TestResult {
    common::assert_invalid(
        HearthConfig::from_toml_str("[store]\ntype = \"sqlite\"\n"),
        "sqlite store requires path",
    )
}

#[test]
fn busy_timeout_must_be_in_range() -> TestResult {
    common::assert_invalid(
        HearthConfig::from_toml_str("[store]\nbusy_timeout_ms = 0\n"),
        "busy_timeout_ms",
    )?;
    common::assert_invalid(
        HearthConfig::from_toml_str("[store]\nbusy_timeout_ms = 600000\n"),
        "busy_timeout_ms",
    )
}

#[test]
fn sqlite_settings_carry_through() -> TestResult {
    let config = HearthConfig::from_toml_str(
        "[store]\ntype = \"sqlite\"\npath = \"data/prefs.db\"\n\
         journal_mode = \"delete\"\nsync_mode = \"normal\"\nbusy_timeout_ms = 250\n",
    )
    .map_err(|err| err.to_string())?;
    let sqlite = config.store.sqlite_config().ok_or("missing sqlite config")?;
    if sqlite.path != PathBuf::from("data/prefs.db")
        || sqlite.journal_mode != SqliteStoreMode::Delete
        || sqlite.sync_mode != SqliteSyncMode::Normal
        || sqlite.busy_timeout_ms != 250
    {
        return Err(format!("unexpected sqlite config: {sqlite:?}"));
    }
    Ok(())
}

#[test]
fn memory_store_has_no_sqlite_config() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    if config.store.store_type != StoreType::Memory || config.store.sqlite_config().is_some() {
        return Err("default store should be memory".to_string());
    }
    Ok(())
}

#[test]
fn load_reads_explicit_path() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("hearth.toml");
    fs::write(&path, "[locale]\ndefault = \"sl\"\n").map_err(|err| err.to_string())?;
    let config = HearthConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if config.locale.default != hearth_i18n::LocaleId::Sl {
        return Err("explicit config was not applied".to_string());
    }
    let again = HearthConfig::load_or_default(Some(&path)).map_err(|err| err.to_string())?;
    if again != config {
        return Err("load_or_default must honor an explicit path".to_string());
    }
    Ok(())
}

#[test]
fn load_reports_missing_explicit_file() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    match HearthConfig::load_or_default(Some(&path)) {
        Err(ConfigError::Io(_)) => Ok(()),
        other => Err(format!("expected io error, got {other:?}")),
    }
}

#[test]
fn load_rejects_oversized_and_non_utf8_files() -> TestResult {
    let dir = TempDir::new().map_err(|err| err.to_string())?;
    let big = dir.path().join("big.toml");
    let mut content = String::from("# padding\n");
    content.push_str(&"#".repeat(1024 * 1024));
    fs::write(&big, content).map_err(|err| err.to_string())?;
    common::assert_invalid(HearthConfig::load(Some(&big)), "size limit")?;

    let binary = dir.path().join("binary.toml");
    fs::write(&binary, [0xff_u8, 0xfe, 0x00]).map_err(|err| err.to_string())?;
    common::assert_invalid(HearthConfig::load(Some(&binary)), "utf-8")
}
