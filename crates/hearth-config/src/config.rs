// crates/hearth-config/src/config.rs
// ============================================================================
// Module: Hearth Configuration
// Description: Configuration loading and validation for Hearth localization.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: hearth-i18n, hearth-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with size and path limits. The
//! path comes from the caller, then the `HEARTH_CONFIG` environment
//! variable, then `hearth.toml` in the working directory. Every section and
//! field has a default, so an empty file is a valid configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use hearth_i18n::DEFAULT_FALLBACK_LOCALE;
use hearth_i18n::DEFAULT_STORAGE_KEY;
use hearth_i18n::DEFAULT_UI_LOCALE;
use hearth_i18n::LocaleId;
use hearth_i18n::SessionSettings;
use hearth_store_sqlite::SqliteStoreConfig;
use hearth_store_sqlite::SqliteStoreMode;
use hearth_store_sqlite::SqliteSyncMode;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "hearth.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "HEARTH_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum storage key length in bytes.
pub const MAX_STORAGE_KEY_BYTES: usize = 128;
/// Default store busy timeout in milliseconds.
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum store busy timeout in milliseconds.
const MAX_BUSY_TIMEOUT_MS: u64 = 60_000;

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Hearth localization configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HearthConfig {
    /// Locale selection settings.
    #[serde(default)]
    pub locale: LocaleConfig,
    /// Preference store settings.
    #[serde(default)]
    pub store: StoreConfig,
}

impl HearthConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is missing, unreadable, too
    /// large, not UTF-8, malformed, or invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path, env::var(CONFIG_ENV_VAR).ok())?;
        Self::load_from(&resolved)
    }

    /// Loads configuration, returning defaults when no file exists at the
    /// implicit default location.
    ///
    /// An explicit path or `HEARTH_CONFIG` value must name an existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] under the same conditions as [`Self::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_value = env::var(CONFIG_ENV_VAR).ok();
        if path.is_none() && env_value.is_none() && !Path::new(DEFAULT_CONFIG_NAME).exists() {
            return Ok(Self::default());
        }
        let resolved = resolve_path(path, env_value)?;
        Self::load_from(&resolved)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locale.validate()?;
        self.store.validate()?;
        Ok(())
    }

    /// Reads, parses, and validates the file at `path`.
    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        validate_path(path)?;
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }
}

// ============================================================================
// SECTION: Locale Config
// ============================================================================

/// Locale selection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleConfig {
    /// Locale adopted when no preference is stored.
    #[serde(default = "default_ui_locale")]
    pub default: LocaleId,
    /// Locale consulted for keys missing from the active catalog.
    #[serde(default = "default_fallback_locale")]
    pub fallback: LocaleId,
    /// Storage key for the persisted locale record.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Consult the platform locale before the default.
    #[serde(default)]
    pub detect_system: bool,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default: default_ui_locale(),
            fallback: default_fallback_locale(),
            storage_key: default_storage_key(),
            detect_system: false,
        }
    }
}

impl LocaleConfig {
    /// Returns session settings for this configuration.
    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            default_locale: self.default,
            fallback_locale: self.fallback,
            storage_key: self.storage_key.clone(),
            detect_system: self.detect_system,
        }
    }

    /// Validates locale configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.is_empty() {
            return Err(ConfigError::Invalid("locale.storage_key must be non-empty".to_string()));
        }
        if self.storage_key.len() > MAX_STORAGE_KEY_BYTES {
            return Err(ConfigError::Invalid(format!(
                "locale.storage_key exceeds {MAX_STORAGE_KEY_BYTES} bytes"
            )));
        }
        if self.storage_key.chars().any(|ch| ch.is_whitespace() || ch.is_control()) {
            return Err(ConfigError::Invalid(
                "locale.storage_key must not contain whitespace or control characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// Returns the default UI locale.
const fn default_ui_locale() -> LocaleId {
    DEFAULT_UI_LOCALE
}

/// Returns the default fallback locale.
const fn default_fallback_locale() -> LocaleId {
    DEFAULT_FALLBACK_LOCALE
}

/// Returns the default storage key.
fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

// ============================================================================
// SECTION: Store Config
// ============================================================================

/// Preference store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Store backend type.
    #[serde(rename = "type", default)]
    pub store_type: StoreType,
    /// `SQLite` database path when using the sqlite backend.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` synchronous mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_type: StoreType::default(),
            path: None,
            busy_timeout_ms: default_busy_timeout_ms(),
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

impl StoreConfig {
    /// Returns the `SQLite` settings when the sqlite backend is selected.
    #[must_use]
    pub fn sqlite_config(&self) -> Option<SqliteStoreConfig> {
        match self.store_type {
            StoreType::Memory => None,
            StoreType::Sqlite => self.path.as_ref().map(|path| SqliteStoreConfig {
                path: path.clone(),
                busy_timeout_ms: self.busy_timeout_ms,
                journal_mode: self.journal_mode,
                sync_mode: self.sync_mode,
            }),
        }
    }

    /// Validates store configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.busy_timeout_ms == 0 || self.busy_timeout_ms > MAX_BUSY_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "store busy_timeout_ms must be between 1 and {MAX_BUSY_TIMEOUT_MS}"
            )));
        }
        match self.store_type {
            StoreType::Memory => {
                if self.path.is_some() {
                    return Err(ConfigError::Invalid("memory store must not set path".to_string()));
                }
                Ok(())
            }
            StoreType::Sqlite => {
                let path = self.path.as_ref().ok_or_else(|| {
                    ConfigError::Invalid("sqlite store requires path".to_string())
                })?;
                validate_store_path(path)
            }
        }
    }
}

/// Preference store backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    /// In-memory store; preferences last for the process only.
    #[default]
    Memory,
    /// `SQLite`-backed durable store.
    Sqlite,
}

impl StoreType {
    /// Returns the config spelling of the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Returns the default busy timeout.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>, env_value: Option<String>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Some(env_path) = env_value {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    check_path_limits(path, "config path")
}

/// Validates store paths against length limits.
fn validate_store_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("store path must be non-empty".to_string()));
    }
    check_path_limits(path, "store path")
}

/// Rejects overlong paths and path components.
fn check_path_limits(path: &Path, label: &str) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{label} exceeds max length")));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{label} component too long")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
