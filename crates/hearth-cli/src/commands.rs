// crates/hearth-cli/src/commands.rs
// ============================================================================
// Module: CLI Commands
// Description: Command execution for the hearth-i18n binary.
// Purpose: Drive the locale session, catalogs, and config from parsed args.
// Dependencies: hearth-config, hearth-i18n, hearth-store-sqlite, serde_json
// ============================================================================

//! ## Overview
//! Every command writes its primary output to a caller-supplied writer and
//! returns the process exit code. Command failures that should abort the run
//! are returned as [`CliError`]; a failed audit is a normal
//! [`ExitCode::FAILURE`] result because its report is still printed.
//!
//! ## Invariants
//! - `config` subcommands never build a session or open a store.
//! - `locale set` waits for the persistence write before returning.
//! - `locale set` and `locale clear` say so when the store is in-memory,
//!   since nothing they do outlives the process.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use hearth_config::ConfigError;
use hearth_config::HearthConfig;
use hearth_config::StoreConfig;
use hearth_config::StoreType;
use hearth_config::config_toml_example;
use hearth_i18n::AuditReport;
use hearth_i18n::CatalogError;
use hearth_i18n::CatalogSet;
use hearth_i18n::I18nTelemetry;
use hearth_i18n::InMemoryKeyValueStore;
use hearth_i18n::KeyValueStore;
use hearth_i18n::LocaleSession;
use hearth_i18n::SetActiveOutcome;
use hearth_i18n::Substitutions;
use hearth_i18n::audit_catalogs;
use hearth_i18n::bundled_catalogs;
use hearth_store_sqlite::SqliteKeyValueStore;
use hearth_store_sqlite::SqliteStoreError;
use thiserror::Error;

use crate::args::AuditCommand;
use crate::args::AuditFormat;
use crate::args::CatalogCommand;
use crate::args::Cli;
use crate::args::Commands;
use crate::args::ConfigCommand;
use crate::args::LocaleCommand;
use crate::args::ResolveCommand;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that abort a CLI run.
///
/// # Invariants
/// - Variants are stable for exit-path classification.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration failed to load or validate.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Bundled catalogs failed to load.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// The preference store could not be opened.
    #[error("store error: {0}")]
    Store(#[from] SqliteStoreError),
    /// The requested locale code is not supported.
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    Output(String),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Output(err.to_string())
    }
}

/// Result alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Executes `cli`, writing primary output to `out`.
///
/// # Errors
///
/// Returns [`CliError`] when config, catalogs, or the store cannot be
/// loaded, when a locale code is rejected, or when output fails.
pub async fn run(
    cli: Cli,
    telemetry: Arc<dyn I18nTelemetry>,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    if let Commands::Config {
        command,
    } = &cli.command
    {
        return run_config(command, cli.config.as_deref(), out);
    }
    let config = HearthConfig::load_or_default(cli.config.as_deref())?;
    let catalogs = bundled_catalogs()?;
    match cli.command {
        Commands::Catalog {
            command,
        } => run_catalog(command, &catalogs, &config, out),
        Commands::Resolve(command) => {
            let session = open_session(&config, catalogs, telemetry).await?;
            run_resolve(&command, &session, out)
        }
        Commands::Locale {
            command,
        } => {
            let session = open_session(&config, catalogs, telemetry).await?;
            let ephemeral = config.store.store_type == StoreType::Memory;
            run_locale(command, &session, ephemeral, out).await
        }
        Commands::Config {
            ..
        } => Ok(ExitCode::SUCCESS),
    }
}

/// Builds the preference backend named by the store config.
///
/// # Errors
///
/// Returns [`CliError::Store`] when the SQLite store cannot be opened.
pub fn open_store(config: &StoreConfig) -> CliResult<Arc<dyn KeyValueStore>> {
    match config.sqlite_config() {
        Some(sqlite) => Ok(Arc::new(SqliteKeyValueStore::open(&sqlite)?)),
        None => Ok(Arc::new(InMemoryKeyValueStore::new())),
    }
}

/// Opens the store and initializes a session from it.
async fn open_session(
    config: &HearthConfig,
    catalogs: Arc<CatalogSet>,
    telemetry: Arc<dyn I18nTelemetry>,
) -> CliResult<LocaleSession> {
    let store = open_store(&config.store)?;
    Ok(LocaleSession::builder(catalogs, store)
        .with_settings(config.locale.session_settings())
        .with_telemetry(telemetry)
        .initialize()
        .await)
}

// ============================================================================
// SECTION: Resolve
// ============================================================================

/// Resolves one key in the requested or active locale.
fn run_resolve(
    command: &ResolveCommand,
    session: &LocaleSession,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    let substitutions: Substitutions = command.vars.iter().cloned().collect();
    let text = match command.locale {
        Some(locale) => session.resolver().resolve(&command.key, locale, &substitutions),
        None => session.translate(&command.key, &substitutions),
    };
    writeln!(out, "{text}")?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Note appended to locale changes made against the in-memory store.
const EPHEMERAL_NOTE: &str = " (memory store, not persisted)";

/// Shows, sets, or clears the stored locale.
async fn run_locale(
    command: LocaleCommand,
    session: &LocaleSession,
    ephemeral: bool,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    let note = if ephemeral { EPHEMERAL_NOTE } else { "" };
    match command {
        LocaleCommand::Show => {
            let active = session.get_active();
            writeln!(
                out,
                "{} ({}) source={}",
                active.as_str(),
                active.native_name(),
                session.initial_source().as_str()
            )?;
        }
        LocaleCommand::Set {
            code,
        } => match session.set_active_code(&code) {
            SetActiveOutcome::Applied {
                previous,
                pending,
            } => {
                pending.wait().await;
                let active = session.get_active();
                writeln!(out, "{} -> {}{note}", previous.as_str(), active.as_str())?;
            }
            SetActiveOutcome::Rejected => return Err(CliError::UnsupportedLocale(code)),
        },
        LocaleCommand::Clear => {
            session.clear_preference().await;
            writeln!(out, "cleared {}{note}", session.settings().storage_key)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Audits catalogs or lists keys.
fn run_catalog(
    command: CatalogCommand,
    catalogs: &CatalogSet,
    config: &HearthConfig,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    match command {
        CatalogCommand::Audit(command) => run_audit(&command, catalogs, config, out),
        CatalogCommand::Keys {
            locale,
        } => {
            let locale = locale.unwrap_or(config.locale.fallback);
            for key in catalogs.catalog(locale).keys() {
                writeln!(out, "{key}")?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Prints an audit report and derives the exit code from it.
fn run_audit(
    command: &AuditCommand,
    catalogs: &CatalogSet,
    config: &HearthConfig,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    let report = audit_catalogs(catalogs, config.locale.fallback);
    match command.format {
        AuditFormat::Text => write_audit_text(&report, out)?,
        AuditFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|err| CliError::Serialize(err.to_string()))?;
            writeln!(out, "{json}")?;
        }
    }
    let passed = if command.strict {
        report.is_complete()
    } else {
        report.is_structurally_sound()
    };
    Ok(if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Writes a line per locale plus one line per finding.
fn write_audit_text(report: &AuditReport, out: &mut dyn Write) -> CliResult<()> {
    writeln!(out, "base: {}", report.base.as_str())?;
    for audit in &report.locales {
        let status = if audit.is_complete() {
            "complete"
        } else if audit.is_structurally_sound() {
            "partial"
        } else {
            "defective"
        };
        writeln!(
            out,
            "{}: {}/{} {status}",
            audit.locale.as_str(),
            audit.translated,
            audit.total
        )?;
        for key in &audit.missing {
            writeln!(out, "  missing {key}")?;
        }
        for key in &audit.extra {
            writeln!(out, "  extra {key}")?;
        }
        for mismatch in &audit.placeholder_mismatches {
            writeln!(
                out,
                "  placeholders {}: expected [{}] found [{}]",
                mismatch.key,
                join(&mismatch.expected),
                join(&mismatch.found)
            )?;
        }
        for malformed in &audit.malformed {
            writeln!(out, "  malformed {}: {}", malformed.key, malformed.error)?;
        }
    }
    Ok(())
}

/// Joins placeholder names with commas.
fn join<'a>(names: impl IntoIterator<Item = &'a String>) -> String {
    names.into_iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

// ============================================================================
// SECTION: Config
// ============================================================================

/// Validates config or prints the example.
fn run_config(
    command: &ConfigCommand,
    path: Option<&Path>,
    out: &mut dyn Write,
) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate => {
            let config = HearthConfig::load_or_default(path)?;
            writeln!(
                out,
                "config ok: default={} fallback={} store={}",
                config.locale.default.as_str(),
                config.locale.fallback.as_str(),
                config.store.store_type.as_str()
            )?;
        }
        ConfigCommand::Example => out.write_all(config_toml_example().as_bytes())?,
    }
    Ok(ExitCode::SUCCESS)
}
