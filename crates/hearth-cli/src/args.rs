// crates/hearth-cli/src/args.rs
// ============================================================================
// Module: CLI Arguments
// Description: clap definitions for the hearth-i18n command line.
// Purpose: Parse untrusted command-line input into typed commands.
// Dependencies: clap, hearth-i18n
// ============================================================================

//! ## Overview
//! Argument types for the `hearth-i18n` binary. Locale arguments are parsed
//! with [`LocaleId`]'s tolerant parser, so `fr-CA` selects French.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use hearth_i18n::LocaleId;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "hearth-i18n", version, disable_help_subcommand = true)]
pub struct Cli {
    /// Path to hearth.toml (overrides `HEARTH_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
    /// Write localization events to stderr as JSON lines.
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub log_events: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a key path to display text.
    Resolve(ResolveCommand),
    /// Inspect or change the stored locale.
    Locale {
        /// Selected locale subcommand.
        #[command(subcommand)]
        command: LocaleCommand,
    },
    /// Inspect the bundled catalogs.
    Catalog {
        /// Selected catalog subcommand.
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `resolve`.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Dot-delimited key path (for example `tasks.claim`).
    pub key: String,
    /// Locale to resolve in; defaults to the session's active locale.
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<LocaleId>,
    /// Placeholder value, repeatable.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_substitution)]
    pub vars: Vec<(String, String)>,
}

/// Locale subcommands.
#[derive(Subcommand, Debug)]
pub enum LocaleCommand {
    /// Print the active locale and where it came from.
    Show,
    /// Validate and persist a locale code.
    Set {
        /// Locale code (for example `fr` or `fr-CA`).
        code: String,
    },
    /// Remove the stored locale preference.
    Clear,
}

/// Catalog subcommands.
#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Compare every catalog against the fallback catalog.
    Audit(AuditCommand),
    /// List leaf key paths.
    Keys {
        /// Catalog to list; defaults to the fallback locale.
        #[arg(long, value_name = "LOCALE")]
        locale: Option<LocaleId>,
    },
}

/// Arguments for `catalog audit`.
#[derive(Args, Debug)]
pub struct AuditCommand {
    /// Fail when any catalog is missing keys.
    #[arg(long, action = ArgAction::SetTrue)]
    pub strict: bool,
    /// Report format.
    #[arg(long, value_enum, default_value_t = AuditFormat::Text)]
    pub format: AuditFormat,
}

/// Output formats for audit reports.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum AuditFormat {
    /// Human-readable summary.
    Text,
    /// JSON report.
    Json,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Load and validate the configuration.
    Validate,
    /// Print the canonical example configuration.
    Example,
}

// ============================================================================
// SECTION: Parsers
// ============================================================================

/// Parses a `name=value` placeholder argument.
///
/// # Errors
///
/// Returns a message when `=` is missing or the name is empty.
pub fn parse_substitution(raw: &str) -> Result<(String, String), String> {
    let Some((name, value)) = raw.split_once('=') else {
        return Err(format!("expected NAME=VALUE, got `{raw}`"));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err("placeholder name must be non-empty".to_string());
    }
    Ok((name.to_string(), value.to_string()))
}
