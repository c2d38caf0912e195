// crates/hearth-cli/src/lib.rs
// ============================================================================
// Module: Hearth CLI Library
// Description: Argument parsing and command execution for hearth-i18n.
// Purpose: Keep command logic testable apart from the binary entry point.
// Dependencies: crate::{args, commands}
// ============================================================================

//! ## Overview
//! Developer tooling around the Hearth localization core: resolve keys,
//! inspect and change the stored locale, audit the bundled catalogs, and
//! validate `hearth.toml`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod args;
pub mod commands;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use args::Cli;
pub use commands::CliError;
pub use commands::CliResult;
pub use commands::open_store;
pub use commands::run;
