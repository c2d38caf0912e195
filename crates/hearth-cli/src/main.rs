// crates/hearth-cli/src/main.rs
// ============================================================================
// Module: Hearth CLI Entry Point
// Description: Binary entry point for hearth-i18n.
// Purpose: Parse arguments, run the command, and map failures to exit codes.
// Dependencies: clap, hearth-cli, hearth-i18n, tokio
// ============================================================================

//! ## Overview
//! Thin wrapper over [`hearth_cli::run`]. Primary output goes to stdout,
//! errors and optional event records go to stderr.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use hearth_cli::Cli;
use hearth_i18n::I18nTelemetry;
use hearth_i18n::JsonLinesTelemetry;
use hearth_i18n::NoopTelemetry;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Runs the CLI and maps errors to a failure exit code.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let telemetry: Arc<dyn I18nTelemetry> = if cli.log_events {
        Arc::new(JsonLinesTelemetry::new(std::io::stderr()))
    } else {
        Arc::new(NoopTelemetry)
    };
    let mut stdout = std::io::stdout();
    let result = hearth_cli::run(cli, telemetry, &mut stdout).await;
    let _ = stdout.flush();
    match result {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
