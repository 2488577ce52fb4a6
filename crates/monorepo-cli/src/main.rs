//! # create-monorepo
//!
//! Scaffolds a FastAPI + Next.js monorepo and bootstraps its toolchains.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Capture the environment inputs ([`EnvConfig`]), including
//!    `MONOREPO_BASE_PATH` from `.env`.
//! 4. Build the [`OutputManager`].
//! 5. Run the command.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! |  0   | Success                                   |
//! |  1   | Internal / unexpected I/O error           |
//! |  2   | Usage error or invalid project name       |
//! |  3   | Base path unusable                        |
//! |  4   | Project directory already exists          |
//! |  5   | Writing the project files failed          |
//! |  6   | A required setup step failed              |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

use crate::{
    cli::{Cli, OutputFormat},
    config::EnvConfig,
    error::CliError,
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 2 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Capture environment ────────────────────────────────────────────
    let env = EnvConfig::load();
    debug!(?env, "Environment captured");

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global);
    let verbose = cli.global.verbose > 0;

    // ── 5. Run + 6. Error handling ────────────────────────────────────────
    match commands::new::execute(cli, env, &output) {
        Ok(()) => {
            info!("create-monorepo completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, &output, verbose),
    }
}

/// Translate a `CliError` into a user message and an exit code.
///
/// The message goes to stderr. In JSON mode an error document is also
/// written to stdout.
fn handle_error(err: CliError, output: &OutputManager, verbose: bool) -> ExitCode {
    err.log();

    if output.format() == OutputFormat::Json {
        let _ = output.json(&err.to_json());
    }

    let msg = if output.supports_color() && std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
