//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, help
//! text, and value enums. No business logic lives here.

use clap::Parser;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "create-monorepo",
    bin_name = "create-monorepo",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold a FastAPI + Next.js monorepo",
    long_about = "create-monorepo writes a backend (FastAPI, uv) and frontend \
                  (Next.js, npm) skeleton under <BASE>/<NAME>, then initializes \
                  git and installs dependencies.",
    after_help = "BASE PATH:\n\
        \x20 --base-path, then $MONOREPO_BASE_PATH, then ~/Projects\n\n\
        EXAMPLES:\n\
        \x20 create-monorepo shop\n\
        \x20 create-monorepo shop --base-path ~/work\n\
        \x20 create-monorepo shop --skip-setup\n\
        \x20 create-monorepo shop --dry-run --output-format json",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Project name (letters, digits, '-' and '_').
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Directory the project is created in.
    ///
    /// `~` expands to your home directory; relative paths are taken from the
    /// current directory.
    #[arg(short = 'b', long = "base-path", value_name = "DIR")]
    pub base_path: Option<String>,

    /// Only write the project files; skip git and dependency installation.
    #[arg(long = "skip-setup", conflicts_with = "dry_run")]
    pub skip_setup: bool,

    /// Show what would be created and run without touching the filesystem.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Flags controlling output and logging.
    #[command(flatten)]
    pub global: GlobalArgs,
}
