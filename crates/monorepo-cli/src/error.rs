//! CLI error type and the mapping from failures to exit codes.
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

use std::error::Error as _;

use owo_colors::OwoColorize;
use serde_json::json;
use thiserror::Error;

use monorepo_core::application::ApplicationError;
use monorepo_core::error::{ErrorCategory, MonorepoError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// An error propagated from `monorepo-core` or an adapter.
    #[error(transparent)]
    Core(#[from] MonorepoError),

    /// Reading the environment or writing to the terminal failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(core) => core.suggestions(),
            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check that stdout is writable".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(core) => core.category(),
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::Validation => 2,
            ErrorCategory::InvalidPath => 3,
            ErrorCategory::AlreadyExists => 4,
            ErrorCategory::Materialization => 5,
            ErrorCategory::SetupStep => 6,
        }
    }

    /// Short machine-readable name of the category.
    pub fn kind(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Internal => "internal",
            ErrorCategory::Validation => "invalid_name",
            ErrorCategory::InvalidPath => "invalid_path",
            ErrorCategory::AlreadyExists => "already_exists",
            ErrorCategory::Materialization => "materialization",
            ErrorCategory::SetupStep => "setup_step",
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} {}\n",
            "✗".red().bold(),
            "Error:".red().bold(),
            self.to_string().red()
        ));

        if let Some(detail) = self.command_output().filter(|_| verbose) {
            output.push_str(&format!("\n{}\n", "Command output:".dimmed()));
            for line in detail.lines() {
                output.push_str(&format!("  {}\n", line.dimmed()));
            }
        }

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`]; no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("Error: {self}\n"));

        if let Some(detail) = self.command_output().filter(|_| verbose) {
            out.push_str("\nCommand output:\n");
            for line in detail.lines() {
                out.push_str(&format!("  {line}\n"));
            }
        }

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// JSON document for `--output-format json`.
    ///
    /// A failed setup step adds `failed_step` with the command's captured
    /// output.
    pub fn to_json(&self) -> serde_json::Value {
        let mut doc = json!({
            "status": "error",
            "kind": self.kind(),
            "exit_code": self.exit_code(),
            "message": self.to_string(),
            "suggestions": self.suggestions(),
        });

        if let Self::Core(MonorepoError::Application(ApplicationError::SetupStepFailed {
            step,
            command,
            exit_code,
            output,
        })) = self
        {
            doc["failed_step"] = json!({
                "step": step,
                "command": command,
                "exit_code": exit_code,
                "output": output,
            });
        }

        doc
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::AlreadyExists => {
                tracing::warn!("User error: {}", self)
            }
            ErrorCategory::InvalidPath => tracing::warn!("Invalid base path: {}", self),
            ErrorCategory::Materialization => tracing::error!("Materialization failed: {}", self),
            ErrorCategory::SetupStep => tracing::error!("Setup failed: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }

    /// Captured output of a failed setup command, if that is what failed.
    fn command_output(&self) -> Option<&str> {
        match self {
            Self::Core(MonorepoError::Application(ApplicationError::SetupStepFailed {
                output,
                ..
            })) if !output.is_empty() => Some(output),
            _ => None,
        }
    }
}
