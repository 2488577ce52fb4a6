//! Application layer errors.
//!
//! These errors represent failures while resolving, writing, or bootstrapping
//! a project. Input validation errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The resolved base directory cannot hold projects.
    #[error("Invalid base path {path}: {reason}")]
    InvalidBasePath { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Writing the skeleton failed. `rolled_back` tells whether the partial
    /// project directory was removed again.
    #[error("Failed to materialize project at {path}: {reason}")]
    Materialization {
        path: PathBuf,
        reason: String,
        rolled_back: bool,
    },

    /// A single filesystem operation failed (raised by the filesystem port).
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An external command could not be started at all.
    #[error("Could not launch `{command}`: {reason}")]
    CommandLaunch { command: String, reason: String },

    /// A required setup step failed.
    #[error("Setup step '{step}' failed (`{command}`{})", exit_suffix(.exit_code))]
    SetupStepFailed {
        step: String,
        command: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// Store access failed (lock poisoned).
    #[error("Internal lock poisoned")]
    LockPoisoned,
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(", exit status {code}"),
        None => String::new(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidBasePath { path, .. } => vec![
                format!("'{}' cannot be used as a base directory", path.display()),
                "Pass a directory with --base-path".into(),
                "Or set MONOREPO_BASE_PATH to a directory".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "Or pick another location with --base-path".into(),
            ],
            Self::Materialization {
                path, rolled_back, ..
            } => {
                let mut out = vec![
                    "Check that you have write permissions".into(),
                    "Check available disk space".into(),
                ];
                if *rolled_back {
                    out.push("No files were left behind; it is safe to retry".into());
                } else {
                    out.push(format!(
                        "Cleanup failed; remove the directory manually: rm -rf {}",
                        path.display()
                    ));
                }
                out
            }
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::CommandLaunch { command, .. } => vec![
                format!("Ensure `{command}` is installed and on your PATH"),
            ],
            Self::SetupStepFailed { command, .. } => vec![
                "The project files were created and left in place".into(),
                format!("Fix the problem above, then re-run `{command}` manually"),
            ],
            Self::LockPoisoned => vec!["This is a bug, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidBasePath { .. } => ErrorCategory::InvalidPath,
            Self::ProjectExists { .. } => ErrorCategory::AlreadyExists,
            Self::Materialization { .. } | Self::FilesystemError { .. } => {
                ErrorCategory::Materialization
            }
            Self::CommandLaunch { .. } | Self::SetupStepFailed { .. } => ErrorCategory::SetupStep,
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
