//! Unified error handling for the monorepo core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions and a category that the CLI maps
//! onto exit codes.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MonorepoError {
    /// Errors from the domain layer (validation, malformed templates).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (resolution, writing, setup).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl MonorepoError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display and exit-code purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories, one per failure kind the operator can tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad user input (project name).
    Validation,
    /// The base directory cannot be used.
    InvalidPath,
    /// The project directory already exists.
    AlreadyExists,
    /// Writing the skeleton failed.
    Materialization,
    /// A required external command failed.
    SetupStep,
    /// Bugs and poisoned state.
    Internal,
}

/// Convenient result type alias.
pub type MonorepoResult<T> = Result<T, MonorepoError>;
