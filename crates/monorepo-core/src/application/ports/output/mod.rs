//! Driven (output) ports - implemented by infrastructure.

use std::path::Path;

use crate::domain::{CommandOutput, SetupStep, StepOutcome};
use crate::error::MonorepoResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `monorepo_adapters::filesystem::LocalFilesystem` (production)
/// - `monorepo_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a single directory; fails if it already exists.
    fn create_dir(&self, path: &Path) -> MonorepoResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> MonorepoResult<()>;

    /// Write bytes to a file, creating or truncating it.
    fn write_file(&self, path: &Path, content: &[u8]) -> MonorepoResult<()>;

    /// Set or clear the executable bit.
    fn set_permissions(&self, path: &Path, executable: bool) -> MonorepoResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> MonorepoResult<()>;
}

/// Port for running external commands.
///
/// Implemented by `monorepo_adapters::process::SystemCommandRunner`.
///
/// A non-zero exit is *not* an error: it comes back as a `CommandOutput`
/// with `success == false`. `Err` means the process never started.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        program: &str,
        args: &[String],
        working_directory: &Path,
    ) -> MonorepoResult<CommandOutput>;
}

/// Observer for a setup run. Both methods default to doing nothing.
pub trait SetupProgress {
    /// Called right before step `index` (0-based) of `total` is launched.
    fn step_started(&mut self, _index: usize, _total: usize, _step: &SetupStep) {}

    /// Called once step `index` has reached a final state.
    fn step_finished(&mut self, _index: usize, _total: usize, _outcome: &StepOutcome) {}
}

/// Progress observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl SetupProgress for NoProgress {}
