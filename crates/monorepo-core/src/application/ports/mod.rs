//! Application ports (traits) for external collaborators.
//!
//! - **Driven (Output) Ports**: called by the services, implemented in
//!   `monorepo-adapters` (or by the CLI for progress reporting)
//!   - `Filesystem`: directory and file operations
//!   - `CommandRunner`: launching external commands
//!   - `SetupProgress`: observing a setup run

pub mod output;

pub use output::{CommandRunner, Filesystem, NoProgress, SetupProgress};

#[cfg(test)]
pub use output::{MockCommandRunner, MockFilesystem};
