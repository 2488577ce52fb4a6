//! Infrastructure adapters for create-monorepo.
//!
//! This crate implements the ports defined in `monorepo-core::application::ports`
//! and bundles the project skeleton. It contains all host I/O.

pub mod builtin_template;
pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use builtin_template::MONOREPO_TEMPLATE;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::SystemCommandRunner;
