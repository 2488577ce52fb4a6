//! Application layer.
//!
//! This layer contains:
//! - **Services**: use case orchestration (config resolution, materialization, setup)
//! - **Ports**: interface definitions (traits) for external collaborators
//! - **Errors**: application-specific error types

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BaseSource, ConfigResolver, DEFAULT_BASE_PATH, MaterializedTree, SetupOrchestrator,
    TemplateMaterializer,
};

pub use ports::{CommandRunner, Filesystem, NoProgress, SetupProgress};

pub use error::ApplicationError;
