//! Application services - orchestrate use cases.
//!
//! Run in this order for one invocation:
//! [`ConfigResolver`] -> [`TemplateMaterializer`] -> [`SetupOrchestrator`].

pub mod config_resolver;
pub mod materializer;
pub mod setup_orchestrator;

pub use config_resolver::{BaseSource, ConfigResolver, DEFAULT_BASE_PATH};
pub use materializer::{MaterializedTree, TemplateMaterializer};
pub use setup_orchestrator::SetupOrchestrator;
