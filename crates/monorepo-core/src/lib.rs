//! Monorepo Core - hexagonal core of the `create-monorepo` tool.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          monorepo-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  ConfigResolver → TemplateMaterializer  │
//! │          → SetupOrchestrator            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  Filesystem, CommandRunner, Progress    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   monorepo-adapters (Infrastructure)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use monorepo_core::prelude::*;
//! # fn demo(
//! #     resolver: ConfigResolver,
//! #     materializer: TemplateMaterializer,
//! #     orchestrator: SetupOrchestrator,
//! #     spec: TemplateSpec,
//! # ) -> MonorepoResult<()> {
//! let request = ProjectRequest::new(ProjectName::parse("demo")?, None);
//! let env_base = std::env::var_os("MONOREPO_BASE_PATH");
//! let config = resolver.resolve(&request, env_base.as_deref())?;
//!
//! let ctx = RenderContext::new(config.project_name());
//! materializer.materialize(config.project_directory(), &spec, &ctx)?;
//!
//! let report = orchestrator.run(SetupOrchestrator::plan(&config), &mut NoProgress);
//! report.into_result()?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ConfigResolver, SetupOrchestrator, TemplateMaterializer,
        ports::{CommandRunner, Filesystem, NoProgress, SetupProgress},
    };
    pub use crate::domain::{
        ProjectName, ProjectRequest, RenderContext, ResolvedConfig, SetupReport, SetupStep,
        TemplateSpec,
    };
    pub use crate::error::{MonorepoError, MonorepoResult};
}

pub use application::services::config_resolver::BASE_PATH_ENV_VAR;
