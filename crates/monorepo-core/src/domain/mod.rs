//! Core domain layer.
//!
//! Pure data and rules: no filesystem, process, or environment access. All
//! I/O is reached through the ports in `crate::application::ports`.

pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{
    common::{FileMode, RelativePath},
    project::{ProjectRequest, ResolvedConfig},
    setup::{CommandOutput, RunState, SetupReport, SetupStep, StepOutcome, StepStatus},
    template::{FileEntry, RenderContext, TemplateContent, TemplateEntry, TemplateSpec},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{MAX_PROJECT_NAME_LEN, ProjectName};
