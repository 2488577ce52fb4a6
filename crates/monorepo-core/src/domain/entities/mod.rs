pub mod common;
pub mod project;
pub mod setup;
pub mod template;

pub use crate::domain::DomainError;
pub use project::{ProjectRequest, ResolvedConfig};
pub use setup::{CommandOutput, RunState, SetupReport, SetupStep, StepOutcome, StepStatus};
pub use template::{FileEntry, RenderContext, TemplateContent, TemplateEntry, TemplateSpec};
