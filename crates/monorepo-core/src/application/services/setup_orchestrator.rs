//! Setup Orchestrator - runs the bootstrap commands of a new project.
//!
//! Steps are plain data ([`SetupStep`]) executed in order by one uniform
//! loop. Nothing is retried. A failed required step stops the run and every
//! later step is reported as `Skipped`; a failed optional step is recorded
//! and the run continues.

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, SetupProgress},
    },
    domain::{ResolvedConfig, SetupReport, SetupStep, StepOutcome, StepStatus},
    error::MonorepoResult,
};

/// Sequences setup steps through a [`CommandRunner`].
pub struct SetupOrchestrator {
    runner: Box<dyn CommandRunner>,
}

impl SetupOrchestrator {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// The default bootstrap sequence for a generated monorepo.
    ///
    /// `git init` runs first so tools that look for a repository root find
    /// the project's rather than a parent's.
    pub fn plan(config: &ResolvedConfig) -> Vec<SetupStep> {
        let root = config.project_directory();
        let backend = config.backend_directory();
        let frontend = config.frontend_directory();

        vec![
            SetupStep::optional("Initialize git repository", &["git", "init"], root),
            SetupStep::required(
                "Create backend virtual environment",
                &["uv", "venv"],
                &backend,
            ),
            SetupStep::required(
                "Install backend dependencies",
                &["uv", "sync", "--dev"],
                &backend,
            ),
            SetupStep::required("Install frontend dependencies", &["npm", "install"], &frontend),
        ]
    }

    /// Execute `steps` in order, synchronously.
    #[instrument(skip_all, fields(steps = steps.len()))]
    pub fn run(&self, steps: Vec<SetupStep>, progress: &mut dyn SetupProgress) -> SetupReport {
        let total = steps.len();
        let mut outcomes: Vec<StepOutcome> = steps.into_iter().map(StepOutcome::pending).collect();

        for index in 0..total {
            let outcome = &mut outcomes[index];
            outcome.status = StepStatus::Running;
            progress.step_started(index, total, &outcome.step);
            info!(step = %outcome.step.description, command = %outcome.step.command_line(), "Running setup step");

            self.execute(outcome);
            progress.step_finished(index, total, outcome);

            if outcome.is_failed() {
                if outcome.step.required {
                    warn!(step = %outcome.step.description, "Required step failed, aborting setup");
                    for rest in &mut outcomes[index + 1..] {
                        rest.status = StepStatus::Skipped;
                    }
                    break;
                }
                warn!(step = %outcome.step.description, "Optional step failed, continuing");
            }
        }

        SetupReport::from_outcomes(outcomes)
    }

    /// Run one step and record its final state on `outcome`.
    fn execute(&self, outcome: &mut StepOutcome) {
        let Some((program, args)) = outcome.step.program() else {
            outcome.status = StepStatus::Failed;
            outcome.launch_error = Some("empty command".into());
            return;
        };

        match self
            .runner
            .run(program, args, outcome.step.working_directory())
        {
            Ok(output) => {
                outcome.exit_code = output.exit_code;
                outcome.output = output.combined();
                outcome.status = if output.success {
                    StepStatus::Succeeded
                } else {
                    StepStatus::Failed
                };
            }
            Err(e) => {
                outcome.status = StepStatus::Failed;
                outcome.launch_error = Some(e.to_string());
            }
        }
    }
}

impl SetupReport {
    /// Turn a failed run into [`ApplicationError::SetupStepFailed`].
    pub fn into_result(self) -> MonorepoResult<SetupReport> {
        let Some(failed) = self.failure() else {
            return Ok(self);
        };
        let output = match &failed.launch_error {
            Some(reason) if failed.output.is_empty() => reason.clone(),
            _ => failed.output.clone(),
        };
        Err(ApplicationError::SetupStepFailed {
            step: failed.step.description.clone(),
            command: failed.step.command_line(),
            exit_code: failed.exit_code,
            output,
        }
        .into())
    }
}
