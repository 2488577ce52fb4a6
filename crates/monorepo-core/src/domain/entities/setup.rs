//! Setup steps and the report produced by running them.
//!
//! Per step: `Pending -> Running -> {Succeeded, Failed, Skipped}`.
//! A run is `Succeeded` only if every required step reached `Succeeded`.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// One external command to run against the generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupStep {
    pub description: String,
    pub command: Vec<String>,
    pub working_directory: PathBuf,
    pub required: bool,
}

impl SetupStep {
    /// A step whose failure aborts the remaining sequence.
    pub fn required(
        description: impl Into<String>,
        command: &[&str],
        working_directory: impl Into<PathBuf>,
    ) -> Self {
        Self::new(description, command, working_directory, true)
    }

    /// A step whose failure is recorded and then ignored.
    pub fn optional(
        description: impl Into<String>,
        command: &[&str],
        working_directory: impl Into<PathBuf>,
    ) -> Self {
        Self::new(description, command, working_directory, false)
    }

    fn new(
        description: impl Into<String>,
        command: &[&str],
        working_directory: impl Into<PathBuf>,
        required: bool,
    ) -> Self {
        Self {
            description: description.into(),
            command: command.iter().map(|s| s.to_string()).collect(),
            working_directory: working_directory.into(),
            required,
        }
    }

    /// Program and arguments, or `None` for an empty command.
    pub fn program(&self) -> Option<(&str, &[String])> {
        self.command
            .split_first()
            .map(|(program, args)| (program.as_str(), args))
    }

    /// The command as the operator would type it.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }
}

/// Result of a finished external process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run with no output.
    pub fn ok() -> Self {
        Self {
            exit_code: Some(0),
            success: true,
            ..Self::default()
        }
    }

    /// A run that exited with `code`.
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            success: code == 0,
            ..Self::default()
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// stdout followed by stderr, trimmed.
    pub fn combined(&self) -> String {
        let mut out = String::new();
        for part in [self.stdout.trim_end(), self.stderr.trim_end()] {
            if part.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(part);
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Skipped,
}

/// What happened to one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: SetupStep,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Captured stdout + stderr of the command.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub output: String,
    /// Why the command could not be started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_error: Option<String>,
}

impl StepOutcome {
    pub fn pending(step: SetupStep) -> Self {
        Self {
            step,
            status: StepStatus::Pending,
            exit_code: None,
            output: String::new(),
            launch_error: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == StepStatus::Failed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Succeeded,
    Failed,
    /// Setup was not attempted (`--skip-setup`, dry runs).
    NotRun,
}

/// Outcome of a whole setup run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupReport {
    pub state: RunState,
    pub steps: Vec<StepOutcome>,
    /// Index into `steps` of the required step that aborted the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_step: Option<usize>,
}

impl SetupReport {
    /// Build a report from finished outcomes, deriving the overall state.
    pub fn from_outcomes(steps: Vec<StepOutcome>) -> Self {
        let failed_step = steps
            .iter()
            .position(|o| o.step.required && o.status == StepStatus::Failed);
        let all_required_ok = steps
            .iter()
            .filter(|o| o.step.required)
            .all(|o| o.status == StepStatus::Succeeded);
        let state = if all_required_ok {
            RunState::Succeeded
        } else {
            RunState::Failed
        };
        Self {
            state,
            steps,
            failed_step,
        }
    }

    /// A report for a plan that was deliberately not executed.
    pub fn not_run(steps: Vec<SetupStep>) -> Self {
        Self {
            state: RunState::NotRun,
            steps: steps
                .into_iter()
                .map(|step| StepOutcome {
                    status: StepStatus::Skipped,
                    ..StepOutcome::pending(step)
                })
                .collect(),
            failed_step: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.state == RunState::Succeeded
    }

    /// The required step that aborted the run, if any.
    pub fn failure(&self) -> Option<&StepOutcome> {
        self.failed_step.and_then(|i| self.steps.get(i))
    }

    /// Optional steps that failed without stopping the run.
    pub fn warnings(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|o| !o.step.required && o.is_failed())
    }

    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|o| o.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(step: SetupStep, status: StepStatus) -> StepOutcome {
        StepOutcome {
            status,
            ..StepOutcome::pending(step)
        }
    }

    #[test]
    fn program_splits_command() {
        let step = SetupStep::required("sync", &["uv", "sync", "--dev"], "/p/backend");
        let (program, args) = step.program().unwrap();
        assert_eq!(program, "uv");
        assert_eq!(args, ["sync", "--dev"]);
        assert_eq!(step.command_line(), "uv sync --dev");
    }

    #[test]
    fn empty_command_has_no_program() {
        let step = SetupStep::required("nothing", &[], "/p");
        assert!(step.program().is_none());
    }

    #[test]
    fn failed_optional_step_does_not_fail_the_run() {
        let report = SetupReport::from_outcomes(vec![
            outcome(SetupStep::optional("git", &["git", "init"], "/p"), StepStatus::Failed),
            outcome(SetupStep::required("npm", &["npm", "install"], "/p"), StepStatus::Succeeded),
        ]);
        assert!(report.succeeded());
        assert!(report.failure().is_none());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn failed_required_step_fails_the_run() {
        let report = SetupReport::from_outcomes(vec![
            outcome(SetupStep::required("venv", &["uv", "venv"], "/p"), StepStatus::Failed),
            outcome(SetupStep::required("npm", &["npm", "install"], "/p"), StepStatus::Skipped),
        ]);
        assert_eq!(report.state, RunState::Failed);
        assert_eq!(report.failed_step, Some(0));
        assert_eq!(report.failure().unwrap().step.description, "venv");
    }

    #[test]
    fn not_run_report_skips_everything() {
        let report = SetupReport::not_run(vec![
            SetupStep::optional("git", &["git", "init"], "/p"),
            SetupStep::required("npm", &["npm", "install"], "/p"),
        ]);
        assert_eq!(report.state, RunState::NotRun);
        assert_eq!(report.count(StepStatus::Skipped), 2);
        assert!(!report.succeeded());
    }

    #[test]
    fn combined_output_joins_streams() {
        let out = CommandOutput::exited(1)
            .with_stdout("resolving\n")
            .with_stderr("ERR! 404\n");
        assert_eq!(out.combined(), "resolving\nERR! 404");
        assert!(!out.success);
        assert_eq!(CommandOutput::ok().combined(), "");
    }
}
