//! Command runner backed by `std::process::Command`.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use monorepo_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::CommandOutput,
    error::MonorepoResult,
};

/// Runs commands on the host, blocking until they exit.
///
/// stdin is closed so a tool that prompts fails instead of hanging. stdout and
/// stderr are captured and handed back in the [`CommandOutput`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    #[instrument(skip(self, args), fields(cwd = %working_directory.display()))]
    fn run(
        &self,
        program: &str,
        args: &[String],
        working_directory: &Path,
    ) -> MonorepoResult<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(working_directory)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::CommandLaunch {
                command: display_command(program, args),
                reason: e.to_string(),
            })?;

        let result = CommandOutput {
            exit_code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(exit_code = ?result.exit_code, "Command finished");
        Ok(result)
    }
}

fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
