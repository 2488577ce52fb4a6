//! Implementation of `create-monorepo <NAME>`.
//!
//! Responsibility: wire adapters into the core services, run them in order,
//! and display results. No business logic lives here.

use serde::Serialize;
use tracing::{debug, info, instrument};

use monorepo_adapters::{LocalFilesystem, MONOREPO_TEMPLATE, SystemCommandRunner};
use monorepo_core::{
    application::{
        ApplicationError, ConfigResolver, SetupOrchestrator,
        TemplateMaterializer, ports::Filesystem,
    },
    domain::{
        ProjectName, ProjectRequest, RenderContext, ResolvedConfig, SetupReport, SetupStep,
        StepStatus,
    },
    error::MonorepoError,
};

use crate::{
    cli::Cli,
    config::EnvConfig,
    error::{CliError, CliResult},
    output::{OutputManager, SpinnerProgress},
};

/// JSON summary written on success with `--output-format json`.
#[derive(Debug, Serialize)]
struct Summary<'a> {
    status: &'static str,
    project: &'a ResolvedConfig,
    files: Vec<&'static str>,
    setup: SetupReport,
    next_steps: Vec<String>,
}

/// Execute the command.
///
/// 1. Validate the project name
/// 2. Resolve the base and project directories
/// 3. Early-exit if `--dry-run`
/// 4. Materialize the bundled skeleton
/// 5. Run the setup plan unless `--skip-setup`
/// 6. Print the project path and next steps
#[instrument(skip_all, fields(project = %cli.name))]
pub fn execute(cli: Cli, env: EnvConfig, output: &OutputManager) -> CliResult<()> {
    // 1. Name
    let name = ProjectName::parse(&cli.name).map_err(|e| CliError::Core(e.into()))?;
    let request = ProjectRequest::new(name, cli.base_path);

    // 2. Configuration
    let resolver = ConfigResolver::new(
        Box::new(LocalFilesystem::new()),
        env.home_dir.clone(),
        env.current_dir.clone(),
    );
    let config = resolver.resolve(&request, env.base_path.as_deref())?;
    debug!(
        base = %config.base_directory().display(),
        project = %config.project_directory().display(),
        "Configuration resolved"
    );

    let plan = SetupOrchestrator::plan(&config);

    // 3. Dry run: describe but do not write.
    if cli.dry_run {
        return dry_run(&config, plan, output);
    }

    // 4. Materialize
    output.header(&format!(
        "Creating '{}' in {}",
        config.project_name(),
        config.base_directory().display()
    ))?;
    info!(path = %config.project_directory().display(), "Materialization started");

    let materializer = TemplateMaterializer::new(Box::new(LocalFilesystem::new()));
    let ctx = RenderContext::new(config.project_name());
    let tree = materializer.materialize(config.project_directory(), &MONOREPO_TEMPLATE, &ctx)?;
    output.success(&format!(
        "Wrote {} files in {} directories",
        tree.files, tree.directories
    ))?;

    // 5. Setup
    let report = if cli.skip_setup {
        output.info("Skipping setup (--skip-setup)")?;
        SetupReport::not_run(plan)
    } else {
        output.header("Setting up the project")?;
        let orchestrator = SetupOrchestrator::new(Box::new(SystemCommandRunner::new()));
        orchestrator.run(plan, &mut SpinnerProgress::new(output))
    };

    for warning in report.warnings() {
        output.warning(&format!(
            "{} failed; run `{}` in {} yourself",
            warning.step.description,
            warning.step.command_line(),
            warning.step.working_directory().display()
        ))?;
        if !warning.output.is_empty() {
            output.detail(&warning.output)?;
        }
    }

    let report = report.into_result()?;
    info!(
        succeeded = report.count(StepStatus::Succeeded),
        skipped = report.count(StepStatus::Skipped),
        "Project ready"
    );

    // 6. Summary
    let steps = next_steps(&config);
    output.json(&Summary {
        status: "created",
        project: &config,
        files: MONOREPO_TEMPLATE.files().map(|f| f.path).collect(),
        setup: report,
        next_steps: steps.clone(),
    })?;

    output.print("")?;
    output.success(&format!(
        "Project '{}' created at {}",
        config.project_name(),
        config.project_directory().display()
    ))?;
    output.print("")?;
    output.print("Next steps:")?;
    for (i, step) in steps.iter().enumerate() {
        output.print(&format!("  {}. {step}", i + 1))?;
    }

    Ok(())
}

/// Report what a real run would do. Reads the filesystem, never writes it.
fn dry_run(config: &ResolvedConfig, plan: Vec<SetupStep>, output: &OutputManager) -> CliResult<()> {
    if LocalFilesystem::new().exists(config.project_directory()) {
        return Err(CliError::Core(MonorepoError::from(
            ApplicationError::ProjectExists {
                path: config.project_directory().to_path_buf(),
            },
        )));
    }

    #[derive(Serialize)]
    struct DryRun<'a> {
        status: &'static str,
        project: &'a ResolvedConfig,
        directories: Vec<std::path::PathBuf>,
        files: Vec<&'static str>,
        setup: &'a [SetupStep],
    }

    output.json(&DryRun {
        status: "dry_run",
        project: config,
        directories: MONOREPO_TEMPLATE.directories(),
        files: MONOREPO_TEMPLATE.files().map(|f| f.path).collect(),
        setup: &plan,
    })?;

    output.info(&format!(
        "Dry run: would create {}",
        config.project_directory().display()
    ))?;
    output.print("")?;
    output.print("Files:")?;
    for file in MONOREPO_TEMPLATE.files() {
        output.print(&format!("  {}", file.path))?;
    }
    output.print("")?;
    output.print("Setup:")?;
    for step in &plan {
        let marker = if step.required { "" } else { " (optional)" };
        output.print(&format!(
            "  {}{marker}: `{}` in {}",
            step.description,
            step.command_line(),
            step.working_directory().display()
        ))?;
    }

    Ok(())
}

/// The fixed, ordered instructions printed after a successful run.
pub fn next_steps(config: &ResolvedConfig) -> Vec<String> {
    vec![
        format!("cd {}", config.project_directory().display()),
        "git add . && git commit -m 'Initial commit'".to_string(),
        "Backend: cd backend && source .venv/bin/activate && python -m uvicorn app.main:app --reload"
            .to_string(),
        "Frontend: cd frontend && npm run dev".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_steps_start_with_cd_into_project() {
        let config = ResolvedConfig::new("/tmp/x", ProjectName::parse("demo").unwrap());
        let steps = next_steps(&config);

        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0], "cd /tmp/x/demo");
        assert!(steps[1].starts_with("git add ."));
        assert!(steps[2].contains("uvicorn app.main:app"));
        assert!(steps[3].contains("npm run dev"));
    }
}
