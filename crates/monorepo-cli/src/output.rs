//! Output management and formatting.
//!
//! Human output goes to stdout through [`OutputManager`]; the setup spinner
//! and errors go to stderr. In JSON mode stdout carries exactly one JSON
//! document and nothing else.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use monorepo_core::{
    application::SetupProgress,
    domain::{SetupStep, StepOutcome, StepStatus},
};

use crate::cli::global::{GlobalArgs, OutputFormat};

/// Manages CLI output based on the global flags.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet || resolved_format == OutputFormat::Json,
            no_color: args.no_color || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>` on stderr. Never suppressed.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        Term::stderr().write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Dimmed secondary line, e.g. captured command output.
    pub fn detail(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        for line in text.lines() {
            let line = if self.no_color {
                format!("    {line}")
            } else {
                format!("    {}", line.dimmed())
            };
            self.term.write_line(&line)?;
        }
        Ok(())
    }

    /// Write `value` as pretty JSON. Only does anything in JSON mode.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        if self.resolved_format != OutputFormat::Json {
            return Ok(());
        }
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if human-readable output is suppressed.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

/// Reports setup progress with a spinner while a command runs, then one
/// status line per finished step.
pub struct SpinnerProgress<'a> {
    output: &'a OutputManager,
    bar: Option<ProgressBar>,
}

impl<'a> SpinnerProgress<'a> {
    pub fn new(output: &'a OutputManager) -> Self {
        Self { output, bar: None }
    }

    fn spinner(&self) -> ProgressBar {
        let target = if self.output.is_quiet() || !io::stderr().is_terminal() {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        };
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }
}

impl SetupProgress for SpinnerProgress<'_> {
    fn step_started(&mut self, index: usize, total: usize, step: &SetupStep) {
        let bar = self.spinner();
        bar.set_message(format!(
            "[{}/{total}] {} ({})",
            index + 1,
            step.description,
            step.command_line()
        ));
        self.bar = Some(bar);
    }

    fn step_finished(&mut self, index: usize, total: usize, outcome: &StepOutcome) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }

        let label = format!("[{}/{total}] {}", index + 1, outcome.step.description);
        // Progress output is best effort.
        let _ = match outcome.status {
            StepStatus::Succeeded => self.output.success(&label),
            StepStatus::Failed if !outcome.step.required => self
                .output
                .warning(&format!("{label} failed (optional, continuing)")),
            StepStatus::Failed => self.output.error(&format!("{label} failed")),
            StepStatus::Skipped => self.output.info(&format!("{label} skipped")),
            StepStatus::Pending | StepStatus::Running => Ok(()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            output_format: format,
        };
        OutputManager::new(&args)
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
        assert!(out.is_quiet());
    }

    #[test]
    fn error_not_suppressed_in_quiet_mode() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.error("something went wrong").is_ok());
    }

    #[test]
    fn human_format_keeps_color_unless_disabled() {
        assert!(make_manager(false, false, OutputFormat::Human).supports_color());
        assert!(!make_manager(false, true, OutputFormat::Human).supports_color());
        assert!(!make_manager(false, false, OutputFormat::Plain).supports_color());
    }

    #[test]
    fn json_format_silences_human_output() {
        let out = make_manager(false, false, OutputFormat::Json);
        assert!(out.is_quiet());
        assert_eq!(out.format(), OutputFormat::Json);
    }

    #[test]
    fn spinner_progress_handles_a_full_step() {
        let out = make_manager(true, true, OutputFormat::Plain);
        let mut progress = SpinnerProgress::new(&out);
        let step = SetupStep::required("Install", &["npm", "install"], "/tmp");

        progress.step_started(0, 1, &step);
        assert!(progress.bar.is_some());

        let outcome = StepOutcome {
            status: StepStatus::Succeeded,
            ..StepOutcome::pending(step)
        };
        progress.step_finished(0, 1, &outcome);
        assert!(progress.bar.is_none());
    }
}
