//! End-to-end runs of the `create-monorepo` binary.

#![cfg(unix)]

mod common;

use std::fs;

use predicates::prelude::*;

use common::Sandbox;

#[test]
fn test_help_flag() {
    Sandbox::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--base-path"))
        .stdout(predicate::str::contains("MONOREPO_BASE_PATH"));
}

#[test]
fn test_version_flag() {
    Sandbox::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_creates_project_under_explicit_base_path() {
    let sb = Sandbox::new();
    let base = sb.root().join("x");
    fs::create_dir(&base).unwrap();

    sb.cmd()
        .args(["demo", "--base-path"])
        .arg(&base)
        .assert()
        .success()
        .stdout(predicate::str::contains(base.join("demo").display().to_string()))
        .stdout(predicate::str::contains("Next steps:"))
        .stdout(predicate::str::contains("npm run dev"));

    let project = base.join("demo");
    assert!(project.join("backend").is_dir());
    assert!(project.join("frontend").is_dir());
    assert!(project.join(".gitignore").is_file());
    assert!(project.join(".vscode/settings.json").is_file());

    assert_eq!(
        sb.calls(),
        ["git init", "uv venv", "uv sync --dev", "npm install"]
    );
}

#[test]
fn test_env_var_is_used_without_flag() {
    let sb = Sandbox::new();
    let from_env = sb.root().join("env-base");

    sb.cmd()
        .env("MONOREPO_BASE_PATH", &from_env)
        .args(["demo", "--skip-setup"])
        .assert()
        .success();

    assert!(from_env.join("demo/backend").is_dir());
}

#[test]
fn test_flag_beats_env_var() {
    let sb = Sandbox::new();
    let from_env = sb.root().join("env-base");
    let from_flag = sb.root().join("flag-base");

    sb.cmd()
        .env("MONOREPO_BASE_PATH", &from_env)
        .args(["demo", "--skip-setup", "--base-path"])
        .arg(&from_flag)
        .assert()
        .success();

    assert!(from_flag.join("demo").is_dir());
    assert!(!from_env.exists());
}

#[test]
fn test_flag_wins_over_non_utf8_env_var() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let sb = Sandbox::new();
    let from_flag = sb.root().join("x");

    sb.cmd()
        .env("MONOREPO_BASE_PATH", OsStr::from_bytes(b"/tmp/\xff\xfe"))
        .args(["demo", "--skip-setup", "--base-path"])
        .arg(&from_flag)
        .assert()
        .success();

    assert!(from_flag.join("demo/backend").is_dir());
}

#[test]
fn test_base_path_read_from_dotenv() {
    let sb = Sandbox::new();
    let from_dotenv = sb.root().join("dotenv-base");
    fs::write(
        sb.root().join(".env"),
        format!("MONOREPO_BASE_PATH={}\n", from_dotenv.display()),
    )
    .unwrap();

    sb.cmd().args(["demo", "--skip-setup"]).assert().success();

    assert!(from_dotenv.join("demo/frontend").is_dir());
}

#[test]
fn test_dotenv_entries_do_not_reach_setup_commands() {
    let sb = Sandbox::new();
    let base = sb.root().join("x");
    fs::write(sb.root().join(".env"), "NODE_ENV=production\n").unwrap();
    sb.stub_reporting_env("npm", "NODE_ENV");

    sb.cmd()
        .args(["demo", "--base-path"])
        .arg(&base)
        .assert()
        .success();

    assert_eq!(
        sb.calls(),
        ["git init", "uv venv", "uv sync --dev", "npm NODE_ENV=unset"]
    );
}

#[test]
fn test_default_base_is_home_projects() {
    let sb = Sandbox::new();

    sb.cmd().args(["demo", "--skip-setup"]).assert().success();

    assert!(sb.home().join("Projects/demo/frontend").is_dir());
}

#[test]
fn test_blank_env_var_falls_through_to_default() {
    let sb = Sandbox::new();

    sb.cmd()
        .env("MONOREPO_BASE_PATH", "  ")
        .args(["demo", "--skip-setup"])
        .assert()
        .success();

    assert!(sb.home().join("Projects/demo").is_dir());
}

#[test]
fn test_tilde_in_base_path_expands_to_home() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["demo", "--skip-setup", "--base-path", "~/work"])
        .assert()
        .success();

    assert!(sb.home().join("work/demo").is_dir());
}

#[test]
fn test_skip_setup_runs_no_commands() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["demo", "--skip-setup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping setup"));

    assert!(sb.calls().is_empty());
}

#[test]
fn test_optional_git_failure_does_not_stop_setup() {
    let sb = Sandbox::new();
    sb.stub("git", 128, "fatal: not allowed");

    sb.cmd()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialize git repository failed"));

    assert_eq!(
        sb.calls(),
        ["git init", "uv venv", "uv sync --dev", "npm install"]
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["demo", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("backend/pyproject.toml"))
        .stdout(predicate::str::contains("npm install"));

    assert!(!sb.home().join("Projects").exists());
    assert!(sb.calls().is_empty());
}

#[test]
fn test_json_summary() {
    let sb = Sandbox::new();

    let out = sb
        .cmd()
        .args(["demo", "--output-format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let summary: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(summary["status"], "created");
    assert_eq!(summary["project"]["project_name"], "demo");
    assert_eq!(summary["setup"]["state"], "succeeded");
    assert_eq!(summary["next_steps"].as_array().unwrap().len(), 4);
}

#[test]
fn test_quiet_prints_nothing_on_success() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["demo", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
