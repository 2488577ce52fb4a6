//! Shared sandbox for end-to-end tests.
//!
//! Each test gets a temp dir with a fake `HOME`, a `bin/` holding stub
//! `git`, `uv` and `npm` scripts, and `PATH` pointing only at that `bin/`.
//! Stubs append their argv to `calls.log`.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use walkdir::WalkDir;

pub const TOOLS: [&str; 3] = ["git", "uv", "npm"];

pub struct Sandbox {
    pub tmp: TempDir,
}

impl Sandbox {
    /// Sandbox where every tool succeeds.
    pub fn new() -> Self {
        let sandbox = Self {
            tmp: TempDir::new().unwrap(),
        };
        fs::create_dir_all(sandbox.home()).unwrap();
        fs::create_dir_all(sandbox.bin()).unwrap();
        for tool in TOOLS {
            sandbox.stub(tool, 0, "");
        }
        sandbox
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn home(&self) -> PathBuf {
        self.root().join("home")
    }

    pub fn bin(&self) -> PathBuf {
        self.root().join("bin")
    }

    pub fn log(&self) -> PathBuf {
        self.root().join("calls.log")
    }

    /// Replace `tool` with a script that prints `stderr` and exits with `code`.
    pub fn stub(&self, tool: &str, code: i32, stderr: &str) {
        let path = self.bin().join(tool);
        let script = format!(
            "#!/bin/sh\necho \"{tool} $*\" >> \"{log}\"\necho \"{stderr}\" >&2\nexit {code}\n",
            log = self.log().display(),
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Replace `tool` with a script that logs the value `var` has in its
    /// environment, or `unset`.
    pub fn stub_reporting_env(&self, tool: &str, var: &str) {
        let path = self.bin().join(tool);
        let script = format!(
            "#!/bin/sh\necho \"{tool} {var}=${{{var}:-unset}}\" >> \"{log}\"\n",
            log = self.log().display(),
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Remove `tool` from `PATH` entirely.
    pub fn remove_tool(&self, tool: &str) {
        fs::remove_file(self.bin().join(tool)).unwrap();
    }

    /// Commands the stubs saw, one per line.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log())
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// The binary with a clean, sandboxed environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("create-monorepo").unwrap();
        cmd.current_dir(self.root())
            .env_clear()
            .env("PATH", self.bin())
            .env("HOME", self.home())
            .env("NO_COLOR", "1");
        cmd
    }
}

/// Relative path -> file bytes (`None` for directories).
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            let content = e
                .file_type()
                .is_file()
                .then(|| fs::read(e.path()).unwrap());
            (rel, content)
        })
        .collect()
}
