//! Process environment captured at startup.
//!
//! [`EnvConfig`] is read once in `main` and passed down by value, so the core
//! never consults the environment itself.
//!
//! # Base directory resolution (highest priority first)
//!
//! 1. `--base-path` (handled at the call-site, not here)
//! 2. `MONOREPO_BASE_PATH`, from the environment or a `.env` file
//! 3. `~/Projects`
//!
//! Nothing is validated here. A malformed value only fails once the resolver
//! picks it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use monorepo_core::BASE_PATH_ENV_VAR;

/// Environment inputs to configuration resolution.
#[derive(Debug, Clone, Serialize)]
pub struct EnvConfig {
    /// Raw value of `MONOREPO_BASE_PATH`, if set.
    pub base_path: Option<OsString>,
    /// Target of `~` expansion.
    pub home_dir: Option<PathBuf>,
    /// Anchor for relative base paths.
    pub current_dir: Option<PathBuf>,
}

impl EnvConfig {
    /// Capture the process environment.
    ///
    /// The process variable wins over `.env`. The `.env` file is read, never
    /// loaded, so its other entries do not reach the setup commands.
    pub fn load() -> Self {
        let current_dir = std::env::current_dir()
            .inspect_err(|e| warn!(error = %e, "Current directory is unavailable"))
            .ok();

        let base_path = std::env::var_os(BASE_PATH_ENV_VAR).or_else(|| {
            current_dir
                .as_deref()
                .and_then(|dir| dotenv_base_path(&dir.join(".env")))
                .map(OsString::from)
        });

        Self {
            base_path,
            home_dir: dirs::home_dir(),
            current_dir,
        }
    }
}

/// `MONOREPO_BASE_PATH` from a dotenv file. A missing file is normal.
fn dotenv_base_path(path: &Path) -> Option<String> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => return None,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Ignoring unreadable .env");
            return None;
        }
    };

    for entry in entries {
        match entry {
            Ok((key, value)) if key == BASE_PATH_ENV_VAR => {
                debug!(path = %path.display(), "Base path taken from .env");
                return Some(value);
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Stopped reading malformed .env");
                return None;
            }
        }
    }
    None
}
