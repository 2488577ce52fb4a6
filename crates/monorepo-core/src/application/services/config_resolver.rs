//! Config Resolver - decides where new projects are created.
//!
//! Three sources, first present non-empty value wins:
//!
//! 1. `--base-path` flag
//! 2. `MONOREPO_BASE_PATH` environment variable
//! 3. [`DEFAULT_BASE_PATH`]
//!
//! The environment value and the home/current directories are passed in by
//! the caller; nothing here reads process state. The only filesystem access is
//! a read-only check that an existing base path is a directory.
//!
//! The environment value is taken raw. It only has to be valid UTF-8 when it
//! is the source that wins.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{ProjectRequest, ResolvedConfig},
    error::MonorepoResult,
};

/// Base directory used when neither the flag nor the environment provide one.
pub const DEFAULT_BASE_PATH: &str = "~/Projects";

/// Environment variable consulted when `--base-path` is absent.
pub const BASE_PATH_ENV_VAR: &str = "MONOREPO_BASE_PATH";

/// Which source the base directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseSource {
    Flag,
    Environment,
    Default,
}

impl BaseSource {
    /// Pick the winning source. Blank values count as absent.
    ///
    /// Sources after the winner are never inspected, so a malformed
    /// environment value only fails when no flag was given.
    pub fn select<'a>(
        cli: Option<&'a str>,
        env: Option<&'a OsStr>,
        default: &'a str,
    ) -> Result<(Self, &'a str), ApplicationError> {
        let present = |v: Option<&'a str>| v.filter(|s| !s.trim().is_empty());

        if let Some(value) = present(cli) {
            return Ok((Self::Flag, value));
        }

        let env = env
            .map(|raw| {
                raw.to_str().ok_or_else(|| ApplicationError::InvalidBasePath {
                    path: PathBuf::from(raw),
                    reason: format!("{BASE_PATH_ENV_VAR} is not valid UTF-8"),
                })
            })
            .transpose()?;

        Ok(match present(env) {
            Some(value) => (Self::Environment, value),
            None => (Self::Default, default),
        })
    }
}

/// Resolves the base directory and the project directory beneath it.
pub struct ConfigResolver {
    filesystem: Box<dyn Filesystem>,
    home: Option<PathBuf>,
    cwd: Option<PathBuf>,
}

impl ConfigResolver {
    /// `home` expands `~`; `cwd` anchors relative paths. Either may be unknown,
    /// which only matters when the chosen path needs it.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        home: Option<PathBuf>,
        cwd: Option<PathBuf>,
    ) -> Self {
        Self {
            filesystem,
            home,
            cwd,
        }
    }

    /// Resolve the full configuration for one request.
    #[instrument(skip_all, fields(project = %request.name()))]
    pub fn resolve(
        &self,
        request: &ProjectRequest,
        env_base_path: Option<&OsStr>,
    ) -> MonorepoResult<ResolvedConfig> {
        let base = self.resolve_base(
            request.base_path_override(),
            env_base_path,
            DEFAULT_BASE_PATH,
        )?;
        Ok(ResolvedConfig::new(base, request.name().clone()))
    }

    /// Merge the three sources into an absolute base directory.
    ///
    /// Fails with [`ApplicationError::InvalidBasePath`] when the result exists
    /// and is not a directory, when the winning environment value is not
    /// UTF-8, or when `~` or a relative path cannot be anchored.
    pub fn resolve_base(
        &self,
        cli: Option<&str>,
        env: Option<&OsStr>,
        default: &str,
    ) -> MonorepoResult<PathBuf> {
        let (source, raw) = BaseSource::select(cli, env, default)?;
        let path = self.expand(raw.trim())?;
        debug!(?source, raw, path = %path.display(), "Base directory selected");

        if self.filesystem.exists(&path) && !self.filesystem.is_dir(&path) {
            return Err(ApplicationError::InvalidBasePath {
                path,
                reason: "exists and is not a directory".into(),
            }
            .into());
        }

        Ok(path)
    }

    /// Tilde expansion followed by anchoring at the current directory.
    fn expand(&self, raw: &str) -> Result<PathBuf, ApplicationError> {
        let home = self.home.as_deref().and_then(Path::to_str);
        let wants_home = raw == "~" || raw.starts_with("~/") || raw.starts_with("~\\");
        if wants_home && home.is_none() {
            return Err(ApplicationError::InvalidBasePath {
                path: PathBuf::from(raw),
                reason: "home directory could not be determined".into(),
            });
        }

        let expanded = shellexpand::tilde_with_context(raw, || home);
        let path = PathBuf::from(expanded.as_ref());
        if path.is_absolute() {
            return Ok(path);
        }

        match &self.cwd {
            Some(cwd) => Ok(cwd.join(path)),
            None => Err(ApplicationError::InvalidBasePath {
                path,
                reason: "current directory could not be determined".into(),
            }),
        }
    }
}
