use super::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem path guaranteed to stay inside the directory it is joined to.
///
/// Invariant: non-empty, never absolute, no `..` components. Enforced at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let shown = || path.display().to_string();

        if path.as_os_str().is_empty() {
            return Err(DomainError::InvalidTemplate("empty path".into()));
        }
        if path.is_absolute() || path.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed { path: shown() });
        }
        for component in path.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => return Err(DomainError::PathEscapesRoot { path: shown() }),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(DomainError::AbsolutePathNotAllowed { path: shown() });
                }
            }
        }

        Ok(Self(path))
    }

    /// All proper ancestors, outermost first (`a/b/c` yields `a`, `a/b`).
    pub fn ancestors(&self) -> Vec<PathBuf> {
        let mut out: Vec<PathBuf> = self
            .0
            .ancestors()
            .skip(1)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect();
        out.reverse();
        out
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Mode applied to a written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMode {
    /// Platform-standard, non-executable.
    #[default]
    Standard,
    /// Executable by its owner (scripts).
    Executable,
}

impl FileMode {
    pub const fn is_executable(self) -> bool {
        matches!(self, Self::Executable)
    }
}
