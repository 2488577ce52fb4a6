//! In-memory filesystem adapter for testing.
//!
//! Supports failure injection so rollback behaviour can be exercised without
//! touching a real disk.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use monorepo_core::{
    application::{ApplicationError, ports::Filesystem},
    error::MonorepoResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep one handle while a service owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    executables: HashSet<PathBuf>,
    /// Writes and directory creations at these paths fail.
    failing_paths: HashSet<PathBuf>,
    /// Number of successful file writes left before every write fails.
    write_budget: Option<usize>,
    fail_removal: bool,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write or directory creation at `path` fail.
    pub fn fail_at(&self, path: impl Into<PathBuf>) -> &Self {
        self.write().failing_paths.insert(path.into());
        self
    }

    /// Allow `n` file writes to succeed, then fail every later one.
    pub fn fail_after_writes(&self, n: usize) -> &Self {
        self.write().write_budget = Some(n);
        self
    }

    /// Make `remove_dir_all` fail.
    pub fn fail_removal(&self) -> &Self {
        self.write().fail_removal = true;
        self
    }

    /// Clear all injected failures.
    pub fn heal(&self) {
        let mut inner = self.write();
        inner.failing_paths.clear();
        inner.write_budget = None;
        inner.fail_removal = false;
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<Vec<u8>> {
        self.read().files.get(path).cloned()
    }

    /// Read a file as UTF-8 text.
    pub fn read_to_string(&self, path: &Path) -> Option<String> {
        self.read_file(path)
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        self.read().executables.contains(path)
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read().files.keys().cloned().collect()
    }

    /// All directories, sorted.
    pub fn list_directories(&self) -> Vec<PathBuf> {
        self.read().directories.iter().cloned().collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock(&self) -> MonorepoResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }
}

fn fs_error(path: &Path, reason: &str) -> monorepo_core::error::MonorepoError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

impl MemoryFilesystemInner {
    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && parent != Path::new("/") => {
                self.directories.contains(parent)
            }
            _ => true,
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir(&self, path: &Path) -> MonorepoResult<()> {
        let mut inner = self.lock()?;

        if inner.failing_paths.contains(path) {
            return Err(fs_error(path, "injected failure"));
        }
        if inner.exists(path) {
            return Err(ApplicationError::ProjectExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        if !inner.parent_exists(path) {
            return Err(fs_error(path, "Parent directory does not exist"));
        }

        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> MonorepoResult<()> {
        let mut inner = self.lock()?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.failing_paths.contains(&current) {
                return Err(fs_error(&current, "injected failure"));
            }
            if inner.files.contains_key(&current) {
                return Err(fs_error(&current, "Not a directory"));
            }
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> MonorepoResult<()> {
        let mut inner = self.lock()?;

        if inner.failing_paths.contains(path) {
            return Err(fs_error(path, "injected failure"));
        }
        if let Some(budget) = inner.write_budget.as_mut() {
            if *budget == 0 {
                return Err(fs_error(path, "No space left on device"));
            }
            *budget -= 1;
        }
        if !inner.parent_exists(path) {
            return Err(fs_error(path, "Parent directory does not exist"));
        }
        if inner.directories.contains(path) {
            return Err(fs_error(path, "Is a directory"));
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> MonorepoResult<()> {
        let mut inner = self.lock()?;

        if !inner.files.contains_key(path) {
            return Err(fs_error(path, "No such file"));
        }
        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.read().exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read().directories.contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> MonorepoResult<()> {
        let mut inner = self.lock()?;

        if inner.fail_removal {
            return Err(fs_error(path, "Device or resource busy"));
        }
        if !inner.directories.contains(path) {
            return Err(fs_error(path, "No such directory"));
        }

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.executables.retain(|p| !p.starts_with(path));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dir_all_registers_every_ancestor() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/a/b/c")).unwrap();
        assert!(fs.is_dir(Path::new("/a")));
        assert!(fs.is_dir(Path::new("/a/b")));
        assert!(fs.is_dir(Path::new("/a/b/c")));
    }

    #[test]
    fn create_dir_needs_parent_and_refuses_existing() {
        let fs = MemoryFilesystem::new();
        assert!(fs.create_dir(Path::new("/a/b")).is_err());
        fs.create_dir(Path::new("/a")).unwrap();
        assert!(fs.create_dir(Path::new("/a")).is_err());
    }

    #[test]
    fn remove_dir_all_drops_the_subtree_only() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/base/demo/src")).unwrap();
        fs.write_file(Path::new("/base/demo/src/x"), b"x").unwrap();
        fs.create_dir(Path::new("/base/other")).unwrap();

        fs.remove_dir_all(Path::new("/base/demo")).unwrap();

        assert!(!fs.exists(Path::new("/base/demo")));
        assert!(!fs.exists(Path::new("/base/demo/src/x")));
        assert!(fs.is_dir(Path::new("/base/other")));
    }

    #[test]
    fn write_budget_fails_later_writes() {
        let fs = MemoryFilesystem::new();
        fs.create_dir(Path::new("/d")).unwrap();
        fs.fail_after_writes(1);

        assert!(fs.write_file(Path::new("/d/1"), b"").is_ok());
        assert!(fs.write_file(Path::new("/d/2"), b"").is_err());

        fs.heal();
        assert!(fs.write_file(Path::new("/d/2"), b"").is_ok());
    }

    #[test]
    fn executable_flag_is_tracked() {
        let fs = MemoryFilesystem::new();
        fs.create_dir(Path::new("/d")).unwrap();
        fs.write_file(Path::new("/d/run.sh"), b"#!/bin/sh").unwrap();
        fs.set_permissions(Path::new("/d/run.sh"), true).unwrap();
        assert!(fs.is_executable(Path::new("/d/run.sh")));
    }
}
