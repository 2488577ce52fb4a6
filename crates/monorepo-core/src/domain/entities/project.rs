use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::ProjectName;

/// What the operator asked for: created once from CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    name: ProjectName,
    base_path_override: Option<String>,
}

impl ProjectRequest {
    pub fn new(name: ProjectName, base_path_override: Option<String>) -> Self {
        Self {
            name,
            base_path_override,
        }
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn base_path_override(&self) -> Option<&str> {
        self.base_path_override.as_deref()
    }
}

/// Where the project goes, derived once by the config resolver.
///
/// `project_directory` is always `base_directory/name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    project_name: ProjectName,
    base_directory: PathBuf,
    project_directory: PathBuf,
}

impl ResolvedConfig {
    pub fn new(base_directory: impl Into<PathBuf>, project_name: ProjectName) -> Self {
        let base_directory = base_directory.into();
        let project_directory = base_directory.join(project_name.as_str());
        Self {
            project_name,
            base_directory,
            project_directory,
        }
    }

    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn project_directory(&self) -> &Path {
        &self.project_directory
    }

    /// `project_directory/backend`
    pub fn backend_directory(&self) -> PathBuf {
        self.project_directory.join("backend")
    }

    /// `project_directory/frontend`
    pub fn frontend_directory(&self) -> PathBuf {
        self.project_directory.join("frontend")
    }
}
