//! Template Materializer - writes a [`TemplateSpec`] under a project root.
//!
//! All-or-nothing for the visible result: either the whole skeleton is on
//! disk, or the project directory is removed again before the error is
//! returned. A failed run therefore never blocks the next one.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{RenderContext, TemplateSpec},
    error::{MonorepoError, MonorepoResult},
};

/// Summary of a successful materialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedTree {
    pub root: PathBuf,
    pub directories: usize,
    pub files: usize,
}

/// Writes template skeletons to a filesystem.
pub struct TemplateMaterializer {
    filesystem: Box<dyn Filesystem>,
}

impl TemplateMaterializer {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Materialize `spec` into `project_directory`.
    ///
    /// 1. Validate the template (nothing touched on failure).
    /// 2. Refuse an existing `project_directory` (nothing touched).
    /// 3. Create the base directory if needed, then the project directory.
    /// 4. Create every subdirectory parents-first, then write every file.
    /// 5. On any write failure remove `project_directory` and return
    ///    [`ApplicationError::Materialization`].
    #[instrument(skip_all, fields(template = spec.name(), root = %project_directory.display()))]
    pub fn materialize(
        &self,
        project_directory: &Path,
        spec: &TemplateSpec,
        ctx: &RenderContext,
    ) -> MonorepoResult<MaterializedTree> {
        spec.validate()?;

        if self.filesystem.exists(project_directory) {
            return Err(ApplicationError::ProjectExists {
                path: project_directory.to_path_buf(),
            }
            .into());
        }

        if let Some(base) = project_directory.parent().filter(|p| !p.as_os_str().is_empty()) {
            // Nothing of the project exists yet, so there is nothing to roll back.
            self.filesystem
                .create_dir_all(base)
                .map_err(|e| failure(project_directory, &e, true))?;
        }

        self.filesystem
            .create_dir(project_directory)
            .map_err(|e| match e {
                MonorepoError::Application(ApplicationError::ProjectExists { .. }) => e,
                other => failure(project_directory, &other, true),
            })?;

        match self.write_all(project_directory, spec, ctx) {
            Ok(tree) => {
                info!(
                    directories = tree.directories,
                    files = tree.files,
                    "Skeleton written"
                );
                Ok(tree)
            }
            Err(e) => {
                warn!(error = %e, "Write failed, rolling back");
                let rolled_back = self.rollback(project_directory);
                Err(failure(project_directory, &e, rolled_back))
            }
        }
    }

    fn write_all(
        &self,
        root: &Path,
        spec: &TemplateSpec,
        ctx: &RenderContext,
    ) -> MonorepoResult<MaterializedTree> {
        let directories = spec.directories();
        for dir in &directories {
            self.filesystem.create_dir(&root.join(dir))?;
        }

        let mut files = 0;
        for file in spec.files() {
            let path = root.join(file.path);
            debug!(path = file.path, "Writing file");
            self.filesystem
                .write_file(&path, &file.content.render(ctx))?;
            if file.mode.is_executable() {
                self.filesystem.set_permissions(&path, true)?;
            }
            files += 1;
        }

        Ok(MaterializedTree {
            root: root.to_path_buf(),
            directories: directories.len(),
            files,
        })
    }

    /// Remove the partial tree. Returns whether it is gone.
    fn rollback(&self, root: &Path) -> bool {
        match self.filesystem.remove_dir_all(root) {
            Ok(()) => {
                info!("Rollback successful");
                true
            }
            Err(e) => {
                warn!(error = %e, path = %root.display(), "Rollback failed");
                !self.filesystem.exists(root)
            }
        }
    }
}

fn failure(root: &Path, cause: &MonorepoError, rolled_back: bool) -> MonorepoError {
    ApplicationError::Materialization {
        path: root.to_path_buf(),
        reason: cause.to_string(),
        rolled_back,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{ProjectName, TemplateContent, TemplateEntry};

    const SPEC: TemplateSpec = TemplateSpec::new(
        "mini",
        &[
            TemplateEntry::file(".gitignore", TemplateContent::Literal("node_modules\n")),
            TemplateEntry::file("backend/main.py", TemplateContent::Literal("")),
        ],
    );

    fn ctx() -> RenderContext {
        RenderContext::new(&ProjectName::parse("demo").unwrap())
    }

    #[test]
    fn existing_directory_is_never_touched() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(Path::new("/base/demo")))
            .return_const(true);
        // No other expectation: any write, create or remove would panic.
        let m = TemplateMaterializer::new(Box::new(fs));

        let err = m
            .materialize(Path::new("/base/demo"), &SPEC, &ctx())
            .unwrap_err();
        assert_eq!(
            err,
            ApplicationError::ProjectExists {
                path: PathBuf::from("/base/demo")
            }
            .into()
        );
    }

    #[test]
    fn invalid_spec_is_rejected_before_io() {
        const BAD: TemplateSpec = TemplateSpec::new(
            "bad",
            &[TemplateEntry::file("/abs", TemplateContent::Literal(""))],
        );
        let m = TemplateMaterializer::new(Box::new(MockFilesystem::new()));
        let err = m.materialize(Path::new("/base/demo"), &BAD, &ctx()).unwrap_err();
        assert!(matches!(err, MonorepoError::Domain(_)));
    }

    #[test]
    fn failing_write_triggers_rollback() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        fs.expect_remove_dir_all()
            .with(eq(Path::new("/base/demo")))
            .times(1)
            .returning(|_| Ok(()));
        let m = TemplateMaterializer::new(Box::new(fs));

        let err = m
            .materialize(Path::new("/base/demo"), &SPEC, &ctx())
            .unwrap_err();
        match err {
            MonorepoError::Application(ApplicationError::Materialization {
                path,
                reason,
                rolled_back,
            }) => {
                assert_eq!(path, PathBuf::from("/base/demo"));
                assert!(reason.contains("disk full"));
                assert!(rolled_back);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failed_rollback_is_reported() {
        let mut fs = MockFilesystem::new();
        // Absent before the run, still present after the failed cleanup.
        let mut checked = false;
        fs.expect_exists().returning(move |_| {
            let present = checked;
            checked = true;
            present
        });
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_dir().returning(|path| {
            if path.ends_with("backend") {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "permission denied".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });
        fs.expect_remove_dir_all().returning(|path| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "busy".into(),
            }
            .into())
        });
        let m = TemplateMaterializer::new(Box::new(fs));

        let err = m
            .materialize(Path::new("/base/demo"), &SPEC, &ctx())
            .unwrap_err();
        assert!(matches!(
            err,
            MonorepoError::Application(ApplicationError::Materialization {
                rolled_back: false,
                ..
            })
        ));
    }
}
