//! Static template description and rendering context.
//!
//! A [`TemplateSpec`] is a `'static` slice of [`TemplateEntry`] values defined
//! at build time. It is never mutated; the materializer walks it once.
//!
//! ```text
//! TemplateSpec
//!  └── &'static [TemplateEntry]
//!       ├── Directory(path)
//!       └── File(FileEntry { path, content, mode })
//!            └── TemplateContent
//!                 ├── Literal        written verbatim
//!                 ├── Asset          bundled bytes, copied byte-for-byte
//!                 └── Parameterized  {{VARIABLE}} substitution
//! ```

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::PathBuf;

use crate::domain::{
    entities::common::{FileMode, RelativePath},
    error::DomainError,
    value_objects::ProjectName,
};

/// The full skeleton of a generated project.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSpec {
    name: &'static str,
    entries: &'static [TemplateEntry],
}

impl TemplateSpec {
    pub const fn new(name: &'static str, entries: &'static [TemplateEntry]) -> Self {
        Self { name, entries }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn entries(&self) -> &'static [TemplateEntry] {
        self.entries
    }

    /// Check the skeleton can be written under any root.
    ///
    /// Rejects empty specs, absolute or escaping paths, duplicate paths, and a
    /// file path that is also used as a directory.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyTemplate {
                template: self.name.into(),
            });
        }

        let mut seen = HashSet::new();
        let mut files = HashSet::new();
        let mut directories = HashSet::new();

        for entry in self.entries {
            let path = RelativePath::try_new(entry.path())?;
            if !seen.insert(path.clone()) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }
            directories.extend(path.ancestors());
            match entry {
                TemplateEntry::Directory(_) => {
                    directories.insert(path.into_path_buf());
                }
                TemplateEntry::File(_) => {
                    files.insert(path.into_path_buf());
                }
            }
        }

        if let Some(clash) = files.intersection(&directories).next() {
            return Err(DomainError::DuplicatePath {
                path: clash.display().to_string(),
            });
        }

        Ok(())
    }

    /// Every directory the skeleton needs, explicit or implied by a file path,
    /// ordered so that parents always precede their children.
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut out = BTreeSet::new();
        for entry in self.entries {
            let Ok(path) = RelativePath::try_new(entry.path()) else {
                continue;
            };
            out.extend(path.ancestors());
            if let TemplateEntry::Directory(_) = entry {
                out.insert(path.into_path_buf());
            }
        }
        // `Path` orders component-wise, so a prefix sorts before its extensions.
        out.into_iter().collect()
    }

    pub fn files(&self) -> impl Iterator<Item = &'static FileEntry> {
        self.entries.iter().filter_map(|e| match e {
            TemplateEntry::File(f) => Some(f),
            TemplateEntry::Directory(_) => None,
        })
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }
}

/// One node of the skeleton.
#[derive(Debug, Clone, Copy)]
pub enum TemplateEntry {
    Directory(&'static str),
    File(FileEntry),
}

impl TemplateEntry {
    /// An (possibly empty) directory.
    pub const fn dir(path: &'static str) -> Self {
        Self::Directory(path)
    }

    /// A regular, non-executable file.
    pub const fn file(path: &'static str, content: TemplateContent) -> Self {
        Self::File(FileEntry {
            path,
            content,
            mode: FileMode::Standard,
        })
    }

    /// An executable file.
    pub const fn script(path: &'static str, content: TemplateContent) -> Self {
        Self::File(FileEntry {
            path,
            content,
            mode: FileMode::Executable,
        })
    }

    pub const fn path(&self) -> &'static str {
        match self {
            Self::Directory(path) => *path,
            Self::File(file) => file.path,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FileEntry {
    pub path: &'static str,
    pub content: TemplateContent,
    pub mode: FileMode,
}

/// Where a file's bytes come from.
#[derive(Debug, Clone, Copy)]
pub enum TemplateContent {
    /// Inline text written verbatim.
    Literal(&'static str),
    /// A bundled asset copied byte-for-byte.
    Asset(&'static [u8]),
    /// Text with `{{VARIABLE}}` placeholders.
    Parameterized(&'static str),
}

impl TemplateContent {
    /// Produce the bytes to write. Only `Parameterized` allocates.
    pub fn render(&self, ctx: &RenderContext) -> Cow<'static, [u8]> {
        match self {
            Self::Literal(text) => Cow::Borrowed(text.as_bytes()),
            Self::Asset(bytes) => Cow::Borrowed(bytes),
            Self::Parameterized(text) => Cow::Owned(ctx.render(text).into_bytes()),
        }
    }
}

/// Variable substitution context: `{{PROJECT_NAME}}` -> `"demo"`.
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(project_name: &ProjectName) -> Self {
        let mut variables = HashMap::new();
        variables.insert("PROJECT_NAME".to_string(), project_name.to_string());
        Self { variables }
    }

    /// Replace every known `{{KEY}}`; unknown placeholders are left as they are.
    pub fn render(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (key, value) in &self.variables {
            out = out.replace(&format!("{{{{{key}}}}}"), value);
        }
        out
    }
}
