//! Value objects: small, immutable, validated at construction.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::DomainError;

/// Longest accepted name (npm's package-name limit).
pub const MAX_PROJECT_NAME_LEN: usize = 214;

/// A project name that is safe as a directory name and inside the generated
/// manifests.
///
/// Invariant: non-empty, ASCII letters/digits/`-`/`_` only, first character
/// is a letter or digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate and wrap a raw project name.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let name = raw.into();
        let invalid = |reason: String| DomainError::InvalidProjectName {
            name: name.clone(),
            reason,
        };

        let Some(first) = name.chars().next() else {
            return Err(invalid("name cannot be empty".into()));
        };
        if !first.is_ascii_alphanumeric() {
            return Err(invalid(format!("name cannot start with '{first}'")));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(invalid(format!("name cannot contain '{bad}'")));
        }
        if name.len() > MAX_PROJECT_NAME_LEN {
            return Err(invalid(format!(
                "name is longer than {MAX_PROJECT_NAME_LEN} characters"
            )));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
