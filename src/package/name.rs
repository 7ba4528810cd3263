use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::version::Version;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("package name '{0}' has no version part")]
    MissingVersion(String),

    #[error("package name '{0}' is empty before the version")]
    EmptyName(String),
}

/// A package file stem such as `curl-8.5.0_1` or `vim-9.1,1` split into its
/// parts. The name is everything before the last `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    pub name: String,
    /// Upstream version without revision or epoch.
    pub version: String,
    /// Everything after the last `-`, as written.
    pub full_version: String,
    pub revision: Option<String>,
    pub epoch: Option<String>,
}

impl PackageName {
    pub fn parse(stem: &str) -> Result<Self, ParseError> {
        let (name, full_version) = stem
            .rsplit_once('-')
            .ok_or_else(|| ParseError::MissingVersion(stem.to_string()))?;

        if name.is_empty() {
            return Err(ParseError::EmptyName(stem.to_string()));
        }
        if full_version.is_empty() {
            return Err(ParseError::MissingVersion(stem.to_string()));
        }

        let parts = Version::parse(full_version);

        Ok(Self {
            name: name.to_string(),
            version: parts.upstream().to_string(),
            full_version: full_version.to_string(),
            revision: parts.revision_str().map(String::from),
            epoch: parts.epoch_str().map(String::from),
        })
    }
}

impl FromStr for PackageName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.full_version)
    }
}
