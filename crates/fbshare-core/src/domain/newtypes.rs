//! Domain newtypes with validation
//!
//! Strongly-typed wrappers that guarantee validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// RemotePath
// ============================================================================

/// A path on the remote file-management service, e.g. `uploads/report.pdf`
///
/// Stored without a leading slash so it can be appended to any API prefix
/// (`/api/resources/`, `/api/tus/`, `/api/share/`). A leading slash on input
/// is accepted and stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemotePath(String);

impl RemotePath {
    /// Create a new RemotePath
    ///
    /// # Errors
    /// Returns error if the path is empty, contains empty segments
    /// (`a//b`), or contains `.` / `..` segments
    pub fn new(path: impl Into<String>) -> Result<Self, DomainError> {
        let path = path.into();
        let trimmed = path.trim_start_matches('/');

        if trimmed.is_empty() {
            return Err(DomainError::EmptyField("remote path"));
        }

        let last = trimmed.split('/').count() - 1;
        for (index, segment) in trimmed.split('/').enumerate() {
            match segment {
                // A single trailing slash marks a directory
                "" if index == last => {}
                "" => {
                    return Err(DomainError::InvalidRemotePath(format!(
                        "Remote path contains empty segments: {path}"
                    )));
                }
                "." | ".." => {
                    return Err(DomainError::InvalidRemotePath(format!(
                        "Remote path contains invalid traversal: {path}"
                    )));
                }
                _ => {}
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the non-empty `/`-separated segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Get the file name component
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }
}

impl Display for RemotePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RemotePath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RemotePath {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RemotePath> for String {
    fn from(path: RemotePath) -> Self {
        path.0
    }
}

// ============================================================================
// ShareHash
// ============================================================================

/// Opaque identifier of a public share link
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShareHash(String);

impl ShareHash {
    /// Create a new ShareHash
    ///
    /// # Errors
    /// Returns error if the hash is empty or contains a `/`
    pub fn new(hash: impl Into<String>) -> Result<Self, DomainError> {
        let hash = hash.into();
        let trimmed = hash.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidShareHash(
                "share hash cannot be empty".to_string(),
            ));
        }
        if trimmed.contains('/') {
            return Err(DomainError::InvalidShareHash(format!(
                "share hash must not contain '/': {trimmed}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ShareHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ShareHash {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ShareHash> for String {
    fn from(hash: ShareHash) -> Self {
        hash.0
    }
}
