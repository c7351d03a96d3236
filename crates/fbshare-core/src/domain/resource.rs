//! Remote resource descriptor
//!
//! Produced by a metadata query against the remote service. A missing
//! resource is a normal value (`exists == false`), not an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::RemotePath;

/// Metadata of a file or directory on the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub path: RemotePath,
    pub exists: bool,
    /// Size in bytes (0 when missing)
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
    /// Service-reported type, e.g. `text`, `pdf`, `blob`
    pub kind: Option<String>,
    pub name: Option<String>,
    pub extension: Option<String>,
    pub is_dir: bool,
}

impl Resource {
    /// Descriptor for a path the service reported as not found
    pub fn missing(path: RemotePath) -> Self {
        Self {
            path,
            exists: false,
            size: 0,
            modified: None,
            kind: None,
            name: None,
            extension: None,
            is_dir: false,
        }
    }

    /// Descriptor for an existing file of `size` bytes
    pub fn file(path: RemotePath, size: u64) -> Self {
        Self {
            name: path.file_name().map(str::to_string),
            path,
            exists: true,
            size,
            modified: None,
            kind: None,
            extension: None,
            is_dir: false,
        }
    }
}
