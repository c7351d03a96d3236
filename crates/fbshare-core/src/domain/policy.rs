//! Synchronization policy for the remote copy of a file
//!
//! Decides, from the remote resource state and the caller's parameters,
//! whether an upload is needed and whether the existing resource has to be
//! removed first. The tus endpoint is not safe to overwrite in place, so an
//! existing resource is always deleted before it is replaced.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::params::ActionParams;
use super::resource::Resource;

/// What to do with the remote resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    /// Remote copy is considered current; no mutation
    Skip,
    /// Remove the existing resource, then upload
    DeleteThenUpload,
    /// Nothing exists remotely; upload
    Upload,
}

impl SyncAction {
    pub fn needs_upload(&self) -> bool {
        !matches!(self, SyncAction::Skip)
    }

    pub fn needs_delete(&self) -> bool {
        matches!(self, SyncAction::DeleteThenUpload)
    }
}

impl Display for SyncAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncAction::Skip => "skip",
            SyncAction::DeleteThenUpload => "delete_then_upload",
            SyncAction::Upload => "upload",
        };
        f.write_str(s)
    }
}

/// Selects the action for a remote resource
///
/// `expected_size <= 0` means the size is unknown. `force` is checked before
/// any size comparison: a forced replace happens even when sizes match.
pub fn decide(exists: bool, force: bool, expected_size: i64, remote_size: u64) -> SyncAction {
    if !exists {
        return SyncAction::Upload;
    }

    if force {
        return SyncAction::DeleteThenUpload;
    }

    if expected_size > 0 && u64::try_from(expected_size).ok() != Some(remote_size) {
        return SyncAction::DeleteThenUpload;
    }

    SyncAction::Skip
}

/// [`decide`] applied to a fetched resource and the operation parameters
pub fn decide_for(resource: &Resource, params: &ActionParams) -> SyncAction {
    decide(resource.exists, params.force, params.file_size, resource.size)
}
