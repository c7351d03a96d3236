//! Save-and-share use case
//!
//! Downloads a file from an external URL, makes sure the remote service
//! holds a current copy, and creates a public share link for it:
//!
//! 1. fetch the source into the local cache
//! 2. name the remote path from the local file name
//! 3. query the remote resource and apply the sync policy
//! 4. delete and/or upload as the policy selects
//! 5. create the share and build the view/download URLs
//!
//! Every step is awaited in order. A failure aborts the pipeline and nothing
//! already done is rolled back (an uploaded file stays in place when share
//! creation fails).

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::domain::{
    decide_for, ActionParams, DomainError, RemotePath, ShareResult, SyncAction,
};
use crate::ports::{IFileFetcher, IRemoteStorage};

/// Use case for mirroring an external file to the remote service and sharing it
pub struct SaveAndShareUseCase {
    fetcher: Arc<dyn IFileFetcher>,
    storage: Box<dyn IRemoteStorage>,
}

impl SaveAndShareUseCase {
    /// Creates a new SaveAndShareUseCase
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Downloads source URLs into the local cache
    /// * `storage` - Remote file-management service
    pub fn new(fetcher: Arc<dyn IFileFetcher>, storage: Box<dyn IRemoteStorage>) -> Self {
        Self { fetcher, storage }
    }

    /// Runs the full pipeline for `external_url`
    ///
    /// `remote_path_fn` maps the downloaded file's name to its remote path;
    /// an empty result is rejected.
    ///
    /// # Errors
    ///
    /// Returns the first failing stage's error, with context naming the stage
    pub async fn execute<F>(
        &mut self,
        external_url: &str,
        remote_path_fn: F,
        params: &ActionParams,
    ) -> Result<ShareResult>
    where
        F: Fn(&str) -> String,
    {
        if external_url.is_empty() {
            return Err(DomainError::EmptyField("external URL").into());
        }

        // Step 1: Download to the local cache
        let local_path = self
            .fetcher
            .fetch(external_url, params.file_size)
            .await
            .context("Failed to download file")?;

        // Step 2: Name the remote copy
        let name = file_name_of(&local_path)?;
        let remote_path = remote_path_for(&remote_path_fn, &name)?;
        debug!(local = %local_path.display(), remote = %remote_path, "Resolved remote path");

        // Step 3: Compare against the remote resource
        let resource = self
            .storage
            .get_resource(&remote_path)
            .await
            .context("Failed to get resource info")?;
        let action = decide_for(&resource, params);

        // Step 4: Apply the selected action
        match action {
            SyncAction::Skip => {
                info!(path = %remote_path, size = resource.size, "Resource already up to date, skipping upload");
            }
            SyncAction::DeleteThenUpload => {
                if params.force {
                    info!(path = %remote_path, "Force flag set, deleting existing resource");
                } else {
                    info!(
                        path = %remote_path,
                        expected = params.file_size,
                        remote = resource.size,
                        "File size mismatch, deleting existing resource"
                    );
                }
                self.storage
                    .delete_resource(&remote_path)
                    .await
                    .context("Failed to delete existing resource")?;
            }
            SyncAction::Upload => {
                debug!(path = %remote_path, "Resource does not exist yet");
            }
        }

        if action.needs_upload() {
            self.storage
                .upload(&local_path, &remote_path)
                .await
                .context("Failed to upload file")?;
        }

        // Step 5: Share
        let hash = self
            .storage
            .create_share(&remote_path, &params.share)
            .await
            .context("Failed to create share")?;

        let result = ShareResult::from_hash(self.storage.base_url(), hash);
        info!(view_url = %result.view_url, action = %action, "Share created");
        Ok(result)
    }
}

fn file_name_of(local_path: &Path) -> Result<String> {
    local_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            DomainError::ValidationFailed(format!(
                "downloaded path has no file name: {}",
                local_path.display()
            ))
            .into()
        })
}

fn remote_path_for<F>(remote_path_fn: &F, name: &str) -> Result<RemotePath>
where
    F: Fn(&str) -> String,
{
    let raw = remote_path_fn(name);

    // Empty and `.` segments are dropped; `..` is still rejected
    let mut normalized = raw
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/");
    if normalized.is_empty() {
        return Err(DomainError::EmptyField("remote path").into());
    }
    if raw.ends_with('/') {
        normalized.push('/');
    }
    Ok(RemotePath::new(normalized)?)
}
