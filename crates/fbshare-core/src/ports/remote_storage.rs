//! Remote storage port (driven/secondary port)
//!
//! Interface to the remote file-management service. Implementations hold a
//! session token acquired lazily on first use, so every method takes
//! `&mut self`; a value is meant to be driven by one call chain at a time.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are adapter-specific.
//! - A not-found resource is reported as [`Resource::missing`], not as an error.
//! - None of the operations retry internally.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{RemotePath, Resource, ShareHash, ShareParams};

/// Port for the remote file-management service
#[async_trait]
pub trait IRemoteStorage: Send {
    /// Base address used to build share URLs
    fn base_url(&self) -> &str;

    /// Fetches metadata for `path`; a missing resource is `Ok` with `exists == false`
    async fn get_resource(&mut self, path: &RemotePath) -> Result<Resource>;

    /// Deletes `path`; deleting an absent resource succeeds
    async fn delete_resource(&mut self, path: &RemotePath) -> Result<()>;

    /// Uploads the whole local file to `remote`
    async fn upload(&mut self, local: &Path, remote: &RemotePath) -> Result<()>;

    /// Creates a new share for `path`; every call creates a distinct share
    async fn create_share(&mut self, path: &RemotePath, params: &ShareParams) -> Result<ShareHash>;
}
