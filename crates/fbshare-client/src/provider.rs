//! IRemoteStorage implementation for File Browser
//!
//! Delegates to the inherent methods in [`crate::resources`],
//! [`crate::upload`] and [`crate::share`], converting typed errors to
//! `anyhow` at the port boundary.
//!
//! ## Design Notes
//!
//! - No lock around the client: the port takes `&mut self`, so the token can
//!   be set on first use without interior mutability.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use fbshare_core::domain::{RemotePath, Resource, ShareHash, ShareParams};
use fbshare_core::ports::IRemoteStorage;

use crate::client::FileBrowserClient;

#[async_trait]
impl IRemoteStorage for FileBrowserClient {
    fn base_url(&self) -> &str {
        FileBrowserClient::base_url(self)
    }

    async fn get_resource(&mut self, path: &RemotePath) -> Result<Resource> {
        Ok(FileBrowserClient::get_resource(self, path).await?)
    }

    async fn delete_resource(&mut self, path: &RemotePath) -> Result<()> {
        Ok(FileBrowserClient::delete_resource(self, path).await?)
    }

    async fn upload(&mut self, local: &Path, remote: &RemotePath) -> Result<()> {
        Ok(FileBrowserClient::upload(self, local, remote).await?)
    }

    async fn create_share(&mut self, path: &RemotePath, params: &ShareParams) -> Result<ShareHash> {
        Ok(FileBrowserClient::create_share(self, path, params).await?)
    }
}
