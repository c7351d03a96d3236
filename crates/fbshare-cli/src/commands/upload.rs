//! Upload command - Send a local file through the tus endpoint

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fbshare_core::domain::RemotePath;
use tracing::info;

use super::Settings;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct UploadCommand {
    /// Local file to upload
    pub local: PathBuf,

    /// Destination path on the server
    pub remote: String,
}

impl UploadCommand {
    pub async fn execute(&self, settings: &Settings, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let remote = RemotePath::new(self.remote.as_str())?;
        let mut client = settings.client()?;

        info!(local = %self.local.display(), remote = %remote, "Uploading");
        client
            .upload(&self.local, &remote)
            .await
            .context("Failed to upload file")?;

        if format.is_json() {
            formatter.print_json(&serde_json::json!({
                "uploaded": true,
                "local": self.local.display().to_string(),
                "remote": remote.as_str(),
            }));
        } else {
            formatter.success(&format!("Uploaded {} to {}", self.local.display(), remote));
        }
        Ok(())
    }
}
