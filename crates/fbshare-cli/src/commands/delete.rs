//! Delete command - Remove a remote path (absent paths are not an error)

use anyhow::{Context, Result};
use clap::Args;
use fbshare_core::domain::RemotePath;

use super::Settings;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Remote path to delete
    pub path: String,
}

impl DeleteCommand {
    pub async fn execute(&self, settings: &Settings, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let path = RemotePath::new(self.path.as_str())?;
        let mut client = settings.client()?;

        client
            .delete_resource(&path)
            .await
            .context("Failed to delete resource")?;

        if format.is_json() {
            formatter.print_json(&serde_json::json!({
                "deleted": true,
                "path": path.as_str(),
            }));
        } else {
            formatter.success(&format!("Deleted {}", path));
        }
        Ok(())
    }
}
