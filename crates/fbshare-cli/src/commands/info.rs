//! Info command - Show metadata of a remote path

use anyhow::{Context, Result};
use clap::Args;
use fbshare_core::domain::{RemotePath, Resource};

use super::Settings;
use crate::output::{get_formatter, OutputFormat, OutputFormatter};

#[derive(Debug, Args)]
pub struct InfoCommand {
    /// Remote path, e.g. "uploads/report.pdf"
    pub path: String,
}

impl InfoCommand {
    pub async fn execute(&self, settings: &Settings, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let path = RemotePath::new(self.path.as_str())?;
        let mut client = settings.client()?;

        let resource = client
            .get_resource(&path)
            .await
            .context("Failed to get resource info")?;

        if format.is_json() {
            formatter.print_json(&serde_json::to_value(&resource)?);
        } else {
            print_human(&*formatter, &resource);
        }
        Ok(())
    }
}

fn print_human(formatter: &dyn OutputFormatter, resource: &Resource) {
    if !resource.exists {
        formatter.warn(&format!("{} does not exist", resource.path));
        return;
    }

    let kind = if resource.is_dir { "directory" } else { "file" };
    formatter.success(&format!("{} ({})", resource.path, kind));
    formatter.info(&format!("Size:     {} bytes", resource.size));
    if let Some(t) = &resource.kind {
        formatter.info(&format!("Type:     {}", t));
    }
    if let Some(modified) = resource.modified {
        formatter.info(&format!("Modified: {}", modified.to_rfc3339()));
    }
}
