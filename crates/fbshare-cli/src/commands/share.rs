//! Share command - Download a URL, store it on File Browser and share it
//!
//! Provides the `fbshare share` CLI command which:
//! 1. Downloads the URL into the local cache (reusing a matching copy)
//! 2. Compares it against the remote path and uploads when needed
//! 3. Creates a share and prints its view and download URLs

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use fbshare_core::domain::{ActionParams, ShareResult};
use fbshare_core::usecases::SaveAndShareUseCase;
use tracing::info;

use super::{Settings, ShareArgs};
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct ShareCommand {
    /// URL of the file to save and share
    #[arg(value_name = "URL")]
    pub source: String,

    /// Expected size in bytes; 0 means unknown
    #[arg(long, default_value_t = 0)]
    pub size: i64,

    /// Replace the remote file even if it looks current
    #[arg(long)]
    pub force: bool,

    /// Remote directory to store the file in (default: server root)
    #[arg(long)]
    pub remote_dir: Option<String>,

    #[command(flatten)]
    pub share: ShareArgs,
}

impl ShareCommand {
    pub async fn execute(&self, settings: &Settings, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);

        let params = ActionParams {
            share: self.share.apply(settings.config.share_params()),
            file_size: self.size,
            force: self.force,
        };
        let remote_dir = self.remote_dir.clone().unwrap_or_default();

        info!(url = %self.source, remote_dir = %remote_dir, "Saving and sharing");
        formatter.info(&format!("Fetching {}", self.source));

        let client = settings.client()?;
        let fetcher = Arc::new(settings.fetcher());
        let mut use_case = SaveAndShareUseCase::new(fetcher, Box::new(client));

        let result = use_case
            .execute(&self.source, |name: &str| join_remote(&remote_dir, name), &params)
            .await?;

        print_share(&*formatter, format, &result);
        Ok(())
    }
}

/// `dir/name`, or just `name` when `dir` is empty
pub(crate) fn join_remote(dir: &str, name: &str) -> String {
    let dir = dir.trim_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

pub(crate) fn print_share(
    formatter: &dyn crate::output::OutputFormatter,
    format: OutputFormat,
    result: &ShareResult,
) {
    if format.is_json() {
        formatter.print_json(&serde_json::json!({
            "hash": result.hash.as_str(),
            "view_url": result.view_url,
            "download_url": result.download_url,
        }));
    } else {
        formatter.success("Share created");
        formatter.info(&format!("View:     {}", result.view_url));
        formatter.info(&format!("Download: {}", result.download_url));
    }
}
