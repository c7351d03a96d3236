//! Link command - Share an existing remote path

use anyhow::{Context, Result};
use clap::Args;
use fbshare_core::domain::{RemotePath, ShareResult};

use super::share::print_share;
use super::{Settings, ShareArgs};
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct LinkCommand {
    /// Remote path to share
    pub path: String,

    #[command(flatten)]
    pub share: ShareArgs,
}

impl LinkCommand {
    pub async fn execute(&self, settings: &Settings, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let path = RemotePath::new(self.path.as_str())?;
        let params = self.share.apply(settings.config.share_params());
        let mut client = settings.client()?;

        let hash = client
            .create_share(&path, &params)
            .await
            .context("Failed to create share")?;

        let result = ShareResult::from_hash(client.base_url(), hash);
        print_share(&*formatter, format, &result);
        Ok(())
    }
}
