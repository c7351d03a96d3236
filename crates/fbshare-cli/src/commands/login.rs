//! Login command - Verify the configured credentials

use anyhow::{Context, Result};
use clap::Args;

use super::Settings;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct LoginCommand {}

impl LoginCommand {
    pub async fn execute(&self, settings: &Settings, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let mut client = settings.client()?;

        client.login().await.context("Authentication failed")?;

        let server = &settings.config.server;
        if format.is_json() {
            formatter.print_json(&serde_json::json!({
                "authenticated": true,
                "url": client.base_url(),
                "username": server.username,
            }));
        } else {
            formatter.success(&format!(
                "Logged in to {} as {}",
                client.base_url(),
                server.username
            ));
        }
        Ok(())
    }
}
