//! CLI commands and the settings they share
//!
//! Settings come from the YAML config file, then `--url`/`--username`/
//! `--password` (or `FBSHARE_URL`/`FBSHARE_USERNAME`/`FBSHARE_PASSWORD`)
//! override the `server` section.

pub mod config;
pub mod delete;
pub mod info;
pub mod link;
pub mod login;
pub mod share;
pub mod upload;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fbshare_client::{FileBrowserClient, HttpFetcher};
use fbshare_core::config::{Config, ConfigBuilder};
use fbshare_core::domain::{ShareParams, ShareUnit};
use tracing::debug;

/// Options accepted by every command
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Use alternate config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// File Browser base URL
    #[arg(long, global = true, env = "FBSHARE_URL")]
    pub url: Option<String>,

    /// File Browser username
    #[arg(long, global = true, env = "FBSHARE_USERNAME")]
    pub username: Option<String>,

    /// File Browser password
    #[arg(long, global = true, env = "FBSHARE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Effective configuration for one CLI invocation
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub config: Config,
}

impl Settings {
    /// Loads the config file and applies command-line overrides
    ///
    /// A missing file yields defaults, so `config init` can create it; a
    /// file named with `--config` that exists must parse.
    pub fn resolve(args: &GlobalArgs) -> Result<Self> {
        let (config_path, config) = match &args.config {
            Some(path) => {
                let config = Config::load_if_exists(path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?;
                (path.clone(), config)
            }
            None => {
                let path = Config::default_path();
                let config = Config::load_or_default(&path);
                (path, config)
            }
        };

        let mut builder = ConfigBuilder::from_config(config);
        if let Some(url) = &args.url {
            builder = builder.server_url(url);
        }
        if let Some(username) = &args.username {
            builder = builder.server_username(username);
        }
        if let Some(password) = &args.password {
            builder = builder.server_password(password);
        }

        debug!(config_path = %config_path.display(), "Resolved settings");
        Ok(Self {
            config_path,
            config: builder.build(),
        })
    }

    /// Client for the configured server, not yet logged in
    pub fn client(&self) -> Result<FileBrowserClient> {
        let client = FileBrowserClient::new(self.config.credentials())
            .context("Invalid authentication")?;
        Ok(client.with_chunk_size(self.config.chunk_size_bytes()))
    }

    /// Fetcher caching under the configured download directory
    pub fn fetcher(&self) -> HttpFetcher {
        HttpFetcher::new(self.config.cache_dir())
    }
}

/// Share options shared by `share` and `link`; unset values fall back to
/// the `share` config section
#[derive(Debug, Clone, Default, Args)]
pub struct ShareArgs {
    /// Expiration value; 0 never expires
    #[arg(long)]
    pub expires: Option<i64>,

    /// Expiration unit: seconds, minutes, hours or days
    #[arg(long)]
    pub unit: Option<ShareUnit>,

    /// Password protecting the share
    #[arg(long)]
    pub share_password: Option<String>,
}

impl ShareArgs {
    pub fn apply(&self, mut params: ShareParams) -> ShareParams {
        if let Some(expires) = self.expires {
            params.expires = expires;
        }
        if let Some(unit) = self.unit {
            params.unit = unit;
        }
        if let Some(password) = &self.share_password {
            params.password = Some(password.clone());
        }
        params
    }
}
