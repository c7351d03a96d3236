//! Config command - View and manage fbshare configuration
//!
//! Provides the `fbshare config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON), passwords masked
//! 2. Writes a starter configuration file
//! 3. Sets individual configuration values via dot-notation keys
//! 4. Validates the configuration file and reports errors

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use fbshare_core::config::Config;
use fbshare_core::domain::ShareUnit;
use tracing::info;

use super::Settings;
use crate::output::{get_formatter, OutputFormat};

const MASK: &str = "********";

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "server.url")
        key: String,
        /// New value
        value: String,
    },
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    pub async fn execute(&self, settings: &Settings, format: OutputFormat) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(settings, format),
            ConfigCommand::Init { force } => self.execute_init(&settings.config_path, *force, format),
            ConfigCommand::Set { key, value } => {
                self.execute_set(&settings.config_path, key, value, format)
            }
            ConfigCommand::Validate => self.execute_validate(&settings.config_path, format),
        }
    }

    fn execute_show(&self, settings: &Settings, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let config = masked(&settings.config);

        info!(config_path = %settings.config_path.display(), "Showing configuration");

        if format.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", settings.config_path.display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                formatter.info(line);
            }
        }
        Ok(())
    }

    fn execute_init(&self, path: &Path, force: bool, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);

        if path.exists() && !force {
            bail!(
                "Configuration file already exists at {} (use --force to overwrite)",
                path.display()
            );
        }

        save(path, &Config::default())?;
        info!(config_path = %path.display(), "Wrote default configuration");

        if format.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "config_path": path.display().to_string(),
            }));
        } else {
            formatter.success(&format!("Created {}", path.display()));
            formatter.info("Fill in server.url, server.username and server.password.");
        }
        Ok(())
    }

    fn execute_set(&self, path: &Path, key: &str, value: &str, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let mut config = Config::load_if_exists(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        info!(key = %key, "Setting configuration value");
        apply_config_value(&mut config, key, value)
            .with_context(|| format!("Failed to set '{}'", key))?;

        // Server fields may still be unset while the file is being filled in
        let errors: Vec<String> = config
            .validate()
            .iter()
            .filter(|e| !e.field.starts_with("server.") || e.field == key)
            .map(|e| e.to_string())
            .collect();
        if !errors.is_empty() {
            bail!("Invalid value for '{}': {}", key, errors.join("; "));
        }

        save(path, &config)?;

        let shown = if key.ends_with("password") { MASK } else { value };
        if format.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "key": key,
                "value": shown,
                "config_path": path.display().to_string(),
            }));
        } else {
            formatter.success(&format!("Set {} = {}", key, shown));
            formatter.info(&format!("Saved to {}", path.display()));
        }
        Ok(())
    }

    fn execute_validate(&self, path: &Path, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);

        let config = match Config::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                let message = if path.exists() {
                    format!("Failed to parse configuration: {}", e)
                } else {
                    "Configuration file not found".to_string()
                };
                if format.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "valid": false,
                        "config_path": path.display().to_string(),
                        "errors": [message],
                    }));
                } else {
                    formatter.error(&message);
                    formatter.info(&format!("File: {}", path.display()));
                }
                return Ok(());
            }
        };

        info!(config_path = %path.display(), "Validating configuration");
        let errors = config.validate();

        if format.is_json() {
            let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            formatter.print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "config_path": path.display().to_string(),
                "errors": error_strings,
            }));
        } else if errors.is_empty() {
            formatter.success("Configuration is valid");
            formatter.info(&format!("File: {}", path.display()));
        } else {
            formatter.error(&format!(
                "Configuration has {} error{}:",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            ));
            formatter.info(&format!("File: {}", path.display()));
            formatter.info("");
            for error in &errors {
                formatter.info(&format!("  {} - {}", error.field, error.message));
            }
        }
        Ok(())
    }
}

fn masked(config: &Config) -> Config {
    let mut config = config.clone();
    if !config.server.password.is_empty() {
        config.server.password = MASK.to_string();
    }
    if config.share.password.is_some() {
        config.share.password = Some(MASK.to_string());
    }
    config
}

fn save(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create configuration directory")?;
    }
    let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
    std::fs::write(path, yaml).context("Failed to write configuration file")?;
    Ok(())
}

/// Apply a dot-notation key/value pair to a Config struct
///
/// Supported keys:
/// - server.url, server.username, server.password
/// - download.cache_dir
/// - upload.chunk_size_mb
/// - share.expires, share.unit, share.password
/// - logging.level
fn apply_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "server.url" => config.server.url = value.trim_end_matches('/').to_string(),
        "server.username" => config.server.username = value.to_string(),
        "server.password" => config.server.password = value.to_string(),

        "download.cache_dir" => {
            config.download.cache_dir = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }

        "upload.chunk_size_mb" => {
            config.upload.chunk_size_mb = value
                .parse::<u64>()
                .context("Expected a positive integer for upload.chunk_size_mb")?;
        }

        "share.expires" => {
            config.share.expires = value
                .parse::<i64>()
                .context("Expected an integer for share.expires")?;
        }
        "share.unit" => config.share.unit = value.parse::<ShareUnit>()?,
        "share.password" => {
            config.share.password = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }

        "logging.level" => config.logging.level = value.to_lowercase(),

        _ => bail!(
            "Unknown configuration key '{}'. Supported keys: server.url, server.username, \
             server.password, download.cache_dir, upload.chunk_size_mb, share.expires, \
             share.unit, share.password, logging.level",
            key
        ),
    }
    Ok(())
}
