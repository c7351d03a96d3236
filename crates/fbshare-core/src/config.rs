//! Configuration module for fbshare.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{Credentials, ShareParams, ShareUnit};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for fbshare.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub download: DownloadConfig,
    pub upload: UploadConfig,
    pub share: ShareConfig,
    pub logging: LoggingConfig,
}

/// Remote service address and login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base address, e.g. `https://files.example.com`.
    pub url: String,
    pub username: String,
    pub password: String,
}

/// Local download cache settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Directory downloads are cached under. `None` uses the system temp directory.
    pub cache_dir: Option<PathBuf>,
}

/// Chunked upload settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Size of each upload chunk (in MiB).
    pub chunk_size_mb: u64,
}

/// Defaults applied to created shares.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Expiration value; 0 creates shares that never expire.
    pub expires: i64,
    pub unit: ShareUnit,
    pub password: Option<String>,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Load from `path`, or [`Config::default`] when no file exists there.
    ///
    /// Unlike [`Config::load_or_default`], read and parse errors of an
    /// existing file are returned.
    pub fn load_if_exists(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(serde_yaml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/fbshare/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("fbshare")
            .join("config.yaml")
    }

    /// Credentials taken from the `server` section (not validated).
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.server.url.clone(),
            self.server.username.clone(),
            self.server.password.clone(),
        )
    }

    /// Share parameters taken from the `share` section.
    pub fn share_params(&self) -> ShareParams {
        ShareParams {
            expires: self.share.expires,
            password: self.share.password.clone(),
            unit: self.share.unit,
        }
    }

    /// Download cache directory, defaulting to the system temp directory.
    pub fn cache_dir(&self) -> PathBuf {
        self.download
            .cache_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Upload chunk size in bytes.
    pub fn chunk_size_bytes(&self) -> usize {
        usize::try_from(self.upload.chunk_size_mb.saturating_mul(1024 * 1024))
            .unwrap_or(usize::MAX)
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for UploadConfig {
    fn default() -> Self {
        Self { chunk_size_mb: 2 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"server.url"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- server ---
        if self.server.url.is_empty() {
            errors.push(ValidationError {
                field: "server.url".into(),
                message: "must not be empty".into(),
            });
        } else if url::Url::parse(&self.server.url).is_err() {
            errors.push(ValidationError {
                field: "server.url".into(),
                message: format!("not a valid URL: {}", self.server.url),
            });
        }
        if self.server.username.is_empty() {
            errors.push(ValidationError {
                field: "server.username".into(),
                message: "must not be empty".into(),
            });
        }
        if self.server.password.is_empty() {
            errors.push(ValidationError {
                field: "server.password".into(),
                message: "must not be empty".into(),
            });
        }

        // --- upload ---
        if self.upload.chunk_size_mb == 0 {
            errors.push(ValidationError {
                field: "upload.chunk_size_mb".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- share ---
        if self.share.expires < 0 {
            errors.push(ValidationError {
                field: "share.expires".into(),
                message: "must not be negative (use 0 for no expiration)".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use fbshare_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .server_url("https://files.example.com")
///     .server_username("admin")
///     .server_password("secret")
///     .logging_level("debug")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Start from an existing configuration (e.g. one loaded from disk).
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    // --- server ---

    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.config.server.url = url.into();
        self
    }

    pub fn server_username(mut self, username: impl Into<String>) -> Self {
        self.config.server.username = username.into();
        self
    }

    pub fn server_password(mut self, password: impl Into<String>) -> Self {
        self.config.server.password = password.into();
        self
    }

    // --- download ---

    pub fn download_cache_dir(mut self, dir: PathBuf) -> Self {
        self.config.download.cache_dir = Some(dir);
        self
    }

    // --- upload ---

    pub fn upload_chunk_size_mb(mut self, mb: u64) -> Self {
        self.config.upload.chunk_size_mb = mb;
        self
    }

    // --- share ---

    pub fn share_expires(mut self, expires: i64) -> Self {
        self.config.share.expires = expires;
        self
    }

    pub fn share_unit(mut self, unit: ShareUnit) -> Self {
        self.config.share.unit = unit;
        self
    }

    pub fn share_password(mut self, password: impl Into<String>) -> Self {
        self.config.share.password = Some(password.into());
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
