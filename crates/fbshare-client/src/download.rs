//! Source file fetcher with local cache reuse
//!
//! [`HttpFetcher`] downloads a URL into a cache directory at the path
//! returned by [`local_path_for_download`]. When a regular file of the
//! expected size is already there, no request is made.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fbshare_core::local::{ensure_parent_dir, is_cached, local_path_for_download};
use fbshare_core::ports::IFileFetcher;
use futures_util::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Errors raised while fetching a source file
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("URL cannot be empty")]
    EmptyUrl,

    #[error("Failed to create directory for {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to download {url}: {source}")]
    Transfer {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Download of {url} failed with status code: {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Downloads source URLs over HTTP into a cache directory
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    cache_dir: PathBuf,
}

impl HttpFetcher {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            cache_dir: cache_dir.into(),
        }
    }

    /// Fetcher caching under the system temp directory
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir())
    }

    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Local path `url` is cached at
    pub fn local_path(&self, url: &str) -> PathBuf {
        local_path_for_download(&self.cache_dir, url)
    }

    /// Returns the local path holding the content of `url`
    ///
    /// Reuses the cached file when `expected_size > 0` and matches its size
    /// exactly; otherwise downloads and overwrites it. Any non-2xx response
    /// is an error.
    pub async fn fetch_file(&self, url: &str, expected_size: i64) -> Result<PathBuf, FetchError> {
        if url.trim().is_empty() {
            return Err(FetchError::EmptyUrl);
        }

        let local = self.local_path(url);
        if is_cached(&local, expected_size) {
            info!(path = %local.display(), "Using cached download");
            return Ok(local);
        }

        ensure_parent_dir(&local).map_err(|source| FetchError::CreateDir {
            path: local.clone(),
            source,
        })?;

        debug!(url, path = %local.display(), "Downloading");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transfer {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let write_err = |source| FetchError::Write {
            path: local.clone(),
            source,
        };
        let mut file = tokio::fs::File::create(&local).await.map_err(write_err)?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| FetchError::Transfer {
                url: url.to_string(),
                source,
            })?;
            file.write_all(&chunk).await.map_err(write_err)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(write_err)?;

        info!(url, path = %local.display(), bytes = written, "Download complete");
        Ok(local)
    }
}

#[async_trait]
impl IFileFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, expected_size: i64) -> anyhow::Result<PathBuf> {
        Ok(self.fetch_file(url, expected_size).await?)
    }
}
