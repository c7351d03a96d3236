//! fbshare Client - File Browser HTTP adapter
//!
//! Provides async clients for:
//! - Token login against `/api/login`
//! - Resource metadata and deletion via `/api/resources`
//! - Resumable uploads through the tus endpoint `/api/tus`
//! - Public share creation via `/api/share`
//! - Downloading source files into the local cache
//!
//! ## Modules
//!
//! - [`client`] - Authenticated File Browser HTTP client
//! - [`resources`] - Resource metadata and deletion
//! - [`share`] - Share link creation
//! - [`upload`] - tus chunked upload
//! - [`download`] - Source file fetcher with local cache reuse
//! - [`provider`] - Port implementations for the core use cases

pub mod client;
pub mod download;
pub mod provider;
pub mod resources;
pub mod share;
pub mod upload;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use fbshare_core::domain::{ActionParams, Credentials, DomainError, ShareResult};
use fbshare_core::usecases::SaveAndShareUseCase;
use thiserror::Error;

pub use client::FileBrowserClient;
pub use download::{FetchError, HttpFetcher};

/// Errors that can occur when talking to a File Browser server
#[derive(Debug, Error)]
pub enum FileBrowserError {
    /// Caller supplied invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    /// The login request was rejected
    #[error("Login failed with status code: {0}")]
    LoginFailed(u16),

    /// The login response carried no token
    #[error("Received empty token from server")]
    EmptyToken,

    /// A request returned a status outside the accepted set
    #[error("{operation} request failed with status code: {status}")]
    UnexpectedStatus {
        /// Which operation failed (e.g. "resource", "delete", "share")
        operation: &'static str,
        status: u16,
    },

    /// A share was created but no hash came back
    #[error("Received empty hash from server")]
    EmptyShareHash,

    /// The file to upload is missing or not a regular file
    #[error("Local file does not exist: {}", .0.display())]
    LocalFileMissing(PathBuf),

    /// The server acknowledged a different offset than was sent
    #[error("Upload offset mismatch: expected {expected}, server reported {actual}")]
    OffsetMismatch {
        expected: u64,
        actual: u64,
    },

    /// The response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A network-level error occurred
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Reading the local file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Downloads `external_url`, mirrors it to the File Browser server described
/// by `credentials`, and shares it
///
/// Uses the system temp directory as download cache and the default upload
/// chunk size. Build a [`SaveAndShareUseCase`] directly for other settings.
///
/// # Errors
///
/// Fails on invalid credentials or on the first failing stage
pub async fn save_and_share<F>(
    credentials: &Credentials,
    external_url: &str,
    remote_path_fn: F,
    params: &ActionParams,
) -> anyhow::Result<ShareResult>
where
    F: Fn(&str) -> String,
{
    credentials
        .validate()
        .context("Invalid authentication")?;

    let fetcher = Arc::new(HttpFetcher::in_temp_dir());
    let client = FileBrowserClient::new(credentials.clone())?;

    SaveAndShareUseCase::new(fetcher, Box::new(client))
        .execute(external_url, remote_path_fn, params)
        .await
}
