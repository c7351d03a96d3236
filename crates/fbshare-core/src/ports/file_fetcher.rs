//! File fetcher port (driven/secondary port)
//!
//! Downloads a source URL to the local cache path derived from it,
//! reusing an existing file when its size matches the expected size.

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

/// Port for downloading source files into the local cache
#[async_trait]
pub trait IFileFetcher: Send + Sync {
    /// Fetches `url` and returns the local path holding its content
    ///
    /// `expected_size <= 0` means the size is unknown and the file is always
    /// downloaded again.
    async fn fetch(&self, url: &str, expected_size: i64) -> Result<PathBuf>;
}
