//! Local download cache helpers
//!
//! A downloaded file lives at a deterministic path derived from its source
//! URL, so a second request for the same URL can reuse it when the size on
//! disk matches the size the caller expects.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use tracing::{debug, warn};
use url::Url;

use crate::domain::DomainError;

/// File name used when the URL has no path component
pub const DEFAULT_FILE_NAME: &str = "downloaded_file";

/// Returns true only if a regular file exists at `path` with exactly
/// `expected_size` bytes
///
/// `expected_size <= 0` means "unknown" and always returns false, forcing a
/// fresh download. Metadata errors are treated as a mismatch.
pub fn is_cached(path: &Path, expected_size: i64) -> bool {
    if expected_size <= 0 {
        return false;
    }

    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read local file metadata");
            return false;
        }
    };

    if !metadata.is_file() {
        return false;
    }

    let matches = u64::try_from(expected_size).ok() == Some(metadata.len());
    debug!(
        path = %path.display(),
        local_size = metadata.len(),
        expected_size,
        matches,
        "Checked local cache"
    );
    matches
}

/// Derives the cache path for `file_url` under `base_dir`
///
/// The URL's path component (percent-decoded, leading slash stripped) is
/// joined onto `base_dir`; an empty path maps to [`DEFAULT_FILE_NAME`].
/// `.` and `..` segments are dropped so the result never leaves `base_dir`.
/// If the URL cannot be parsed, its last `/`-separated segment is used.
pub fn local_path_for_download(base_dir: &Path, file_url: &str) -> PathBuf {
    let raw_path = match Url::parse(file_url) {
        Ok(url) => percent_decode_str(url.path()).decode_utf8_lossy().into_owned(),
        Err(e) => {
            warn!(url = %file_url, error = %e, "Failed to parse URL, using last segment as file name");
            file_url.rsplit('/').next().unwrap_or_default().to_string()
        }
    };

    let mut path = base_dir.to_path_buf();
    let mut pushed = false;
    for segment in raw_path.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            continue;
        }
        path.push(segment);
        pushed = true;
    }

    if !pushed {
        path.push(DEFAULT_FILE_NAME);
    }
    path
}

/// [`local_path_for_download`] rooted at the system temp directory
pub fn temp_path_for_download(file_url: &str) -> PathBuf {
    local_path_for_download(&std::env::temp_dir(), file_url)
}

/// Creates every missing directory above `local_path`
///
/// # Errors
/// Returns `InvalidInput` for an empty path, or the error from directory
/// creation
pub fn ensure_parent_dir(local_path: &Path) -> std::io::Result<()> {
    if local_path.as_os_str().is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            DomainError::EmptyField("local path"),
        ));
    }

    match local_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
