//! tus 1.0.0 chunked upload
//!
//! File Browser accepts uploads through its tus endpoint `/api/tus/{path}`:
//! - [`create_upload_session`] - `POST` announcing `Upload-Length`
//! - [`upload_chunk`] - `PATCH` one chunk at `Upload-Offset`
//! - [`FileBrowserClient::upload`] - streams a whole local file
//!
//! Uploads are not resumed: any failure aborts the transfer and a later call
//! starts a new session.

use std::path::Path;

use fbshare_core::domain::{DomainError, RemotePath};
use reqwest::header::{HeaderMap, CONTENT_TYPE, LOCATION};
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use url::Url;

use crate::client::{FileBrowserClient, AUTH_HEADER};
use crate::FileBrowserError;

/// Protocol version sent in every tus request
pub const TUS_VERSION: &str = "1.0.0";

/// Default bytes per PATCH request: 2 MiB
pub const DEFAULT_CHUNK_SIZE: usize = 2 * 1024 * 1024;

const TUS_RESUMABLE: &str = "Tus-Resumable";
const UPLOAD_LENGTH: &str = "Upload-Length";
const UPLOAD_OFFSET: &str = "Upload-Offset";
const OFFSET_CONTENT_TYPE: &str = "application/offset+octet-stream";

/// Creates a tus upload of `length` bytes at `endpoint`
///
/// Returns the session URL: the response's `Location` header resolved
/// against `endpoint`, or `endpoint` itself when the header is absent.
///
/// # Errors
/// Any status other than 201 Created, or an unparseable `Location`
pub async fn create_upload_session(
    http: &Client,
    endpoint: &Url,
    token: &str,
    length: u64,
) -> Result<Url, FileBrowserError> {
    debug!(url = %endpoint, length, "Creating tus upload");

    let response = http
        .post(endpoint.clone())
        .header(AUTH_HEADER, token)
        .header(TUS_RESUMABLE, TUS_VERSION)
        .header(UPLOAD_LENGTH, length.to_string())
        .send()
        .await?;

    let status = response.status();
    if status != StatusCode::CREATED {
        return Err(FileBrowserError::UnexpectedStatus {
            operation: "upload creation",
            status: status.as_u16(),
        });
    }

    let session = match response.headers().get(LOCATION) {
        Some(location) => {
            let location = location.to_str().map_err(|e| {
                FileBrowserError::InvalidResponse(format!("Location header: {e}"))
            })?;
            endpoint.join(location).map_err(|e| {
                FileBrowserError::InvalidResponse(format!("Location '{location}': {e}"))
            })?
        }
        None => endpoint.clone(),
    };

    debug!(session = %session, "tus upload created");
    Ok(session)
}

/// Sends one chunk at `offset` and returns the offset the server reports
///
/// # Errors
/// A non-2xx status, a missing `Upload-Offset` header, or a reported offset
/// other than `offset + data.len()`
pub async fn upload_chunk(
    http: &Client,
    session_url: &Url,
    token: &str,
    data: Vec<u8>,
    offset: u64,
) -> Result<u64, FileBrowserError> {
    let expected = offset + data.len() as u64;
    debug!(offset, len = data.len(), "Uploading chunk");

    let response = http
        .patch(session_url.clone())
        .header(AUTH_HEADER, token)
        .header(TUS_RESUMABLE, TUS_VERSION)
        .header(UPLOAD_OFFSET, offset.to_string())
        .header(CONTENT_TYPE, OFFSET_CONTENT_TYPE)
        .body(data)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FileBrowserError::UnexpectedStatus {
            operation: "upload chunk",
            status: status.as_u16(),
        });
    }

    let actual = reported_offset(response.headers())?;
    if actual != expected {
        return Err(FileBrowserError::OffsetMismatch { expected, actual });
    }
    Ok(actual)
}

fn reported_offset(headers: &HeaderMap) -> Result<u64, FileBrowserError> {
    let value = headers
        .get(UPLOAD_OFFSET)
        .ok_or_else(|| FileBrowserError::InvalidResponse("missing Upload-Offset header".into()))?;
    value
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .ok_or_else(|| {
            FileBrowserError::InvalidResponse(format!("invalid Upload-Offset header: {value:?}"))
        })
}

impl FileBrowserClient {
    /// Uploads the local file at `local` to `remote`
    ///
    /// The file must exist before any request is made. A zero-length file
    /// creates the upload and sends no chunks.
    pub async fn upload(&mut self, local: &Path, remote: &RemotePath) -> Result<(), FileBrowserError> {
        if local.as_os_str().is_empty() {
            return Err(DomainError::EmptyField("local path").into());
        }

        let metadata = match tokio::fs::metadata(local).await {
            Ok(m) if m.is_file() => m,
            Ok(_) => return Err(FileBrowserError::LocalFileMissing(local.to_path_buf())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FileBrowserError::LocalFileMissing(local.to_path_buf()))
            }
            Err(e) => {
                return Err(FileBrowserError::Io {
                    path: local.to_path_buf(),
                    source: e,
                })
            }
        };
        let total = metadata.len();

        let mut file = File::open(local).await.map_err(|e| FileBrowserError::Io {
            path: local.to_path_buf(),
            source: e,
        })?;

        let token = self.ensure_authenticated().await?;
        let endpoint = self.endpoint(&["api", "tus"], Some(remote));
        let chunk_size = self.chunk_size() as u64;
        info!(
            local = %local.display(),
            remote = %remote,
            size = total,
            chunks = total.div_ceil(chunk_size),
            "Starting upload"
        );

        let session = create_upload_session(self.http_client(), &endpoint, &token, total).await?;

        let mut offset = 0u64;
        while offset < total {
            let want = chunk_size.min(total - offset);
            let mut buf = Vec::with_capacity(want as usize);
            let read = (&mut file)
                .take(want)
                .read_to_end(&mut buf)
                .await
                .map_err(|e| FileBrowserError::Io {
                    path: local.to_path_buf(),
                    source: e,
                })?;
            if read == 0 {
                // Shrunk since the metadata call
                return Err(FileBrowserError::Io {
                    path: local.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        format!("file ended at {offset} of {total} bytes"),
                    ),
                });
            }

            offset = upload_chunk(self.http_client(), &session, &token, buf, offset).await?;
            debug!(offset, total, "Chunk acknowledged");
        }

        info!(remote = %remote, size = total, "Upload complete");
        Ok(())
    }
}
