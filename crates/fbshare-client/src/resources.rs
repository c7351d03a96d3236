//! Resource metadata and deletion
//!
//! - `GET /api/resources/{path}`: metadata; 404 becomes [`Resource::missing`]
//! - `DELETE /api/resources/{path}`: deleting an absent resource succeeds

use chrono::{DateTime, Utc};
use fbshare_core::domain::{RemotePath, Resource};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::client::FileBrowserClient;
use crate::FileBrowserError;

/// Resource JSON returned by the File Browser API
///
/// Directory listings carry more fields (`items`, `numDirs`, ...); only the
/// descriptor fields are read.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ResourceResponse {
    path: Option<String>,
    name: Option<String>,
    size: u64,
    extension: Option<String>,
    /// RFC 3339 timestamp, with nanoseconds
    modified: Option<String>,
    is_dir: bool,
    #[serde(rename = "type")]
    kind: Option<String>,
}

fn response_to_resource(path: &RemotePath, response: ResourceResponse) -> Resource {
    let modified = response
        .modified
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    if let Some(reported) = response.path.as_deref() {
        if reported.trim_matches('/') != path.as_str().trim_matches('/') {
            debug!(requested = %path, reported, "Server reported a different resource path");
        }
    }

    Resource {
        path: path.clone(),
        exists: true,
        size: response.size,
        modified,
        kind: response.kind.filter(|k| !k.is_empty()),
        name: response.name.filter(|n| !n.is_empty()),
        extension: response.extension.filter(|e| !e.is_empty()),
        is_dir: response.is_dir,
    }
}

impl FileBrowserClient {
    /// Retrieves metadata for the resource at `path`
    ///
    /// A 404 is a normal result carrying `exists == false`; every other
    /// non-2xx status is an error.
    pub async fn get_resource(&mut self, path: &RemotePath) -> Result<Resource, FileBrowserError> {
        let token = self.ensure_authenticated().await?;
        let url = self.endpoint(&["api", "resources"], Some(path));
        debug!(path = %path, "Fetching resource metadata");

        let response = self.request(Method::GET, url, &token).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(path = %path, "Resource does not exist");
            return Ok(Resource::missing(path.clone()));
        }
        if !status.is_success() {
            return Err(FileBrowserError::UnexpectedStatus {
                operation: "resource",
                status: status.as_u16(),
            });
        }

        let body: ResourceResponse = response
            .json()
            .await
            .map_err(|e| FileBrowserError::InvalidResponse(format!("resource JSON: {e}")))?;

        let resource = response_to_resource(path, body);
        debug!(path = %path, size = resource.size, is_dir = resource.is_dir, "Resource found");
        Ok(resource)
    }

    /// Deletes the resource at `path`
    ///
    /// Both 2xx and 404 count as success.
    pub async fn delete_resource(&mut self, path: &RemotePath) -> Result<(), FileBrowserError> {
        let token = self.ensure_authenticated().await?;
        let url = self.endpoint(&["api", "resources"], Some(path));

        let response = self.request(Method::DELETE, url, &token).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(path = %path, "Resource already absent");
            return Ok(());
        }
        if !status.is_success() {
            return Err(FileBrowserError::UnexpectedStatus {
                operation: "delete",
                status: status.as_u16(),
            });
        }

        info!(path = %path, "Deleted resource");
        Ok(())
    }
}
