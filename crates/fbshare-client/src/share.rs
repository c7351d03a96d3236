//! Share link creation via `POST /api/share/{path}`

use fbshare_core::domain::{RemotePath, ShareHash, ShareParams};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::FileBrowserClient;
use crate::FileBrowserError;

/// JSON body of a share request
///
/// An unrestricted share is sent as `{}`. A share with a positive expiration
/// carries all three fields, the password defaulting to an empty string.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub(crate) struct ShareRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    expires: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

impl ShareRequest {
    pub(crate) fn from_params(params: &ShareParams) -> Self {
        if !params.is_restricted() {
            return Self::default();
        }
        Self {
            expires: Some(params.expires.to_string()),
            unit: Some(params.unit.as_str()),
            password: Some(params.password.clone().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ShareResponse {
    hash: Option<String>,
    expire: Option<i64>,
}

impl FileBrowserClient {
    /// Creates a public share for `path` and returns its hash
    ///
    /// Every call creates a new share; existing shares for the same path are
    /// left alone.
    pub async fn create_share(
        &mut self,
        path: &RemotePath,
        params: &ShareParams,
    ) -> Result<ShareHash, FileBrowserError> {
        let token = self.ensure_authenticated().await?;
        let url = self.endpoint(&["api", "share"], Some(path));
        let body = ShareRequest::from_params(params);
        debug!(path = %path, expires = params.expires, unit = %params.unit, "Creating share");

        let response = self
            .request(Method::POST, url, &token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FileBrowserError::UnexpectedStatus {
                operation: "share",
                status: status.as_u16(),
            });
        }

        let share: ShareResponse = response
            .json()
            .await
            .map_err(|e| FileBrowserError::InvalidResponse(format!("share JSON: {e}")))?;

        let hash = match share.hash.as_deref().map(str::trim) {
            Some(h) if !h.is_empty() => ShareHash::new(h)?,
            _ => return Err(FileBrowserError::EmptyShareHash),
        };

        info!(path = %path, hash = %hash, expire = ?share.expire, "Share created");
        Ok(hash)
    }
}
