//! File Browser HTTP client
//!
//! Holds the credentials, the base URL and the session token for one File
//! Browser server. The token is obtained lazily: every authenticated
//! operation goes through [`FileBrowserClient::ensure_authenticated`], which
//! logs in only when no token is held yet. Tokens are never refreshed; call
//! [`FileBrowserClient::login`] again to replace one.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fbshare_client::client::FileBrowserClient;
//! use fbshare_core::domain::{Credentials, RemotePath};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let creds = Credentials::new("https://files.example.com", "admin", "secret");
//! let mut client = FileBrowserClient::new(creds)?;
//! let path = RemotePath::new("uploads/report.pdf")?;
//! let resource = client.get_resource(&path).await?;
//! println!("exists: {}, size: {}", resource.exists, resource.size);
//! # Ok(())
//! # }
//! ```

use fbshare_core::domain::{Credentials, DomainError, RemotePath};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::upload::DEFAULT_CHUNK_SIZE;
use crate::FileBrowserError;

/// Header carrying the session token on authenticated requests
pub const AUTH_HEADER: &str = "X-Auth";

/// Body of `POST /api/login`
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    recaptcha: &'a str,
}

/// HTTP client for one File Browser server
///
/// Methods that need a token take `&mut self`; a client value is meant to
/// be used by one call chain at a time. Separate instances never share a
/// token.
pub struct FileBrowserClient {
    /// The underlying HTTP client
    client: Client,
    credentials: Credentials,
    /// Parsed base URL
    base: Url,
    /// Session token, `None` until the first login
    token: Option<String>,
    /// Bytes per tus PATCH request
    chunk_size: usize,
}

impl std::fmt::Debug for FileBrowserClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBrowserClient")
            .field("credentials", &self.credentials)
            .field("base", &self.base.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}

impl FileBrowserClient {
    /// Creates a client after validating `credentials`
    ///
    /// # Errors
    /// Returns [`FileBrowserError::InvalidInput`] for empty fields or a base
    /// address that is not an absolute http(s) URL
    pub fn new(credentials: Credentials) -> Result<Self, FileBrowserError> {
        credentials.validate()?;

        let base = Url::parse(credentials.base_url())
            .map_err(|e| DomainError::InvalidUrl(format!("{}: {e}", credentials.url)))?;
        if base.cannot_be_a_base() {
            return Err(DomainError::InvalidUrl(credentials.url.clone()).into());
        }

        Ok(Self {
            client: Client::new(),
            credentials,
            base,
            token: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    /// Replaces the underlying reqwest client (custom timeouts, proxies, TLS)
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Sets the tus chunk size in bytes (minimum 1)
    pub fn with_chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes.max(1);
        self
    }

    /// Base address without trailing slash
    pub fn base_url(&self) -> &str {
        self.credentials.base_url()
    }

    /// Current session token, if logged in
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Exchanges the credentials for a session token
    ///
    /// Makes `POST /api/login`. A non-2xx status or an empty body is a hard
    /// failure and leaves any previous token untouched.
    pub async fn login(&mut self) -> Result<(), FileBrowserError> {
        let url = self.endpoint(&["api", "login"], None);
        debug!(url = %url, "Logging in");

        let response = self
            .client
            .post(url)
            .json(&LoginRequest {
                username: &self.credentials.username,
                password: &self.credentials.password,
                recaptcha: "",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FileBrowserError::LoginFailed(status.as_u16()));
        }

        let token = response.text().await?.trim().to_string();
        if token.is_empty() {
            return Err(FileBrowserError::EmptyToken);
        }

        self.token = Some(token);
        info!(username = %self.credentials.username, "Successfully authenticated with File Browser");
        Ok(())
    }

    /// Logs in if no token is held and returns the token
    pub async fn ensure_authenticated(&mut self) -> Result<String, FileBrowserError> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }
        self.login().await?;
        self.token.clone().ok_or(FileBrowserError::EmptyToken)
    }

    /// Builds `{base}/{segments..}/{path..}` with each segment percent-encoded
    pub(crate) fn endpoint(&self, segments: &[&str], path: Option<&RemotePath>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut parts) = url.path_segments_mut() {
            parts.pop_if_empty().extend(segments);
            if let Some(path) = path {
                parts.extend(path.segments());
                if path.as_str().ends_with('/') {
                    parts.push("");
                }
            }
        }
        url
    }

    /// Creates a request carrying the session token header
    pub(crate) fn request(&self, method: Method, url: Url, token: &str) -> RequestBuilder {
        self.client.request(method, url).header(AUTH_HEADER, token)
    }

    /// Returns a reference to the underlying HTTP client
    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }
}
