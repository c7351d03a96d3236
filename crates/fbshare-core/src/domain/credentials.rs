//! Credentials for the remote file-management service

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Endpoint base address plus the login pair used to obtain a session token
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Base address, e.g. `https://files.example.com`
    pub url: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Creates credentials, trimming any trailing slash from the base address
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks that all three fields are non-empty
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyField`] naming the first empty field
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.url.is_empty() {
            return Err(DomainError::EmptyField("URL"));
        }
        if self.username.is_empty() {
            return Err(DomainError::EmptyField("username"));
        }
        if self.password.is_empty() {
            return Err(DomainError::EmptyField("password"));
        }
        Ok(())
    }

    /// Base address with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

// Keep the password out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
