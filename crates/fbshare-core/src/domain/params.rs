//! Operation parameters and results for the save-and-share flow

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::newtypes::ShareHash;

/// Time unit applied to a share's expiration value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareUnit {
    Seconds,
    Minutes,
    #[default]
    Hours,
    Days,
}

impl ShareUnit {
    /// Wire representation expected by the share endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareUnit::Seconds => "seconds",
            ShareUnit::Minutes => "minutes",
            ShareUnit::Hours => "hours",
            ShareUnit::Days => "days",
        }
    }
}

impl Display for ShareUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "seconds" => Ok(ShareUnit::Seconds),
            "minutes" => Ok(ShareUnit::Minutes),
            "hours" => Ok(ShareUnit::Hours),
            "days" => Ok(ShareUnit::Days),
            other => Err(DomainError::ValidationFailed(format!(
                "invalid share unit '{other}'; valid: seconds, minutes, hours, days"
            ))),
        }
    }
}

/// Share link configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareParams {
    /// Expiration value; zero or negative means the share never expires
    pub expires: i64,
    /// Optional password protecting the share
    pub password: Option<String>,
    pub unit: ShareUnit,
}

impl ShareParams {
    /// A share without expiration or password
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// A share that expires after `expires` units
    pub fn expiring(expires: i64, unit: ShareUnit) -> Self {
        Self {
            expires,
            password: None,
            unit,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// True when expiration, unit and password should be sent
    pub fn is_restricted(&self) -> bool {
        self.expires > 0
    }
}

/// Parameters for one save-and-share invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionParams {
    pub share: ShareParams,
    /// Expected file size in bytes; zero or negative disables size checks
    pub file_size: i64,
    /// Replace an existing remote resource unconditionally
    pub force: bool,
}

/// View and direct-download URLs for a created share
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareResult {
    pub hash: ShareHash,
    pub view_url: String,
    pub download_url: String,
}

impl ShareResult {
    /// Builds `{base}/share/{hash}` and `{base}/api/public/dl/{hash}`
    pub fn from_hash(base_url: &str, hash: ShareHash) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            view_url: format!("{}/share/{}", base, hash),
            download_url: format!("{}/api/public/dl/{}", base, hash),
            hash,
        }
    }
}
