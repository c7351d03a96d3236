//! Domain error types
//!
//! Input-contract violations detected before any I/O happens: empty
//! credentials, empty or malformed remote paths, empty share hashes.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was empty
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// Invalid remote path format
    #[error("Invalid remote path: {0}")]
    InvalidRemotePath(String),

    /// Invalid share hash
    #[error("Invalid share hash: {0}")]
    InvalidShareHash(String),

    /// A URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
