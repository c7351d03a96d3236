//! Domain types and business rules
//!
//! - Newtypes for validated remote paths and share hashes
//! - Credentials for the remote service
//! - Operation parameters and share results
//! - Remote resource descriptors
//! - The synchronization policy
//! - Domain-specific error types

pub mod credentials;
pub mod errors;
pub mod newtypes;
pub mod params;
pub mod policy;
pub mod resource;

// Re-export commonly used types
pub use credentials::Credentials;
pub use errors::DomainError;
pub use newtypes::{RemotePath, ShareHash};
pub use params::{ActionParams, ShareParams, ShareResult, ShareUnit};
pub use policy::{decide, decide_for, SyncAction};
pub use resource::Resource;
