//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are the interfaces the use cases depend on; their implementations
//! live in adapter crates (`fbshare-client`).
//!
//! ## Ports Overview
//!
//! - [`IRemoteStorage`] - Remote file-management service (metadata, delete, upload, share)
//! - [`IFileFetcher`] - Fetching a source URL into the local download cache

pub mod file_fetcher;
pub mod remote_storage;

pub use file_fetcher::IFileFetcher;
pub use remote_storage::IRemoteStorage;
