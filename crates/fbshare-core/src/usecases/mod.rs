//! Use cases (interactors) for fbshare
//!
//! Use cases are thin coordinators that delegate business rules to domain
//! functions and I/O to ports.
//!
//! ## Use Cases
//!
//! - [`SaveAndShareUseCase`] - Download, sync to the remote service, and share

pub mod save_and_share;

pub use save_and_share::SaveAndShareUseCase;
