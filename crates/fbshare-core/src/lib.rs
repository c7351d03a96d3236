//! fbshare Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `Credentials`, `Resource`, `ActionParams`, `ShareParams`, `ShareResult`
//! - **Sync policy** - the pure skip / delete-then-upload / upload decision
//! - **Local cache helpers** - download path derivation and size-based reuse checks
//! - **Port definitions** - Traits for adapters: `IRemoteStorage`, `IFileFetcher`
//! - **Use cases** - `SaveAndShareUseCase`
//!
//! # Architecture
//!
//! The domain module contains pure business logic with no I/O.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain types through port interfaces.

pub mod config;
pub mod domain;
pub mod local;
pub mod ports;
pub mod usecases;
