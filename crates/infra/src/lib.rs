//! # Finboard Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The HTTP transport client (auth attachment, retries, refresh-and-retry)
//! - REST adapters for the domain collection ports
//! - The auth endpoint client (login, refresh)
//! - File-backed credential persistence
//! - Configuration loading and the composition root
//!
//! ## Architecture
//! - Implements traits defined in `finboard-core` and `finboard-common`
//! - Contains all "impure" code (network, filesystem, environment)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod offline;
pub mod persistence;
pub mod services;
pub mod testing;

// Re-export commonly used items
pub use api::RestCollection;
pub use auth::AuthApiClient;
pub use http::{RequestDescriptor, TransportClient};
pub use persistence::FileCredentialStore;
pub use services::DashboardServices;
