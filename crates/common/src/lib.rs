//! Shared infrastructure for Finboard crates.
//!
//! Two concerns live here, both transport-agnostic:
//! - [`resilience`]: retry policy and backoff math used by the transport
//!   client
//! - [`auth`]: credential store and token lifecycle (single-flight refresh)
//!
//! The [`testing`] module ships the in-memory doubles downstream crates use
//! in their own test suites.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod resilience;
pub mod testing;
