//! # Finboard Core
//!
//! Transport-agnostic service logic: the fallback datasets and the generic
//! domain facade every business entity is served through.
//!
//! The remote side of each facade is the [`ports::CollectionPort`] trait;
//! adapters live in `finboard-infra`. The local side is a
//! [`fallback::FallbackDataset`] seeded deterministically on first use.
//! [`facade::DomainFacade`] arbitrates between the two so callers receive
//! one result shape regardless of origin.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod collections;
pub mod facade;
pub mod fallback;
pub mod health;
pub mod ports;

pub use facade::{DataOrigin, DomainFacade, Served};
pub use fallback::{FallbackDataset, FallbackEntity};
pub use health::HealthStatus;
pub use ports::CollectionPort;
