//! HTTP transport
//!
//! [`TransportClient`] executes [`RequestDescriptor`]s: it attaches the
//! current access token, classifies outcomes, applies the retry policy, and
//! drives the single refresh-and-retry cycle on credential expiry.

pub mod client;
pub mod descriptor;

pub use client::{AccessTokenSource, ManagedTokenSource, TransportClient, TransportClientBuilder};
pub use descriptor::RequestDescriptor;
