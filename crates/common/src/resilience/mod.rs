//! Resilience patterns for fault tolerance
//!
//! Provides the retry policy and backoff math applied by the transport
//! client. The policy is plain configuration: classification of *which*
//! errors are retryable stays with the error type itself, so the same
//! policy instance can be shared by every client.

pub mod retry;

pub use retry::RetryPolicy;
