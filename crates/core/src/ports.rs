//! Remote collection port
//!
//! The seam between the facade and whatever executes requests against the
//! backend. `finboard-infra` implements it over HTTP; tests implement it
//! with scripted doubles.

use std::time::Duration;

use async_trait::async_trait;
use finboard_domain::{ListQuery, Result};

/// Uniform CRUD/query contract against one remote resource collection.
///
/// Implementations own transport concerns (auth attachment, retries,
/// timeouts); errors arriving here are already classified
/// [`finboard_domain::FinboardError`] values.
#[async_trait]
pub trait CollectionPort<T, D, P>: Send + Sync {
    async fn list(&self, query: Option<&ListQuery>) -> Result<Vec<T>>;

    async fn get(&self, id: &str) -> Result<T>;

    async fn create(&self, draft: &D) -> Result<T>;

    async fn update(&self, id: &str, patch: &P) -> Result<T>;

    async fn delete(&self, id: &str) -> Result<()>;

    /// Lightweight reachability probe: unauthenticated, no retries.
    /// Returns the round-trip latency on success.
    async fn probe(&self) -> Result<Duration>;
}
