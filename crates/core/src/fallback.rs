//! Fallback controller
//!
//! A per-domain, in-memory substitute dataset served when the remote system
//! is unreachable (or when the deployment prefers local data). The dataset
//! is seeded deterministically on first use and then mutated by fallback
//! CRUD calls, so it emulates persistence for the lifetime of the process
//! without ever touching the network.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use finboard_domain::{FinboardError, ListQuery, Result};
use tokio::sync::Mutex;
use tracing::debug;

/// An entity type that can live in a fallback dataset.
///
/// `Draft` and `Patch` mirror the payloads the remote API accepts, so the
/// fallback contract is indistinguishable from the real one to callers.
pub trait FallbackEntity: Clone + Send + Sync + 'static {
    type Draft: Send + Sync;
    type Patch: Send + Sync;

    /// Identifier prefix for locally created records ("co", "emp", ...)
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;

    /// Materialize a draft under a locally generated identifier.
    fn from_draft(draft: &Self::Draft, id: String) -> Self;

    /// Apply a partial update in place; absent fields stay untouched.
    fn apply_patch(&mut self, patch: &Self::Patch);

    /// Whether this record satisfies a list query.
    fn matches(&self, query: &ListQuery) -> bool {
        let _ = query;
        true
    }
}

/// Ordered, mutable, in-memory collection behind one mutex.
///
/// The mutex serializes CRUD calls in invocation order; there is no remote
/// arbiter to resolve conflicts, so no write may be lost or reordered.
pub struct FallbackDataset<T> {
    seed: fn() -> Vec<T>,
    state: Mutex<Option<Vec<T>>>,
    next_local_id: AtomicU64,
    latency: Duration,
}

impl<T: FallbackEntity> FallbackDataset<T> {
    /// Create an unseeded dataset; `seed` runs on first access only, so
    /// mutations survive across calls.
    #[must_use]
    pub fn new(seed: fn() -> Vec<T>) -> Self {
        Self {
            seed,
            state: Mutex::new(None),
            next_local_id: AtomicU64::new(1),
            latency: Duration::ZERO,
        }
    }

    /// Delay every operation by `latency` to mimic a round trip.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn with_records<F, O>(&self, operation: F) -> O
    where
        F: FnOnce(&mut Vec<T>) -> O,
    {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let mut guard = self.state.lock().await;
        let records = guard.get_or_insert_with(|| {
            debug!(prefix = T::ID_PREFIX, "seeding fallback dataset");
            (self.seed)()
        });
        operation(records)
    }

    pub async fn list(&self, query: Option<&ListQuery>) -> Result<Vec<T>> {
        self.with_records(|records| {
            let matching: Vec<T> = records
                .iter()
                .filter(|record| query.map_or(true, |q| record.matches(q)))
                .cloned()
                .collect();
            Ok(match query {
                Some(q) => q.page(matching),
                None => matching,
            })
        })
        .await
    }

    pub async fn get(&self, id: &str) -> Result<T> {
        self.with_records(|records| {
            records
                .iter()
                .find(|record| record.id() == id)
                .cloned()
                .ok_or_else(|| FinboardError::NotFound(id.to_string()))
        })
        .await
    }

    /// Append a new record under a `{prefix}-local-{n}` identifier. Seeded
    /// identifiers never carry the `local` infix, so collisions are
    /// impossible by construction.
    pub async fn create(&self, draft: &T::Draft) -> Result<T> {
        let sequence = self.next_local_id.fetch_add(1, Ordering::SeqCst);
        let id = format!("{}-local-{}", T::ID_PREFIX, sequence);
        self.with_records(|records| {
            let record = T::from_draft(draft, id);
            records.push(record.clone());
            Ok(record)
        })
        .await
    }

    pub async fn update(&self, id: &str, patch: &T::Patch) -> Result<T> {
        self.with_records(|records| {
            let record = records
                .iter_mut()
                .find(|record| record.id() == id)
                .ok_or_else(|| FinboardError::NotFound(id.to_string()))?;
            record.apply_patch(patch);
            Ok(record.clone())
        })
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.with_records(|records| {
            let position = records
                .iter()
                .position(|record| record.id() == id)
                .ok_or_else(|| FinboardError::NotFound(id.to_string()))?;
            records.remove(position);
            Ok(())
        })
        .await
    }
}
