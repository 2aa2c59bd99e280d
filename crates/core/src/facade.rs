//! Domain service facade
//!
//! One generic implementation of the remote-then-fallback pattern,
//! instantiated per business entity. Per call the machine is:
//!
//! ```text
//! ATTEMPT_REMOTE ── success ──────────────► Served::remote
//!       │
//!       ├─ retryable exhausted ──► ATTEMPT_FALLBACK ─► Served::fallback | NotFound
//!       ├─ client/unknown (reads) ► ATTEMPT_FALLBACK
//!       ├─ client/unknown (writes) ► error surfaces (nothing was persisted)
//!       └─ auth failure ──────────► error surfaces (terminal, never masked)
//! ```
//!
//! Retry/backoff already happened inside the transport by the time an error
//! reaches this layer, so "retryable" here means "the backend is
//! unreachable or persistently failing".

use std::sync::Arc;

use finboard_domain::{FinboardError, ListQuery, Result};
use tracing::warn;

use crate::fallback::{FallbackDataset, FallbackEntity};
use crate::health::HealthStatus;
use crate::ports::CollectionPort;

/// Where a served value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Remote,
    Fallback,
}

/// A value plus its origin; the value's shape never depends on the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Served<T> {
    pub value: T,
    pub origin: DataOrigin,
}

impl<T> Served<T> {
    fn remote(value: T) -> Self {
        Self { value, origin: DataOrigin::Remote }
    }

    fn fallback(value: T) -> Self {
        Self { value, origin: DataOrigin::Fallback }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.origin == DataOrigin::Fallback
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Generic facade over one domain's remote collection and its fallback
/// dataset.
pub struct DomainFacade<T: FallbackEntity> {
    name: &'static str,
    remote: Arc<dyn CollectionPort<T, T::Draft, T::Patch>>,
    fallback: Arc<FallbackDataset<T>>,
    prefer_fallback: bool,
}

impl<T: FallbackEntity> DomainFacade<T> {
    /// Bind a domain name to its remote port and fallback dataset. Bindings
    /// are created once at startup and never mutated.
    #[must_use]
    pub fn new(
        name: &'static str,
        remote: Arc<dyn CollectionPort<T, T::Draft, T::Patch>>,
        fallback: Arc<FallbackDataset<T>>,
        prefer_fallback: bool,
    ) -> Self {
        Self { name, remote, fallback, prefer_fallback }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether an error may be masked on a read path. Terminal auth errors
    /// never are; a remote `NotFound` is an authoritative answer, and
    /// substituting a local record would resurrect deleted data.
    fn read_may_degrade(error: &FinboardError) -> bool {
        !matches!(
            error,
            FinboardError::AuthFailure(_) | FinboardError::AuthExpired | FinboardError::NotFound(_)
        )
    }

    /// Whether an error may be masked on a write path: only an unreachable
    /// or persistently failing backend. A rejected write surfaces instead
    /// of pretending to persist.
    fn write_may_degrade(error: &FinboardError) -> bool {
        error.is_retryable()
    }

    fn note_degraded(&self, operation: &str, error: &FinboardError) {
        warn!(
            domain = self.name,
            operation,
            error = %error,
            "remote unavailable, serving fallback dataset"
        );
    }

    pub async fn list(&self, query: Option<&ListQuery>) -> Result<Served<Vec<T>>> {
        if self.prefer_fallback {
            return Ok(Served::fallback(self.fallback.list(query).await?));
        }
        match self.remote.list(query).await {
            Ok(items) => Ok(Served::remote(items)),
            Err(error) if Self::read_may_degrade(&error) => {
                self.note_degraded("list", &error);
                Ok(Served::fallback(self.fallback.list(query).await?))
            }
            Err(error) => Err(error),
        }
    }

    pub async fn get(&self, id: &str) -> Result<Served<T>> {
        if self.prefer_fallback {
            return Ok(Served::fallback(self.fallback.get(id).await?));
        }
        match self.remote.get(id).await {
            Ok(item) => Ok(Served::remote(item)),
            Err(error) if Self::read_may_degrade(&error) => {
                self.note_degraded("get", &error);
                Ok(Served::fallback(self.fallback.get(id).await?))
            }
            Err(error) => Err(error),
        }
    }

    pub async fn create(&self, draft: &T::Draft) -> Result<Served<T>> {
        if self.prefer_fallback {
            return Ok(Served::fallback(self.fallback.create(draft).await?));
        }
        match self.remote.create(draft).await {
            Ok(item) => Ok(Served::remote(item)),
            Err(error) if Self::write_may_degrade(&error) => {
                self.note_degraded("create", &error);
                Ok(Served::fallback(self.fallback.create(draft).await?))
            }
            Err(error) => Err(error),
        }
    }

    pub async fn update(&self, id: &str, patch: &T::Patch) -> Result<Served<T>> {
        if self.prefer_fallback {
            return Ok(Served::fallback(self.fallback.update(id, patch).await?));
        }
        match self.remote.update(id, patch).await {
            Ok(item) => Ok(Served::remote(item)),
            Err(error) if Self::write_may_degrade(&error) => {
                self.note_degraded("update", &error);
                Ok(Served::fallback(self.fallback.update(id, patch).await?))
            }
            Err(error) => Err(error),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<Served<()>> {
        if self.prefer_fallback {
            self.fallback.delete(id).await?;
            return Ok(Served::fallback(()));
        }
        match self.remote.delete(id).await {
            Ok(()) => Ok(Served::remote(())),
            Err(error) if Self::write_may_degrade(&error) => {
                self.note_degraded("delete", &error);
                self.fallback.delete(id).await?;
                Ok(Served::fallback(()))
            }
            Err(error) => Err(error),
        }
    }

    /// Probe the remote endpoint. Reports status instead of erroring and
    /// never consults the fallback dataset.
    pub async fn health(&self) -> HealthStatus {
        match self.remote.probe().await {
            Ok(latency) => HealthStatus::Reachable { latency },
            Err(error) => HealthStatus::Unreachable { reason: error.to_string() },
        }
    }
}
