//! Connectivity status reported by facade probes

use std::time::Duration;

/// Outcome of a domain endpoint probe.
///
/// Shown by the surrounding UI as a connectivity indicator; a probe never
/// falls back and never tears down the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Reachable { latency: Duration },
    Unreachable { reason: String },
}

impl HealthStatus {
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable { .. })
    }
}
