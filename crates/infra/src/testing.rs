//! Test support
//!
//! Doubles for the transport's credential seam, used by this crate's tests
//! and available to downstream dev-dependencies.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use finboard_domain::Result;
use tokio::sync::RwLock;

use crate::http::AccessTokenSource;

/// An [`AccessTokenSource`] with a fixed starting token.
///
/// `renew` swaps in `renewed-<n>` tokens and counts calls; `invalidate`
/// raises a flag tests can assert on.
pub struct StaticTokenSource {
    current: RwLock<String>,
    renewals: AtomicUsize,
    invalidated: AtomicBool,
}

impl StaticTokenSource {
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self {
            current: RwLock::new(token.to_string()),
            renewals: AtomicUsize::new(0),
            invalidated: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn renewals(&self) -> usize {
        self.renewals.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn invalidated(&self) -> bool {
        self.invalidated.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccessTokenSource for StaticTokenSource {
    async fn access_token(&self) -> Result<String> {
        Ok(self.current.read().await.clone())
    }

    async fn renew(&self) -> Result<()> {
        let count = self.renewals.fetch_add(1, Ordering::SeqCst) + 1;
        *self.current.write().await = format!("renewed-{count}");
        Ok(())
    }

    async fn invalidate(&self) {
        self.invalidated.store(true, Ordering::SeqCst);
    }
}
