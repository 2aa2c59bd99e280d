//! File-backed credential persistence
//!
//! Implements the [`CredentialPersistence`] seam over a single JSON file —
//! the dashboard shell's key-value boundary for `accessToken`,
//! `refreshToken`, and the last-known user profile. Constructed without a
//! path the adapter is inert: sessions then live for the process only.

use std::path::PathBuf;

use async_trait::async_trait;
use finboard_common::auth::{AuthError, CredentialPersistence, StoredCredentials};
use tracing::debug;

/// JSON-file [`CredentialPersistence`] adapter.
pub struct FileCredentialStore {
    path: Option<PathBuf>,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    /// An adapter that stores nothing; `load` always answers `None`.
    #[must_use]
    pub fn disabled() -> Self {
        Self { path: None }
    }
}

#[async_trait]
impl CredentialPersistence for FileCredentialStore {
    async fn load(&self) -> Result<Option<StoredCredentials>, AuthError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let credentials: StoredCredentials = serde_json::from_slice(&bytes)
                    .map_err(|err| AuthError::Persistence(format!("corrupt credential file: {err}")))?;
                debug!(path = %path.display(), "loaded persisted credentials");
                Ok(Some(credentials))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AuthError::Persistence(format!("read {}: {err}", path.display()))),
        }
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<(), AuthError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| AuthError::Persistence(format!("create {}: {err}", parent.display())))?;
        }
        let bytes = serde_json::to_vec_pretty(credentials)
            .map_err(|err| AuthError::Persistence(format!("serialize credentials: {err}")))?;
        tokio::fs::write(path, bytes)
            .await
            .map_err(|err| AuthError::Persistence(format!("write {}: {err}", path.display())))?;
        debug!(path = %path.display(), "persisted credentials");
        Ok(())
    }

    async fn clear(&self) -> Result<(), AuthError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthError::Persistence(format!("remove {}: {err}", path.display()))),
        }
    }
}
