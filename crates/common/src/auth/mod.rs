//! Credential lifecycle
//!
//! Owns the token pair from login to logout:
//!
//! ```text
//! ┌────────────────────────┐
//! │ TokenLifecycleManager  │  single-flight refresh, forced logout
//! └──────────┬─────────────┘
//!            │
//!            ├──► CredentialStore        (shared token/profile state)
//!            ├──► RefreshTransport       (network seam, implemented in infra)
//!            └──► CredentialPersistence  (storage seam, implemented in infra)
//! ```
//!
//! The manager is the only writer of the store. Readers (the transport
//! client, UI state) observe either the previous pair or the renewed one,
//! never a half-updated state.

pub mod manager;
pub mod store;
pub mod traits;
pub mod types;

pub use manager::TokenLifecycleManager;
pub use store::CredentialStore;
pub use traits::{CredentialPersistence, RefreshTransport};
pub use types::{AuthError, Session, StoredCredentials, TokenPair, TokenResponse, UserProfile};
