//! Composition root
//!
//! Builds the whole data-access stack from one [`Config`] value: auth
//! client, credential lifecycle, transport, and the four domain facades
//! with their fallback bindings. Bindings are created here once and never
//! mutated afterwards.

use std::sync::Arc;
use std::time::Duration;

use finboard_common::auth::{Session, TokenLifecycleManager};
use finboard_common::resilience::RetryPolicy;
use finboard_core::{DomainFacade, FallbackDataset};
use finboard_domain::{
    Company, CompanyPatch, Config, Employee, EmployeePatch, FinboardError, NewCompany,
    NewEmployee, NewPayable, NewReceivable, Payable, PayablePatch, Receivable, ReceivablePatch,
    Result,
};
use tracing::info;
use url::Url;

use crate::api::RestCollection;
use crate::auth::{auth_error_to_domain, AuthApiClient};
use crate::http::{ManagedTokenSource, TransportClient};
use crate::offline::seeds;
use crate::persistence::FileCredentialStore;

type Manager = TokenLifecycleManager<AuthApiClient, FileCredentialStore>;

/// The dashboard's data-access services, one facade per business domain.
pub struct DashboardServices {
    pub companies: DomainFacade<Company>,
    pub employees: DomainFacade<Employee>,
    pub payables: DomainFacade<Payable>,
    pub receivables: DomainFacade<Receivable>,
    auth_client: Arc<AuthApiClient>,
    manager: Arc<Manager>,
}

impl DashboardServices {
    /// Wire the stack from configuration.
    ///
    /// # Errors
    /// `Config` for invalid URLs or unconstructible clients.
    pub fn from_config(config: &Config) -> Result<Self> {
        validate_url("auth.token_url", &config.auth.token_url)?;
        for (name, value) in [
            ("api.endpoints.company", &config.api.endpoints.company),
            ("api.endpoints.employee", &config.api.endpoints.employee),
            ("api.endpoints.payables", &config.api.endpoints.payables),
            ("api.endpoints.receivables", &config.api.endpoints.receivables),
        ] {
            validate_url(name, value)?;
        }

        let timeout = Duration::from_secs(config.api.request_timeout_seconds);
        let auth_client = Arc::new(
            AuthApiClient::new(&config.auth.token_url, timeout).map_err(auth_error_to_domain)?,
        );

        let persistence = Arc::new(match &config.auth.credentials_path {
            Some(path) => FileCredentialStore::new(path),
            None => FileCredentialStore::disabled(),
        });

        let manager = Arc::new(TokenLifecycleManager::new(
            Arc::clone(&auth_client),
            persistence,
            config.auth.refresh_margin_seconds,
        ));

        let retry = RetryPolicy::new(
            config.api.retry.max_attempts,
            Duration::from_millis(config.api.retry.base_delay_ms),
            Duration::from_millis(config.api.retry.max_delay_ms),
        );
        let transport = Arc::new(
            TransportClient::builder()
                .timeout(timeout)
                .retry_policy(retry)
                .user_agent("finboard-dashboard/0.1")
                .build(Arc::new(ManagedTokenSource::new(Arc::clone(&manager))))?,
        );

        let latency = Duration::from_millis(config.offline.simulated_latency_ms);
        let prefer_fallback = config.offline.prefer_fallback;
        if prefer_fallback {
            info!("prefer_fallback is set, facades will serve local data only");
        }

        Ok(Self {
            companies: DomainFacade::new(
                "company",
                Arc::new(RestCollection::<Company, NewCompany, CompanyPatch>::new(
                    Arc::clone(&transport),
                    &config.api.endpoints.company,
                    "companies",
                )),
                Arc::new(FallbackDataset::new(seeds::companies).with_latency(latency)),
                prefer_fallback,
            ),
            employees: DomainFacade::new(
                "employee",
                Arc::new(RestCollection::<Employee, NewEmployee, EmployeePatch>::new(
                    Arc::clone(&transport),
                    &config.api.endpoints.employee,
                    "employees",
                )),
                Arc::new(FallbackDataset::new(seeds::employees).with_latency(latency)),
                prefer_fallback,
            ),
            payables: DomainFacade::new(
                "payables",
                Arc::new(RestCollection::<Payable, NewPayable, PayablePatch>::new(
                    Arc::clone(&transport),
                    &config.api.endpoints.payables,
                    "payables",
                )),
                Arc::new(FallbackDataset::new(seeds::payables).with_latency(latency)),
                prefer_fallback,
            ),
            receivables: DomainFacade::new(
                "receivables",
                Arc::new(RestCollection::<Receivable, NewReceivable, ReceivablePatch>::new(
                    Arc::clone(&transport),
                    &config.api.endpoints.receivables,
                    "receivables",
                )),
                Arc::new(FallbackDataset::new(seeds::receivables).with_latency(latency)),
                prefer_fallback,
            ),
            auth_client,
            manager,
        })
    }

    /// Rehydrate the session from persisted credentials. Call once at
    /// startup; returns `true` when a session was restored.
    ///
    /// # Errors
    /// Persistence failures as `Internal`.
    pub async fn initialize(&self) -> Result<bool> {
        self.manager.initialize().await.map_err(auth_error_to_domain)
    }

    /// Authenticate and install the session.
    ///
    /// # Errors
    /// `AuthFailure` for rejected credentials or an unreachable auth server.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let (tokens, profile) =
            self.auth_client.login(email, password).await.map_err(auth_error_to_domain)?;
        let session = Session { user: profile.clone(), expires_at: tokens.expires_at };
        self.manager.login(tokens, Some(profile)).await.map_err(auth_error_to_domain)?;
        Ok(session)
    }

    /// End the session and clear persisted credentials.
    ///
    /// # Errors
    /// Persistence failures as `Internal`.
    pub async fn logout(&self) -> Result<()> {
        self.manager.logout().await.map_err(auth_error_to_domain)
    }

    /// Current session view, if authenticated.
    pub async fn session(&self) -> Option<Session> {
        self.manager.store().session().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.manager.store().is_authenticated().await
    }
}

fn validate_url(name: &str, value: &str) -> Result<()> {
    Url::parse(value)
        .map(drop)
        .map_err(|err| FinboardError::Config(format!("invalid URL for {name}: {err}")))
}
