//! Offline-mode wiring demo
//!
//! Runs the full stack with `prefer_fallback` enabled: no network access,
//! deterministic seed data, and local writes that stay visible for the
//! lifetime of the process.
//!
//! ```sh
//! cargo run -p finboard-infra --example offline_demo
//! ```

use finboard_domain::{Config, ListQuery, NewCompany};
use finboard_infra::DashboardServices;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut config = Config::default();
    config.offline.prefer_fallback = true;
    config.offline.simulated_latency_ms = 50;

    let services = DashboardServices::from_config(&config)?;

    let companies = services.companies.list(None).await?;
    info!(origin = ?companies.origin, count = companies.value.len(), "listed companies");
    for company in &companies.value {
        info!(id = %company.id, name = %company.name, country = %company.country, "company");
    }

    let created = services
        .companies
        .create(&NewCompany {
            name: "Acme Demo GmbH".into(),
            tax_id: "DE-000-DEMO".into(),
            country: "DE".into(),
        })
        .await?
        .into_inner();
    info!(id = %created.id, "created company locally");

    let again = services.companies.get(&created.id).await?.into_inner();
    info!(id = %again.id, name = %again.name, "fetched it back");

    let matching = services.employees.list(Some(&ListQuery::search("nordwind"))).await?;
    info!(count = matching.value.len(), "employees matching search");

    let health = services.companies.health().await;
    info!(?health, "company endpoint health");

    Ok(())
}
