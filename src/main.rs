//! GetSuite server binary
//!
//! Reads configuration from the environment, opens the record store
//! (creating the schema if needed) and serves the mock record API.

use anyhow::{Context, Result};
use getsuite::config::ServiceConfig;
use getsuite::server::ServerBuilder;
use getsuite::storage::open_store;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "getsuite=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ServiceConfig::from_env().context("failed to load configuration")?;

    let store = open_store(&config.database_url)
        .await
        .with_context(|| format!("failed to open record store at {}", config.database_url))?;

    tracing::info!(
        backend = store.backend_name(),
        database_url = %config.database_url,
        latency_min_ms = config.latency.min_ms,
        latency_max_ms = config.latency.max_ms,
        delete_policy = ?config.customer_delete_policy,
        "starting GetSuite mock record API"
    );

    ServerBuilder::new()
        .with_shared_store(store)
        .with_config(&config)
        .serve(&config.bind_address)
        .await
}
