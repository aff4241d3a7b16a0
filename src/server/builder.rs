//! ServerBuilder for fluent API to build the HTTP service

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::ServiceConfig;
use crate::core::latency::LatencySimulator;
use crate::core::record::DeletePolicy;
use crate::core::service::RecordStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the record service
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryRecordStore::new())
///     .with_latency(LatencySimulator::disabled())
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn RecordStore>>,
    latency: LatencySimulator,
    customer_delete_policy: DeletePolicy,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            latency: LatencySimulator::default(),
            customer_delete_policy: DeletePolicy::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the record store (required)
    pub fn with_store(mut self, store: impl RecordStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared record store (required unless `with_store` is used)
    pub fn with_shared_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_latency(mut self, latency: LatencySimulator) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_customer_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.customer_delete_policy = policy;
        self
    }

    /// Take latency and delete policy from a loaded configuration
    pub fn with_config(self, config: &ServiceConfig) -> Self {
        self.with_latency(config.latency.simulator())
            .with_customer_delete_policy(config.customer_delete_policy)
    }

    /// Add routes that sit outside the record API
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("RecordStore is required. Call .with_store()"))?;

        Ok(ServerHost::new(
            store,
            self.latency,
            self.customer_delete_policy,
        ))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        tracing::debug!(
            backend = host.backend_name(),
            records = ?host.entity_types(),
            "built record routes"
        );
        let custom_routes = std::mem::take(&mut self.custom_routes);
        Ok(RestExposure::build_router(host, custom_routes))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
