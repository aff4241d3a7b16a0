//! REST API exposure
//!
//! Consumes a `ServerHost` and produces an Axum `Router` with the record
//! routes, health checks and request tracing.

use super::super::host::ServerHost;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Service name reported by the health endpoints
pub const SERVICE_NAME: &str = "getsuite";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Returns
    ///
    /// A router with:
    /// - Health check routes
    /// - Record routes for every registered record type
    /// - Custom routes
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Router {
        let mut app = Self::health_routes().merge(host.entity_registry.build_routes());

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": SERVICE_NAME
        }))
    }
}
