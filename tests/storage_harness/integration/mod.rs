//! Integration test infrastructure for the HTTP layer.
//!
//! # Architecture
//!
//! ```text
//! axum_test::TestServer
//!     └─ Router (built by build_test_router via ServerBuilder)
//!         ├─ POST   /services/rest/record/v1/customer
//!         ├─ GET    /services/rest/record/v1/customer
//!         ├─ GET    /services/rest/record/v1/customer/{id}
//!         ├─ PUT    /services/rest/record/v1/customer/{id}
//!         ├─ DELETE /services/rest/record/v1/customer/{id}
//!         ├─ POST   /services/rest/record/v1/salesorder
//!         ├─ GET    /services/rest/record/v1/salesorder
//!         ├─ PUT    /services/rest/record/v1/salesorder/{id}
//!         └─ DELETE /services/rest/record/v1/salesorder/{id}
//! ```

#[macro_use]
pub mod rest_tests;

use axum::Router;
use getsuite::prelude::*;
use std::sync::Arc;

pub const CUSTOMER_PATH: &str = "/services/rest/record/v1/customer";
pub const SALES_ORDER_PATH: &str = "/services/rest/record/v1/salesorder";

/// Router over `store` with latency disabled
pub fn build_test_router(store: Arc<dyn RecordStore>, policy: DeletePolicy) -> Router {
    ServerBuilder::new()
        .with_shared_store(store)
        .with_latency(LatencySimulator::disabled())
        .with_customer_delete_policy(policy)
        .build()
        .expect("router should build")
}

pub fn customer_path(id: i64) -> String {
    format!("{}/{}", CUSTOMER_PATH, id)
}

pub fn sales_order_path(id: i64) -> String {
    format!("{}/{}", SALES_ORDER_PATH, id)
}
