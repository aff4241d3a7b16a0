//! # GetSuite
//!
//! A persistent mock of an ERP record REST API, for integration tests that
//! should not depend on live credentials or a sandbox account.
//!
//! ## Records
//!
//! - **Customer**: `POST`/`GET` `/services/rest/record/v1/customer`,
//!   `GET`/`PUT`/`DELETE` `/services/rest/record/v1/customer/{id}`
//! - **Sales Order**: `POST`/`GET` `/services/rest/record/v1/salesorder`,
//!   `PUT`/`DELETE` `/services/rest/record/v1/salesorder/{id}`
//!
//! Records get a store-assigned integer id plus a derived identifier
//! (`CUST-{id}`, `SO-{id}`). Sales orders must reference an existing
//! customer when created. Every call is delayed by a random 50–300 ms.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use getsuite::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = SqliteRecordStore::open("sqlite://netsuite_mock.db").await?;
//!     ServerBuilder::new()
//!         .with_store(store)
//!         .serve("127.0.0.1:8000")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod records;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            ConfigError, ErrorResponse, RecordError, RequestError, StorageError, SuiteError,
            SuiteResult,
        },
        extractors::{RecordId, RecordJson},
        latency::LatencySimulator,
        record::{
            Customer, CustomerPatch, DeletePolicy, NewCustomer, NewSalesOrder, RecordKind,
            SalesOrder, SalesOrderUpdate,
        },
        service::{CustomerService, RecordStore, SalesOrderService},
    };

    // === Records ===
    pub use crate::records::{RECORD_API_PREFIX, RecordAppState};

    // === Storage ===
    pub use crate::storage::{InMemoryRecordStore, SqliteRecordStore, open_store};

    // === Config ===
    pub use crate::config::{LatencyConfig, ServiceConfig};

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder, ServerHost};
}
