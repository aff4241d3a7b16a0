//! Shared test harness for record store testing
//!
//! Provides payload builders and two suite macros:
//!
//! - `record_service_tests!`: the `CustomerService` / `SalesOrderService`
//!   contract, called directly on the store
//! - `rest_integration_tests!`: the HTTP contract through `axum_test`
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! record_service_tests!(async { StoreFixture::new(InMemoryRecordStore::new()) });
//! ```
//!
//! The factory is an async expression yielding a [`StoreFixture`],
//! re-evaluated for every test so each test starts from an empty store.

#![allow(dead_code)]


#[macro_use]
pub mod integration;

use getsuite::prelude::*;
use std::ops::Deref;
use std::sync::Arc;
use tempfile::TempDir;

/// A store under test plus whatever must outlive it
///
/// File-backed stores hand over their `TempDir`, which is removed when the
/// fixture drops at the end of the test.
pub struct StoreFixture {
    pub store: Arc<dyn RecordStore>,
    _dir: Option<TempDir>,
}

impl StoreFixture {
    pub fn new(store: impl RecordStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            _dir: None,
        }
    }

    pub fn in_dir(store: impl RecordStore + 'static, dir: TempDir) -> Self {
        Self {
            store: Arc::new(store),
            _dir: Some(dir),
        }
    }
}

impl Deref for StoreFixture {
    type Target = Arc<dyn RecordStore>;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

/// Customer create payload with the default status
pub fn acme() -> NewCustomer {
    NewCustomer::new("Acme", "a@acme.com")
}

/// Customer create payload with a numbered company
pub fn numbered_customer(n: usize) -> NewCustomer {
    NewCustomer::new(format!("Company {n}"), format!("contact{n}@example.com"))
}

/// Sales order create payload with defaults for status and trandate
pub fn order_for(customer_id: i64, total: f64) -> NewSalesOrder {
    NewSalesOrder::new(customer_id, total)
}

/// Today's UTC date as the service formats it
pub fn today() -> String {
    getsuite::core::clock::today()
}

/// Assert a `SuiteResult` failed with `RecordError::NotFound` for `id`
pub fn assert_not_found<T: std::fmt::Debug>(result: SuiteResult<T>, kind: RecordKind, id: i64) {
    match result {
        Err(SuiteError::Record(RecordError::NotFound {
            kind: found_kind,
            id: found_id,
        })) => {
            assert_eq!(found_kind, kind);
            assert_eq!(found_id, id);
        }
        other => panic!("expected {kind} {id} not found, got {:?}", other),
    }
}
