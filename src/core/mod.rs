//! Core module containing the record models, store contracts and errors

pub mod clock;
pub mod error;
pub mod extractors;
pub mod latency;
pub mod record;
pub mod service;

pub use error::{SuiteError, SuiteResult};
pub use extractors::{RecordId, RecordJson};
pub use latency::LatencySimulator;
pub use record::{
    Customer, CustomerPatch, DeletePolicy, NewCustomer, NewSalesOrder, RecordKind, SalesOrder,
    SalesOrderUpdate,
};
pub use service::{CustomerService, RecordStore, SalesOrderService};
