//! HTTP surface of the two record collections
//!
//! Each record type has a `handlers` module (one async fn per operation) and
//! a `descriptor` that mounts those handlers under the record API prefix.

pub mod customer;
pub mod sales_order;

use crate::core::latency::LatencySimulator;
use crate::core::record::DeletePolicy;
use crate::core::service::RecordStore;
use std::sync::Arc;

/// Path prefix shared by every record collection
pub const RECORD_API_PREFIX: &str = "/services/rest/record/v1";

/// State handed to every record handler
#[derive(Clone)]
pub struct RecordAppState {
    pub store: Arc<dyn RecordStore>,
    pub latency: LatencySimulator,
    pub customer_delete_policy: DeletePolicy,
}

impl RecordAppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        latency: LatencySimulator,
        customer_delete_policy: DeletePolicy,
    ) -> Self {
        Self {
            store,
            latency,
            customer_delete_policy,
        }
    }
}
