//! Server host holding the transport-agnostic application state
//!
//! The host owns the injected store plus the per-request policies (latency,
//! delete policy). Exposures turn it into a router.

use crate::core::latency::LatencySimulator;
use crate::core::record::DeletePolicy;
use crate::core::service::RecordStore;
use crate::records::customer::CustomerDescriptor;
use crate::records::sales_order::SalesOrderDescriptor;
use crate::records::RecordAppState;
use crate::server::entity_registry::EntityRegistry;
use std::sync::Arc;

/// Host context containing all service state
pub struct ServerHost {
    /// Store shared by both record collections
    pub store: Arc<dyn RecordStore>,

    /// Delay applied before every record operation
    pub latency: LatencySimulator,

    /// What deleting a referenced customer does
    pub customer_delete_policy: DeletePolicy,

    /// Route descriptors for every record type
    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    /// Build the host and register the customer and sales order routes
    pub fn new(
        store: Arc<dyn RecordStore>,
        latency: LatencySimulator,
        customer_delete_policy: DeletePolicy,
    ) -> Self {
        let state = RecordAppState::new(store.clone(), latency, customer_delete_policy);

        let mut entity_registry = EntityRegistry::new();
        entity_registry.register(Box::new(CustomerDescriptor::new(state.clone())));
        entity_registry.register(Box::new(SalesOrderDescriptor::new(state)));

        Self {
            store,
            latency,
            customer_delete_policy,
            entity_registry,
        }
    }

    /// Get record types registered in the host
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }
}
