//! Route descriptor for the customer collection

use super::{create_customer, delete_customer, get_customer, list_customers, update_customer};
use crate::core::record::RecordKind;
use crate::records::RecordAppState;
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};

pub struct CustomerDescriptor {
    state: RecordAppState,
}

impl CustomerDescriptor {
    pub fn new(state: RecordAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for CustomerDescriptor {
    fn kind(&self) -> RecordKind {
        RecordKind::Customer
    }

    fn build_routes(&self) -> Router {
        let collection = self.collection_path();
        let item = format!("{}/{{id}}", collection);

        Router::new()
            .route(&collection, get(list_customers).post(create_customer))
            .route(
                &item,
                get(get_customer).put(update_customer).delete(delete_customer),
            )
            .with_state(self.state.clone())
    }
}
