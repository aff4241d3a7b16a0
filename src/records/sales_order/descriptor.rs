//! Route descriptor for the sales order collection

use super::{create_sales_order, delete_sales_order, list_sales_orders, update_sales_order};
use crate::core::record::RecordKind;
use crate::records::RecordAppState;
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get, routing::put};

pub struct SalesOrderDescriptor {
    state: RecordAppState,
}

impl SalesOrderDescriptor {
    pub fn new(state: RecordAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for SalesOrderDescriptor {
    fn kind(&self) -> RecordKind {
        RecordKind::SalesOrder
    }

    fn build_routes(&self) -> Router {
        let collection = self.collection_path();
        let item = format!("{}/{{id}}", collection);

        Router::new()
            .route(&collection, get(list_sales_orders).post(create_sales_order))
            .route(&item, put(update_sales_order).delete(delete_sales_order))
            .with_state(self.state.clone())
    }
}
