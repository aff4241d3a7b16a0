//! Entity registry collecting the route descriptors of each record type

use crate::core::record::RecordKind;
use crate::records::RECORD_API_PREFIX;
use axum::Router;
use std::collections::BTreeMap;

/// Trait that describes how to build routes for a record type
///
/// Each record type (customer, sales order) implements this trait to
/// provide its routes under [`RECORD_API_PREFIX`].
pub trait EntityDescriptor: Send + Sync {
    /// The record type served by these routes
    fn kind(&self) -> RecordKind;

    /// Collection path, e.g. `/services/rest/record/v1/customer`
    fn collection_path(&self) -> String {
        format!("{}/{}", RECORD_API_PREFIX, self.kind().as_str())
    }

    /// Build the routes for this record type
    fn build_routes(&self) -> Router;
}

/// Registry for all record types served by the application
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<&'static str, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor; a second descriptor for the same kind replaces the first.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        self.descriptors.insert(descriptor.kind().as_str(), descriptor);
    }

    /// Merge the routes of every registered descriptor
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Registered record types, sorted by name
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().copied().collect()
    }
}
