//! Sales order record resource
//!
//! No get-by-id route is mounted (GET on an item answers 405); the collection
//! supports create, list, update and delete.

pub mod descriptor;
pub mod handlers;

pub use descriptor::SalesOrderDescriptor;
pub use handlers::*;
