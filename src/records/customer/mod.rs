//! Customer record resource

pub mod descriptor;
pub mod handlers;

pub use descriptor::CustomerDescriptor;
pub use handlers::*;
