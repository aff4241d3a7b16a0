//! Storage implementations for different backends

pub mod in_memory;
pub mod sqlite;

pub use in_memory::InMemoryRecordStore;
pub use sqlite::SqliteRecordStore;

use crate::core::error::SuiteResult;
use crate::core::service::RecordStore;
use std::sync::Arc;

/// `database_url` value selecting the in-memory backend
pub const MEMORY_URL: &str = "memory";

/// Open the backend named by `database_url`.
///
/// `"memory"` selects [`InMemoryRecordStore`]; anything else is handed to
/// SQLite and its schema is created if absent.
pub async fn open_store(database_url: &str) -> SuiteResult<Arc<dyn RecordStore>> {
    if database_url == MEMORY_URL {
        return Ok(Arc::new(InMemoryRecordStore::new()));
    }
    Ok(Arc::new(SqliteRecordStore::open(database_url).await?))
}
