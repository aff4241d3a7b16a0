//! Typed error handling for the record service
//!
//! Every failure surfaced over HTTP goes through [`SuiteError`], which knows
//! its status code, a stable machine-readable error code and an optional
//! JSON `details` object.
//!
//! # Error Categories
//!
//! - [`RecordError`]: missing records and broken references
//! - [`RequestError`]: malformed paths and bodies
//! - [`ConfigError`]: configuration parsing and validation
//! - [`StorageError`]: failures of the backing store
//!
//! # Example
//!
//! ```rust,ignore
//! use getsuite::prelude::*;
//!
//! match store.get_customer(42).await {
//!     Ok(customer) => println!("{}", customer.entity_id),
//!     Err(SuiteError::Record(RecordError::NotFound { id, .. })) => {
//!         println!("no customer {}", id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::core::record::RecordKind;

/// The main error type of the service
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Record-level errors (missing ids, invalid references)
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Malformed request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Anything that should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl SuiteError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SuiteError::Record(e) => e.status_code(),
            SuiteError::Request(_) => StatusCode::BAD_REQUEST,
            SuiteError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SuiteError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SuiteError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SuiteError::Record(e) => e.error_code(),
            SuiteError::Request(e) => e.error_code(),
            SuiteError::Config(_) => "CONFIG_ERROR",
            SuiteError::Storage(_) => "STORAGE_ERROR",
            SuiteError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Shorthand for a missing record of the given kind
    pub fn not_found(kind: RecordKind, id: i64) -> Self {
        SuiteError::Record(RecordError::NotFound { kind, id })
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            SuiteError::Record(RecordError::NotFound { kind, id }) => Some(serde_json::json!({
                "record_type": kind.as_str(),
                "id": id
            })),
            SuiteError::Record(RecordError::InvalidReference { kind, field, id }) => {
                Some(serde_json::json!({
                    "record_type": kind.as_str(),
                    "field": field,
                    "id": id
                }))
            }
            SuiteError::Record(RecordError::Referenced {
                kind,
                id,
                dependents,
            }) => Some(serde_json::json!({
                "record_type": kind.as_str(),
                "id": id,
                "dependents": dependents
            })),
            _ => None,
        }
    }
}

impl IntoResponse for SuiteError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        } else {
            tracing::warn!(code = self.error_code(), "{}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Record Errors
// =============================================================================

/// Errors tied to a specific record
#[derive(Debug, Error)]
pub enum RecordError {
    /// The internal id does not exist for the targeted resource type
    #[error("{} not found", .kind.display_name())]
    NotFound { kind: RecordKind, id: i64 },

    /// A create payload names a record that does not exist
    #[error("{} ID {id} not found. Cannot create {}.", .kind.display_name(), field_owner(.field))]
    InvalidReference {
        kind: RecordKind,
        field: &'static str,
        id: i64,
    },

    /// Delete refused because other records still point at this one
    #[error("{} {id} is referenced by {dependents} record(s)", .kind.display_name())]
    Referenced {
        kind: RecordKind,
        id: i64,
        dependents: u64,
    },
}

/// Record that owns a referencing field, for error messages.
fn field_owner(field: &str) -> &'static str {
    match field {
        "entity" => "Sales Order",
        _ => "record",
    }
}

impl RecordError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
            RecordError::InvalidReference { .. } => StatusCode::BAD_REQUEST,
            RecordError::Referenced { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RecordError::NotFound { .. } => "RECORD_NOT_FOUND",
            RecordError::InvalidReference { .. } => "INVALID_REFERENCE",
            RecordError::Referenced { .. } => "RECORD_REFERENCED",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors caused by a malformed request
#[derive(Debug, Error)]
pub enum RequestError {
    /// Path id is not an integer
    #[error("Invalid record ID format: '{id}'")]
    InvalidRecordId { id: String },

    /// Body could not be parsed into the expected shape
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidRecordId { .. } => "INVALID_RECORD_ID",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the backing store
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not open or reach the store
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Statement execution failed
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Begin/commit failed
    #[error("Transaction error: {message}")]
    TransactionError { message: String },

    /// Constraint violation or corrupted row
    #[error("Data integrity error: {message}")]
    IntegrityError { message: String },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<sqlx::Error> for SuiteError {
    fn from(err: sqlx::Error) -> Self {
        let storage = match &err {
            sqlx::Error::Configuration(_) | sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => {
                StorageError::ConnectionError {
                    backend: "SQLite".to_string(),
                    message: err.to_string(),
                }
            }
            sqlx::Error::Database(db) if db.is_unique_violation() || db.is_check_violation() => {
                StorageError::IntegrityError {
                    message: db.message().to_string(),
                }
            }
            sqlx::Error::ColumnNotFound(_) | sqlx::Error::ColumnDecode { .. } => {
                StorageError::IntegrityError {
                    message: err.to_string(),
                }
            }
            _ => StorageError::QueryError {
                backend: "SQLite".to_string(),
                message: err.to_string(),
            },
        };
        SuiteError::Storage(storage)
    }
}

impl From<std::io::Error> for SuiteError {
    fn from(err: std::io::Error) -> Self {
        SuiteError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for SuiteError {
    fn from(err: serde_yaml::Error) -> Self {
        SuiteError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for SuiteError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<SuiteError>() {
            Ok(suite_err) => suite_err,
            Err(err) => SuiteError::Internal(err.to_string()),
        }
    }
}

/// A specialized Result type for record service operations
pub type SuiteResult<T> = Result<T, SuiteError>;
