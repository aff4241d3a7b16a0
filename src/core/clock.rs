//! Timestamp formatting shared by every backend

use chrono::{DateTime, Utc};

/// Second-precision UTC timestamp, e.g. `2024-05-01T13:45:00Z`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Date-only format used for `trandate`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current UTC time formatted as a record timestamp
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Current UTC date formatted as a transaction date
pub fn today() -> String {
    Utc::now().format(DATE_FORMAT).to_string()
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
