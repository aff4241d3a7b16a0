//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file, with a couple of
//! environment overrides applied on top:
//!
//! - `GETSUITE_CONFIG`: path of the YAML file
//! - `GETSUITE_DATABASE_URL`: store location
//! - `GETSUITE_BIND_ADDRESS`: listen address
//!
//! ```yaml
//! bind_address: 0.0.0.0:8000
//! database_url: sqlite://netsuite_mock.db
//! latency:
//!   min_ms: 50
//!   max_ms: 300
//! customer_delete_policy: orphan
//! ```

use crate::core::error::{ConfigError, SuiteError, SuiteResult};
use crate::core::latency::{DEFAULT_MAX_MS, DEFAULT_MIN_MS, LatencySimulator};
use crate::core::record::DeletePolicy;
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH_ENV: &str = "GETSUITE_CONFIG";
pub const DATABASE_URL_ENV: &str = "GETSUITE_DATABASE_URL";
pub const BIND_ADDRESS_ENV: &str = "GETSUITE_BIND_ADDRESS";

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://netsuite_mock.db";

/// Latency window in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_min_ms")]
    pub min_ms: u64,
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

fn default_min_ms() -> u64 {
    DEFAULT_MIN_MS
}

fn default_max_ms() -> u64 {
    DEFAULT_MAX_MS
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_MIN_MS,
            max_ms: DEFAULT_MAX_MS,
        }
    }
}

impl LatencyConfig {
    pub fn simulator(&self) -> LatencySimulator {
        LatencySimulator::new(self.min_ms, self.max_ms)
    }
}

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// SQLite URL, or `memory` for the in-memory store
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default)]
    pub latency: LatencyConfig,

    /// Treatment of sales orders when their customer is deleted
    #[serde(default)]
    pub customer_delete_policy: DeletePolicy,
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            database_url: default_database_url(),
            latency: LatencyConfig::default(),
            customer_delete_policy: DeletePolicy::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> SuiteResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            SuiteError::Config(ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            })
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> SuiteResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `GETSUITE_CONFIG` (or defaults), then apply env overrides
    pub fn from_env() -> SuiteResult<Self> {
        let config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        Ok(config.with_overrides(
            std::env::var(DATABASE_URL_ENV).ok(),
            std::env::var(BIND_ADDRESS_ENV).ok(),
        ))
    }

    /// Replace the store location and/or listen address when given
    pub fn with_overrides(mut self, database_url: Option<String>, bind_address: Option<String>) -> Self {
        if let Some(url) = database_url.filter(|u| !u.is_empty()) {
            self.database_url = url;
        }
        if let Some(addr) = bind_address.filter(|a| !a.is_empty()) {
            self.bind_address = addr;
        }
        self
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> SuiteResult<()> {
        if self.latency.min_ms > self.latency.max_ms {
            return Err(ConfigError::InvalidValue {
                field: "latency.min_ms".to_string(),
                value: self.latency.min_ms.to_string(),
                message: format!("must not exceed latency.max_ms ({})", self.latency.max_ms),
            }
            .into());
        }
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database_url".to_string(),
                value: self.database_url.clone(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
