//! Configuration
//!
//! Layered settings for the store and its binary. Every field has a default,
//! so an empty or missing config file is valid.

pub mod facade;
pub mod storage;

pub mod merge {
    pub mod service;
}

pub mod paths {
    pub mod xdg_root;
}

pub mod sources {
    pub mod environment;
    pub mod global_file;
}

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use storage::{BackendKind, StorageConfig};

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::store::schema::DEFAULT_NAMESPACE;
use serde::{Deserialize, Serialize};

/// Markers that identify a credential copied from a template but never filled in.
const PLACEHOLDER_MARKERS: [&str; 3] = ["placeholder", "YOUR_SUPABASE_URL", "YOUR_SUPABASE_KEY"];

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key prefix shared by every bucket
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
            remote: RemoteConfig::default(),
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.namespace.is_empty() {
            return Err(ApiError::ConfigError("namespace must not be empty".to_string()));
        }
        if !self
            .namespace
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ApiError::ConfigError(format!(
                "namespace '{}' may only contain ASCII letters, digits and '-'",
                self.namespace
            )));
        }
        Ok(())
    }
}

/// Remote table service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub key: String,

    /// Consecutive failures before the circuit opens
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,

    /// Seconds the circuit stays open before a probe
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
}

fn default_failure_threshold() -> u32 {
    3
}

fn default_cooldown_secs() -> u64 {
    30
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            failure_threshold: default_failure_threshold(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

impl RemoteConfig {
    /// True only when both URL and key are present and neither is a placeholder.
    pub fn is_configured(&self) -> bool {
        is_real_credential(&self.url) && is_real_credential(&self.key)
    }
}

fn is_real_credential(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !PLACEHOLDER_MARKERS.iter().any(|m| value.contains(m))
}
