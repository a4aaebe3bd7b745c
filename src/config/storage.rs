//! StorageConfig: backend selection, on-disk location and byte budget.

use crate::backend::{KeyValueBackend, MemoryBackend, SledBackend, DEFAULT_QUOTA_BYTES};
use crate::config::xdg;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Sled,
    /// Process-local; contents are lost on exit
    Memory,
}

fn default_quota_bytes() -> usize {
    DEFAULT_QUOTA_BYTES
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: BackendKind,

    /// sled directory; None means `$XDG_DATA_HOME/vinaedu/store`
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Byte budget for keys plus values; 0 disables the limit
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            path: None,
            quota_bytes: default_quota_bytes(),
        }
    }
}

impl StorageConfig {
    pub fn quota(&self) -> Option<usize> {
        (self.quota_bytes > 0).then_some(self.quota_bytes)
    }

    pub fn resolve_path(&self) -> Result<PathBuf, ApiError> {
        match &self.path {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => Ok(xdg::data_dir()?.join("store")),
        }
    }

    /// Open the configured backend.
    pub fn open_backend(&self) -> Result<Arc<dyn KeyValueBackend>, ApiError> {
        Ok(match self.backend {
            BackendKind::Memory => Arc::new(match self.quota() {
                Some(quota) => MemoryBackend::with_quota(quota),
                None => MemoryBackend::new(),
            }),
            BackendKind::Sled => {
                let path = self.resolve_path()?;
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        ApiError::ConfigError(format!(
                            "Failed to create storage directory {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
                Arc::new(SledBackend::open(&path, self.quota())?)
            }
        })
    }
}
