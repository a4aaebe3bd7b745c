//! In-process backend, used for tests and for the `memory` storage setting.

use super::{ensure_fits, entry_size, KeyValueBackend};
use crate::error::BackendError;
use parking_lot::RwLock;
use std::collections::BTreeMap;

pub struct MemoryBackend {
    entries: RwLock<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Unbounded backend.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            quota: None,
        }
    }

    /// Backend that refuses writes past `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            quota: Some(quota),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut entries = self.entries.write();
        let used = entries.iter().map(|(k, v)| entry_size(k, v)).sum();
        ensure_fits(
            self.quota,
            used,
            key,
            entries.get(key).map(String::as_str),
            value,
        )?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, BackendError> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    fn usage(&self) -> Result<usize, BackendError> {
        Ok(self
            .entries
            .read()
            .iter()
            .map(|(k, v)| entry_size(k, v))
            .sum())
    }

    fn quota(&self) -> Option<usize> {
        self.quota
    }
}
