//! Sled-backed backend for durable, on-disk buckets.

use super::{ensure_fits, entry_size, KeyValueBackend};
use crate::error::BackendError;
use parking_lot::Mutex;
use std::path::Path;

pub struct SledBackend {
    db: sled::Db,
    quota: Option<usize>,
    /// Serializes the quota check with the insert that follows it.
    write_gate: Mutex<()>,
}

impl SledBackend {
    /// Open (or create) a database at `path`.
    pub fn open(path: &Path, quota: Option<usize>) -> Result<Self, BackendError> {
        std::fs::create_dir_all(path).map_err(|e| {
            BackendError::Io(format!(
                "Failed to create store directory {}: {}",
                path.display(),
                e
            ))
        })?;
        let db = sled::open(path)?;
        Ok(Self::from_db(db, quota))
    }

    pub fn from_db(db: sled::Db, quota: Option<usize>) -> Self {
        Self {
            db,
            quota,
            write_gate: Mutex::new(()),
        }
    }

    fn decode(key: &str, bytes: &[u8]) -> Result<String, BackendError> {
        String::from_utf8(bytes.to_vec())
            .map_err(|_| BackendError::Unavailable(format!("value under {} is not UTF-8", key)))
    }

    fn scan_usage(&self) -> Result<usize, BackendError> {
        let mut used = 0;
        for entry in self.db.iter() {
            let (k, v) = entry?;
            used += k.len() + v.len();
        }
        Ok(used)
    }
}

impl KeyValueBackend for SledBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(Self::decode(key, &bytes)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let _gate = self.write_gate.lock();
        if self.quota.is_some() {
            let used = self.scan_usage()?;
            let existing = self.get(key)?;
            ensure_fits(self.quota, used, key, existing.as_deref(), value)?;
        }
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        self.db.flush()?;
        tracing::trace!(key, bytes = entry_size(key, value), "sled entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        let _gate = self.write_gate.lock();
        self.db.remove(key.as_bytes())?;
        self.db.flush()?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, BackendError> {
        let mut keys = Vec::new();
        for key in self.db.iter().keys() {
            let key = key?;
            match std::str::from_utf8(&key) {
                Ok(k) => keys.push(k.to_string()),
                Err(_) => tracing::warn!("Skipping non UTF-8 key in store: {:?}", key),
            }
        }
        Ok(keys)
    }

    fn usage(&self) -> Result<usize, BackendError> {
        self.scan_usage()
    }

    fn quota(&self) -> Option<usize> {
        self.quota
    }
}
