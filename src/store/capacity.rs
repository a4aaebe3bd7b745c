//! Capacity-safe writes.
//!
//! A write refused for quota triggers one sweep of orphaned keys (anything in
//! the namespace the current schema does not own) and exactly one retry. Any
//! other failure is returned as-is without touching the store.

use super::schema::StorageSchema;
use crate::backend::KeyValueBackend;
use crate::error::BackendError;
use tracing::{debug, error, warn};

/// Delete every orphaned key in the namespace. Returns the keys removed.
pub fn evict_orphans(
    backend: &dyn KeyValueBackend,
    schema: &StorageSchema,
) -> Result<Vec<String>, BackendError> {
    let orphans = schema.orphaned_keys(backend.keys()?);
    for key in &orphans {
        backend.remove(key)?;
        debug!(key = key.as_str(), "Evicted orphaned key");
    }
    Ok(orphans)
}

/// Write `value` under `key`, recovering once from a quota refusal.
pub fn safe_set(
    backend: &dyn KeyValueBackend,
    schema: &StorageSchema,
    key: &str,
    value: &str,
) -> Result<(), BackendError> {
    let err = match backend.set(key, value) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    if !err.is_quota_exceeded() {
        error!("Error saving {}: {}", key, err);
        return Err(err);
    }

    warn!(
        "Storage quota exceeded when saving {}. Clearing orphaned keys and retrying...",
        key
    );
    match evict_orphans(backend, schema) {
        Ok(evicted) => {
            if !evicted.is_empty() {
                warn!(count = evicted.len(), "Evicted orphaned keys: {:?}", evicted);
            }
        }
        Err(cleanup) => {
            error!("Error during storage cleanup: {}", cleanup);
            return Err(cleanup);
        }
    }

    backend.set(key, value).map_err(|retry| {
        error!("Retry failed for {}. Storage is genuinely full: {}", key, retry);
        retry
    })
}
