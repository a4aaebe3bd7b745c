//! Raw key-value capability underneath the store.
//!
//! A backend is a flat string-to-string map with a byte budget, the same
//! contract a browser gives a page through local storage: values are text,
//! keys are enumerable, and a write that does not fit is refused with a
//! quota signal instead of being truncated.

pub mod memory;
pub mod persistent;

pub use memory::MemoryBackend;
pub use persistent::SledBackend;

use crate::error::BackendError;

/// Default byte budget, matching the common browser local-storage allowance.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Key-value capability port.
///
/// Implementations use interior mutability so one backend can be shared by
/// every collaborator that holds the store.
pub trait KeyValueBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;
    fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), BackendError>;
    fn keys(&self) -> Result<Vec<String>, BackendError>;
    /// Bytes currently charged against the quota.
    fn usage(&self) -> Result<usize, BackendError>;
    fn quota(&self) -> Option<usize>;
}

/// Bytes an entry costs against the quota.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Check whether replacing `existing` under `key` with `value` fits the quota.
pub(crate) fn ensure_fits(
    quota: Option<usize>,
    used: usize,
    key: &str,
    existing: Option<&str>,
    value: &str,
) -> Result<(), BackendError> {
    let Some(quota) = quota else {
        return Ok(());
    };
    let released = existing.map(|v| entry_size(key, v)).unwrap_or(0);
    let needed = entry_size(key, value);
    let available = quota.saturating_sub(used.saturating_sub(released));
    if needed > available {
        return Err(BackendError::QuotaExceeded {
            key: key.to_string(),
            needed,
            available,
        });
    }
    Ok(())
}
