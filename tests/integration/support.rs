//! Shared fixtures: instrumented backends and store constructors.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use vinaedu_store::backend::{KeyValueBackend, MemoryBackend};
use vinaedu_store::{BackendError, ResilientStore};

/// Wraps a backend and records every write.
pub struct CountingBackend {
    inner: MemoryBackend,
    sets: AtomicUsize,
    written: Mutex<Vec<String>>,
}

impl CountingBackend {
    pub fn new(inner: MemoryBackend) -> Self {
        Self {
            inner,
            sets: AtomicUsize::new(0),
            written: Mutex::new(Vec::new()),
        }
    }

    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn written_keys(&self) -> Vec<String> {
        self.written.lock().clone()
    }
}

impl KeyValueBackend for CountingBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.written.lock().push(key.to_string());
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.inner.remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, BackendError> {
        self.inner.keys()
    }

    fn usage(&self) -> Result<usize, BackendError> {
        self.inner.usage()
    }

    fn quota(&self) -> Option<usize> {
        self.inner.quota()
    }
}

/// Fails every write with a non-quota error.
pub struct BrokenBackend {
    pub inner: MemoryBackend,
}

impl KeyValueBackend for BrokenBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), BackendError> {
        Err(BackendError::Io("disk detached".to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.inner.remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, BackendError> {
        self.inner.keys()
    }

    fn usage(&self) -> Result<usize, BackendError> {
        self.inner.usage()
    }

    fn quota(&self) -> Option<usize> {
        None
    }
}

/// Fails reads of one key once `fail_reads` is switched on.
pub struct UnreadableKeyBackend {
    pub inner: MemoryBackend,
    pub key: String,
    pub fail_reads: AtomicBool,
}

impl UnreadableKeyBackend {
    pub fn new(key: &str) -> Self {
        Self {
            inner: MemoryBackend::new(),
            key: key.to_string(),
            fail_reads: AtomicBool::new(false),
        }
    }
}

impl KeyValueBackend for UnreadableKeyBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        if key == self.key && self.fail_reads.load(Ordering::SeqCst) {
            return Err(BackendError::Io("read failed".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.inner.remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, BackendError> {
        self.inner.keys()
    }

    fn usage(&self) -> Result<usize, BackendError> {
        self.inner.usage()
    }

    fn quota(&self) -> Option<usize> {
        self.inner.quota()
    }
}

pub fn memory_store() -> ResilientStore {
    ResilientStore::new(Arc::new(MemoryBackend::new()))
}

pub fn seeded_store() -> ResilientStore {
    let store = memory_store();
    store.initialize();
    store
}

/// Refuses writes to one key with a quota error, as if that value alone
/// were too large to fit.
pub struct OversizedKeyBackend {
    pub inner: MemoryBackend,
    pub refused: String,
}

impl KeyValueBackend for OversizedKeyBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        if key == self.refused {
            return Err(BackendError::QuotaExceeded {
                key: key.to_string(),
                needed: key.len() + value.len(),
                available: 0,
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.inner.remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, BackendError> {
        self.inner.keys()
    }

    fn usage(&self) -> Result<usize, BackendError> {
        self.inner.usage()
    }

    fn quota(&self) -> Option<usize> {
        self.inner.quota()
    }
}
