//! Error types for the persistence layer.

use thiserror::Error;

/// Failures reported by a raw key-value backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend refused the write because its byte budget is spent.
    #[error("quota exceeded writing {key}: needs {needed} bytes, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl BackendError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, BackendError::QuotaExceeded { .. })
    }
}

impl From<sled::Error> for BackendError {
    fn from(err: sled::Error) -> Self {
        match err {
            sled::Error::Io(e) => BackendError::Io(e.to_string()),
            other => BackendError::Unavailable(other.to_string()),
        }
    }
}

/// Errors surfaced by the store, the session layer and the remote path.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Capacity is genuinely exhausted by current-schema data.
    #[error("cannot save {key}: storage full")]
    CapacityExceeded { key: String },

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Login lookup found no match. Unknown user and wrong secret look the same.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("invalid entity: {0}")]
    InvalidEntity(String),

    #[error("field mapping error: {0}")]
    Mapping(String),

    #[error("remote backend error: {0}")]
    Remote(String),
}

/// Errors at the configuration and CLI boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StoreError),

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    /// A report-policy write came back unpersisted.
    #[error("{0} was not persisted; see the log for the cause")]
    NotPersisted(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        ApiError::StorageError(StoreError::Backend(err))
    }
}
