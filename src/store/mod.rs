//! Resilient Key-Value Store
//!
//! Versioned domain buckets over a bounded key-value backend. Reads never
//! fail: a missing or unreadable bucket yields the compiled-in default.
//! Writes go through the capacity-safe path and report failure according to
//! the domain's write policy.

pub mod capacity;
pub mod ids;
pub mod schema;
pub mod seed;

use crate::backend::KeyValueBackend;
use crate::error::{BackendError, StoreError};
use crate::types::{Domain, DomainShape, OrderingPolicy, Removal, Upserted, WritePolicy};
use ids::IdGenerator;
use schema::{schema_for, StorageSchema, DOMAIN_SCHEMAS};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The four domain operations, shared by the local store and the remote path.
pub trait DomainStore: Send + Sync {
    fn read(&self, domain: Domain) -> Result<Value, StoreError>;
    fn write(&self, domain: Domain, value: &Value) -> Result<bool, StoreError>;
    fn upsert_entity(
        &self,
        domain: Domain,
        entity: Value,
        id_field: &str,
    ) -> Result<Upserted, StoreError>;
    fn remove_entity(&self, domain: Domain, id: &str, id_field: &str)
        -> Result<Removal, StoreError>;
}

/// What `initialize` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Flag already present; nothing written.
    AlreadySeeded,
    /// Defaults written and flag set. Lists domains whose defaults could not be written.
    Seeded { skipped: Vec<Domain> },
    /// The settings probe write failed; the store stays unseeded.
    ProbeFailed,
    /// Defaults written but the flag itself could not be; the next call seeds again.
    FlagNotWritten,
    /// The flag could not be read, so nothing was written.
    FlagUnreadable,
}

/// One stored key as reported by `status`.
#[derive(Debug, Clone, Serialize)]
pub struct KeyUsage {
    pub key: String,
    pub bytes: usize,
    pub recognized: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub namespace: String,
    pub seeded: bool,
    pub usage_bytes: usize,
    pub quota_bytes: Option<usize>,
    pub keys: Vec<KeyUsage>,
}

/// The store handle. Construct once and share by reference (or `Arc`).
pub struct ResilientStore {
    backend: Arc<dyn KeyValueBackend>,
    schema: StorageSchema,
    ids: IdGenerator,
}

impl ResilientStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self::with_schema(backend, StorageSchema::default())
    }

    pub fn with_schema(backend: Arc<dyn KeyValueBackend>, schema: StorageSchema) -> Self {
        Self {
            backend,
            schema,
            ids: IdGenerator::new(),
        }
    }

    pub fn schema(&self) -> &StorageSchema {
        &self.schema
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueBackend> {
        &self.backend
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self.backend.get(&self.schema.init_key()), Ok(Some(_)))
    }

    /// Seed default data once per schema version.
    pub fn initialize(&self) -> SeedOutcome {
        let init_key = self.schema.init_key();
        match self.backend.get(&init_key) {
            Ok(Some(_)) => return SeedOutcome::AlreadySeeded,
            Ok(None) => {}
            Err(e) => {
                warn!("Could not read {}: {}; leaving stored data untouched", init_key, e);
                return SeedOutcome::FlagUnreadable;
            }
        }

        info!("Initializing store with default data...");

        // Settings go first as a capacity probe.
        let probe = schema_for(Domain::Settings);
        if let Err(e) = self.put_json(probe.domain, &seed::default_value(probe.domain)) {
            warn!("Storage full or unavailable ({}). Using in-memory defaults.", e);
            return SeedOutcome::ProbeFailed;
        }

        let mut skipped = Vec::new();
        for domain_schema in DOMAIN_SCHEMAS.iter().filter(|s| s.domain != Domain::Settings) {
            let domain = domain_schema.domain;
            if let Err(e) = self.put_json(domain, &seed::default_value(domain)) {
                warn!("Failed to seed {}: {}", domain, e);
                skipped.push(domain);
            }
        }

        if let Err(e) = capacity::safe_set(self.backend.as_ref(), &self.schema, &init_key, "true") {
            warn!("Failed to write {}: {}", init_key, e);
            return SeedOutcome::FlagNotWritten;
        }

        info!(skipped = skipped.len(), "Store seeded");
        SeedOutcome::Seeded { skipped }
    }

    /// Current bucket content, or the compiled-in default.
    pub fn read(&self, domain: Domain) -> Value {
        let key = self.schema.key_for(domain);
        let raw = match self.backend.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return seed::default_value(domain),
            Err(e) => {
                warn!("Failed to read {}: {}; using defaults", key, e);
                return seed::default_value(domain);
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value) if seed::has_expected_shape(domain, &value) => value,
            Ok(_) => {
                warn!("Bucket {} has unexpected shape; using defaults", key);
                seed::default_value(domain)
            }
            Err(e) => {
                warn!("Bucket {} is not valid JSON ({}); using defaults", key, e);
                seed::default_value(domain)
            }
        }
    }

    /// Replace the whole bucket.
    ///
    /// `Ok(false)` means a report-policy domain could not persist; surface-policy
    /// domains return the error instead.
    pub fn write(&self, domain: Domain, value: &Value) -> Result<bool, StoreError> {
        if !seed::has_expected_shape(domain, value) {
            return Err(StoreError::InvalidEntity(format!(
                "value for {} must be {}",
                domain,
                match schema_for(domain).shape {
                    DomainShape::Object => "an object",
                    DomainShape::Collection => "an array",
                }
            )));
        }

        match self.put_json(domain, value) {
            Ok(()) => {
                debug!(domain = domain.as_str(), "Bucket written");
                Ok(true)
            }
            Err(e) => self.apply_write_policy(domain, e),
        }
    }

    /// Replace the entity whose `id_field` matches, or insert it per the
    /// domain's ordering policy.
    pub fn upsert_entity(
        &self,
        domain: Domain,
        mut entity: Value,
        id_field: &str,
    ) -> Result<Upserted, StoreError> {
        let domain_schema = schema_for(domain);
        if domain_schema.shape != DomainShape::Collection {
            return Err(StoreError::InvalidEntity(format!(
                "{} is not a collection",
                domain
            )));
        }
        let Some(fields) = entity.as_object_mut() else {
            return Err(StoreError::InvalidEntity(format!(
                "{} entities must be objects",
                domain
            )));
        };

        let id = match identifier(fields.get(id_field)) {
            Some(id) => id,
            None => {
                let id = self.ids.next(domain_schema.id_prefix);
                fields.insert(id_field.to_string(), Value::String(id.clone()));
                id
            }
        };

        let mut items = self.read_collection(domain);
        let existing = items
            .iter()
            .position(|item| identifier(item.get(id_field)).as_deref() == Some(id.as_str()));

        let inserted = match existing {
            Some(index) => {
                items[index] = entity;
                false
            }
            None => {
                match domain_schema.ordering {
                    OrderingPolicy::NewestFirst => items.insert(0, entity),
                    OrderingPolicy::InsertionOrder => items.push(entity),
                }
                true
            }
        };

        let persisted = self.write(domain, &Value::Array(items))?;
        Ok(Upserted {
            id,
            inserted,
            persisted,
        })
    }

    /// Drop the entity whose `id_field` matches. No match is a no-op.
    pub fn remove_entity(
        &self,
        domain: Domain,
        id: &str,
        id_field: &str,
    ) -> Result<Removal, StoreError> {
        let items = self.read_collection(domain);
        let before = items.len();
        let remaining: Vec<Value> = items
            .into_iter()
            .filter(|item| identifier(item.get(id_field)).as_deref() != Some(id))
            .collect();

        if remaining.len() == before {
            return Ok(Removal {
                matched: false,
                persisted: true,
            });
        }

        let persisted = self.write(domain, &Value::Array(remaining))?;
        Ok(Removal {
            matched: true,
            persisted,
        })
    }

    /// Remove orphaned keys without waiting for a quota failure.
    pub fn evict_orphans(&self) -> Result<Vec<String>, StoreError> {
        Ok(capacity::evict_orphans(self.backend.as_ref(), &self.schema)?)
    }

    pub fn status(&self) -> Result<StoreStatus, StoreError> {
        let recognized = self.schema.recognized_keys();
        let mut keys = Vec::new();
        for key in self.backend.keys()? {
            if !self.schema.is_namespaced(&key) {
                continue;
            }
            let bytes = self
                .backend
                .get(&key)?
                .map(|v| key.len() + v.len())
                .unwrap_or(0);
            keys.push(KeyUsage {
                recognized: recognized.contains(&key),
                key,
                bytes,
            });
        }
        Ok(StoreStatus {
            namespace: self.schema.namespace().to_string(),
            seeded: self.is_seeded(),
            usage_bytes: self.backend.usage()?,
            quota_bytes: self.backend.quota(),
            keys,
        })
    }

    fn read_collection(&self, domain: Domain) -> Vec<Value> {
        match self.read(domain) {
            Value::Array(items) => items,
            _ => Vec::new(),
        }
    }

    fn put_json(&self, domain: Domain, value: &Value) -> Result<(), BackendError> {
        let key = self.schema.key_for(domain);
        let text = value.to_string();
        capacity::safe_set(self.backend.as_ref(), &self.schema, &key, &text)
    }

    /// Raw write used by the session layer, which has its own key.
    pub(crate) fn put_raw(&self, key: &str, value: &str) -> Result<(), BackendError> {
        capacity::safe_set(self.backend.as_ref(), &self.schema, key, value)
    }

    pub(crate) fn get_raw(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.backend.get(key)
    }

    pub(crate) fn remove_raw(&self, key: &str) -> Result<(), BackendError> {
        self.backend.remove(key)
    }

    fn apply_write_policy(&self, domain: Domain, err: BackendError) -> Result<bool, StoreError> {
        let key = self.schema.key_for(domain);
        match schema_for(domain).write_policy {
            WritePolicy::Surface if err.is_quota_exceeded() => {
                Err(StoreError::CapacityExceeded { key })
            }
            WritePolicy::Surface => Err(StoreError::Backend(err)),
            WritePolicy::Report => {
                warn!("Could not persist {}: {}", key, err);
                Ok(false)
            }
        }
    }
}

impl DomainStore for ResilientStore {
    fn read(&self, domain: Domain) -> Result<Value, StoreError> {
        Ok(ResilientStore::read(self, domain))
    }

    fn write(&self, domain: Domain, value: &Value) -> Result<bool, StoreError> {
        ResilientStore::write(self, domain, value)
    }

    fn upsert_entity(
        &self,
        domain: Domain,
        entity: Value,
        id_field: &str,
    ) -> Result<Upserted, StoreError> {
        ResilientStore::upsert_entity(self, domain, entity, id_field)
    }

    fn remove_entity(
        &self,
        domain: Domain,
        id: &str,
        id_field: &str,
    ) -> Result<Removal, StoreError> {
        ResilientStore::remove_entity(self, domain, id, id_field)
    }
}

/// Identifier of an entity as a string; empty or missing ids are `None`.
pub(crate) fn identifier(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
