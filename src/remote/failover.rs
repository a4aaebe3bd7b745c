//! Remote-or-local selection.
//!
//! With a remote configured, each call goes to the remote first while the
//! circuit is closed (or half-open for a probe). Transport failures count
//! against the breaker and the call is served by the local store instead.
//! Caller mistakes such as an unmapped field are returned as-is.

use super::breaker::{CircuitBreaker, CircuitState};
use super::{RemoteDomainStore, RemoteTables};
use crate::config::RemoteConfig;
use crate::error::StoreError;
use crate::store::{DomainStore, ResilientStore};
use crate::types::{Domain, Removal, Upserted};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub struct FailoverStore {
    local: Arc<ResilientStore>,
    remote: Option<Arc<dyn DomainStore>>,
    breaker: CircuitBreaker,
}

impl FailoverStore {
    pub fn new(
        local: Arc<ResilientStore>,
        remote: Option<Arc<dyn DomainStore>>,
        breaker: CircuitBreaker,
    ) -> Self {
        Self {
            local,
            remote,
            breaker,
        }
    }

    /// Wire up from configuration. The remote is used only when the config
    /// carries real credentials and a table service is supplied.
    pub fn from_config(
        local: Arc<ResilientStore>,
        config: &RemoteConfig,
        tables: Option<Arc<dyn RemoteTables>>,
    ) -> Self {
        let breaker = CircuitBreaker::new(
            config.failure_threshold,
            Duration::from_secs(config.cooldown_secs),
        );
        let remote = match tables {
            Some(tables) if config.is_configured() => {
                Some(Arc::new(RemoteDomainStore::new(tables)) as Arc<dyn DomainStore>)
            }
            Some(_) => {
                warn!("Remote credentials missing or placeholders; using local store only");
                None
            }
            None => None,
        };
        Self::new(local, remote, breaker)
    }

    pub fn local(&self) -> &Arc<ResilientStore> {
        &self.local
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn circuit_state(&self) -> CircuitState {
        self.breaker.state()
    }

    fn route<T>(
        &self,
        op: &str,
        remote_call: impl FnOnce(&dyn DomainStore) -> Result<T, StoreError>,
        local_call: impl FnOnce(&ResilientStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let Some(remote) = self.remote.as_deref() else {
            return local_call(&self.local);
        };
        if !self.breaker.allow() {
            debug!(op, "Circuit open; serving locally");
            return local_call(&self.local);
        }
        match remote_call(remote) {
            Ok(value) => {
                self.breaker.record_success();
                Ok(value)
            }
            Err(e) if is_transport_failure(&e) => {
                warn!("Remote {} failed: {}; falling back to local store", op, e);
                self.breaker.record_failure();
                local_call(&self.local)
            }
            Err(e) => Err(e),
        }
    }
}

fn is_transport_failure(err: &StoreError) -> bool {
    matches!(err, StoreError::Remote(_) | StoreError::Backend(_))
}

impl DomainStore for FailoverStore {
    fn read(&self, domain: Domain) -> Result<Value, StoreError> {
        self.route(
            "read",
            |remote| remote.read(domain),
            |local| Ok(local.read(domain)),
        )
    }

    fn write(&self, domain: Domain, value: &Value) -> Result<bool, StoreError> {
        self.route(
            "write",
            |remote| remote.write(domain, value),
            |local| local.write(domain, value),
        )
    }

    fn upsert_entity(
        &self,
        domain: Domain,
        entity: Value,
        id_field: &str,
    ) -> Result<Upserted, StoreError> {
        let fallback = entity.clone();
        self.route(
            "upsert",
            |remote| remote.upsert_entity(domain, entity, id_field),
            |local| local.upsert_entity(domain, fallback, id_field),
        )
    }

    fn remove_entity(
        &self,
        domain: Domain,
        id: &str,
        id_field: &str,
    ) -> Result<Removal, StoreError> {
        self.route(
            "remove",
            |remote| remote.remove_entity(domain, id, id_field),
            |local| local.remove_entity(domain, id, id_field),
        )
    }
}
