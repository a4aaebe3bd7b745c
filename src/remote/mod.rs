//! Remote table-service path.
//!
//! [`RemoteDomainStore`] offers the same four operations as the local store
//! over any [`RemoteTables`] implementation, translating entities through the
//! per-domain [`FieldMap`]s. [`FailoverStore`] picks between it and the local
//! store. No network client ships with the crate; hosts plug one in through
//! the port.

pub mod breaker;
pub mod failover;
pub mod mapping;

pub use breaker::{CircuitBreaker, CircuitState};
pub use failover::FailoverStore;
pub use mapping::{field_map, FieldMap, Row};

use crate::error::StoreError;
use crate::store::ids::IdGenerator;
use crate::store::schema::schema_for;
use crate::store::{identifier, seed, DomainStore};
use crate::types::{Domain, DomainShape, OrderingPolicy, Removal, Upserted};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Port to a row-oriented table service.
pub trait RemoteTables: Send + Sync {
    fn select_all(&self, table: &str) -> Result<Vec<Row>, StoreError>;
    /// Insert `row`, or replace the row whose `key_column` equals the row's value.
    fn upsert_row(&self, table: &str, row: Row, key_column: &str) -> Result<(), StoreError>;
    /// Delete every row where `column == value`. Returns how many went.
    fn delete_rows(&self, table: &str, column: &str, value: &str) -> Result<usize, StoreError>;
}

pub struct RemoteDomainStore {
    tables: Arc<dyn RemoteTables>,
    ids: IdGenerator,
}

impl RemoteDomainStore {
    pub fn new(tables: Arc<dyn RemoteTables>) -> Self {
        Self {
            tables,
            ids: IdGenerator::new(),
        }
    }

    fn key_column(domain: Domain, id_field: &str) -> Result<&'static str, StoreError> {
        field_map(domain).remote_column(id_field).ok_or_else(|| {
            StoreError::Mapping(format!("{} has no column for field '{}'", domain, id_field))
        })
    }

    fn existing_ids(&self, table: &str, column: &str) -> Result<HashSet<String>, StoreError> {
        Ok(self
            .tables
            .select_all(table)?
            .iter()
            .filter_map(|row| identifier(row.get(column)))
            .collect())
    }
}

fn as_row(domain: Domain, value: &Value) -> Result<&Row, StoreError> {
    value
        .as_object()
        .ok_or_else(|| StoreError::InvalidEntity(format!("{} entities must be objects", domain)))
}

impl DomainStore for RemoteDomainStore {
    fn read(&self, domain: Domain) -> Result<Value, StoreError> {
        let map = field_map(domain);
        let mut items = self
            .tables
            .select_all(map.table)?
            .iter()
            .map(|row| Value::Object(map.from_remote(row)))
            .collect::<Vec<_>>();

        let domain_schema = schema_for(domain);
        // Tables keep rows in creation order; newest-first domains read back reversed.
        if domain_schema.ordering == OrderingPolicy::NewestFirst {
            items.reverse();
        }
        Ok(match domain_schema.shape {
            DomainShape::Object if items.is_empty() => seed::default_value(domain),
            DomainShape::Object => items.swap_remove(0),
            DomainShape::Collection => Value::Array(items),
        })
    }

    fn write(&self, domain: Domain, value: &Value) -> Result<bool, StoreError> {
        if !seed::has_expected_shape(domain, value) {
            return Err(StoreError::InvalidEntity(format!(
                "value does not fit {}",
                domain
            )));
        }
        let map = field_map(domain);

        if let Value::Object(settings) = value {
            // Single-row table: keep whatever id the remote row already has.
            let mut row = map.to_remote(settings)?;
            if let Some(id) = self
                .tables
                .select_all(map.table)?
                .first()
                .and_then(|r| r.get("id").cloned())
            {
                row.insert("id".to_string(), id);
            }
            self.tables.upsert_row(map.table, row, "id")?;
            return Ok(true);
        }

        let column = Self::key_column(domain, "id")?;
        let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
        // Translate everything before touching the remote.
        let mut rows = items
            .iter()
            .map(|item| as_row(domain, item).and_then(|r| map.to_remote(r)))
            .collect::<Result<Vec<_>, _>>()?;
        if schema_for(domain).ordering == OrderingPolicy::NewestFirst {
            rows.reverse();
        }

        let kept: HashSet<String> = rows.iter().filter_map(|r| identifier(r.get(column))).collect();
        for stale in self.existing_ids(map.table, column)?.difference(&kept) {
            self.tables.delete_rows(map.table, column, stale)?;
        }
        for row in rows {
            self.tables.upsert_row(map.table, row, column)?;
        }
        Ok(true)
    }

    fn upsert_entity(
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
        let map = field_map(domain);
        let column = Self::key_column(domain, id_field)?;

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

        let row = map.to_remote(fields)?;
        let inserted = !self.existing_ids(map.table, column)?.contains(&id);
        self.tables.upsert_row(map.table, row, column)?;
        Ok(Upserted {
            id,
            inserted,
            persisted: true,
        })
    }

    fn remove_entity(
        &self,
        domain: Domain,
        id: &str,
        id_field: &str,
    ) -> Result<Removal, StoreError> {
        let column = Self::key_column(domain, id_field)?;
        let removed = self.tables.delete_rows(field_map(domain).table, column, id)?;
        Ok(Removal {
            matched: removed > 0,
            persisted: true,
        })
    }
}

/// In-process table service. Useful as a stand-in remote and in tests;
/// `set_unavailable(true)` makes every call fail like a dropped connection.
#[derive(Debug, Default)]
pub struct MemoryTables {
    tables: RwLock<BTreeMap<String, Vec<Row>>>,
    unavailable: AtomicBool,
}

impl MemoryTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables.read().get(table).cloned().unwrap_or_default()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Remote("connection refused".to_string()));
        }
        Ok(())
    }
}

impl RemoteTables for MemoryTables {
    fn select_all(&self, table: &str) -> Result<Vec<Row>, StoreError> {
        self.check()?;
        Ok(self.rows(table))
    }

    fn upsert_row(&self, table: &str, row: Row, key_column: &str) -> Result<(), StoreError> {
        self.check()?;
        let mut tables = self.tables.write();
        let rows = tables.entry(table.to_string()).or_default();
        let key = identifier(row.get(key_column));
        match rows
            .iter_mut()
            .find(|r| key.is_some() && identifier(r.get(key_column)) == key)
        {
            Some(existing) => *existing = row,
            None => rows.push(row),
        }
        Ok(())
    }

    fn delete_rows(&self, table: &str, column: &str, value: &str) -> Result<usize, StoreError> {
        self.check()?;
        let mut tables = self.tables.write();
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|r| identifier(r.get(column)).as_deref() != Some(value));
        Ok(before - rows.len())
    }
}
