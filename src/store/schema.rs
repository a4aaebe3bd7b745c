//! Key layout and per-domain policies.
//!
//! Every bucket lives under `<namespace>_<stem>_v<version>`. Bumping a
//! domain's version moves it to a fresh key and turns the old one into an
//! orphan, which the capacity-recovery sweep is allowed to delete.

use crate::types::OrderingPolicy::{InsertionOrder, NewestFirst};
use crate::types::WritePolicy::{Report, Surface};
use crate::types::{Domain, DomainShape, OrderingPolicy, WritePolicy};
use std::collections::BTreeSet;

pub const DEFAULT_NAMESPACE: &str = "vinaedu";

/// Version of the initialized-flag; bump it to force a re-seed.
pub const INIT_FLAG_VERSION: u32 = 16;

/// Declared layout and policies of one domain bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainSchema {
    pub domain: Domain,
    pub stem: &'static str,
    pub version: u32,
    pub shape: DomainShape,
    pub ordering: OrderingPolicy,
    pub write_policy: WritePolicy,
    /// Prefix for generated identifiers.
    pub id_prefix: &'static str,
}

const fn collection(
    domain: Domain,
    stem: &'static str,
    version: u32,
    ordering: OrderingPolicy,
    write_policy: WritePolicy,
    id_prefix: &'static str,
) -> DomainSchema {
    DomainSchema {
        domain,
        stem,
        version,
        shape: DomainShape::Collection,
        ordering,
        write_policy,
        id_prefix,
    }
}

/// Schema table, in seeding order. Settings comes first: it doubles as the
/// capacity probe.
pub const DOMAIN_SCHEMAS: [DomainSchema; 10] = [
    DomainSchema {
        domain: Domain::Settings,
        stem: "config",
        version: 4,
        shape: DomainShape::Object,
        ordering: InsertionOrder,
        write_policy: Surface,
        id_prefix: "config",
    },
    collection(Domain::Posts, "posts", 5, NewestFirst, Surface, "post"),
    collection(Domain::Documents, "docs", 2, NewestFirst, Report, "doc"),
    collection(Domain::DocumentCategories, "doc_cats", 1, InsertionOrder, Report, "cat"),
    collection(Domain::Users, "users", 2, InsertionOrder, Report, "user"),
    collection(Domain::Gallery, "gallery", 2, InsertionOrder, Surface, "img"),
    collection(Domain::Albums, "albums", 1, InsertionOrder, Surface, "album"),
    collection(Domain::Menu, "menu", 2, InsertionOrder, Report, "menu"),
    collection(Domain::Blocks, "blocks", 3, InsertionOrder, Report, "block"),
    collection(Domain::Staff, "staff", 1, InsertionOrder, Report, "staff"),
];

pub fn schema_for(domain: Domain) -> &'static DomainSchema {
    DOMAIN_SCHEMAS
        .iter()
        .find(|s| s.domain == domain)
        .unwrap_or(&DOMAIN_SCHEMAS[0])
}

/// Namespace-bound key builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSchema {
    namespace: String,
}

impl StorageSchema {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key_for(&self, domain: Domain) -> String {
        let schema = schema_for(domain);
        format!("{}_{}_v{}", self.namespace, schema.stem, schema.version)
    }

    pub fn init_key(&self) -> String {
        format!("{}_initialized_v{}", self.namespace, INIT_FLAG_VERSION)
    }

    /// Session key is unversioned and never seeded.
    pub fn session_key(&self) -> String {
        format!("{}_session_user", self.namespace)
    }

    /// Every key the current schema owns.
    pub fn recognized_keys(&self) -> BTreeSet<String> {
        let mut keys: BTreeSet<String> = Domain::ALL.iter().map(|d| self.key_for(*d)).collect();
        keys.insert(self.init_key());
        keys.insert(self.session_key());
        keys
    }

    pub fn is_namespaced(&self, key: &str) -> bool {
        key.strip_prefix(self.namespace.as_str())
            .map(|rest| rest.starts_with('_'))
            .unwrap_or(false)
    }

    /// Keys in this namespace that the current schema does not recognize.
    pub fn orphaned_keys<I>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let recognized = self.recognized_keys();
        keys.into_iter()
            .filter(|k| self.is_namespaced(k) && !recognized.contains(k))
            .collect()
    }
}

impl Default for StorageSchema {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}
