//! Core types shared by the store, the repository and the remote path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named category of persisted entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Settings,
    Posts,
    Documents,
    DocumentCategories,
    Users,
    Gallery,
    Albums,
    Menu,
    Blocks,
    Staff,
}

impl Domain {
    pub const ALL: [Domain; 10] = [
        Domain::Settings,
        Domain::Posts,
        Domain::Documents,
        Domain::DocumentCategories,
        Domain::Users,
        Domain::Gallery,
        Domain::Albums,
        Domain::Menu,
        Domain::Blocks,
        Domain::Staff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Settings => "settings",
            Domain::Posts => "posts",
            Domain::Documents => "documents",
            Domain::DocumentCategories => "document_categories",
            Domain::Users => "users",
            Domain::Gallery => "gallery",
            Domain::Albums => "albums",
            Domain::Menu => "menu",
            Domain::Blocks => "blocks",
            Domain::Staff => "staff",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Domain::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| format!("unknown domain: {}", s))
    }
}

/// Whether a bucket holds a single object or an ordered entity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainShape {
    Object,
    Collection,
}

/// Where a newly inserted entity lands in its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingPolicy {
    /// Prepend: the newest entity comes first.
    NewestFirst,
    /// Append: entities keep the order they were added in.
    InsertionOrder,
}

/// What a caller learns when a write cannot be persisted even after eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Raise `CapacityExceeded` so the UI can say "cannot save: storage full".
    Surface,
    /// Log the failure and hand back a `false` success flag.
    Report,
}

/// Result of `upsert_entity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
    /// Identifier of the stored entity, generated when the input had none.
    pub id: String,
    /// True when the entity was new to the collection.
    pub inserted: bool,
    /// False when a report-policy domain could not persist the collection.
    pub persisted: bool,
}

/// Result of `remove_entity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub matched: bool,
    pub persisted: bool,
}
