//! VinaEdu Store: resilient key-value persistence for the school portal
//!
//! Versioned domain buckets over a bounded key-value backend, with seeding,
//! capacity recovery, a login session, typed repositories and an optional
//! remote table-service path behind a circuit breaker.

pub mod backend;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod remote;
pub mod repository;
pub mod session;
pub mod store;
pub mod tooling;
pub mod types;

pub use error::{ApiError, BackendError, StoreError};
pub use repository::SchoolRepository;
pub use store::{DomainStore, ResilientStore, SeedOutcome};
pub use types::{Domain, OrderingPolicy, Removal, Upserted, WritePolicy};
