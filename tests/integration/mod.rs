//! Integration tests for the VinaEdu resilient key-value store

mod capacity_recovery;
mod cli_commands;
mod failover_routing;
mod session_flow;
mod sled_persistence;
mod store_contract;
mod store_properties;
mod support;
