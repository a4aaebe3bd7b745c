//! Tooling
//!
//! Operator CLI over the store.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
