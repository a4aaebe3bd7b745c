//! CLI Tooling
//!
//! Command-line interface for inspecting and maintaining the store.

use crate::config::{ConfigLoader, StoreConfig};
use crate::error::{ApiError, StoreError};
use crate::logging::LoggingConfig;
use crate::remote::FailoverStore;
use crate::store::schema::StorageSchema;
use crate::store::{DomainStore, ResilientStore, SeedOutcome, StoreStatus};
use crate::types::Domain;
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// VinaEdu store - resilient key-value persistence for the school site
#[derive(Parser)]
#[command(name = "vinaedu-store")]
#[command(about = "Inspect and maintain the VinaEdu resilient key-value store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply the `--log-*` flags over the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Seed default data if this schema version has not been seeded
    Init,
    /// Show seeding state, usage and stored keys
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print a domain bucket as JSON
    Get { domain: String },
    /// Replace a domain bucket with the given JSON
    Set { domain: String, json: String },
    /// Insert or replace one entity
    Upsert {
        domain: String,
        json: String,
        #[arg(long, default_value = "id")]
        id_field: String,
    },
    /// Remove one entity by identifier
    Remove {
        domain: String,
        id: String,
        #[arg(long, default_value = "id")]
        id_field: String,
    },
    /// Log in by username or email
    Login { identifier: String, secret: String },
    /// Clear the session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List every key in the backend with its classification
    Keys,
    /// Delete orphaned keys from older schema versions
    Evict,
    /// Print the effective configuration as TOML (remote key masked)
    Config,
}

pub struct CliContext {
    config: StoreConfig,
    store: Arc<ResilientStore>,
    domains: Arc<FailoverStore>,
}

impl CliContext {
    /// Load configuration and open the configured backend.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        Self::from_config(ConfigLoader::load(config_path.as_deref())?)
    }

    /// Open the backend named by an already loaded configuration.
    pub fn from_config(config: StoreConfig) -> Result<Self, ApiError> {
        let backend = config.storage.open_backend()?;
        let store = Arc::new(ResilientStore::with_schema(
            backend,
            StorageSchema::new(config.namespace.clone()),
        ));
        Ok(Self::with_store(config, store))
    }

    /// Build a context around an existing store.
    pub fn with_store(config: StoreConfig, store: Arc<ResilientStore>) -> Self {
        // No network client is bundled, so the failover store serves locally
        // unless a host wires one in.
        let domains = Arc::new(FailoverStore::from_config(
            Arc::clone(&store),
            &config.remote,
            None,
        ));
        Self {
            config,
            store,
            domains,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<ResilientStore> {
        &self.store
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Init => Ok(self.init()),
            Commands::Status { format } => self.status(format),
            Commands::Get { domain } => {
                let value = self.domains.read(parse_domain(domain)?)?;
                to_pretty(&value)
            }
            Commands::Set { domain, json } => {
                let domain = parse_domain(domain)?;
                let value = parse_json(json)?;
                if !self.domains.write(domain, &value)? {
                    return Err(ApiError::NotPersisted(domain.to_string()));
                }
                Ok(format!("Saved {}", domain))
            }
            Commands::Upsert {
                domain,
                json,
                id_field,
            } => {
                let domain = parse_domain(domain)?;
                let result = self
                    .domains
                    .upsert_entity(domain, parse_json(json)?, id_field)?;
                if !result.persisted {
                    return Err(ApiError::NotPersisted(format!("{} {}", domain, result.id)));
                }
                let verb = if result.inserted { "Inserted" } else { "Updated" };
                Ok(format!("{} {} {}", verb, domain, result.id))
            }
            Commands::Remove {
                domain,
                id,
                id_field,
            } => {
                let domain = parse_domain(domain)?;
                let removal = self.domains.remove_entity(domain, id, id_field)?;
                if !removal.matched {
                    return Ok(format!("No {} entry with {} = {}", domain, id_field, id));
                }
                if !removal.persisted {
                    return Err(ApiError::NotPersisted(format!("{} {}", domain, id)));
                }
                Ok(format!("Removed {} {}", domain, id))
            }
            Commands::Login { identifier, secret } => {
                let user = self.store.login(identifier, secret)?;
                Ok(format!(
                    "Logged in as {} ({:?})",
                    user.username, user.role
                ))
            }
            Commands::Logout => {
                self.store.logout()?;
                Ok("Logged out".to_string())
            }
            Commands::Whoami => Ok(match self.store.current_user() {
                Some(user) => format!("{} <{}> {:?}", user.username, user.email, user.role),
                None => "Not logged in".to_string(),
            }),
            Commands::Keys => self.keys(),
            Commands::Config => {
                let mut shown = self.config.clone();
                if !shown.remote.key.is_empty() {
                    shown.remote.key = "********".to_string();
                }
                toml::to_string_pretty(&shown).map_err(|e| {
                    ApiError::ConfigError(format!("Failed to render configuration: {}", e))
                })
            }
            Commands::Evict => {
                let evicted = self.store.evict_orphans()?;
                info!(count = evicted.len(), "Evicted orphaned keys on request");
                if evicted.is_empty() {
                    return Ok("No orphaned keys".to_string());
                }
                Ok(format!(
                    "Evicted {} orphaned key(s):\n{}",
                    evicted.len(),
                    evicted.join("\n")
                ))
            }
        }
    }

    fn init(&self) -> String {
        match self.store.initialize() {
            SeedOutcome::AlreadySeeded => "Store already initialized".to_string(),
            SeedOutcome::Seeded { skipped } if skipped.is_empty() => {
                "Store initialized with default data".to_string()
            }
            SeedOutcome::Seeded { skipped } => format!(
                "Store initialized; defaults not written for: {}",
                skipped
                    .iter()
                    .map(Domain::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            SeedOutcome::ProbeFailed => {
                "Storage full or unavailable; running on in-memory defaults".to_string()
            }
            SeedOutcome::FlagNotWritten => {
                "Defaults written but the initialized flag could not be saved".to_string()
            }
            SeedOutcome::FlagUnreadable => {
                "Initialized flag unreadable; stored data left untouched".to_string()
            }
        }
    }

    fn status(&self, format: &str) -> Result<String, ApiError> {
        let status = self.store.status()?;
        match format {
            "json" => {
                let mut value = serde_json::to_value(&status).map_err(StoreError::from)?;
                value["remote_configured"] = Value::Bool(self.config.remote.is_configured());
                value["circuit"] = serde_json::to_value(self.domains.circuit_state())
                    .map_err(StoreError::from)?;
                to_pretty(&value)
            }
            "text" => Ok(self.format_status_text(&status)),
            other => Err(ApiError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }

    fn format_status_text(&self, status: &StoreStatus) -> String {
        let mut out = String::new();
        out.push_str(&format!("Namespace: {}\n", status.namespace));
        out.push_str(&format!("Backend: {:?}\n", self.config.storage.backend));
        out.push_str(&format!(
            "Seeded: {}\n",
            if status.seeded { "yes" } else { "no" }
        ));
        out.push_str(&match status.quota_bytes {
            Some(quota) => format!("Usage: {} / {} bytes\n", status.usage_bytes, quota),
            None => format!("Usage: {} bytes (no quota)\n", status.usage_bytes),
        });
        out.push_str(&format!(
            "Remote: {}\n\n",
            if self.domains.has_remote() {
                "configured"
            } else {
                "local only"
            }
        ));

        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Key", "Bytes", "State"]);
        for key in &status.keys {
            table.add_row(vec![
                key.key.clone(),
                key.bytes.to_string(),
                if key.recognized { "current" } else { "orphan" }.to_string(),
            ]);
        }
        out.push_str(&table.to_string());
        out
    }

    fn keys(&self) -> Result<String, ApiError> {
        let schema = self.store.schema();
        let recognized = schema.recognized_keys();
        let mut keys = self.store.backend().keys()?;
        keys.sort();

        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Key", "Class"]);
        for key in keys {
            let class = if recognized.contains(&key) {
                "current"
            } else if schema.is_namespaced(&key) {
                "orphan"
            } else {
                "foreign"
            };
            table.add_row(vec![key, class.to_string()]);
        }
        Ok(table.to_string())
    }
}

fn parse_domain(name: &str) -> Result<Domain, ApiError> {
    name.parse().map_err(|_| ApiError::UnknownDomain(name.to_string()))
}

fn parse_json(text: &str) -> Result<Value, ApiError> {
    Ok(serde_json::from_str(text).map_err(StoreError::from)?)
}

fn to_pretty(value: &Value) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(value).map_err(StoreError::from)?)
}
