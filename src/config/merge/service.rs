//! MergeService: stacks sources in precedence order and deserializes StoreConfig.

use crate::config::sources::{environment, global_file};
use crate::config::StoreConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> global file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<StoreConfig, ConfigError> {
        let builder = Config::builder();
        let builder = global_file::add_to_builder(builder)?;
        let builder = match explicit {
            Some(path) => add_required_file(builder, path),
            None => builder,
        };
        Self::finish(builder)
    }

    /// Load one file with the environment overlay, skipping the global file.
    pub fn load_from_file(path: &Path) -> Result<StoreConfig, ConfigError> {
        Self::finish(add_required_file(Config::builder(), path))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<StoreConfig, ConfigError> {
        // Field defaults come from serde, so no explicit defaults layer is needed.
        let builder = environment::add_to_builder(builder)?;
        builder.build()?.try_deserialize()
    }
}

fn add_required_file(builder: ConfigBuilder<DefaultState>, path: &Path) -> ConfigBuilder<DefaultState> {
    builder.add_source(File::from(path).format(FileFormat::Toml).required(true))
}
