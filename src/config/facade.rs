//! ConfigLoader facade delegating to the merge service.

use super::merge::service::MergeService;
use super::StoreConfig;
use crate::error::ApiError;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from the standard sources plus an optional explicit file, then validate.
    pub fn load(explicit: Option<&Path>) -> Result<StoreConfig, ApiError> {
        let config = MergeService::load(explicit)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<StoreConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn default() -> StoreConfig {
        StoreConfig::default()
    }
}
