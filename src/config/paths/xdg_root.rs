//! XDG Base Directory locations for the store.

use crate::error::ApiError;
use std::path::PathBuf;

const APP_DIR: &str = "vinaedu";

/// `$XDG_DATA_HOME`, else `$HOME/.local/share`.
pub fn data_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        if !xdg_data_home.is_empty() {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }
    home().map(|h| h.join(".local").join("share"))
}

/// `$XDG_CONFIG_HOME`, else `$HOME/.config`.
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }
    home().map(|h| h.join(".config"))
}

/// `$XDG_DATA_HOME/vinaedu`
pub fn data_dir() -> Result<PathBuf, ApiError> {
    Ok(data_home()?.join(APP_DIR))
}

/// `$XDG_CONFIG_HOME/vinaedu/config.toml`
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join(APP_DIR).join("config.toml"))
}

fn home() -> Result<PathBuf, ApiError> {
    std::env::var("HOME").map(PathBuf::from).map_err(|_| {
        ApiError::ConfigError("Could not determine home directory (HOME not set)".to_string())
    })
}
