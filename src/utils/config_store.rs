//! ConfigStore - Local Configuration Storage

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppConfig;
use crate::error::Result;
use crate::helpers::get_or_create_config_dir;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "RAINWATER_CONFIG";

/// Default config file name inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Resolve the config file path from the environment or platform dirs
pub fn config_path() -> Result<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(get_or_create_config_dir()?.join(CONFIG_FILE)),
    }
}

/// Load a TOML config file; a missing file yields defaults
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save a TOML config file
pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
