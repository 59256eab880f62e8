//! File System Utilities
//!
//! Platform directories for configuration, history and logs.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "rainwater", "rainwater-monitor").ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

/// Get or create the configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/rainwater-monitor/` or `$XDG_CONFIG_HOME/rainwater-monitor/`
/// - **macOS**: `~/Library/Application Support/org.rainwater.rainwater-monitor/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\rainwater\rainwater-monitor\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let config_dir = dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.to_path_buf())
}

/// Get or create the data directory holding the history slot
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/rainwater-monitor/`
/// - **macOS**: `~/Library/Application Support/org.rainwater.rainwater-monitor/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\rainwater\rainwater-monitor\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir();

    if !data_dir.exists() {
        fs::create_dir_all(data_dir)?;
    }

    Ok(data_dir.to_path_buf())
}

/// Directory for rolling log files, inside the data directory
pub fn get_or_create_log_dir() -> Result<PathBuf> {
    let log_dir = get_or_create_data_dir()?.join("logs");

    if !log_dir.exists() {
        fs::create_dir_all(&log_dir)?;
    }

    Ok(log_dir)
}

