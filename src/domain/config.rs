//! Config - Monitor Configuration

use std::path::PathBuf;
use std::time::Duration;

use chrono::{FixedOffset, Local, Offset};
use serde::{Deserialize, Serialize};

use crate::constants::{HISTORY_SLOT, SAMPLE_INTERVAL_MS};

/// Main monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Tick cadence and day boundaries
    pub sampling: SamplingConfig,
    /// Where and how daily records are kept
    pub history: HistoryConfig,
    /// Mock sensor source
    pub simulator: SimulatorConfig,
    /// Initial operator state
    pub system: SystemConfig,
    /// Log output
    pub logging: LoggingConfig,
}

/// Sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    /// Milliseconds between ticks
    pub interval_ms: u64,
    /// Offset used to decide calendar days; host local offset when unset
    pub utc_offset_minutes: Option<i32>,
    /// Finalize the partial day into a record on shutdown
    pub flush_on_shutdown: bool,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            interval_ms: SAMPLE_INTERVAL_MS,
            utc_offset_minutes: None,
            flush_on_shutdown: false,
        }
    }
}

impl SamplingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }

    /// Resolve the calendar offset, falling back to the host's current one
    pub fn offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes.saturating_mul(60)))
            .unwrap_or_else(|| Local::now().offset().fix())
    }
}

/// History storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Directory holding the slot file; platform data dir when unset
    pub directory: Option<PathBuf>,
    /// Slot name (file stem of the JSON log)
    pub slot: String,
    /// Keep at most this many records; unbounded when unset
    pub max_records: Option<usize>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            directory: None,
            slot: HISTORY_SLOT.to_string(),
            max_records: None,
        }
    }
}

/// Random-walk simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
    pub ph: f64,
    pub turbidity: f64,
    pub water_level: f64,
    pub temperature: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ph: 7.2,
            turbidity: 4.3,
            water_level: 78.0,
            temperature: 22.4,
        }
    }
}

/// Operator state at startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemConfig {
    pub powered: bool,
    pub auto_mode: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            powered: true,
            auto_mode: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write a daily-rolling log file under the data directory
    pub file: bool,
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: false,
            level: "info".to_string(),
        }
    }
}
