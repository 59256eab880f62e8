//! Reading - One Instantaneous Sensor Observation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One multi-sensor observation delivered per tick
///
/// Values are carried as-is. Range checks belong to whoever renders them,
/// so a negative turbidity still aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// pH (0-14)
    pub ph: f64,
    /// Turbidity (NTU)
    pub turbidity: f64,
    /// Water temperature (°C)
    pub temperature: f64,
    /// Tank fill level (percent)
    pub water_level: f64,
    /// Instant the observation was taken
    pub timestamp: DateTime<Utc>,
}

impl Reading {
    pub fn new(
        ph: f64,
        turbidity: f64,
        temperature: f64,
        water_level: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            ph,
            turbidity,
            temperature,
            water_level,
            timestamp,
        }
    }
}
