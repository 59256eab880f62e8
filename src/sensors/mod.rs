//! Sensors - Reading Sources
//!
//! A `SensorSource` produces one `Reading` per tick. The monitor ships with a
//! random-walk simulator; a hardware bridge would implement the same trait.

mod simulator;

pub use simulator::*;

use chrono::{DateTime, Utc};

use crate::domain::Reading;

/// Anything that can be sampled once per tick
pub trait SensorSource: Send + 'static {
    /// Take a reading stamped with `at`
    fn sample(&mut self, at: DateTime<Utc>) -> Reading;
}

/// Replays a fixed list of readings, repeating the last one when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    readings: Vec<Reading>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(readings: Vec<Reading>) -> Self {
        Self {
            readings,
            cursor: 0,
        }
    }
}

impl SensorSource for ScriptedSource {
    fn sample(&mut self, at: DateTime<Utc>) -> Reading {
        let base = self
            .readings
            .get(self.cursor)
            .or_else(|| self.readings.last())
            .copied()
            .unwrap_or_else(|| Reading::new(7.0, 0.0, 20.0, 0.0, at));
        self.cursor += 1;
        Reading { timestamp: at, ..base }
    }
}
