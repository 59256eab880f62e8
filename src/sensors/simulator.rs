//! Random-Walk Sensor Simulator
//!
//! Each sample nudges every value by a bounded random step and clamps it to
//! its physical range. pH, turbidity and temperature are kept to one
//! decimal place.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{
    LEVEL_MAX, LEVEL_MIN, LEVEL_STEP, PH_MAX, PH_MIN, PH_STEP, TEMPERATURE_STEP, TURBIDITY_STEP,
};
use crate::domain::{Reading, SimulatorConfig};
use crate::sensors::SensorSource;

/// Bounded random-walk stand-in for real sensors
#[derive(Debug, Clone)]
pub struct RandomWalkSimulator {
    rng: StdRng,
    ph: f64,
    turbidity: f64,
    temperature: f64,
    water_level: f64,
}

impl RandomWalkSimulator {
    pub fn new(config: &SimulatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            rng,
            ph: config.ph.clamp(PH_MIN, PH_MAX),
            turbidity: config.turbidity.max(0.0),
            temperature: config.temperature,
            water_level: config.water_level.clamp(LEVEL_MIN, LEVEL_MAX),
        }
    }

    fn step(&mut self, size: f64) -> f64 {
        self.rng.gen_range(-size..size)
    }
}

impl SensorSource for RandomWalkSimulator {
    fn sample(&mut self, at: DateTime<Utc>) -> Reading {
        self.ph = round1(self.ph + self.step(PH_STEP)).clamp(PH_MIN, PH_MAX);
        self.turbidity = round1(self.turbidity + self.step(TURBIDITY_STEP)).max(0.0);
        self.temperature = round1(self.temperature + self.step(TEMPERATURE_STEP));
        self.water_level = (self.water_level + self.step(LEVEL_STEP)).clamp(LEVEL_MIN, LEVEL_MAX);

        Reading::new(self.ph, self.turbidity, self.temperature, self.water_level, at)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
