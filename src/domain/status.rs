//! Status - Water Quality Classification

use crate::constants::{
    LEVEL_HIGH_ABOVE, LEVEL_LOW_AT_OR_BELOW, PH_ERROR_HIGH, PH_ERROR_LOW, PH_WARN_HIGH,
    PH_WARN_LOW, TEMPERATURE_COLD_BELOW, TEMPERATURE_WARM_FROM, TURBIDITY_ERROR, TURBIDITY_WARN,
};
use crate::domain::Reading;

/// Overall system state derived from water quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SystemState {
    Operational,
    Warning,
    Error,
}

impl SystemState {
    /// Classify a reading by its pH and turbidity
    pub fn assess(reading: &Reading) -> Self {
        let ph = reading.ph;
        let turbidity = reading.turbidity;

        if ph < PH_ERROR_LOW || ph > PH_ERROR_HIGH || turbidity > TURBIDITY_ERROR {
            SystemState::Error
        } else if ph < PH_WARN_LOW || ph > PH_WARN_HIGH || turbidity > TURBIDITY_WARN {
            SystemState::Warning
        } else {
            SystemState::Operational
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SystemState::Operational => "System Operational",
            SystemState::Warning => "Warning: Check Parameters",
            SystemState::Error => "Error: Maintenance Required",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SystemState::Operational => "All systems functioning normally",
            SystemState::Warning => "Water quality parameters outside ideal range",
            SystemState::Error => "Critical issue detected, system needs attention",
        }
    }

    /// Short alert text
    pub fn alert(&self) -> &'static str {
        match self {
            SystemState::Operational => "No alerts",
            SystemState::Warning => "Water quality warning",
            SystemState::Error => "Critical water quality issue",
        }
    }
}

/// Coarse water temperature band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Cold,
    Normal,
    Warm,
}

impl TemperatureBand {
    pub fn classify(celsius: f64) -> Self {
        if celsius < TEMPERATURE_COLD_BELOW {
            TemperatureBand::Cold
        } else if celsius < TEMPERATURE_WARM_FROM {
            TemperatureBand::Normal
        } else {
            TemperatureBand::Warm
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureBand::Cold => "Cold",
            TemperatureBand::Normal => "Normal",
            TemperatureBand::Warm => "Warm",
        }
    }
}

/// Coarse tank level band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelBand {
    Low,
    Normal,
    High,
}

impl LevelBand {
    pub fn classify(percent: f64) -> Self {
        if percent > LEVEL_HIGH_ABOVE {
            LevelBand::High
        } else if percent > LEVEL_LOW_AT_OR_BELOW {
            LevelBand::Normal
        } else {
            LevelBand::Low
        }
    }
}

/// Snapshot of what the monitor currently shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSummary {
    /// `None` while the system is powered off
    pub state: Option<SystemState>,
    pub temperature: TemperatureBand,
    pub level: LevelBand,
    pub powered: bool,
}

impl StatusSummary {
    pub fn from_reading(reading: &Reading, powered: bool) -> Self {
        Self {
            state: powered.then(|| SystemState::assess(reading)),
            temperature: TemperatureBand::classify(reading.temperature),
            level: LevelBand::classify(reading.water_level),
            powered,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self.state {
            Some(state) => state.label(),
            None => "System Offline",
        }
    }
}
