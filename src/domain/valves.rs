//! Valves - Valve Bank and Control Mode

/// Valves the operator can switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Valve {
    Intake,
    SolenoidA,
    SolenoidB,
}

impl Valve {
    pub const ALL: [Valve; 3] = [Valve::Intake, Valve::SolenoidA, Valve::SolenoidB];

    pub fn label(&self) -> &'static str {
        match self {
            Valve::Intake => "Intake Valve",
            Valve::SolenoidA => "Solenoid Valve A",
            Valve::SolenoidB => "Solenoid Valve B",
        }
    }
}

/// Who drives the valves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    #[default]
    Automatic,
    Manual,
}

impl ControlMode {
    pub fn label(&self) -> &'static str {
        match self {
            ControlMode::Automatic => "Automatic",
            ControlMode::Manual => "Manual",
        }
    }
}

/// Outcome of a valve switch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValveChange {
    /// State changed to the requested value
    Applied,
    /// Valve already in the requested state
    Unchanged,
    /// Refused because the bank is under automatic control
    Rejected,
}

/// Open/closed state of every valve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValveBank {
    intake: bool,
    solenoid_a: bool,
    solenoid_b: bool,
}

impl Default for ValveBank {
    fn default() -> Self {
        Self {
            intake: true,
            solenoid_a: true,
            solenoid_b: false,
        }
    }
}

impl ValveBank {
    pub fn is_open(&self, valve: Valve) -> bool {
        match valve {
            Valve::Intake => self.intake,
            Valve::SolenoidA => self.solenoid_a,
            Valve::SolenoidB => self.solenoid_b,
        }
    }

    /// Switch a valve; only honored in manual mode
    pub fn set(&mut self, valve: Valve, open: bool, mode: ControlMode) -> ValveChange {
        if mode == ControlMode::Automatic {
            return ValveChange::Rejected;
        }

        let slot = match valve {
            Valve::Intake => &mut self.intake,
            Valve::SolenoidA => &mut self.solenoid_a,
            Valve::SolenoidB => &mut self.solenoid_b,
        };

        if *slot == open {
            ValveChange::Unchanged
        } else {
            *slot = open;
            ValveChange::Applied
        }
    }
}
