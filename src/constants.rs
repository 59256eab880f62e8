//! Monitor Constants
//!
//! Centralized constants for sampling, history and water-quality limits.

/// Default sampling period between sensor ticks
pub const SAMPLE_INTERVAL_MS: u64 = 5000;

/// Default name of the persisted history slot
pub const HISTORY_SLOT: &str = "waterSystemHistory";

/// Milliseconds in one day (history windows are measured in these)
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Display format for a daily record's calendar label, e.g. "Jan 01, 2024"
pub const RECORD_DATE_FORMAT: &str = "%b %d, %Y";

/// Capacity of the unsaved-record list kept after failed appends
pub const UNSAVED_RECORDS_CAPACITY: usize = 64;

/// pH bounds
pub const PH_MIN: f64 = 0.0;
pub const PH_MAX: f64 = 14.0;

/// Water level bounds (percent of tank capacity)
pub const LEVEL_MIN: f64 = 0.0;
pub const LEVEL_MAX: f64 = 100.0;

/// pH outside this range raises a warning
pub const PH_WARN_LOW: f64 = 6.5;
pub const PH_WARN_HIGH: f64 = 8.0;

/// pH outside this range is critical
pub const PH_ERROR_LOW: f64 = 6.0;
pub const PH_ERROR_HIGH: f64 = 8.5;

/// Turbidity (NTU) above these values warns / is critical
pub const TURBIDITY_WARN: f64 = 5.0;
pub const TURBIDITY_ERROR: f64 = 10.0;

/// Temperature bands (Celsius)
pub const TEMPERATURE_COLD_BELOW: f64 = 15.0;
pub const TEMPERATURE_WARM_FROM: f64 = 25.0;

/// Water level bands (percent)
pub const LEVEL_HIGH_ABOVE: f64 = 90.0;
pub const LEVEL_LOW_AT_OR_BELOW: f64 = 30.0;

/// Random-walk step sizes for the simulator
pub const PH_STEP: f64 = 0.1;
pub const TURBIDITY_STEP: f64 = 0.2;
pub const TEMPERATURE_STEP: f64 = 0.1;
pub const LEVEL_STEP: f64 = 1.0;
