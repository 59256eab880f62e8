//! Rainwater Monitor Library
//!
//! Sampling, daily aggregation and history for a rainwater harvesting
//! system. A tick source feeds sensor readings into a monitoring session,
//! which rolls each calendar day into a `DailyRecord` and appends it to a
//! durable history log.

pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod logging;
pub mod sensors;
pub mod services;
pub mod state;
pub mod utils;
