//! Helper Utilities
//!
//! Common utilities used across the monitor.

mod bounded;
mod fs;

pub use bounded::BoundedDeque;
pub use fs::*;
