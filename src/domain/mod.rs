//! Domain - Pure Data Structures
//!
//! Readings, daily records, history windows and operator-facing types.
//! Nothing here performs I/O.

mod config;
mod reading;
mod record;
mod status;
mod valves;
mod window;

pub use config::*;
pub use reading::*;
pub use record::*;
pub use status::*;
pub use valves::*;
pub use window::*;
