//! Service Layer
//!
//! Aggregation, history persistence and the sampling loop.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐   Reading   ┌──────────────────────────────────────┐
//! │ SensorSource  │────────────▶│            MonitorSession            │
//! └───────────────┘  (per tick) │  ┌────────────────┐  ┌────────────┐  │
//!         ▲                     │  │DailyAggregator │─▶│HistoryStore│  │
//!         │                     │  └────────────────┘  └────────────┘  │
//! ┌───────────────┐             └──────────────────────────────────────┘
//! │   Scheduler   │ drives ticks           │
//! └───────────────┘                        ▼ MonitorEvent
//!                                  presentation layer
//! ```

mod aggregator;
mod events;
mod history_store;
mod json_store;
mod memory_store;
mod runtime;
pub mod scheduler;
mod session;

pub use aggregator::*;
pub use events::*;
pub use history_store::*;
pub use json_store::*;
pub use memory_store::*;
pub use runtime::*;
pub use session::*;
