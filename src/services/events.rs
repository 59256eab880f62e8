//! Monitor Events
//!
//! Events emitted by the monitoring session for any presentation layer.
//! They are pushed over a crossbeam channel; a missing receiver is not an
//! error.

use std::sync::Arc;

use crate::domain::{ControlMode, DailyRecord, Reading, Valve};

/// Events emitted by the monitoring session
#[derive(Clone, Debug)]
pub enum MonitorEvent {
    // ==================== Sampling ====================
    /// A reading was taken; `accepted` is false while powered off
    Reading { reading: Reading, accepted: bool },

    // ==================== History ====================
    /// A finalized day was persisted
    RecordSaved(DailyRecord),

    /// A finalized day could not be persisted and awaits an explicit retry
    RecordUnsaved {
        record: DailyRecord,
        error: Arc<str>,
    },

    // ==================== Operator ====================
    /// System power toggled
    PowerChanged(bool),

    /// Control mode switched
    ModeChanged(ControlMode),

    /// A valve was opened or closed
    ValveChanged { valve: Valve, open: bool },
}
