//! Monitoring Session
//!
//! Pairs the daily aggregator with a history store and carries the operator
//! state (power, control mode, valves). One session is driven by one tick
//! source; the store may be shared with readers elsewhere.
//!
//! ## Pattern
//!
//! ```text
//! tick(reading)
//!       │
//!       ▼
//! DailyAggregator::ingest ──▶ RolledOver { record }
//!                                   │
//!                                   ▼
//!                         HistoryStore::append
//!                           │             │
//!                          Ok            Err
//!                           │             │
//!                    RecordSaved    unsaved list + RecordUnsaved
//! ```
//!
//! Failed appends are not retried on their own; `retry_unsaved` re-issues
//! them when the caller decides to.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use crossbeam_channel::{Receiver, Sender};

use crate::constants::UNSAVED_RECORDS_CAPACITY;
use crate::domain::{
    AppConfig, ControlMode, DailyRecord, HistoryWindow, Reading, StatusSummary, Valve, ValveBank,
    ValveChange,
};
use crate::error::Result;
use crate::helpers::BoundedDeque;
use crate::services::{DailyAggregator, HistoryStore, IngestOutcome, MonitorEvent};

/// A single monitoring session
pub struct MonitorSession {
    aggregator: DailyAggregator,
    store: Arc<dyn HistoryStore>,
    powered: bool,
    mode: ControlMode,
    valves: ValveBank,
    latest: Option<Reading>,
    unsaved: BoundedDeque<DailyRecord>,
    tx: Option<Sender<MonitorEvent>>,
}

impl MonitorSession {
    /// Create a powered, automatic-mode session
    pub fn new(aggregator: DailyAggregator, store: Arc<dyn HistoryStore>) -> Self {
        Self {
            aggregator,
            store,
            powered: true,
            mode: ControlMode::Automatic,
            valves: ValveBank::default(),
            latest: None,
            unsaved: BoundedDeque::new(UNSAVED_RECORDS_CAPACITY),
            tx: None,
        }
    }

    /// Create a session from configuration, starting the day at `started_at`
    pub fn from_config(
        config: &AppConfig,
        store: Arc<dyn HistoryStore>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let aggregator = DailyAggregator::new(config.sampling.offset(), started_at);
        let mut session = Self::new(aggregator, store);
        session.powered = config.system.powered;
        session.mode = if config.system.auto_mode {
            ControlMode::Automatic
        } else {
            ControlMode::Manual
        };
        session
    }

    /// Receive session events from now on
    pub fn subscribe(&mut self) -> Receiver<MonitorEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.tx = Some(tx);
        rx
    }

    fn emit(&self, event: MonitorEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }

    // ==================== Getters ====================

    pub fn aggregator(&self) -> &DailyAggregator {
        &self.aggregator
    }

    pub fn store(&self) -> &Arc<dyn HistoryStore> {
        &self.store
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn valves(&self) -> &ValveBank {
        &self.valves
    }

    /// Most recent reading, whether or not it was accumulated
    pub fn latest(&self) -> Option<&Reading> {
        self.latest.as_ref()
    }

    /// Records whose append failed, oldest first
    pub fn unsaved(&self) -> impl Iterator<Item = &DailyRecord> {
        self.unsaved.iter()
    }

    /// Current status derived from the latest reading
    pub fn status(&self) -> Option<StatusSummary> {
        self.latest
            .as_ref()
            .map(|reading| StatusSummary::from_reading(reading, self.powered))
    }

    // ==================== Sampling ====================

    /// Feed one tick's reading through the aggregator
    pub fn tick(&mut self, reading: Reading) -> IngestOutcome {
        self.latest = Some(reading);

        let outcome = self.aggregator.ingest(&reading, self.powered);
        self.emit(MonitorEvent::Reading {
            reading,
            accepted: outcome != IngestOutcome::Dropped,
        });

        if let Some(record) = outcome.record() {
            self.persist(record.clone());
        }
        outcome
    }

    fn persist(&mut self, record: DailyRecord) {
        match self.store.append(&record) {
            Ok(()) => {
                tracing::info!(slot = self.store.slot(), day = %record.date, "Saved daily record");
                self.emit(MonitorEvent::RecordSaved(record));
            }
            Err(e) => {
                tracing::error!(
                    slot = self.store.slot(),
                    day = %record.date,
                    error = %e,
                    "Failed to save daily record"
                );
                self.emit(MonitorEvent::RecordUnsaved {
                    record: record.clone(),
                    error: e.to_string().into(),
                });
                if let Some(lost) = self.unsaved.push(record) {
                    tracing::warn!(day = %lost.date, "Unsaved list full; dropping oldest record");
                }
            }
        }
    }

    /// Re-append records whose earlier append failed
    ///
    /// Stops at the first failure; that record and the ones after it stay
    /// queued. Returns how many were saved.
    pub fn retry_unsaved(&mut self) -> Result<usize> {
        let mut saved = 0;
        while let Some(record) = self.unsaved.front() {
            self.store.append(record)?;
            if let Some(record) = self.unsaved.pop_front() {
                tracing::info!(day = %record.date, "Saved previously unsaved record");
                self.emit(MonitorEvent::RecordSaved(record));
            }
            saved += 1;
        }
        Ok(saved)
    }

    /// End the session
    ///
    /// With `flush`, the day in progress is finalized and appended; otherwise
    /// it is discarded.
    pub fn shutdown(&mut self, flush: bool) -> Option<DailyRecord> {
        if flush {
            let record = self.aggregator.flush()?;
            self.persist(record.clone());
            return Some(record);
        }

        let pending = self.aggregator.accumulator().len();
        if pending > 0 {
            tracing::info!(pending, "Discarding readings of the unfinished day");
        }
        None
    }

    // ==================== Operator ====================

    pub fn set_powered(&mut self, powered: bool) {
        if self.powered != powered {
            self.powered = powered;
            tracing::info!("System {}", if powered { "ON" } else { "OFF" });
            self.emit(MonitorEvent::PowerChanged(powered));
        }
    }

    pub fn set_mode(&mut self, mode: ControlMode) {
        if self.mode != mode {
            self.mode = mode;
            tracing::info!(mode = mode.label(), "Control mode changed");
            self.emit(MonitorEvent::ModeChanged(mode));
        }
    }

    /// Switch a valve; refused in automatic mode
    pub fn set_valve(&mut self, valve: Valve, open: bool) -> ValveChange {
        let change = self.valves.set(valve, open, self.mode);
        match change {
            ValveChange::Applied => {
                tracing::info!(valve = valve.label(), open, "Valve switched");
                self.emit(MonitorEvent::ValveChanged { valve, open });
            }
            ValveChange::Rejected => {
                tracing::debug!(valve = valve.label(), "Valve switch ignored in automatic mode");
            }
            ValveChange::Unchanged => {}
        }
        change
    }

    // ==================== History ====================

    /// Query the history relative to `now`
    pub fn history_at(&self, window: HistoryWindow, now: DateTime<Utc>) -> Result<Vec<DailyRecord>> {
        self.store.query(window, now)
    }

    /// Query the history relative to the current instant
    pub fn history(&self, window: HistoryWindow) -> Result<Vec<DailyRecord>> {
        self.history_at(window, Utc::now())
    }
}

impl std::fmt::Debug for MonitorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorSession")
            .field("slot", &self.store.slot())
            .field("powered", &self.powered)
            .field("mode", &self.mode)
            .field("pending", &self.aggregator.accumulator().len())
            .field("unsaved", &self.unsaved.len())
            .finish()
    }
}
