//! Daily Aggregator
//!
//! Turns the per-tick reading stream into at most one `DailyRecord` per
//! calendar day.
//!
//! ## Flow
//!
//! ```text
//! ingest(reading, powered)
//!       │
//!       ├── powered == false ──▶ Dropped (no state change)
//!       │
//!       ├── same calendar day ──▶ Accumulated
//!       │
//!       └── new calendar day  ──▶ finalize old day ─▶ RolledOver { record }
//!                                 reset to new day
//!                                 push reading into new day
//! ```
//!
//! Calendar days are evaluated in a fixed UTC offset. If ticks stop for
//! several days, only the day being tracked produces a record; the gap is
//! reported as `skipped_days` and logged.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::domain::{DailyRecord, Reading};
use crate::state::DayAccumulator;

/// What a single `ingest` call did
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// System was off; the reading was discarded
    Dropped,
    /// Reading was added to the current day
    Accumulated,
    /// The day changed; the reading opened the new day
    RolledOver {
        /// Summary of the finished day, absent if it had no readings
        record: Option<DailyRecord>,
        /// Whole calendar days between the finished day and the new one
        skipped_days: i64,
    },
}

impl IngestOutcome {
    /// The finalized record, if this ingest produced one
    pub fn record(&self) -> Option<&DailyRecord> {
        match self {
            IngestOutcome::RolledOver { record, .. } => record.as_ref(),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<DailyRecord> {
        match self {
            IngestOutcome::RolledOver { record, .. } => record,
            _ => None,
        }
    }
}

/// Sampler/aggregator owning exactly one day accumulator
#[derive(Debug, Clone)]
pub struct DailyAggregator {
    accumulator: DayAccumulator,
    offset: FixedOffset,
}

impl DailyAggregator {
    /// Start collecting for the calendar day containing `started_at`
    pub fn new(offset: FixedOffset, started_at: DateTime<Utc>) -> Self {
        let anchor = started_at.with_timezone(&offset).date_naive();
        Self::with_accumulator(DayAccumulator::new(anchor), offset)
    }

    /// Resume from an explicit accumulator
    pub fn with_accumulator(accumulator: DayAccumulator, offset: FixedOffset) -> Self {
        Self {
            accumulator,
            offset,
        }
    }

    pub fn accumulator(&self) -> &DayAccumulator {
        &self.accumulator
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar day of an instant in this aggregator's offset
    pub fn calendar_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    /// Feed one reading
    pub fn ingest(&mut self, reading: &Reading, powered: bool) -> IngestOutcome {
        if !powered {
            return IngestOutcome::Dropped;
        }

        let date = self.calendar_date(reading.timestamp);
        let anchor = self.accumulator.anchor_date();

        if date == anchor {
            self.accumulator.push(reading);
            return IngestOutcome::Accumulated;
        }

        let record = self.accumulator.finalize(self.offset);
        let skipped_days = (date.signed_duration_since(anchor).num_days() - 1).max(0);
        let readings = self.accumulator.len();

        self.accumulator.reset(date);
        self.accumulator.push(reading);

        match &record {
            Some(record) => tracing::info!(
                day = %record.date,
                readings,
                "Day rolled over: {}",
                record
            ),
            None => tracing::debug!(day = %anchor, "Day rolled over with no readings"),
        }
        if skipped_days > 0 {
            tracing::warn!(
                from = %anchor,
                to = %date,
                skipped_days,
                "Ticks were suspended across days; intervening days have no record"
            );
        }

        IngestOutcome::RolledOver {
            record,
            skipped_days,
        }
    }

    /// Finalize the day in progress without waiting for a rollover
    ///
    /// The accumulator is emptied but keeps its anchor day.
    pub fn flush(&mut self) -> Option<DailyRecord> {
        let record = self.accumulator.finalize(self.offset);
        let anchor = self.accumulator.anchor_date();
        self.accumulator.reset(anchor);
        record
    }
}
