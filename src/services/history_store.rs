//! History Store
//!
//! Append-only log of finalized daily records, queryable by recency window.
//! Implementations differ only in their durable medium.

use chrono::{DateTime, Utc};

use crate::domain::{DailyRecord, HistoryWindow};
use crate::error::Result;

/// Durable, queryable append log of `DailyRecord`s
pub trait HistoryStore: Send + Sync + 'static {
    /// Name of the slot backing this log
    fn slot(&self) -> &str;

    /// Append a record and persist it before returning
    ///
    /// Equal records are not deduplicated. On `PersistenceUnavailable` the
    /// stored log is left as it was.
    fn append(&self, record: &DailyRecord) -> Result<()>;

    /// Full log in stored order; empty if nothing was ever stored
    fn load(&self) -> Result<Vec<DailyRecord>>;

    /// Replace the log with an empty one
    fn reset(&self) -> Result<()>;

    /// Records whose timestamp lies within `window` of `now`, in stored order
    fn query(&self, window: HistoryWindow, now: DateTime<Utc>) -> Result<Vec<DailyRecord>> {
        let now_ms = now.timestamp_millis();
        Ok(self
            .load()?
            .into_iter()
            .filter(|record| window.contains(record, now_ms))
            .collect())
    }
}

/// Trim the oldest records so at most `max_records` remain
pub(crate) fn apply_retention(records: &mut Vec<DailyRecord>, max_records: Option<usize>) {
    if let Some(max) = max_records {
        if records.len() > max {
            let excess = records.len() - max;
            records.drain(..excess);
            tracing::debug!(dropped = excess, "History retention trimmed oldest records");
        }
    }
}

/// Aggregate view over a queried window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySummary {
    pub days: usize,
    pub mean_ph: f64,
    pub mean_turbidity: f64,
    pub mean_temperature: f64,
    pub peak_water_level: f64,
}

impl HistorySummary {
    /// Summarize a set of records; `None` when empty
    pub fn from_records(records: &[DailyRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let days = records.len();
        let n = days as f64;
        Some(Self {
            days,
            mean_ph: records.iter().map(|r| r.average_ph).sum::<f64>() / n,
            mean_turbidity: records.iter().map(|r| r.average_turbidity).sum::<f64>() / n,
            mean_temperature: records.iter().map(|r| r.average_temperature).sum::<f64>() / n,
            peak_water_level: records
                .iter()
                .map(|r| r.max_water_level)
                .fold(f64::NEG_INFINITY, f64::max),
        })
    }
}
