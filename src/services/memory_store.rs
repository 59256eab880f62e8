//! In-Memory History Store
//!
//! Same contract as the file store, kept in process memory. Writes can be
//! made to fail on demand to exercise `PersistenceUnavailable` handling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::DailyRecord;
use crate::error::{Error, Result};
use crate::services::history_store::{HistoryStore, apply_retention};

/// History log held in memory
#[derive(Debug)]
pub struct MemoryStore {
    slot: String,
    records: Mutex<Vec<DailyRecord>>,
    max_records: Option<usize>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new(slot: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            records: Mutex::new(Vec::new()),
            max_records: None,
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Start from an existing log
    pub fn with_records(slot: impl Into<String>, records: Vec<DailyRecord>) -> Self {
        let store = Self::new(slot);
        *store.records.lock().unwrap_or_else(PoisonError::into_inner) = records;
        store
    }

    pub fn with_max_records(mut self, max_records: Option<usize>) -> Self {
        self.max_records = max_records;
        self
    }

    /// Make subsequent writes fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::PersistenceUnavailable {
                slot: self.slot.clone(),
                source: std::io::Error::other("storage quota exceeded"),
            });
        }
        Ok(())
    }
}

impl HistoryStore for MemoryStore {
    fn slot(&self) -> &str {
        &self.slot
    }

    fn append(&self, record: &DailyRecord) -> Result<()> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        self.check_writable()?;
        records.push(record.clone());
        apply_retention(&mut records, self.max_records);
        Ok(())
    }

    fn load(&self) -> Result<Vec<DailyRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn reset(&self) -> Result<()> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        self.check_writable()?;
        records.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DAY_MS;
    use crate::domain::HistoryWindow;
    use chrono::{DateTime, Utc};

    fn record(timestamp: i64) -> DailyRecord {
        DailyRecord {
            timestamp,
            date: format!("day {timestamp}"),
            average_ph: 7.0,
            average_turbidity: 4.0,
            average_temperature: 20.0,
            max_water_level: 70.0,
        }
    }

    #[test]
    fn test_load_empty() {
        let store = MemoryStore::new("history");
        assert!(store.load().expect("load").is_empty());
    }

    #[test]
    fn test_append_does_not_deduplicate() {
        let store = MemoryStore::new("history");
        store.append(&record(1)).expect("append");
        store.append(&record(1)).expect("append");
        assert_eq!(store.load().expect("load").len(), 2);
    }

    #[test]
    fn test_failed_append_leaves_log_untouched() {
        let store = MemoryStore::new("history");
        store.append(&record(1)).expect("append");

        store.set_fail_writes(true);
        let err = store.append(&record(2)).expect_err("append must fail");
        assert!(err.is_persistence_unavailable());

        assert_eq!(store.load().expect("load"), vec![record(1)]);
    }

    #[test]
    fn test_query_windows_nest() {
        let now_ms = 400 * DAY_MS;
        let records: Vec<_> = [1, 5, 8, 20, 29, 31, 90]
            .iter()
            .map(|days_ago| record(now_ms - days_ago * DAY_MS))
            .collect();
        let store = MemoryStore::with_records("history", records);
        let now = DateTime::<Utc>::from_timestamp_millis(now_ms).expect("now");

        let week = store.query(HistoryWindow::Last7Days, now).expect("query");
        let month = store.query(HistoryWindow::Last30Days, now).expect("query");
        let all = store.query(HistoryWindow::All, now).expect("query");

        assert_eq!(week.len(), 2);
        assert_eq!(month.len(), 5);
        assert_eq!(all, store.load().expect("load"));
        assert!(week.iter().all(|r| month.contains(r)));
        assert!(month.iter().all(|r| all.contains(r)));
    }

    #[test]
    fn test_retention_cap() {
        let store = MemoryStore::new("history").with_max_records(Some(2));
        for ts in 0..4 {
            store.append(&record(ts)).expect("append");
        }
        assert_eq!(store.load().expect("load"), vec![record(2), record(3)]);
    }
}
