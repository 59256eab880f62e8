//! JSON File History Store
//!
//! Keeps the whole log as one JSON array in `<dir>/<slot>.json`.
//!
//! Appends are a read-modify-write under a mutex. The new array is written
//! to `<slot>.json.tmp` and renamed over the slot, so a failed write never
//! leaves a half-written log behind. `reset` stages the empty log the same
//! way before it rotates the old file to `<slot>.json.bak`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use snafu::ResultExt;

use crate::domain::DailyRecord;
use crate::error::{CorruptHistorySnafu, PersistenceUnavailableSnafu, Result};
use crate::services::history_store::{HistoryStore, apply_retention};

/// History log persisted as a JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    slot: String,
    path: PathBuf,
    max_records: Option<usize>,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (or prepare) the slot file inside `dir`, creating `dir` if needed
    pub fn open(dir: impl AsRef<Path>, slot: impl Into<String>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let slot = slot.into();
        let path = dir.join(format!("{slot}.json"));
        tracing::debug!(path = %path.display(), "Opened history slot");

        Ok(Self {
            slot,
            path,
            max_records: None,
            write_lock: Mutex::new(()),
        })
    }

    pub fn with_max_records(mut self, max_records: Option<usize>) -> Self {
        self.max_records = max_records;
        self
    }

    /// Location of the slot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_log(&self) -> Result<Vec<DailyRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        // Bytes, not a String: invalid UTF-8 is unparsable content
        let bytes = fs::read(&self.path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).context(CorruptHistorySnafu {
            slot: self.slot.clone(),
        })
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bak")
    }

    /// Write `records` to the temp file and sync it
    fn stage(&self, records: &[DailyRecord]) -> Result<PathBuf> {
        let content = serde_json::to_string(records)?;
        let tmp_path = self.tmp_path();

        let staged = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()
        })();

        self.cleanup_on_err(staged, &tmp_path)?;
        Ok(tmp_path)
    }

    /// Move a staged temp file over the slot
    fn commit(&self, tmp_path: &Path) -> Result<()> {
        let renamed = fs::rename(tmp_path, &self.path);
        self.cleanup_on_err(renamed, tmp_path)
    }

    fn cleanup_on_err(&self, result: std::io::Result<()>, tmp_path: &Path) -> Result<()> {
        if result.is_err() {
            let _ = fs::remove_file(tmp_path);
        }
        result.context(PersistenceUnavailableSnafu {
            slot: self.slot.clone(),
        })
    }

    fn write_log(&self, records: &[DailyRecord]) -> Result<()> {
        let tmp_path = self.stage(records)?;
        self.commit(&tmp_path)
    }
}

impl HistoryStore for JsonFileStore {
    fn slot(&self) -> &str {
        &self.slot
    }

    fn append(&self, record: &DailyRecord) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut records = self.read_log()?;
        records.push(record.clone());
        apply_retention(&mut records, self.max_records);
        self.write_log(&records)?;

        tracing::debug!(slot = %self.slot, total = records.len(), "Appended daily record");
        Ok(())
    }

    fn load(&self) -> Result<Vec<DailyRecord>> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read_log()
    }

    fn reset(&self) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // The empty log must be on disk before the old one is moved away
        let tmp_path = self.stage(&[])?;

        if self.path.exists() {
            let backup = self.backup_path();
            self.cleanup_on_err(fs::rename(&self.path, &backup), &tmp_path)?;
            tracing::warn!(backup = %backup.display(), "History slot reset; previous log kept as backup");
        }

        self.commit(&tmp_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DAY_MS;
    use crate::domain::HistoryWindow;
    use chrono::{DateTime, Utc};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn record(timestamp: i64, date: &str) -> DailyRecord {
        DailyRecord {
            timestamp,
            date: date.to_string(),
            average_ph: 7.2,
            average_turbidity: 4.2,
            average_temperature: 21.0,
            max_water_level: 74.0,
        }
    }

    #[test]
    fn test_first_run_loads_empty() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path(), "waterSystemHistory").expect("open");
        assert!(store.load().expect("load").is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_and_reopen() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path(), "waterSystemHistory").expect("open");
        store.append(&record(1_704_067_200_000, "Jan 01, 2024")).expect("append");
        store.append(&record(1_704_153_600_000, "Jan 02, 2024")).expect("append");

        let reopened = JsonFileStore::open(dir.path(), "waterSystemHistory").expect("open");
        let records = reopened.load().expect("load");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "Jan 01, 2024");
        assert_eq!(records[1].date, "Jan 02, 2024");
    }

    #[test]
    fn test_file_is_plain_json_array() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path(), "history").expect("open");
        store.append(&record(1_704_067_200_000, "Jan 01, 2024")).expect("append");

        let raw = fs::read_to_string(store.path()).expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        let first = &value.as_array().expect("array")[0];
        assert_eq!(first["timestamp"], 1_704_067_200_000_i64);
        assert_eq!(first["averagePh"], 7.2);
        assert_eq!(first["maxWaterLevel"], 74.0);
    }

    #[test]
    fn test_corrupt_log_is_reported() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path(), "history").expect("open");
        fs::write(store.path(), "{not json").expect("write");

        let err = store.load().expect_err("load must fail");
        assert!(err.is_corrupt_history());

        // Appending must not clobber the unreadable log
        let err = store.append(&record(1, "x")).expect_err("append must fail");
        assert!(err.is_corrupt_history());
        assert_eq!(fs::read_to_string(store.path()).expect("read"), "{not json");
    }

    #[test]
    fn test_non_utf8_log_is_corrupt() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path(), "history").expect("open");
        fs::write(store.path(), [0xff, 0xfe, 0x00, 0x5b]).expect("write");

        let err = store.load().expect_err("load must fail");
        assert!(err.is_corrupt_history());

        let err = store
            .query(HistoryWindow::All, Utc::now())
            .expect_err("query must fail");
        assert!(err.is_corrupt_history());
    }

    #[test]
    fn test_whitespace_log_is_empty() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path(), "history").expect("open");
        fs::write(store.path(), " \n\t").expect("write");
        assert!(store.load().expect("load").is_empty());
    }

    #[test]
    fn test_extreme_timestamps_do_not_break_query() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path(), "history").expect("open");
        fs::write(
            store.path(),
            r#"[{"timestamp":-9223372036854775808,"date":"min","averagePh":7.0,"averageTurbidity":4.0,"averageTemperature":20.0,"maxWaterLevel":70.0},
                {"timestamp":9223372036854775807,"date":"max","averagePh":7.0,"averageTurbidity":4.0,"averageTemperature":20.0,"maxWaterLevel":70.0}]"#,
        )
        .expect("write");

        assert_eq!(store.load().expect("load").len(), 2);
        let week = store.query(HistoryWindow::Last7Days, Utc::now()).expect("query");
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].date, "max");
        assert_eq!(store.query(HistoryWindow::All, Utc::now()).expect("query").len(), 2);
    }

    #[test]
    fn test_reset_recovers_from_corruption() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path(), "history").expect("open");
        fs::write(store.path(), "[{]").expect("write");

        store.reset().expect("reset");
        assert!(store.load().expect("load").is_empty());
        assert!(store.path().with_extension("json.bak").exists());

        store.append(&record(1, "x")).expect("append");
        assert_eq!(store.load().expect("load").len(), 1);
    }

    #[test]
    fn test_failed_reset_keeps_existing_slot() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path(), "history").expect("open");
        store.append(&record(1, "kept")).expect("append");

        fs::create_dir(store.path().with_extension("json.tmp")).expect("mkdir");

        let err = store.reset().expect_err("reset must fail");
        assert!(err.is_persistence_unavailable());
        assert!(!store.path().with_extension("json.bak").exists());
        assert_eq!(store.load().expect("load"), vec![record(1, "kept")]);
    }

    #[test]
    fn test_unwritable_medium_leaves_log_intact() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path(), "history").expect("open");
        store.append(&record(1, "first")).expect("append");

        // A directory squatting on the temp path makes the write fail
        fs::create_dir(store.path().with_extension("json.tmp")).expect("mkdir");

        let err = store.append(&record(2, "second")).expect_err("append must fail");
        assert!(err.is_persistence_unavailable());
        assert_eq!(store.load().expect("load"), vec![record(1, "first")]);
    }

    #[test]
    fn test_query_last_seven_days() {
        let dir = tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path(), "history").expect("open");
        let now_ms = 1_000 * DAY_MS;
        store.append(&record(now_ms - 10 * DAY_MS, "old")).expect("append");
        store.append(&record(now_ms - 2 * DAY_MS, "recent")).expect("append");

        let now = DateTime::<Utc>::from_timestamp_millis(now_ms).expect("now");
        let week = store.query(HistoryWindow::Last7Days, now).expect("query");
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].date, "recent");
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let dir = tempdir().expect("tempdir");
        let store = Arc::new(JsonFileStore::open(dir.path(), "history").expect("open"));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for j in 0..5 {
                        store
                            .append(&record(i * 100 + j, "concurrent"))
                            .expect("append");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("join");
        }

        assert_eq!(store.load().expect("load").len(), 40);
    }
}
