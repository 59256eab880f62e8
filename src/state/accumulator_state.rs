//! AccumulatorState - Readings Buffered for the Day in Progress

use chrono::{FixedOffset, NaiveDate, NaiveTime};

use crate::constants::RECORD_DATE_FORMAT;
use crate::domain::{DailyRecord, Reading};

/// Per-day buffer of raw readings awaiting aggregation
///
/// The four series are only ever pushed together, so they always have the
/// same length.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAccumulator {
    ph: Vec<f64>,
    turbidity: Vec<f64>,
    temperature: Vec<f64>,
    water_level: Vec<f64>,
    anchor_date: NaiveDate,
}

impl DayAccumulator {
    /// Create an empty accumulator for the given calendar day
    pub fn new(anchor_date: NaiveDate) -> Self {
        Self {
            ph: Vec::new(),
            turbidity: Vec::new(),
            temperature: Vec::new(),
            water_level: Vec::new(),
            anchor_date,
        }
    }

    /// Calendar day this accumulator is collecting for
    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    /// Number of readings buffered
    pub fn len(&self) -> usize {
        self.ph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ph.is_empty()
    }

    /// Append one reading's values as a tuple
    pub fn push(&mut self, reading: &Reading) {
        self.ph.push(reading.ph);
        self.turbidity.push(reading.turbidity);
        self.temperature.push(reading.temperature);
        self.water_level.push(reading.water_level);
    }

    /// Drop all buffered values and start collecting for `anchor_date`
    pub fn reset(&mut self, anchor_date: NaiveDate) {
        self.ph.clear();
        self.turbidity.clear();
        self.temperature.clear();
        self.water_level.clear();
        self.anchor_date = anchor_date;
    }

    /// Summarize the buffered day; `None` when nothing was collected
    ///
    /// The record's timestamp is local midnight of the anchor day in `offset`.
    pub fn finalize(&self, offset: FixedOffset) -> Option<DailyRecord> {
        if self.is_empty() {
            return None;
        }

        let midnight = self.anchor_date.and_time(NaiveTime::MIN);
        let timestamp = midnight.and_utc().timestamp_millis()
            - i64::from(offset.local_minus_utc()) * 1000;

        Some(DailyRecord {
            timestamp,
            date: self.anchor_date.format(RECORD_DATE_FORMAT).to_string(),
            average_ph: mean(&self.ph),
            average_turbidity: mean(&self.turbidity),
            average_temperature: mean(&self.temperature),
            max_water_level: self
                .water_level
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_empty_accumulator_finalizes_to_nothing() {
        let acc = DayAccumulator::new(date(2024, 1, 1));
        assert!(acc.finalize(FixedOffset::east_opt(0).expect("offset")).is_none());
    }

    #[test]
    fn test_finalize_means_and_max() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).single().expect("time");
        let mut acc = DayAccumulator::new(date(2024, 1, 1));
        acc.push(&Reading::new(6.0, 2.0, 18.0, 40.0, at));
        acc.push(&Reading::new(8.0, 6.0, 22.0, 90.0, at));
        acc.push(&Reading::new(7.0, 4.0, 20.0, 65.0, at));

        let utc = FixedOffset::east_opt(0).expect("offset");
        let record = acc.finalize(utc).expect("record");
        assert!((record.average_ph - 7.0).abs() < 1e-9);
        assert!((record.average_turbidity - 4.0).abs() < 1e-9);
        assert!((record.average_temperature - 20.0).abs() < 1e-9);
        assert_eq!(record.max_water_level, 90.0);
        assert_eq!(record.timestamp, 1_704_067_200_000);
        assert_eq!(record.date, "Jan 01, 2024");
    }

    #[test]
    fn test_finalize_timestamp_honors_offset() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).single().expect("time");
        let mut acc = DayAccumulator::new(date(2024, 1, 1));
        acc.push(&Reading::new(7.0, 4.0, 20.0, 70.0, at));

        let plus_two = FixedOffset::east_opt(2 * 3600).expect("offset");
        let record = acc.finalize(plus_two).expect("record");
        assert_eq!(record.timestamp, 1_704_067_200_000 - 2 * 3600 * 1000);
    }

    #[test]
    fn test_reset_clears_series() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).single().expect("time");
        let mut acc = DayAccumulator::new(date(2024, 1, 1));
        acc.push(&Reading::new(7.0, 4.0, 20.0, 70.0, at));
        acc.reset(date(2024, 1, 2));
        assert!(acc.is_empty());
        assert_eq!(acc.anchor_date(), date(2024, 1, 2));
    }
}
