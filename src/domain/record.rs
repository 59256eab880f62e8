//! DailyRecord - Finalized Per-Day Aggregate
//!
//! Persisted as one element of the history JSON array:
//!
//! ```json
//! {"timestamp":1704067200000,"date":"Jan 01, 2024","averagePh":7.2,
//!  "averageTurbidity":4.2,"averageTemperature":21.0,"maxWaterLevel":74.0}
//! ```

use serde::{Deserialize, Serialize};

/// Immutable summary of one calendar day of readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Start of the day, epoch milliseconds
    pub timestamp: i64,
    /// Human-readable calendar label ("Jan 01, 2024")
    pub date: String,
    /// Mean pH over the day's powered-on readings
    pub average_ph: f64,
    /// Mean turbidity (NTU)
    pub average_turbidity: f64,
    /// Mean temperature (°C)
    pub average_temperature: f64,
    /// Highest water level seen (percent)
    pub max_water_level: f64,
}

impl DailyRecord {
    /// Age of the record at `now_ms`; `None` if it does not fit in an `i64`
    pub fn age_ms(&self, now_ms: i64) -> Option<i64> {
        now_ms.checked_sub(self.timestamp)
    }
}

impl std::fmt::Display for DailyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: pH {:.2}, turbidity {:.2} NTU, temp {:.1}°C, max level {:.0}%",
            self.date,
            self.average_ph,
            self.average_turbidity,
            self.average_temperature,
            self.max_water_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_field_names() {
        let record = DailyRecord {
            timestamp: 1_704_067_200_000,
            date: "Jan 01, 2024".to_string(),
            average_ph: 7.2,
            average_turbidity: 4.2,
            average_temperature: 21.0,
            max_water_level: 74.0,
        };

        let value = serde_json::to_value(&record).expect("serialize");
        let obj = value.as_object().expect("object");
        for key in [
            "timestamp",
            "date",
            "averagePh",
            "averageTurbidity",
            "averageTemperature",
            "maxWaterLevel",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj.len(), 6);
        assert!(obj["timestamp"].is_i64());
    }

    #[test]
    fn test_age_of_out_of_range_timestamp() {
        let mut record: DailyRecord = serde_json::from_str(
            r#"{"timestamp":-9223372036854775808,"date":"","averagePh":7.0,
            "averageTurbidity":1.0,"averageTemperature":20.0,"maxWaterLevel":50.0}"#,
        )
        .expect("parse");
        assert_eq!(record.age_ms(1_000), None);

        record.timestamp = 400;
        assert_eq!(record.age_ms(1_000), Some(600));
        record.timestamp = i64::MAX;
        assert_eq!(record.age_ms(-2), None);
    }

    #[test]
    fn test_record_ignores_unknown_fields() {
        let json = r#"{"timestamp":1,"date":"Jan 01, 1970","averagePh":7.0,
            "averageTurbidity":1.0,"averageTemperature":20.0,"maxWaterLevel":50.0,
            "minWaterLevel":10.0}"#;
        let record: DailyRecord = serde_json::from_str(json).expect("parse");
        assert_eq!(record.max_water_level, 50.0);
    }
}
