//! Format - Formatting Utilities

use crate::domain::{DailyRecord, HistoryWindow, Reading, StatusSummary, Valve, ValveBank};
use crate::services::HistorySummary;

/// One-line view of a live reading
pub fn format_reading(reading: &Reading) -> String {
    format!(
        "pH {:.1} | turbidity {:.1} NTU | level {}% | temp {:.1}°C",
        reading.ph,
        reading.turbidity,
        reading.water_level.round(),
        reading.temperature
    )
}

/// Headline, description and alert for a status snapshot
pub fn format_status(status: &StatusSummary) -> String {
    match status.state {
        Some(state) => format!(
            "{}: {} ({})",
            state.label(),
            state.description(),
            state.alert()
        ),
        None => status.headline().to_string(),
    }
}

/// Open/closed state of every valve
pub fn format_valves(bank: &ValveBank) -> String {
    Valve::ALL
        .iter()
        .map(|&valve| {
            let state = if bank.is_open(valve) { "open" } else { "closed" };
            format!("{} {state}", valve.label())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Table row for one daily record
pub fn format_record_row(record: &DailyRecord) -> String {
    format!(
        "{:<14}{:>8.2}{:>12.2}{:>10.1}{:>10.0}%",
        record.date,
        record.average_ph,
        record.average_turbidity,
        record.average_temperature,
        record.max_water_level
    )
}

/// Header line matching `format_record_row`
pub fn record_table_header() -> String {
    format!(
        "{:<14}{:>8}{:>12}{:>10}{:>11}",
        "Date", "pH", "Turbidity", "Temp", "Max level"
    )
}

/// Summary line for a history window
pub fn format_window_summary(window: HistoryWindow, records: &[DailyRecord]) -> String {
    match HistorySummary::from_records(records) {
        Some(s) => format!(
            "{}: {} day(s), mean pH {:.2}, mean turbidity {:.2} NTU, mean temp {:.1}°C, peak level {:.0}%",
            window.label(),
            s.days,
            s.mean_ph,
            s.mean_turbidity,
            s.mean_temperature,
            s.peak_water_level
        ),
        None => format!(
            "{}: No historical data available for this time period.",
            window.label()
        ),
    }
}
