//! HistoryWindow - Recency Filters for the History Log

use std::str::FromStr;

use crate::constants::DAY_MS;
use crate::domain::DailyRecord;
use crate::error::Error;

/// How far back a history query reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HistoryWindow {
    #[default]
    Last7Days,
    Last30Days,
    All,
}

impl HistoryWindow {
    pub const ALL_WINDOWS: [HistoryWindow; 3] = [
        HistoryWindow::Last7Days,
        HistoryWindow::Last30Days,
        HistoryWindow::All,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HistoryWindow::Last7Days => "Last 7 Days",
            HistoryWindow::Last30Days => "Last 30 Days",
            HistoryWindow::All => "All History",
        }
    }

    /// Window length in milliseconds; `None` means unbounded
    pub fn duration_ms(&self) -> Option<i64> {
        match self {
            HistoryWindow::Last7Days => Some(7 * DAY_MS),
            HistoryWindow::Last30Days => Some(30 * DAY_MS),
            HistoryWindow::All => None,
        }
    }

    /// `now - timestamp < window`; always true for `All`
    ///
    /// A record whose age overflows is outside every bounded window.
    pub fn contains(&self, record: &DailyRecord, now_ms: i64) -> bool {
        match self.duration_ms() {
            Some(window) => record.age_ms(now_ms).is_some_and(|age| age < window),
            None => true,
        }
    }
}

impl FromStr for HistoryWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7days" | "7d" | "week" => Ok(HistoryWindow::Last7Days),
            "30days" | "30d" | "month" => Ok(HistoryWindow::Last30Days),
            "all" => Ok(HistoryWindow::All),
            other => Err(Error::Invalid {
                message: format!("unknown history window '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for HistoryWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
