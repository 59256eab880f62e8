//! Rainwater Monitor - Main Entry Point
//!
//! Runs a headless monitoring session against the simulated sensors until
//! Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use rainwater_monitor::domain::{AppConfig, HistoryWindow, StatusSummary, SystemState};
use rainwater_monitor::helpers::get_or_create_data_dir;
use rainwater_monitor::sensors::RandomWalkSimulator;
use rainwater_monitor::services::scheduler::{self, SchedulerConfig};
use rainwater_monitor::services::{
    HistoryStore, JsonFileStore, MonitorEvent, MonitorSession, build_runtime,
};
use rainwater_monitor::utils::config_store::{config_path, load_config};
use rainwater_monitor::utils::format::{
    format_reading, format_record_row, format_status, format_valves, format_window_summary,
    record_table_header,
};
use rainwater_monitor::logging;

fn main() -> anyhow::Result<()> {
    let path = config_path().context("resolving config path")?;
    let config = load_config(&path)
        .with_context(|| format!("loading config from {}", path.display()))?;

    let _log_guard = logging::init(&config.logging)?;
    tracing::info!(config = %path.display(), "Starting rainwater monitor...");

    let runtime = build_runtime()?;
    runtime.block_on(run(config))
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let dir = match &config.history.directory {
        Some(dir) => dir.clone(),
        None => get_or_create_data_dir()?,
    };
    let store = Arc::new(
        JsonFileStore::open(&dir, config.history.slot.clone())?
            .with_max_records(config.history.max_records),
    );

    match store.load() {
        Ok(all) => {
            let now = Utc::now().timestamp_millis();
            for window in HistoryWindow::ALL_WINDOWS {
                let records: Vec<_> = all
                    .iter()
                    .filter(|r| window.contains(r, now))
                    .cloned()
                    .collect();
                tracing::info!("{}", format_window_summary(window, &records));
            }

            let week: Vec<_> = all
                .iter()
                .filter(|r| HistoryWindow::Last7Days.contains(r, now))
                .collect();
            if !week.is_empty() {
                tracing::info!("{}", record_table_header());
                for record in week {
                    tracing::info!("{}", format_record_row(record));
                }
            }
        }
        Err(e) if e.is_corrupt_history() => {
            // Leave the file alone; appends will keep failing until an operator resets it
            tracing::error!(path = %store.path().display(), error = %e, "History log is unreadable");
        }
        Err(e) => return Err(e.into()),
    }

    let mut session = MonitorSession::from_config(&config, store, Utc::now());
    tracing::info!("Valves: {}", format_valves(session.valves()));

    let events = session.subscribe();
    std::thread::Builder::new()
        .name("monitor-events".to_string())
        .spawn(move || {
            let mut last_state: Option<Option<SystemState>> = None;
            for event in events {
                match event {
                    MonitorEvent::Reading { reading, accepted } => {
                        tracing::debug!(accepted, "{}", format_reading(&reading));
                        let status = StatusSummary::from_reading(&reading, accepted);
                        if last_state != Some(status.state) {
                            last_state = Some(status.state);
                            tracing::info!("{}", format_status(&status));
                        }
                    }
                    MonitorEvent::RecordUnsaved { record, error } => {
                        tracing::warn!(day = %record.date, %error, "Daily record awaiting retry");
                    }
                    other => tracing::debug!(?other, "Monitor event"),
                }
            }
        })?;

    let simulator = RandomWalkSimulator::new(&config.simulator);
    let handle = scheduler::spawn(
        session,
        simulator,
        SchedulerConfig::from_sampling(&config.sampling),
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");

    let session = handle.stop().await?;
    let unsaved = session.unsaved().count();
    if unsaved > 0 {
        tracing::warn!(unsaved, "Exiting with daily records that were never saved");
    }
    Ok(())
}
