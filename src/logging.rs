//! Logging Setup
//!
//! Console logging through `tracing-subscriber`, filtered by `RUST_LOG` or
//! the configured level, plus an optional daily-rolling file in the data
//! directory.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::domain::LoggingConfig;
use crate::error::{Error, Result};
use crate::helpers::get_or_create_log_dir;

/// File name prefix of the rolling log
pub const LOG_FILE_PREFIX: &str = "rainwater-monitor.log";

/// Build the filter: `RUST_LOG` wins over the configured level
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber
///
/// Keep the returned guard alive for as long as file logging should flush.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = if config.file {
        let dir = get_or_create_log_dir()?;
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_ansi(false)
            .with_timer(LocalTime::rfc_3339())
            .with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt::layer().with_timer(LocalTime::rfc_3339()))
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Invalid {
            message: format!("logging already initialized: {e}"),
        })?;

    Ok(guard)
}
