//! Sampling Scheduler
//!
//! One cancellable periodic task drives the session: every interval it
//! samples the sensor source and feeds the reading to `MonitorSession::tick`.
//! Operator commands arrive on a channel and are applied between ticks, so
//! the session is only ever touched by this task.
//!
//! Work that may reach the history store (ticks, retries, the shutdown flush)
//! moves the session onto the blocking pool with `spawn_blocking` and takes it
//! back when done; file appends never run on a runtime worker.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::{ControlMode, SamplingConfig, Valve};
use crate::error::{Error, Result};
use crate::sensors::SensorSource;
use crate::services::{MonitorSession, spawn_named};

/// Source of the instant stamped on each reading
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Operator commands applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    SetPowered(bool),
    SetMode(ControlMode),
    SetValve { valve: Valve, open: bool },
    /// Re-append records whose earlier append failed
    RetryUnsaved,
}

/// Scheduler settings
#[derive(Clone)]
pub struct SchedulerConfig {
    pub interval: Duration,
    pub flush_on_shutdown: bool,
    pub clock: Clock,
}

impl SchedulerConfig {
    pub fn from_sampling(sampling: &SamplingConfig) -> Self {
        Self {
            interval: sampling.interval(),
            flush_on_shutdown: sampling.flush_on_shutdown,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

impl std::fmt::Debug for SchedulerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerConfig")
            .field("interval", &self.interval)
            .field("flush_on_shutdown", &self.flush_on_shutdown)
            .finish()
    }
}

/// Handle to a running sampling loop
#[derive(Debug)]
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    commands: mpsc::UnboundedSender<SessionCommand>,
    task: JoinHandle<MonitorSession>,
}

impl SchedulerHandle {
    /// Queue an operator command for the next loop iteration
    pub fn send(&self, command: SessionCommand) -> Result<()> {
        self.commands.send(command).map_err(|e| Error::ChannelSend {
            message: e.to_string(),
        })
    }

    /// Stop the loop, apply the shutdown policy and hand the session back
    pub async fn stop(self) -> Result<MonitorSession> {
        let _ = self.shutdown.send(true);
        self.task.await.map_err(|e| Error::Invalid {
            message: format!("sampling task failed: {e}"),
        })
    }
}

/// Start the sampling loop on the current tokio runtime
pub fn spawn<S: SensorSource>(
    mut session: MonitorSession,
    mut source: S,
    config: SchedulerConfig,
) -> SchedulerHandle {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let (command_tx, mut command_rx) = mpsc::unbounded_channel();

    let task = spawn_named("sampler", async move {
        let mut ticker = tokio::time::interval(config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!(interval_ms = config.interval.as_millis() as u64, "Sampling started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let reading = source.sample((config.clock)());
                    (session, _) = with_session_blocking(session, move |s| s.tick(reading)).await;
                }
                Some(command) = command_rx.recv() => {
                    session = apply_command(session, command).await;
                }
                _ = shutdown_rx.changed() => {
                    break;
                }
            }
        }

        let flush = config.flush_on_shutdown;
        let (session, flushed) = with_session_blocking(session, move |s| s.shutdown(flush)).await;
        if let Some(record) = flushed {
            tracing::info!(day = %record.date, "Flushed unfinished day on shutdown");
        }
        tracing::info!("Sampling stopped");
        session
    });

    SchedulerHandle {
        shutdown: shutdown_tx,
        commands: command_tx,
        task,
    }
}

/// Run `f` against the session on the blocking pool and hand both back
async fn with_session_blocking<F, R>(session: MonitorSession, f: F) -> (MonitorSession, R)
where
    F: FnOnce(&mut MonitorSession) -> R + Send + 'static,
    R: Send + 'static,
{
    let joined = tokio::task::spawn_blocking(move || {
        let mut session = session;
        let out = f(&mut session);
        (session, out)
    })
    .await;

    match joined {
        Ok(done) => done,
        Err(e) => match e.try_into_panic() {
            Ok(payload) => std::panic::resume_unwind(payload),
            // Cancellation only happens while the runtime shuts down, which drops this task too
            Err(e) => unreachable!("blocking session work was cancelled: {e}"),
        },
    }
}

async fn apply_command(mut session: MonitorSession, command: SessionCommand) -> MonitorSession {
    match command {
        SessionCommand::SetPowered(powered) => session.set_powered(powered),
        SessionCommand::SetMode(mode) => session.set_mode(mode),
        SessionCommand::SetValve { valve, open } => {
            session.set_valve(valve, open);
        }
        SessionCommand::RetryUnsaved => {
            let (returned, retried) =
                with_session_blocking(session, |s| s.retry_unsaved()).await;
            match retried {
                Ok(saved) => tracing::info!(saved, "Retried unsaved records"),
                Err(e) => tracing::warn!(error = %e, "Retry of unsaved records failed"),
            }
            return returned;
        }
    }
    session
}
