//! Tokio Runtime Helpers
//!
//! The binary builds one multi-threaded runtime and blocks on it; the
//! sampling loop runs as a named task inside it.
//!
//! ```text
//! main()
//!   │
//!   ▼
//! build_runtime()?.block_on(run(...))
//!   │
//!   ▼
//! spawn_named("sampler", loop { tick })
//! ```

use std::future::Future;

use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::error::Result;

/// Build the runtime used by the monitor binary
pub fn build_runtime() -> Result<Runtime> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("rainwater-worker")
        .build()?;
    Ok(runtime)
}

/// Spawn a task on the current runtime with start/finish tracing
pub fn spawn_named<F, T>(name: &'static str, future: F) -> JoinHandle<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tracing::debug!("Spawning tokio task: {}", name);
    tokio::spawn(async move {
        let output = future.await;
        tracing::debug!("Tokio task completed: {}", name);
        output
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_named_returns_output() {
        let runtime = build_runtime().expect("runtime");
        let value = runtime.block_on(async {
            spawn_named("answer", async { 42 }).await.expect("join")
        });
        assert_eq!(value, 42);
    }
}
