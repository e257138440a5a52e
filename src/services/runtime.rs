//! Tokio Runtime
//!
//! Process-wide runtime for the event loop and the per-command request
//! tasks.
//!
//! ```text
//! main()
//!   │
//!   ▼
//! block_on(run(stdin, relay))
//!   │
//!   ├── spawn_named_in_tokio("command", ...)   one per command
//!   └── spawn_named_in_tokio("command", ...)
//! ```

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::error::Result;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> Result<&'static Runtime> {
    if let Some(rt) = TOKIO_RUNTIME.get() {
        return Ok(rt);
    }
    let rt = Runtime::new()?;
    Ok(TOKIO_RUNTIME.get_or_init(|| rt))
}

/// Spawn a task with a name (for debugging) on the current runtime.
///
/// Request tasks are spawned from inside the event loop, so this uses the
/// ambient runtime handle rather than the global one; tests running under
/// `#[tokio::test]` get their own runtime this way.
pub fn spawn_named_in_tokio<F>(name: &'static str, future: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::debug!("Spawning tokio task: {}", name);
    tokio::spawn(async move {
        future.await;
        tracing::debug!("Tokio task completed: {}", name);
    })
}

/// Block on a future on the global runtime
///
/// **Warning**: blocks the calling thread. Only `main` uses this.
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    Ok(get_runtime()?.block_on(future))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_on_spawned_task() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = flag.clone();

        block_on(async move {
            spawn_named_in_tokio("test", async move {
                flag_clone.store(true, Ordering::SeqCst);
            })
            .await
            .expect("join");
        })
        .expect("runtime");

        assert!(flag.load(Ordering::SeqCst));
    }
}
