use std::sync::OnceLock;

use anyhow::Result;
use log::debug;
use tokio::runtime::Runtime;

static GLOBAL_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Runtime for store calls coming from foreign threads that have none.
pub fn global_runtime() -> Result<&'static Runtime> {
    if let Some(rt) = GLOBAL_RUNTIME.get() {
        return Ok(rt);
    }

    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2);
    debug!("Initializing global runtime with {} threads", threads);
    let threads = std::cmp::max(threads, 2);
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(threads)
        .enable_all()
        .build()?;

    // A concurrent caller may have won; its runtime is kept and ours dropped.
    let _ = GLOBAL_RUNTIME.set(rt);
    GLOBAL_RUNTIME
        .get()
        .ok_or_else(|| anyhow::anyhow!("global runtime missing after init"))
}
