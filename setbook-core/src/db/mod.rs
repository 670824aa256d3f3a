pub mod backend;
pub mod file;
pub mod memory;
pub mod models;
pub mod operations;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use log::info;

pub use backend::{KvBackend, ListResult, StoredValue};
pub use file::FileBackend;
pub use memory::InMemoryBackend;

/// Namespace every workout key lives under.
pub const WORKOUT_KEY_PREFIX: &str = "workout:";

pub fn workout_key(id: &str) -> String {
    format!("{}{}", WORKOUT_KEY_PREFIX, id)
}

/// Workout records on top of a [`KvBackend`].
#[derive(Clone)]
pub struct WorkoutStore {
    backend: Arc<dyn KvBackend>,
}

impl WorkoutStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by files under `dir`.
    pub fn open_dir(dir: &Path) -> Result<Self> {
        let backend = FileBackend::new(dir)?;
        info!("Opened workout store at {}", dir.display());
        Ok(Self::new(Arc::new(backend)))
    }

    /// Non-persistent store, mostly for tests and previews.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBackend::new()))
    }
}
