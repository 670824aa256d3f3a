use anyhow::Result;
use async_trait::async_trait;

/// Keys found under a prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListResult {
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    pub value: String,
}

/// String-keyed persistence the workout store is built on.
///
/// Each call is atomic for its key. No ordering is promised for `list`.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// All keys starting with `prefix`.
    async fn list(&self, prefix: &str) -> Result<ListResult>;

    /// Value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<StoredValue>>;

    /// Create or overwrite `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;
}
