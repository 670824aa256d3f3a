//! In-memory backend. Not persistent.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::backend::{KvBackend, ListResult, StoredValue};

#[derive(Default)]
pub struct InMemoryBackend {
    inner: RwLock<BTreeMap<String, String>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvBackend for InMemoryBackend {
    async fn list(&self, prefix: &str) -> Result<ListResult> {
        let map = self.inner.read().await;
        let keys = map
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect();
        Ok(ListResult { keys })
    }

    async fn get(&self, key: &str) -> Result<Option<StoredValue>> {
        let map = self.inner.read().await;
        Ok(map.get(key).map(|value| StoredValue {
            value: value.clone(),
        }))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.inner.write().await.remove(key);
        Ok(())
    }
}
