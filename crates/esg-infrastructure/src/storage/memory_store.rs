//! In-memory KeyValueStore.

use async_trait::async_trait;
use esg_core::error::{EsgError, Result};
use esg_core::storage::KeyValueStore;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// KeyValueStore held in process memory.
///
/// An optional byte quota mirrors the browser storage limit: a `set` that would
/// push the serialized total over the quota fails with `Persistence` and leaves
/// the previous value in place.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
    quota_bytes: Option<usize>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes beyond `quota_bytes` of serialized JSON.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn serialized_len(key: &str, value: &Value) -> usize {
    key.len() + value.to_string().len()
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut entries = self.entries.write().await;

        if let Some(quota) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| serialized_len(k, v))
                .sum();
            let total = others + serialized_len(key, &value);
            if total > quota {
                tracing::warn!(key, total, quota, "In-memory store quota exceeded");
                return Err(EsgError::persistence(format!(
                    "storage quota exceeded writing '{}' ({} > {} bytes)",
                    key, total, quota
                )));
            }
        }

        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
