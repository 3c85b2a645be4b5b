//! KeyValueStore-backed ModelNameRepository.

use async_trait::async_trait;
use esg_core::error::Result;
use esg_core::score::{ModelNameRepository, ModelRef};
use esg_core::storage::{KeyValueStore, MODEL_NAME_MAPPING_KEY};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Model URI to label mapping stored as one JSON object.
pub struct KvModelNameRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvModelNameRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load(&self) -> Result<Map<String, Value>> {
        match self.store.get(MODEL_NAME_MAPPING_KEY).await? {
            Some(Value::Object(map)) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

#[async_trait]
impl ModelNameRepository for KvModelNameRepository {
    async fn record(&self, models: &[ModelRef]) -> Result<()> {
        let labelled: Vec<&ModelRef> = models
            .iter()
            .filter(|m| !m.model_uri.is_empty() && !m.model_label.is_empty())
            .collect();
        if labelled.is_empty() {
            return Ok(());
        }

        let mut mapping = self.load().await?;
        for model in labelled {
            mapping.insert(model.model_uri.clone(), Value::String(model.model_label.clone()));
        }
        self.store
            .set(MODEL_NAME_MAPPING_KEY, Value::Object(mapping))
            .await
    }

    async fn mapping(&self) -> Result<HashMap<String, String>> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter_map(|(uri, label)| label.as_str().map(|l| (uri, l.to_string())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;

    fn model(uri: &str, label: &str) -> ModelRef {
        ModelRef {
            model_uri: uri.to_string(),
            model_label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_record_merges_and_overwrites() {
        let repo = KvModelNameRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        repo.record(&[model("u1", "One"), model("u2", "Two")]).await.unwrap();
        repo.record(&[model("u1", "One v2"), model("u3", "")]).await.unwrap();

        let mapping = repo.mapping().await.unwrap();

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["u1"], "One v2");
        assert_eq!(mapping["u2"], "Two");
    }

    #[tokio::test]
    async fn test_empty_store_has_empty_mapping() {
        let repo = KvModelNameRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        assert!(repo.mapping().await.unwrap().is_empty());
    }
}
