//! KeyValueStore-backed SelectionRepository.

use async_trait::async_trait;
use esg_core::error::Result;
use esg_core::selection::model::{upsert, without};
use esg_core::selection::{MetricSelection, SelectionRepository};
use esg_core::storage::{KeyValueStore, KeyValueStoreExt, StorageNamespace};
use std::sync::Arc;

/// Selection working set stored as one JSON list under the user's key.
pub struct KvSelectionRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KvSelectionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: &StorageNamespace) -> Self {
        Self {
            store,
            key: namespace.selection_key(),
        }
    }
}

#[async_trait]
impl SelectionRepository for KvSelectionRepository {
    async fn add(&self, selection: MetricSelection) -> Result<Vec<MetricSelection>> {
        let selection = selection.normalized();
        let current: Vec<MetricSelection> = self.store.get_list(&self.key).await?;
        let replacing = current.iter().any(|s| s.unique_key == selection.unique_key);
        let unique_key = selection.unique_key.clone();

        let updated = upsert(current, selection);
        self.store.set_list(&self.key, &updated).await?;

        if replacing {
            tracing::info!(unique_key = %unique_key, "Metric updated in report");
        } else {
            tracing::info!(unique_key = %unique_key, "Metric added to report");
        }
        Ok(updated)
    }

    async fn remove(&self, unique_key: &str) -> Result<Vec<MetricSelection>> {
        let current: Vec<MetricSelection> = self.store.get_list(&self.key).await?;
        let before = current.len();
        let updated = without(current, unique_key);

        if updated.len() == before {
            tracing::debug!(unique_key, "Metric not in report, nothing to remove");
            return Ok(updated);
        }

        self.store.set_list(&self.key, &updated).await?;
        tracing::info!(unique_key, "Metric removed from report");
        Ok(updated)
    }

    async fn list(&self) -> Result<Vec<MetricSelection>> {
        self.store.get_list(&self.key).await
    }

    async fn clear(&self) -> Result<()> {
        self.store.delete(&self.key).await?;
        tracing::info!(key = %self.key, "Cleared all metrics from report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;

    fn selection(key: &str, label: &str) -> MetricSelection {
        MetricSelection {
            unique_key: key.to_string(),
            metric_label: label.to_string(),
            categories_label: label.to_string(),
            categories_uri: String::new(),
            model_uri: "esg:model_a".to_string(),
            industry: "Semiconductors".to_string(),
            metric_year: "2022-12-31".to_string(),
            company: "Soitec SA".to_string(),
            selected_input: "CO2DIRECTSCOPE1".to_string(),
            selected_pca: String::new(),
            model_label: None,
        }
    }

    fn repository() -> (KvSelectionRepository, Arc<InMemoryKeyValueStore>) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repo = KvSelectionRepository::new(store.clone(), &StorageNamespace::new(Some("alice")));
        (repo, store)
    }

    #[tokio::test]
    async fn test_add_then_list_preserves_order() {
        let (repo, _) = repository();
        repo.add(selection("a", "Water")).await.unwrap();
        repo.add(selection("b", "Energy")).await.unwrap();

        let keys: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.unique_key)
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_add_existing_key_overwrites() {
        let (repo, _) = repository();
        repo.add(selection("a", "Water")).await.unwrap();
        repo.add(selection("b", "Energy")).await.unwrap();

        let list = repo.add(selection("a", "Water v2")).await.unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].metric_label, "Water v2");
    }

    #[tokio::test]
    async fn test_remove_absent_key_returns_unchanged_list() {
        let (repo, _) = repository();
        repo.add(selection("a", "Water")).await.unwrap();
        let before = repo.list().await.unwrap();

        let after = repo.remove("zzz").await.unwrap();

        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_clear_and_user_isolation() {
        let (repo, store) = repository();
        repo.add(selection("a", "Water")).await.unwrap();

        let guest = KvSelectionRepository::new(store.clone(), &StorageNamespace::guest());
        assert!(guest.list().await.unwrap().is_empty());

        repo.clear().await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
        assert!(store.get("report_metrics_alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_applies_label_defaults() {
        let (repo, _) = repository();
        let mut s = selection("a", "");
        s.categories_label = String::new();

        let list = repo.add(s).await.unwrap();

        assert_eq!(list[0].metric_label, "Unnamed Metric");
        assert_eq!(list[0].categories_label, "Unnamed Category");
    }
}
