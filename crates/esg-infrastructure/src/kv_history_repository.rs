//! KeyValueStore-backed HistoryRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use esg_core::error::Result;
use esg_core::history::{HistoryEntry, HistoryRepository, allocate_ids};
use esg_core::report::ReportUnion;
use esg_core::storage::{KeyValueStore, KeyValueStoreExt, StorageNamespace};
use serde_json::Value;
use std::sync::Arc;

/// Source of the current time, replaceable in tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// History list stored newest-first as one JSON array under the user's key.
pub struct KvHistoryRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
    clock: Clock,
}

impl KvHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: &StorageNamespace) -> Self {
        Self {
            store,
            key: namespace.history_key(),
            clock: Arc::new(Utc::now),
        }
    }

    /// Overrides the clock used for ids and timestamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Stored entries as raw JSON, so entries this version cannot read are
    /// carried through rewrites untouched.
    async fn load_raw(&self) -> Result<Vec<Value>> {
        self.store.get_list(&self.key).await
    }

    /// Parses the readable entries; unreadable ones are logged and skipped.
    fn parse_entries(raw: Vec<Value>) -> Vec<HistoryEntry> {
        raw.into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let id = raw_id(&value);
                match serde_json::from_value::<HistoryEntry>(value) {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        tracing::warn!(index, ?id, error = %err, "Skipping unreadable history entry");
                        None
                    }
                }
            })
            .collect()
    }
}

fn raw_id(value: &Value) -> Option<i64> {
    value.get("id").and_then(Value::as_i64)
}

#[async_trait]
impl HistoryRepository for KvHistoryRepository {
    async fn append(&self, reports: &[ReportUnion]) -> Result<Vec<HistoryEntry>> {
        if reports.is_empty() {
            return Ok(Vec::new());
        }

        let existing = self.load_raw().await?;
        let now = (self.clock)();
        let ids = allocate_ids(
            existing.iter().filter_map(raw_id),
            now.timestamp_millis(),
            reports.len(),
        );

        let new_entries: Vec<HistoryEntry> = reports
            .iter()
            .zip(ids)
            .map(|(report, id)| HistoryEntry::from_report(report, id, now))
            .collect();

        let mut updated = Vec::with_capacity(new_entries.len() + existing.len());
        for entry in &new_entries {
            updated.push(serde_json::to_value(entry)?);
        }
        updated.extend(existing);

        // Single write: either the whole batch lands or nothing changes.
        self.store.set_list(&self.key, &updated).await?;

        tracing::info!(
            count = new_entries.len(),
            total = updated.len(),
            "Saved reports to history"
        );
        Ok(new_entries)
    }

    async fn remove(&self, id: i64) -> Result<()> {
        let existing = self.load_raw().await?;
        let before = existing.len();
        let updated: Vec<Value> = existing
            .into_iter()
            .filter(|value| raw_id(value) != Some(id))
            .collect();

        if updated.len() == before {
            tracing::debug!(id, "History entry not found, nothing to delete");
            return Ok(());
        }

        self.store.set_list(&self.key, &updated).await?;
        tracing::info!(id, "Deleted history entry");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<HistoryEntry>> {
        Ok(Self::parse_entries(self.load_raw().await?))
    }

    async fn find(&self, id: i64) -> Result<Option<HistoryEntry>> {
        Ok(self.list().await?.into_iter().find(|e| e.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;
    use chrono::TimeZone;
    use esg_core::report::{IndividualReport, IndividualReportData, OriginalMetric};
    use esg_core::score::{RawMetricData, RawMetricRecord, ScoreDocument};

    fn report(name: &str, score: f64) -> ReportUnion {
        let mut raw_input = RawMetricData::new();
        raw_input.insert(
            format!("{}_DATASET", name.to_uppercase()),
            vec![RawMetricRecord {
                standardized_value: Some(score),
                ..Default::default()
            }],
        );
        ReportUnion::Individual(IndividualReport {
            metric: name.to_string(),
            data: IndividualReportData {
                score: ScoreDocument {
                    final_adjusted: score,
                    final_value: None,
                    total_input_sum: score,
                    total_pca_sum: 0.0,
                    count_input: 1,
                    count_pca: 0,
                    raw_input,
                    raw_pca: RawMetricData::new(),
                    models_for_metrics: Vec::new(),
                },
                company: "Soitec SA".to_string(),
                industry: "Semiconductors".to_string(),
                metric_year: "2022-12-31".to_string(),
                model_uri: "esg:model_a".to_string(),
                selected_input: "A".to_string(),
                selected_pca: String::new(),
            },
            original_metric: OriginalMetric {
                unique_key: name.to_string(),
                model_uri: "esg:model_a".to_string(),
                metric_label: name.to_string(),
                categories_label: name.to_string(),
                model_name: "A".to_string(),
            },
        })
    }

    fn fixed_clock(millis: i64) -> Clock {
        Arc::new(move || Utc.timestamp_millis_opt(millis).unwrap())
    }

    fn repository(store: Arc<InMemoryKeyValueStore>, millis: i64) -> KvHistoryRepository {
        KvHistoryRepository::new(store, &StorageNamespace::guest()).with_clock(fixed_clock(millis))
    }

    #[tokio::test]
    async fn test_append_prepends_batch_in_order() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        repository(store.clone(), 1_000)
            .append(&[report("Old", 0.1)])
            .await
            .unwrap();

        let repo = repository(store, 2_000);
        repo.append(&[report("First", 0.2), report("Second", 0.4)])
            .await
            .unwrap();

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.report_name)
            .collect();
        assert_eq!(names, vec!["First", "Second", "Old"]);
    }

    #[tokio::test]
    async fn test_ids_unique_even_when_clock_stalls() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repo = repository(store, 5_000);

        repo.append(&[report("A", 0.1), report("B", 0.2)]).await.unwrap();
        repo.append(&[report("C", 0.3)]).await.unwrap();

        let mut ids: Vec<_> = repo.list().await.unwrap().into_iter().map(|e| e.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids, vec![5_000, 5_001, 5_002]);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_list_unchanged() {
        let store = Arc::new(InMemoryKeyValueStore::with_quota(2_000));
        let repo = repository(store, 1_000);
        repo.append(&[report("Kept", 0.5)]).await.unwrap();
        let before = repo.list().await.unwrap();

        let batch: Vec<_> = (0..20).map(|i| report(&format!("R{}", i), 0.1)).collect();
        let err = repo.append(&batch).await.unwrap_err();

        assert!(err.is_persistence());
        assert_eq!(repo.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_remove_and_find() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repo = repository(store, 1_000);
        let written = repo
            .append(&[report("A", 0.1), report("B", 0.2)])
            .await
            .unwrap();

        assert_eq!(repo.find(written[1].id).await.unwrap().unwrap().report_name, "B");

        repo.remove(written[0].id).await.unwrap();
        repo.remove(424242).await.unwrap();

        let remaining = repo.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].report_name, "B");
        assert!(repo.find(written[0].id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dashboard_entries_load_and_unreadable_ones_are_kept() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let key = StorageNamespace::guest().history_key();
        store
            .set(
                &key,
                serde_json::json!([
                    {
                        "id": 900,
                        "report_name": "Water",
                        "generated_at": "2024-04-25T00:00:00.000Z",
                        "parameters": {
                            "modelUri": "esg:model_water",
                            "industry": "Semiconductors",
                            "metric_year": "2022-12-31",
                            "company": "Soitec SA",
                            "selected_input": ["WATER"],
                            "selected_pca": ["SOXEMISSIONS", "CO2INDIRECTSCOPE2"],
                            "categories": "Water"
                        },
                        "result_summary": {"final_adjusted": 0.7, "final_value": null}
                    },
                    {"id": 950, "report_name": "Broken"}
                ]),
            )
            .await
            .unwrap();
        let repo = repository(store.clone(), 100);

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].parameters.selected_input, "WATER");
        assert_eq!(
            listed[0].parameters.selected_pca,
            "SOXEMISSIONS,CO2INDIRECTSCOPE2"
        );

        // Ids continue past every stored id, readable or not.
        let written = repo.append(&[report("New", 0.3)]).await.unwrap();
        assert_eq!(written[0].id, 951);

        repo.remove(900).await.unwrap();
        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.report_name)
            .collect();
        assert_eq!(names, vec!["New"]);

        let raw = store.get(&key).await.unwrap().unwrap();
        assert_eq!(raw.as_array().unwrap().len(), 2);
        assert_eq!(raw[1]["report_name"], "Broken");
    }
}
