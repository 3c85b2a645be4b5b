//! ReportService - the generate and view use cases.
//!
//! Wires the selection working set, the composer, the history store and the
//! reconstructor behind one facade used by the CLI.

use std::sync::Arc;

use esg_core::error::{EsgError, Result};
use esg_core::history::{HistoryEntry, HistoryRepository};
use esg_core::report::ReportView;
use esg_core::score::ModelNameRepository;
use esg_core::selection::{MetricSelection, SelectionRepository};
use serde_json::Value;

use crate::composer::{GeneratedReport, ReportComposer};
use crate::reconstructor::ReportReconstructor;

pub struct ReportService {
    selections: Arc<dyn SelectionRepository>,
    history: Arc<dyn HistoryRepository>,
    composer: ReportComposer,
    model_names: Option<Arc<dyn ModelNameRepository>>,
}

impl ReportService {
    pub fn new(
        selections: Arc<dyn SelectionRepository>,
        history: Arc<dyn HistoryRepository>,
        composer: ReportComposer,
    ) -> Self {
        Self {
            selections,
            history,
            composer,
            model_names: None,
        }
    }

    /// Resolves missing model names of legacy entries from `model_names`.
    pub fn with_model_names(mut self, model_names: Arc<dyn ModelNameRepository>) -> Self {
        self.model_names = Some(model_names);
        self
    }

    // ------------------------------------------------------------------
    // Selection working set
    // ------------------------------------------------------------------

    pub async fn add_selection(&self, selection: MetricSelection) -> Result<Vec<MetricSelection>> {
        self.selections.add(selection).await
    }

    pub async fn remove_selection(&self, unique_key: &str) -> Result<Vec<MetricSelection>> {
        self.selections.remove(unique_key).await
    }

    pub async fn list_selections(&self) -> Result<Vec<MetricSelection>> {
        self.selections.list().await
    }

    pub async fn clear_selections(&self) -> Result<()> {
        self.selections.clear().await
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// Generates reports from the current working set.
    ///
    /// The working set is left as is; the caller decides when to clear it.
    pub async fn generate_from_selection(
        &self,
        combine: bool,
        report_name: Option<&str>,
    ) -> Result<GeneratedReport> {
        let selections = self.selections.list().await?;
        self.composer.generate(&selections, combine, report_name).await
    }

    /// Display records of a generation outcome.
    pub async fn views_of(&self, generated: &GeneratedReport) -> Vec<ReportView> {
        let reconstructor = self.reconstructor().await;
        generated
            .reports
            .iter()
            .flat_map(|report| reconstructor.expand_report(report))
            .collect()
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub async fn list_history(&self) -> Result<Vec<HistoryEntry>> {
        self.history.list().await
    }

    /// Display records of one history entry.
    pub async fn view(&self, id: i64) -> Result<Vec<ReportView>> {
        let entry = self
            .history
            .find(id)
            .await?
            .ok_or_else(|| EsgError::not_found("history entry", id.to_string()))?;
        Ok(self.reconstructor().await.expand(&entry))
    }

    /// Deletes one history entry.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.history.find(id).await?.is_none() {
            return Err(EsgError::not_found("history entry", id.to_string()));
        }
        self.history.remove(id).await
    }

    /// Exports the entries with the given ids as one JSON array, ordered by id.
    ///
    /// Unknown ids are skipped as long as at least one id matches.
    pub async fn export(&self, ids: &[i64]) -> Result<Value> {
        if ids.is_empty() {
            return Err(EsgError::validation("No history entries selected for export"));
        }

        let mut entries: Vec<HistoryEntry> = self
            .history
            .list()
            .await?
            .into_iter()
            .filter(|entry| ids.contains(&entry.id))
            .collect();
        if entries.is_empty() {
            let joined = ids.iter().map(i64::to_string).collect::<Vec<_>>().join(", ");
            return Err(EsgError::not_found("history entry", joined));
        }
        entries.sort_by_key(|entry| entry.id);

        tracing::info!(count = entries.len(), "Exporting history entries");
        Ok(serde_json::to_value(entries)?)
    }

    async fn reconstructor(&self) -> ReportReconstructor {
        let Some(model_names) = &self.model_names else {
            return ReportReconstructor::new();
        };
        match model_names.mapping().await {
            Ok(mapping) => ReportReconstructor::with_model_names(mapping),
            Err(err) => {
                tracing::warn!(error = %err, "Model name mapping unavailable");
                ReportReconstructor::new()
            }
        }
    }
}
