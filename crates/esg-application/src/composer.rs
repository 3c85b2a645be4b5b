//! ReportComposer - turns a selection set into scored reports.
//!
//! Generation is all-or-nothing up to scoring: one request per selection,
//! run concurrently, and any failure aborts the whole call before anything is
//! built or persisted. Persistence failures after a successful composition do
//! not fail the call; they are logged and returned in [`GeneratedReport`].

use std::sync::Arc;

use esg_core::error::{EsgError, Result};
use esg_core::history::{HistoryEntry, HistoryRepository};
use esg_core::report::{
    COMBINED_MODEL_URI, CombinedReport, CombinedReportData, DEFAULT_COMBINED_REPORT_NAME,
    IndividualReport, IndividualReportData, OriginalMetric, ReportUnion,
};
use esg_core::score::{
    ModelNameRepository, ModelRef, ScoreDocument, ScoreRequest, ScoringClient, model_name_from_uri,
};
use esg_core::selection::MetricSelection;

use crate::aggregation::{join_non_empty, mean, merge_raw};
use crate::fan_out::join_all_or_nothing;

/// Outcome of a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    /// One individual report per selection, or exactly one combined report.
    pub reports: Vec<ReportUnion>,
    /// Entries written to history; empty if persisting failed.
    pub history: Vec<HistoryEntry>,
    /// Set when the reports were composed but could not be saved.
    pub persistence_error: Option<EsgError>,
}

impl GeneratedReport {
    pub fn is_persisted(&self) -> bool {
        self.persistence_error.is_none()
    }
}

pub struct ReportComposer {
    scoring: Arc<dyn ScoringClient>,
    history: Arc<dyn HistoryRepository>,
    model_names: Option<Arc<dyn ModelNameRepository>>,
    default_name: String,
}

impl ReportComposer {
    pub fn new(scoring: Arc<dyn ScoringClient>, history: Arc<dyn HistoryRepository>) -> Self {
        Self {
            scoring,
            history,
            model_names: None,
            default_name: DEFAULT_COMBINED_REPORT_NAME.to_string(),
        }
    }

    /// Records every model label returned by the scoring service.
    pub fn with_model_names(mut self, model_names: Arc<dyn ModelNameRepository>) -> Self {
        self.model_names = Some(model_names);
        self
    }

    /// Overrides the name of combined reports generated without one.
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    /// Scores `selections` and persists the resulting report(s).
    ///
    /// # Errors
    ///
    /// - `NoMetricsSelected` if `selections` is empty
    /// - `ScoringRequest` if any scoring request fails; nothing is persisted
    pub async fn generate(
        &self,
        selections: &[MetricSelection],
        combine: bool,
        report_name: Option<&str>,
    ) -> Result<GeneratedReport> {
        if selections.is_empty() {
            return Err(EsgError::NoMetricsSelected);
        }

        tracing::info!(count = selections.len(), combine, "Requesting scores");
        let documents = join_all_or_nothing(selections.iter().map(|selection| {
            let request = ScoreRequest::from(selection);
            let scoring = Arc::clone(&self.scoring);
            async move { scoring.score(&request).await }
        }))
        .await
        .inspect_err(|err| tracing::error!(error = %err, "Report generation aborted"))?;

        let individuals: Vec<IndividualReport> = selections
            .iter()
            .zip(documents)
            .map(|(selection, document)| build_individual(selection, document))
            .collect();

        let reports: Vec<ReportUnion> = if combine {
            let name = report_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or(self.default_name.as_str());
            vec![combine_reports(name, individuals).into()]
        } else {
            individuals.into_iter().map(ReportUnion::from).collect()
        };

        self.record_model_names(&reports).await;

        match self.history.append(&reports).await {
            Ok(history) => {
                tracing::debug!(entries = history.len(), "Report saved to history");
                Ok(GeneratedReport {
                    reports,
                    history,
                    persistence_error: None,
                })
            }
            Err(err) => {
                tracing::warn!(error = %err, "Report generated but not saved to history");
                Ok(GeneratedReport {
                    reports,
                    history: Vec::new(),
                    persistence_error: Some(err),
                })
            }
        }
    }

    async fn record_model_names(&self, reports: &[ReportUnion]) {
        let Some(model_names) = &self.model_names else {
            return;
        };
        let models: Vec<ModelRef> = reports
            .iter()
            .flat_map(|report| match report {
                ReportUnion::Individual(r) => r.data.score.models_for_metrics.clone(),
                ReportUnion::Combined(r) => r.data.models_for_metrics.clone(),
            })
            .collect();
        if models.is_empty() {
            return;
        }
        if let Err(err) = model_names.record(&models).await {
            tracing::warn!(error = %err, "Failed to update model name mapping");
        }
    }
}

/// Builds the report of one selection from its score.
pub fn build_individual(selection: &MetricSelection, score: ScoreDocument) -> IndividualReport {
    let model_name = selection
        .model_label
        .as_deref()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| model_name_from_uri(&selection.model_uri));

    IndividualReport {
        metric: selection.display_name().to_string(),
        data: IndividualReportData {
            score,
            company: selection.company.clone(),
            industry: selection.industry.clone(),
            metric_year: selection.metric_year.clone(),
            model_uri: selection.model_uri.clone(),
            selected_input: selection.selected_input.clone(),
            selected_pca: selection.selected_pca.clone(),
        },
        original_metric: OriginalMetric {
            unique_key: selection.unique_key.clone(),
            model_uri: selection.model_uri.clone(),
            metric_label: selection.metric_label.clone(),
            categories_label: selection.categories_label.clone(),
            model_name,
        },
    }
}

/// Merges constituents into one combined report.
///
/// Company, industry and year come from the first constituent. Raw datasets
/// that appear in several constituents keep the later constituent's records.
pub fn combine_reports(name: &str, individuals: Vec<IndividualReport>) -> CombinedReport {
    let scores = || individuals.iter().map(|r| &r.data.score);
    let names: Vec<String> = individuals.iter().map(|r| r.metric.clone()).collect();

    let mut models_for_metrics: Vec<ModelRef> = Vec::new();
    for model in scores().flat_map(|s| s.models_for_metrics.iter()) {
        if !models_for_metrics
            .iter()
            .any(|seen| seen.model_uri == model.model_uri)
        {
            models_for_metrics.push(model.clone());
        }
    }

    let (company, industry, metric_year) = individuals
        .first()
        .map(|r| {
            (
                r.data.company.clone(),
                r.data.industry.clone(),
                r.data.metric_year.clone(),
            )
        })
        .unwrap_or_default();

    let data = CombinedReportData {
        company,
        industry,
        metric_year,
        model_uri: COMBINED_MODEL_URI.to_string(),
        final_adjusted: mean(scores().map(|s| s.final_adjusted)).unwrap_or(0.0),
        total_input_sum: scores().map(|s| s.total_input_sum).sum(),
        total_pca_sum: scores().map(|s| s.total_pca_sum).sum(),
        count_input: scores().map(|s| s.count_input).sum(),
        count_pca: scores().map(|s| s.count_pca).sum(),
        selected_input: join_non_empty(individuals.iter().map(|r| r.data.selected_input.as_str())),
        selected_pca: join_non_empty(individuals.iter().map(|r| r.data.selected_pca.as_str())),
        categories: names.join(", "),
        included_reports: names,
        raw_input: merge_raw(scores().map(|s| &s.raw_input)),
        raw_pca: merge_raw(scores().map(|s| &s.raw_pca)),
        models_for_metrics,
        individual_reports_data: individuals,
    };

    CombinedReport {
        metric: name.to_string(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_core::score::{RawMetricData, RawMetricRecord};

    fn selection(key: &str, label: &str, input: &str) -> MetricSelection {
        MetricSelection {
            unique_key: key.to_string(),
            metric_label: label.to_string(),
            categories_label: String::new(),
            categories_uri: String::new(),
            model_uri: format!("esg:model_{}", label.to_lowercase()),
            industry: "Semiconductors".to_string(),
            metric_year: "2022-12-31".to_string(),
            company: "Soitec SA".to_string(),
            selected_input: input.to_string(),
            selected_pca: String::new(),
            model_label: None,
        }
    }

    fn score(final_adjusted: f64, input_sum: f64, dataset: &str) -> ScoreDocument {
        let mut raw_input = RawMetricData::new();
        raw_input.insert(
            dataset.to_string(),
            vec![RawMetricRecord {
                standardized_value: Some(input_sum),
                ..Default::default()
            }],
        );
        ScoreDocument {
            final_adjusted,
            final_value: None,
            total_input_sum: input_sum,
            total_pca_sum: 0.0,
            count_input: 1,
            count_pca: 0,
            raw_input,
            raw_pca: RawMetricData::new(),
            models_for_metrics: vec![ModelRef {
                model_label: "Shared".to_string(),
                model_uri: "esg:model_shared".to_string(),
            }],
        }
    }

    #[test]
    fn test_build_individual_derives_names() {
        let report = build_individual(&selection("k1", "Water", "WATER"), score(0.4, 2.0, "WATER"));

        assert_eq!(report.metric, "Water");
        assert_eq!(report.original_metric.model_name, "Water");
        assert_eq!(report.original_metric.unique_key, "k1");
        assert_eq!(report.data.model_uri, "esg:model_water");
        assert_eq!(report.data.score.final_adjusted, 0.4);
    }

    #[test]
    fn test_build_individual_prefers_model_label() {
        let mut s = selection("k1", "Water", "WATER");
        s.model_label = Some("Water Withdrawn".to_string());
        s.categories_label = "Environment".to_string();

        let report = build_individual(&s, score(0.4, 2.0, "WATER"));

        assert_eq!(report.metric, "Environment");
        assert_eq!(report.original_metric.model_name, "Water Withdrawn");
    }

    #[test]
    fn test_combine_aggregates() {
        let a = build_individual(&selection("a", "Water", "WATER"), score(0.2, 10.0, "WATER"));
        let b = build_individual(&selection("b", "Energy", ""), score(0.4, 5.0, "ENERGY"));

        let combined = combine_reports("Mix", vec![a, b]);
        let data = &combined.data;

        assert_eq!(combined.metric, "Mix");
        assert!((data.final_adjusted - 0.3).abs() < 1e-12);
        assert_eq!(data.total_input_sum, 15.0);
        assert_eq!(data.count_input, 2);
        assert_eq!(data.selected_input, "WATER");
        assert_eq!(data.categories, "Water, Energy");
        assert_eq!(data.included_reports, vec!["Water", "Energy"]);
        assert_eq!(data.raw_input.len(), 2);
        assert_eq!(data.models_for_metrics.len(), 1);
        assert_eq!(data.model_uri, COMBINED_MODEL_URI);
        assert_eq!(data.individual_reports_data.len(), 2);
    }
}
