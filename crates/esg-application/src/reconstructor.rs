//! ReportReconstructor - unfolds history entries into display records.

use std::collections::HashMap;

use esg_core::history::HistoryEntry;
use esg_core::report::{IndividualReport, ReportUnion, ReportView};
use esg_core::score::model_name_from_uri;

/// Tag applied to the views of one combined report.
struct CombinedTag<'a> {
    name: &'a str,
    score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ReportReconstructor {
    model_names: HashMap<String, String>,
}

impl ReportReconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `mapping` (model URI to label) for entries that stored no model name.
    pub fn with_model_names(mapping: HashMap<String, String>) -> Self {
        Self {
            model_names: mapping,
        }
    }

    /// Expands a history entry.
    ///
    /// An entry with embedded constituents yields one view per constituent,
    /// tagged with the entry's name and score. Any other entry yields a single
    /// untagged view.
    pub fn expand(&self, entry: &HistoryEntry) -> Vec<ReportView> {
        let params = &entry.parameters;
        if !params.individual_reports_data.is_empty() {
            let tag = CombinedTag {
                name: &entry.report_name,
                score: entry.result_summary.final_adjusted,
            };
            return params
                .individual_reports_data
                .iter()
                .map(|report| self.individual_view(report, Some(&tag)))
                .collect();
        }

        let summary = &entry.result_summary;
        let is_combined = entry.is_combined();
        let model_name = match &params.model_name {
            Some(name) if !name.trim().is_empty() => Some(name.clone()),
            _ if is_combined => None,
            _ => Some(self.resolve_model_name(&params.model_uri)),
        };

        vec![ReportView {
            metric: entry.report_name.clone(),
            company: params.company.clone(),
            industry: params.industry.clone(),
            metric_year: params.metric_year.clone(),
            model_uri: params.model_uri.clone(),
            model_name,
            selected_input: params.selected_input.clone(),
            selected_pca: params.selected_pca.clone(),
            final_adjusted: summary.final_adjusted,
            final_value: summary.final_value,
            total_input_sum: summary.total_input_sum,
            total_pca_sum: summary.total_pca_sum,
            count_input: summary.count_input,
            count_pca: summary.count_pca,
            raw_input: summary.raw_input.clone(),
            raw_pca: summary.raw_pca.clone(),
            models_for_metrics: params.models_for_metrics.clone(),
            categories: params.categories.clone(),
            included_reports: if is_combined {
                entry.category_names()
            } else {
                Vec::new()
            },
            is_part_of_combined: false,
            combined_name: None,
            combined_score: None,
        }]
    }

    /// Expands every entry, preserving order.
    pub fn expand_all(&self, entries: &[HistoryEntry]) -> Vec<ReportView> {
        entries.iter().flat_map(|entry| self.expand(entry)).collect()
    }

    /// Splits a freshly composed report the same way [`expand`](Self::expand)
    /// splits its history entry.
    pub fn expand_report(&self, report: &ReportUnion) -> Vec<ReportView> {
        match report {
            ReportUnion::Individual(report) => vec![self.individual_view(report, None)],
            ReportUnion::Combined(report) => {
                let tag = CombinedTag {
                    name: &report.metric,
                    score: report.data.final_adjusted,
                };
                report
                    .data
                    .individual_reports_data
                    .iter()
                    .map(|constituent| self.individual_view(constituent, Some(&tag)))
                    .collect()
            }
        }
    }

    fn individual_view(&self, report: &IndividualReport, tag: Option<&CombinedTag<'_>>) -> ReportView {
        let data = &report.data;
        let score = &data.score;
        let model_name = if report.original_metric.model_name.trim().is_empty() {
            self.resolve_model_name(&data.model_uri)
        } else {
            report.original_metric.model_name.clone()
        };

        ReportView {
            metric: report.metric.clone(),
            company: data.company.clone(),
            industry: data.industry.clone(),
            metric_year: data.metric_year.clone(),
            model_uri: data.model_uri.clone(),
            model_name: Some(model_name),
            selected_input: data.selected_input.clone(),
            selected_pca: data.selected_pca.clone(),
            final_adjusted: score.final_adjusted,
            final_value: score.final_value,
            total_input_sum: score.total_input_sum,
            total_pca_sum: score.total_pca_sum,
            count_input: score.count_input,
            count_pca: score.count_pca,
            raw_input: score.raw_input.clone(),
            raw_pca: score.raw_pca.clone(),
            models_for_metrics: score.models_for_metrics.clone(),
            categories: None,
            included_reports: Vec::new(),
            is_part_of_combined: tag.is_some(),
            combined_name: tag.map(|t| t.name.to_string()),
            combined_score: tag.map(|t| t.score),
        }
    }

    fn resolve_model_name(&self, model_uri: &str) -> String {
        self.model_names
            .get(model_uri)
            .filter(|label| !label.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| model_name_from_uri(model_uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use esg_core::history::{HistoryParameters, ResultSummary};
    use esg_core::score::RawMetricData;

    fn legacy_entry(model_name: Option<&str>) -> HistoryEntry {
        HistoryEntry {
            id: 1,
            report_name: "Water".to_string(),
            generated_at: Utc::now(),
            parameters: HistoryParameters {
                model_uri: "esg:model_water_use".to_string(),
                industry: "Semiconductors".to_string(),
                metric_year: "2022-12-31".to_string(),
                company: "Soitec SA".to_string(),
                selected_input: "WATER".to_string(),
                selected_pca: String::new(),
                model_name: model_name.map(str::to_string),
                categories: None,
                included_reports: Vec::new(),
                individual_reports_data: Vec::new(),
                models_for_metrics: Vec::new(),
            },
            result_summary: ResultSummary {
                final_adjusted: 0.6,
                final_value: Some(0.55),
                total_input_sum: 3.0,
                total_pca_sum: 0.0,
                count_input: 1,
                count_pca: 0,
                raw_input: RawMetricData::new(),
                raw_pca: RawMetricData::new(),
            },
        }
    }

    #[test]
    fn test_plain_entry_yields_single_untagged_view() {
        let views = ReportReconstructor::new().expand(&legacy_entry(Some("Water Use")));

        assert_eq!(views.len(), 1);
        let view = &views[0];
        assert_eq!(view.metric, "Water");
        assert_eq!(view.model_name.as_deref(), Some("Water Use"));
        assert_eq!(view.final_value, Some(0.55));
        assert!(!view.is_part_of_combined);
        assert!(view.combined_name.is_none());
    }

    #[test]
    fn test_missing_model_name_resolved_from_mapping() {
        let mut mapping = HashMap::new();
        mapping.insert(
            "esg:model_water_use".to_string(),
            "Water Withdrawn".to_string(),
        );

        let views = ReportReconstructor::with_model_names(mapping).expand(&legacy_entry(None));
        assert_eq!(views[0].model_name.as_deref(), Some("Water Withdrawn"));

        let views = ReportReconstructor::new().expand(&legacy_entry(None));
        assert_eq!(views[0].model_name.as_deref(), Some("Water Use"));
    }

    #[test]
    fn test_legacy_combined_entry_without_constituents() {
        let mut entry = legacy_entry(None);
        entry.report_name = "Quarterly".to_string();
        entry.parameters.categories = Some("Water, Energy".to_string());

        let views = ReportReconstructor::new().expand(&entry);

        assert_eq!(views.len(), 1);
        assert!(views[0].model_name.is_none());
        assert_eq!(views[0].included_reports, vec!["Water", "Energy"]);
        assert!(!views[0].is_part_of_combined);
    }
}
