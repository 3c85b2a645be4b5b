//! HistoryEntry domain model.
//!
//! An entry is the persisted, replayable form of one generated report. The
//! list is stored newest-first under the user's history key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::report::{IndividualReport, ReportUnion};
use crate::score::{ModelRef, RawMetricData};
use crate::serde_compat::comma_joined;

/// The inputs that produced a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryParameters {
    #[serde(rename = "modelUri", default)]
    pub model_uri: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub metric_year: String,
    #[serde(default)]
    pub company: String,
    /// Older entries store the scoring service's echoed dataset array here.
    #[serde(default, deserialize_with = "comma_joined")]
    pub selected_input: String,
    #[serde(default, deserialize_with = "comma_joined")]
    pub selected_pca: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_reports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub individual_reports_data: Vec<IndividualReport>,
    #[serde(default)]
    pub models_for_metrics: Vec<ModelRef>,
}

/// Score fields and raw data kept for redisplay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub final_adjusted: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_value: Option<f64>,
    #[serde(default)]
    pub total_input_sum: f64,
    #[serde(default)]
    pub total_pca_sum: f64,
    #[serde(default)]
    pub count_input: u32,
    #[serde(default)]
    pub count_pca: u32,
    #[serde(default)]
    pub raw_input: RawMetricData,
    #[serde(default)]
    pub raw_pca: RawMetricData,
}

/// A persisted report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Millisecond-timestamp based, unique across the stored list.
    pub id: i64,
    pub report_name: String,
    pub generated_at: DateTime<Utc>,
    pub parameters: HistoryParameters,
    pub result_summary: ResultSummary,
}

impl HistoryEntry {
    /// Builds the entry for `report`.
    pub fn from_report(report: &ReportUnion, id: i64, generated_at: DateTime<Utc>) -> Self {
        match report {
            ReportUnion::Individual(report) => {
                let data = &report.data;
                Self {
                    id,
                    report_name: report.metric.clone(),
                    generated_at,
                    parameters: HistoryParameters {
                        model_uri: data.model_uri.clone(),
                        industry: data.industry.clone(),
                        metric_year: data.metric_year.clone(),
                        company: data.company.clone(),
                        selected_input: data.selected_input.clone(),
                        selected_pca: data.selected_pca.clone(),
                        model_name: Some(report.original_metric.model_name.clone()),
                        categories: None,
                        included_reports: Vec::new(),
                        individual_reports_data: Vec::new(),
                        models_for_metrics: data.score.models_for_metrics.clone(),
                    },
                    result_summary: ResultSummary {
                        final_adjusted: data.score.final_adjusted,
                        final_value: data.score.final_value,
                        total_input_sum: data.score.total_input_sum,
                        total_pca_sum: data.score.total_pca_sum,
                        count_input: data.score.count_input,
                        count_pca: data.score.count_pca,
                        raw_input: data.score.raw_input.clone(),
                        raw_pca: data.score.raw_pca.clone(),
                    },
                }
            }
            ReportUnion::Combined(report) => {
                let data = &report.data;
                Self {
                    id,
                    report_name: report.metric.clone(),
                    generated_at,
                    parameters: HistoryParameters {
                        model_uri: data.model_uri.clone(),
                        industry: data.industry.clone(),
                        metric_year: data.metric_year.clone(),
                        company: data.company.clone(),
                        selected_input: data.selected_input.clone(),
                        selected_pca: data.selected_pca.clone(),
                        model_name: None,
                        categories: Some(data.categories.clone()),
                        included_reports: data.included_reports.clone(),
                        individual_reports_data: data.individual_reports_data.clone(),
                        models_for_metrics: data.models_for_metrics.clone(),
                    },
                    result_summary: ResultSummary {
                        final_adjusted: data.final_adjusted,
                        final_value: None,
                        total_input_sum: data.total_input_sum,
                        total_pca_sum: data.total_pca_sum,
                        count_input: data.count_input,
                        count_pca: data.count_pca,
                        raw_input: data.raw_input.clone(),
                        raw_pca: data.raw_pca.clone(),
                    },
                }
            }
        }
    }

    /// Whether this entry stands for several metrics.
    ///
    /// Entries written before constituents were embedded are recognised by a
    /// category list that differs from the name, or by an included-report list.
    pub fn is_combined(&self) -> bool {
        let params = &self.parameters;
        !params.individual_reports_data.is_empty()
            || params
                .categories
                .as_deref()
                .is_some_and(|c| !c.is_empty() && c != self.report_name)
            || !params.included_reports.is_empty()
    }

    /// Names of the metrics this entry covers.
    pub fn category_names(&self) -> Vec<String> {
        let params = &self.parameters;
        if !params.individual_reports_data.is_empty() {
            return params
                .individual_reports_data
                .iter()
                .map(|r| r.metric.clone())
                .collect();
        }
        if !params.included_reports.is_empty() {
            return params.included_reports.clone();
        }
        match params.categories.as_deref() {
            Some(categories) => categories
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Allocates `count` ids for a new batch.
///
/// Ids start at `now_millis` and are disambiguated by position in the batch.
/// If the clock is behind the newest stored id, allocation continues past it
/// so ids stay unique across the whole list.
pub fn allocate_ids<I>(existing_ids: I, now_millis: i64, count: usize) -> Vec<i64>
where
    I: IntoIterator<Item = i64>,
{
    let floor = existing_ids
        .into_iter()
        .max()
        .map_or(i64::MIN, |max| max.saturating_add(1));
    let base = now_millis.max(floor);
    (0..count as i64).map(|offset| base + offset).collect()
}
