//! Display record consumed by the report page.

use serde::{Deserialize, Serialize};

use crate::score::{ModelRef, RawMetricData};

/// One card on the report page.
///
/// A combined history entry unfolds into one view per constituent, each tagged
/// with the combined report's name and score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportView {
    pub metric: String,
    pub company: String,
    pub industry: String,
    pub metric_year: String,
    #[serde(rename = "modelUri")]
    pub model_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    pub selected_input: String,
    pub selected_pca: String,
    pub final_adjusted: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_value: Option<f64>,
    pub total_input_sum: f64,
    pub total_pca_sum: f64,
    pub count_input: u32,
    pub count_pca: u32,
    pub raw_input: RawMetricData,
    pub raw_pca: RawMetricData,
    #[serde(default)]
    pub models_for_metrics: Vec<ModelRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_reports: Vec<String>,
    #[serde(rename = "isPartOfCombined")]
    pub is_part_of_combined: bool,
    #[serde(rename = "combinedName", default, skip_serializing_if = "Option::is_none")]
    pub combined_name: Option<String>,
    #[serde(rename = "combinedScore", default, skip_serializing_if = "Option::is_none")]
    pub combined_score: Option<f64>,
}
