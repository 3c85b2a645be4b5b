//! Individual and combined report models.
//!
//! Reports are transient: the composer builds them, the history store turns
//! them into entries, and they are dropped. Their JSON shape is still a
//! contract because combined entries embed their constituents verbatim.

use serde::{Deserialize, Serialize};

use crate::score::{ModelRef, RawMetricData, ScoreDocument};
use crate::serde_compat::comma_joined;

/// Name given to a combined report when the caller supplies none.
pub const DEFAULT_COMBINED_REPORT_NAME: &str = "Combined ESG Report";

/// Model URI recorded on combined reports, which span several models.
pub const COMBINED_MODEL_URI: &str = "Combined Models";

/// Score data of one constituent plus the parameters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualReportData {
    #[serde(flatten)]
    pub score: ScoreDocument,
    pub company: String,
    pub industry: String,
    pub metric_year: String,
    #[serde(rename = "modelUri")]
    pub model_uri: String,
    #[serde(default, deserialize_with = "comma_joined")]
    pub selected_input: String,
    #[serde(default, deserialize_with = "comma_joined")]
    pub selected_pca: String,
}

/// Identity of the selection a report was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalMetric {
    #[serde(rename = "uniqueKey")]
    pub unique_key: String,
    #[serde(rename = "modelUri")]
    pub model_uri: String,
    pub metric_label: String,
    #[serde(default)]
    pub categories_label: String,
    pub model_name: String,
}

/// The report for a single metric selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualReport {
    /// Display name.
    pub metric: String,
    pub data: IndividualReportData,
    pub original_metric: OriginalMetric,
}

/// Aggregated data of a combined report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedReportData {
    pub company: String,
    pub industry: String,
    pub metric_year: String,
    #[serde(rename = "modelUri")]
    pub model_uri: String,
    pub final_adjusted: f64,
    pub total_input_sum: f64,
    pub total_pca_sum: f64,
    pub count_input: u32,
    pub count_pca: u32,
    pub selected_input: String,
    pub selected_pca: String,
    /// Comma-joined constituent display names.
    pub categories: String,
    pub included_reports: Vec<String>,
    pub raw_input: RawMetricData,
    pub raw_pca: RawMetricData,
    #[serde(default)]
    pub models_for_metrics: Vec<ModelRef>,
    /// Constituents embedded verbatim so history entries can be unfolded.
    pub individual_reports_data: Vec<IndividualReport>,
}

/// Several constituents merged into one scored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedReport {
    pub metric: String,
    pub data: CombinedReportData,
}

/// Either report shape; composer and reconstructor match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportUnion {
    Individual(IndividualReport),
    Combined(CombinedReport),
}

impl ReportUnion {
    /// Display name of the report.
    pub fn name(&self) -> &str {
        match self {
            ReportUnion::Individual(report) => &report.metric,
            ReportUnion::Combined(report) => &report.metric,
        }
    }

    /// Headline score.
    pub fn final_adjusted(&self) -> f64 {
        match self {
            ReportUnion::Individual(report) => report.data.score.final_adjusted,
            ReportUnion::Combined(report) => report.data.final_adjusted,
        }
    }

    pub fn is_combined(&self) -> bool {
        matches!(self, ReportUnion::Combined(_))
    }
}

impl From<IndividualReport> for ReportUnion {
    fn from(report: IndividualReport) -> Self {
        ReportUnion::Individual(report)
    }
}

impl From<CombinedReport> for ReportUnion {
    fn from(report: CombinedReport) -> Self {
        ReportUnion::Combined(report)
    }
}
