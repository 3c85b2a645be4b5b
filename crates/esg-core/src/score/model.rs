//! Score documents returned by the scoring service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::selection::MetricSelection;

/// One raw data point behind a dataset score.
///
/// Input datasets report `standardized_value`; PCA datasets report
/// `metric_value_standardized`. Both shapes share this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RawMetricRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standardized_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_value_standardized: Option<f64>,
}

/// Raw records keyed by dataset name.
pub type RawMetricData = BTreeMap<String, Vec<RawMetricRecord>>;

/// A scoring model reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    #[serde(default)]
    pub model_label: String,
    pub model_uri: String,
}

/// The score computed for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDocument {
    pub final_adjusted: f64,
    /// Score before PCA weight re-normalisation. Older services omit it.
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
    #[serde(default)]
    pub models_for_metrics: Vec<ModelRef>,
}

/// Parameters of a single scoring request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRequest {
    #[serde(rename = "modelUri")]
    pub model_uri: String,
    pub industry: String,
    pub metric_year: String,
    pub company: String,
    pub selected_input: String,
    pub selected_pca: String,
}

impl From<&MetricSelection> for ScoreRequest {
    fn from(selection: &MetricSelection) -> Self {
        Self {
            model_uri: selection.model_uri.clone(),
            industry: selection.industry.clone(),
            metric_year: selection.metric_year.clone(),
            company: selection.company.clone(),
            selected_input: selection.selected_input.clone(),
            selected_pca: selection.selected_pca.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_service_payload_ignores_echo_fields() {
        let payload = serde_json::json!({
            "model_uri": "esg:TC-SC-110a.1",
            "company": "Soitec SA",
            "selected_input": ["CO2DIRECTSCOPE1"],
            "final_value": 0.42,
            "final_adjusted": 0.5,
            "total_input_sum": 1.5,
            "total_pca_sum": 0.0,
            "count_input": 1,
            "count_pca": 0,
            "raw_input": {
                "CO2DIRECTSCOPE1": [
                    {"standardized_value": 1.5, "metric_value": 1200, "metric_unit": "t"}
                ]
            },
            "raw_pca": {},
            "models_for_metrics": [
                {"model_label": "Scope 1", "model_uri": "tag:stardog:designer:ESG4:model:TC-SC-110a.1"}
            ]
        });

        let doc: ScoreDocument = serde_json::from_value(payload).unwrap();

        assert_eq!(doc.final_adjusted, 0.5);
        assert_eq!(doc.final_value, Some(0.42));
        assert_eq!(doc.raw_input["CO2DIRECTSCOPE1"][0].standardized_value, Some(1.5));
        assert_eq!(doc.models_for_metrics[0].model_label, "Scope 1");
    }

    #[test]
    fn test_missing_optional_sections_default() {
        let doc: ScoreDocument =
            serde_json::from_value(serde_json::json!({"final_adjusted": 0.1})).unwrap();
        assert!(doc.raw_input.is_empty());
        assert!(doc.models_for_metrics.is_empty());
        assert_eq!(doc.count_input, 0);
    }
}
