//! MetricSelection domain model.
//!
//! A selection is one metric the user intends to put into a report, together
//! with every parameter the scoring service needs to compute it.

use serde::{Deserialize, Serialize};

/// Label used when a selection arrives without a metric label.
pub const UNNAMED_METRIC: &str = "Unnamed Metric";

/// Label used when a selection has neither a category nor a metric label.
pub const UNNAMED_CATEGORY: &str = "Unnamed Category";

/// One entry of the per-user selection working set.
///
/// Field names follow the stored JSON shape shared with the dashboard, which
/// mixes camelCase and snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSelection {
    /// Unique within the working set; upserts are keyed on it.
    #[serde(rename = "uniqueKey")]
    pub unique_key: String,
    pub metric_label: String,
    #[serde(default)]
    pub categories_label: String,
    #[serde(default)]
    pub categories_uri: String,
    #[serde(rename = "modelUri")]
    pub model_uri: String,
    pub industry: String,
    /// Reporting date, `YYYY-MM-DD`.
    pub metric_year: String,
    pub company: String,
    /// Comma-joined dataset names scored as raw framework inputs.
    #[serde(default)]
    pub selected_input: String,
    /// Comma-joined dataset names scored with PCA weighting.
    #[serde(default)]
    pub selected_pca: String,
    /// Human-readable model label, when the picker knew it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_label: Option<String>,
}

impl MetricSelection {
    /// Fills the label fallbacks the dashboard applies on insert.
    pub fn normalized(mut self) -> Self {
        let has_label = !self.metric_label.trim().is_empty();
        if self.categories_label.trim().is_empty() {
            self.categories_label = if has_label {
                self.metric_label.clone()
            } else {
                UNNAMED_CATEGORY.to_string()
            };
        }
        if !has_label {
            self.metric_label = UNNAMED_METRIC.to_string();
        }
        self
    }

    /// Name shown for reports built from this selection.
    pub fn display_name(&self) -> &str {
        if self.categories_label.is_empty() {
            &self.metric_label
        } else {
            &self.categories_label
        }
    }
}

/// Inserts `selection` or overwrites the entry with the same key in place.
pub fn upsert(mut selections: Vec<MetricSelection>, selection: MetricSelection) -> Vec<MetricSelection> {
    match selections
        .iter_mut()
        .find(|existing| existing.unique_key == selection.unique_key)
    {
        Some(existing) => *existing = selection,
        None => selections.push(selection),
    }
    selections
}

/// Drops the entry with `unique_key`; absent keys leave the list unchanged.
pub fn without(selections: Vec<MetricSelection>, unique_key: &str) -> Vec<MetricSelection> {
    selections
        .into_iter()
        .filter(|s| s.unique_key != unique_key)
        .collect()
}
