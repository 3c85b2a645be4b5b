//! Model display names.

use std::collections::HashMap;

use async_trait::async_trait;

use super::model::ModelRef;
use crate::error::Result;

/// Derives a readable model name from a model URI.
///
/// `esg:model_water_use_intensity` becomes `Water Use Intensity`. Blank input
/// yields `N/A`.
pub fn model_name_from_uri(uri: &str) -> String {
    let trimmed = uri.trim();
    if trimmed.is_empty() {
        return "N/A".to_string();
    }

    let stripped = trimmed.strip_prefix("esg:").unwrap_or(trimmed);
    let stripped = stripped.strip_prefix("model_").unwrap_or(stripped);

    let name = stripped
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    if name.trim().is_empty() {
        trimmed.to_string()
    } else {
        name
    }
}

/// Cache of model URI to label, shared by every user.
#[async_trait]
pub trait ModelNameRepository: Send + Sync {
    /// Merges `models` into the cache; later labels replace earlier ones.
    async fn record(&self, models: &[ModelRef]) -> Result<()>;

    /// Returns the full URI to label mapping.
    async fn mapping(&self) -> Result<HashMap<String, String>>;
}
