//! Selection repository trait.

use async_trait::async_trait;

use super::model::MetricSelection;
use crate::error::Result;

/// Persistence of the per-user metric selection working set.
///
/// Every mutating call rewrites the whole list and returns the list as stored.
#[async_trait]
pub trait SelectionRepository: Send + Sync {
    /// Upserts by `unique_key`: overwrite in place if present, append otherwise.
    async fn add(&self, selection: MetricSelection) -> Result<Vec<MetricSelection>>;

    /// Removes the entry with `unique_key`. Absent keys are a no-op.
    async fn remove(&self, unique_key: &str) -> Result<Vec<MetricSelection>>;

    /// Returns the working set in insertion order.
    async fn list(&self) -> Result<Vec<MetricSelection>>;

    /// Empties the working set.
    async fn clear(&self) -> Result<()>;
}
