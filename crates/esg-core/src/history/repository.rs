//! History repository trait.

use async_trait::async_trait;

use super::model::HistoryEntry;
use crate::error::Result;
use crate::report::ReportUnion;

/// Append-only, newest-first store of generated reports.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Persists one entry per report, prepended in batch order.
    ///
    /// The whole batch is written in one store operation: on error the stored
    /// list is unchanged.
    ///
    /// # Returns
    ///
    /// The entries that were written, in batch order.
    async fn append(&self, reports: &[ReportUnion]) -> Result<Vec<HistoryEntry>>;

    /// Removes the entry with `id`. Absent ids leave the list unchanged.
    async fn remove(&self, id: i64) -> Result<()>;

    /// Returns all entries, newest first.
    async fn list(&self) -> Result<Vec<HistoryEntry>>;

    /// Finds an entry by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(entry))`: Entry found
    /// - `Ok(None)`: No entry with that id
    async fn find(&self, id: i64) -> Result<Option<HistoryEntry>>;
}
