//! Report history domain.

pub mod model;
pub mod repository;

pub use model::{HistoryEntry, HistoryParameters, ResultSummary, allocate_ids};
pub use repository::HistoryRepository;
