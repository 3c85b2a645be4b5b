//! Metric selection domain.

pub mod model;
pub mod repository;

pub use model::{MetricSelection, UNNAMED_CATEGORY, UNNAMED_METRIC};
pub use repository::SelectionRepository;
