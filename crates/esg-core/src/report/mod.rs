//! Report shapes produced by composition and consumed by display.

pub mod model;
pub mod view;

pub use model::{
    COMBINED_MODEL_URI, CombinedReport, CombinedReportData, DEFAULT_COMBINED_REPORT_NAME,
    IndividualReport, IndividualReportData, OriginalMetric, ReportUnion,
};
pub use view::ReportView;
