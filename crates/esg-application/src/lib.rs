//! Report composition and history use cases.

pub mod aggregation;
pub mod composer;
pub mod fan_out;
pub mod reconstructor;
pub mod report_service;

pub use composer::{GeneratedReport, ReportComposer, build_individual, combine_reports};
pub use reconstructor::ReportReconstructor;
pub use report_service::ReportService;
