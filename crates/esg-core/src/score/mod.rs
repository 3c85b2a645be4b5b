//! Scoring service contract.

pub mod catalog;
pub mod client;
pub mod model;

pub use catalog::{ModelNameRepository, model_name_from_uri};
pub use client::ScoringClient;
pub use model::{ModelRef, RawMetricData, RawMetricRecord, ScoreDocument, ScoreRequest};
