//! ScoringClient trait.

use async_trait::async_trait;

use super::model::{ScoreDocument, ScoreRequest};
use crate::error::Result;

/// The external service that computes a score for one selection.
///
/// Any non-success response or transport failure must be reported as
/// [`crate::EsgError::ScoringRequest`]. Implementations do not retry.
#[async_trait]
pub trait ScoringClient: Send + Sync {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreDocument>;
}
