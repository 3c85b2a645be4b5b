//! HttpScoringClient - REST client for the ESG scoring service.
//!
//! Calls `GET {base_url}/report/generateReport` with the selection parameters
//! as query string and decodes the score document from the JSON body.

use async_trait::async_trait;
use esg_core::config::ScoringSettings;
use esg_core::error::{EsgError, Result};
use esg_core::score::{ScoreDocument, ScoreRequest, ScoringClient};
use reqwest::Client;
use std::time::Duration;

const GENERATE_REPORT_PATH: &str = "/report/generateReport";

/// Longest error body echoed back into an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// ScoringClient implementation that talks to the scoring service over HTTP.
#[derive(Clone)]
pub struct HttpScoringClient {
    client: Client,
    base_url: String,
}

impl HttpScoringClient {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EsgError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Creates a client from the `[scoring]` config section.
    pub fn from_settings(settings: &ScoringSettings) -> Result<Self> {
        Self::new(
            settings.base_url.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            GENERATE_REPORT_PATH
        )
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    async fn score(&self, request: &ScoreRequest) -> Result<ScoreDocument> {
        let metric = request.model_uri.as_str();
        tracing::debug!(model_uri = metric, company = %request.company, "Requesting score");

        let response = self
            .client
            .get(self.endpoint())
            .query(request)
            .send()
            .await
            .map_err(|err| EsgError::scoring(metric, format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            tracing::warn!(model_uri = metric, %status, "Scoring service returned an error");
            return Err(EsgError::scoring(metric, format!("HTTP {status}: {body}")));
        }

        response
            .json::<ScoreDocument>()
            .await
            .map_err(|err| EsgError::scoring(metric, format!("invalid score document: {err}")))
    }
}
