//! Error types for the ESG report engine.

use thiserror::Error;

/// A shared error type for the whole report engine.
///
/// The first three variants are the user-facing taxonomy (validation, scoring,
/// persistence). The remaining variants come from the storage and configuration
/// layers and are folded into `Persistence` by callers that only care about the
/// coarse category.
#[derive(Error, Debug, Clone)]
pub enum EsgError {
    /// Report generation was requested with an empty selection set.
    #[error("No metrics selected: add at least one metric before generating a report")]
    NoMetricsSelected,

    /// Generic input validation failure.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A scoring request failed; the whole generation batch is aborted.
    #[error("Scoring request failed for '{metric}': {message}")]
    ScoringRequest { metric: String, message: String },

    /// Writing to the key-value store failed (quota, I/O, lock).
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EsgError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a ScoringRequest error for the named metric
    pub fn scoring(metric: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ScoringRequest {
            metric: metric.into(),
            message: message.into(),
        }
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// True for `NoMetricsSelected` and `Validation`.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NoMetricsSelected | Self::Validation(_))
    }

    /// Check if this is a scoring request failure
    pub fn is_scoring(&self) -> bool {
        matches!(self, Self::ScoringRequest { .. })
    }

    /// True for any failure raised while reading or writing stored state.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Persistence(_) | Self::Io { .. } | Self::Serialization { .. }
        )
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for EsgError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for EsgError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for EsgError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for EsgError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, EsgError>`.
pub type Result<T> = std::result::Result<T, EsgError>;
