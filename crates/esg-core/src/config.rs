//! Configuration models.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::report::DEFAULT_COMBINED_REPORT_NAME;

pub const DEFAULT_SCORING_BASE_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_SCORING_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Scoring service connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Where the file-backed key-value store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StorageSettings {
    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Report composition defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_combined_name")]
    pub default_combined_name: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_combined_name: default_combined_name(),
        }
    }
}

/// Root of `config.toml`.
///
/// Every section is optional; a missing file yields the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsgConfig {
    /// Current user id. Absent means the guest namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

impl Default for EsgConfig {
    fn default() -> Self {
        Self {
            user: None,
            log_level: default_log_level(),
            scoring: ScoringSettings::default(),
            storage: StorageSettings::default(),
            report: ReportSettings::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_SCORING_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_SCORING_TIMEOUT_SECS
}

fn default_combined_name() -> String {
    DEFAULT_COMBINED_REPORT_NAME.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
