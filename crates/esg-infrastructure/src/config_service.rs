//! Configuration loading.
//!
//! Precedence, highest first: environment variables, `config.toml`, defaults.

use crate::paths::EsgPaths;
use crate::storage::AtomicFile;
use esg_core::config::EsgConfig;
use esg_core::error::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const ENV_USER: &str = "ESG_USER";
pub const ENV_SCORING_URL: &str = "ESG_SCORING_URL";
pub const ENV_DATA_DIR: &str = "ESG_DATA_DIR";

/// Loads and writes `config.toml`.
pub struct ConfigService {
    file: AtomicFile<EsgConfig>,
}

impl ConfigService {
    /// Uses the platform config location.
    pub fn new(paths: &EsgPaths) -> Result<Self> {
        Ok(Self::at(paths.config_file()?))
    }

    /// Uses an explicit config file path.
    pub fn at(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::toml(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Reads the file (defaults if absent) and applies process environment overrides.
    pub fn load(&self) -> Result<EsgConfig> {
        let env: HashMap<String, String> = std::env::vars().collect();
        self.load_with_env(&env)
    }

    /// Like [`ConfigService::load`] with an explicit environment.
    pub fn load_with_env(&self, env: &HashMap<String, String>) -> Result<EsgConfig> {
        let mut config = self.file.load()?.unwrap_or_default();
        apply_env_overrides(&mut config, env);
        tracing::debug!(path = %self.file.path().display(), "Loaded configuration");
        Ok(config)
    }

    /// Writes `config` to disk. Returns `false` without writing if a file
    /// already exists and `overwrite` is not set.
    pub fn write(&self, config: &EsgConfig, overwrite: bool) -> Result<bool> {
        if self.file.path().exists() && !overwrite {
            return Ok(false);
        }
        self.file.save(config)?;
        tracing::info!(path = %self.file.path().display(), "Wrote configuration");
        Ok(true)
    }
}

fn apply_env_overrides(config: &mut EsgConfig, env: &HashMap<String, String>) {
    let non_empty = |name: &str| env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(user) = non_empty(ENV_USER) {
        config.user = Some(user.to_string());
    }
    if let Some(url) = non_empty(ENV_SCORING_URL) {
        config.scoring.base_url = url.to_string();
    }
    if let Some(dir) = non_empty(ENV_DATA_DIR) {
        config.storage.data_dir = Some(PathBuf::from(dir));
    }
}
