//! Unified path management for esg-report files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/esg-report/        # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/esg-report/   # Data directory
//! └── store/                   # FileKeyValueStore (one JSON file per key)
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "esg-report";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for esg_core::EsgError {
    fn from(e: PathError) -> Self {
        esg_core::EsgError::config(e.to_string())
    }
}

/// Path resolution, optionally rooted at a fixed base directory (for tests).
#[derive(Debug, Clone, Default)]
pub struct EsgPaths {
    base_dir: Option<PathBuf>,
}

impl EsgPaths {
    /// Creates a resolver. With `Some(base)`, config and data both live under `base`.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Returns the configuration directory (e.g., `~/.config/esg-report/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the data directory (e.g., `~/.local/share/esg-report/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the default FileKeyValueStore directory.
    pub fn store_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("store"))
    }
}
