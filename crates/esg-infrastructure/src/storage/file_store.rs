//! File-backed KeyValueStore.
//!
//! Directory structure:
//! ```text
//! data_dir/
//! ├── report_metrics_guest.json
//! ├── report_history_guest.json
//! └── model_name_mapping.json
//! ```

use super::atomic_file::AtomicFile;
use async_trait::async_trait;
use esg_core::error::{EsgError, Result};
use esg_core::storage::KeyValueStore;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// KeyValueStore persisting one JSON file per key.
///
/// Writes go through [`AtomicFile`], so a failed write never leaves a torn
/// file behind. Blocking file I/O runs on the blocking thread pool.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir).map_err(|e| {
            EsgError::io(format!(
                "Failed to create store directory {}: {}",
                base_dir.display(),
                e
            ))
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_for(&self, key: &str) -> AtomicFile<Value> {
        AtomicFile::json(self.base_dir.join(format!("{}.json", sanitize_key(key))))
    }
}

/// Maps a key to a file-safe stem.
///
/// ASCII alphanumerics, `_` and `-` are kept; every other character becomes
/// `%XX` per UTF-8 byte so distinct keys never share a file.
fn sanitize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| EsgError::internal(format!("Failed to join task: {}", e)))?
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let file = self.file_for(key);
        run_blocking(move || file.load().map_err(EsgError::from)).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let file = self.file_for(key);
        let key = key.to_string();
        run_blocking(move || {
            file.save(&value).map_err(|e| {
                tracing::error!(key = %key, error = %e, "Failed to write store file");
                EsgError::persistence(format!("Failed to write '{}': {}", key, e))
            })
        })
        .await?;
        tracing::debug!("Stored key in {}", self.base_dir.display());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let file = self.file_for(key);
        let key = key.to_string();
        run_blocking(move || {
            file.remove()
                .map_err(|e| EsgError::persistence(format!("Failed to delete '{}': {}", key, e)))
        })
        .await
    }
}
