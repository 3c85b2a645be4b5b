//! Wiring of stores, repositories and services from the configuration.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use esg_application::{ReportComposer, ReportService};
use esg_core::config::EsgConfig;
use esg_core::storage::{KeyValueStore, StorageNamespace};
use esg_infrastructure::{
    ConfigService, EsgPaths, FileKeyValueStore, KvHistoryRepository, KvModelNameRepository,
    KvSelectionRepository,
};
use esg_scoring::HttpScoringClient;

pub struct AppContext {
    pub config: EsgConfig,
    pub config_service: ConfigService,
    paths: EsgPaths,
}

impl AppContext {
    /// Loads the configuration; `user` overrides the configured user.
    pub fn load(config_path: Option<PathBuf>, user: Option<String>) -> Result<Self> {
        let paths = EsgPaths::default();
        let config_service = match config_path {
            Some(path) => ConfigService::at(path),
            None => ConfigService::new(&paths)?,
        };
        let mut config = config_service
            .load()
            .with_context(|| format!("Failed to load {}", config_service.path().display()))?;
        if user.is_some() {
            config.user = user;
        }

        Ok(Self {
            config,
            config_service,
            paths,
        })
    }

    pub fn namespace(&self) -> StorageNamespace {
        StorageNamespace::new(self.config.user.as_deref())
    }

    fn store(&self) -> Result<Arc<dyn KeyValueStore>> {
        let dir = match &self.config.storage.data_dir {
            Some(dir) => dir.clone(),
            None => self.paths.store_dir()?,
        };
        let store = FileKeyValueStore::new(dir.clone())
            .with_context(|| format!("Failed to open store at {}", dir.display()))?;
        Ok(Arc::new(store))
    }

    /// Builds the report service for the current user.
    pub fn report_service(&self) -> Result<ReportService> {
        let store = self.store()?;
        let namespace = self.namespace();
        tracing::debug!(user = namespace.user_id(), "Opening report service");

        let scoring = Arc::new(HttpScoringClient::from_settings(&self.config.scoring)?);
        let history = Arc::new(KvHistoryRepository::new(store.clone(), &namespace));
        let selections = Arc::new(KvSelectionRepository::new(store.clone(), &namespace));
        let model_names = Arc::new(KvModelNameRepository::new(store));

        let composer = ReportComposer::new(scoring, history.clone())
            .with_model_names(model_names.clone())
            .with_default_name(self.config.report.default_combined_name.clone());

        Ok(ReportService::new(selections, history, composer).with_model_names(model_names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_core::selection::MetricSelection;
    use tempfile::TempDir;

    fn selection(key: &str) -> MetricSelection {
        MetricSelection {
            unique_key: key.to_string(),
            metric_label: "Water".to_string(),
            categories_label: String::new(),
            categories_uri: String::new(),
            model_uri: "esg:model_water".to_string(),
            industry: "Semiconductors".to_string(),
            metric_year: "2022-12-31".to_string(),
            company: "Soitec SA".to_string(),
            selected_input: "WATER".to_string(),
            selected_pca: String::new(),
            model_label: None,
        }
    }

    #[tokio::test]
    async fn test_selections_persist_in_configured_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let mut config = EsgConfig::default();
        config.storage.data_dir = Some(temp_dir.path().join("store"));
        ConfigService::at(config_path.clone())
            .write(&config, false)
            .unwrap();

        let ctx = AppContext::load(Some(config_path.clone()), Some("bob".to_string())).unwrap();
        assert_eq!(ctx.namespace().user_id(), "bob");
        ctx.report_service()
            .unwrap()
            .add_selection(selection("k1"))
            .await
            .unwrap();

        // A fresh context sees the same working set.
        let ctx = AppContext::load(Some(config_path), Some("bob".to_string())).unwrap();
        let listed = ctx.report_service().unwrap().list_selections().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].categories_label, "Water");
    }
}
