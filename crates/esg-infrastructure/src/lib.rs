pub mod config_service;
pub mod kv_history_repository;
pub mod kv_model_name_repository;
pub mod kv_selection_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::kv_history_repository::KvHistoryRepository;
pub use crate::kv_model_name_repository::KvModelNameRepository;
pub use crate::kv_selection_repository::KvSelectionRepository;
pub use crate::paths::EsgPaths;
pub use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore};
