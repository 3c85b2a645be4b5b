//! Key-value storage capability and per-user key namespacing.

pub mod keys;
pub mod repository;

pub use keys::{GUEST_USER, MODEL_NAME_MAPPING_KEY, StorageNamespace};
pub use repository::{KeyValueStore, KeyValueStoreExt};
