//! Key-value store implementations.

pub mod atomic_file;
pub mod file_store;
pub mod memory_store;

pub use atomic_file::{AtomicFile, AtomicFileError, FileFormat};
pub use file_store::FileKeyValueStore;
pub use memory_store::InMemoryKeyValueStore;
