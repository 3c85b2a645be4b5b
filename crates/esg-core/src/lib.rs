pub mod config;
pub mod error;
pub mod history;
pub mod report;
pub mod score;
pub mod selection;
pub mod serde_compat;
pub mod storage;

// Re-export common error type
pub use error::{EsgError, Result};
