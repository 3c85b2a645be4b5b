//! Storage key naming.
//!
//! Selections and history are namespaced by the current user so that two
//! people sharing one data directory never see each other's working set.

/// User identifier used when nobody is signed in.
pub const GUEST_USER: &str = "guest";

/// Global (not per-user) cache of model URI to human-readable label.
pub const MODEL_NAME_MAPPING_KEY: &str = "model_name_mapping";

const SELECTION_KEY_PREFIX: &str = "report_metrics_";
const HISTORY_KEY_PREFIX: &str = "report_history_";

/// Resolves the storage keys owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageNamespace {
    user_id: String,
}

impl StorageNamespace {
    /// Creates a namespace for `user_id`, falling back to [`GUEST_USER`] when
    /// the id is missing or blank.
    pub fn new(user_id: Option<&str>) -> Self {
        let user_id = user_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(GUEST_USER)
            .to_string();
        Self { user_id }
    }

    /// Namespace for the unauthenticated user.
    pub fn guest() -> Self {
        Self::new(None)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Key holding the metric selection working set.
    pub fn selection_key(&self) -> String {
        format!("{}{}", SELECTION_KEY_PREFIX, self.user_id)
    }

    /// Key holding the newest-first history list.
    pub fn history_key(&self) -> String {
        format!("{}{}", HISTORY_KEY_PREFIX, self.user_id)
    }
}

impl Default for StorageNamespace {
    fn default() -> Self {
        Self::guest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_for_named_user() {
        let ns = StorageNamespace::new(Some("alice"));
        assert_eq!(ns.selection_key(), "report_metrics_alice");
        assert_eq!(ns.history_key(), "report_history_alice");
    }

    #[test]
    fn test_guest_fallback() {
        assert_eq!(StorageNamespace::new(None).user_id(), "guest");
        assert_eq!(StorageNamespace::new(Some("   ")).user_id(), "guest");
        assert_eq!(StorageNamespace::default().history_key(), "report_history_guest");
    }
}
