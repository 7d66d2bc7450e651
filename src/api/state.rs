//! Application state for the Estimate Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::store::ProjectStore;

/// Shared application state.
///
/// Holds the loaded estimator configuration and the saved-project store.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    projects: Arc<RwLock<ProjectStore>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader
    /// and an empty project store.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            projects: Arc::new(RwLock::new(ProjectStore::new())),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared project store.
    pub fn projects(&self) -> &RwLock<ProjectStore> {
        &self.projects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_clones_share_the_project_store() {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        let state = AppState::new(config);
        let clone = state.clone();

        assert!(Arc::ptr_eq(&state.projects, &clone.projects));
        assert!(clone.projects().read().await.is_empty());
    }
}
