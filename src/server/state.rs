//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::services::{ExternalSystemClient, StoreManagementClient};
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across workers.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication system
    pub auth: Arc<AuthSystem>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// System-owner service client (module catalog)
    pub modules: Arc<ExternalSystemClient>,
    /// Store-management service client
    pub store_mgmt: Arc<StoreManagementClient>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Config,
        auth: AuthSystem,
        storage: Arc<StorageLayer>,
        modules: ExternalSystemClient,
        store_mgmt: StoreManagementClient,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            storage,
            modules: Arc::new(modules),
            store_mgmt: Arc::new(store_mgmt),
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
