//! Sibling service configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Endpoints and credentials for the sibling services this gateway proxies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalConfig {
    /// Base URL of the system-owner service (module catalog)
    #[serde(default = "default_system_owner_url")]
    pub system_owner_url: String,
    /// API key sent to the system-owner service
    #[serde(default)]
    pub system_owner_api_key: String,
    /// Base URL of the store-management service
    #[serde(default = "default_store_management_url")]
    pub store_management_url: String,
    /// API key sent to the store-management service
    #[serde(default)]
    pub store_management_api_key: String,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            system_owner_url: default_system_owner_url(),
            system_owner_api_key: String::new(),
            store_management_url: default_store_management_url(),
            store_management_api_key: String::new(),
        }
    }
}
