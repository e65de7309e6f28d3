//! Main gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Sibling service configuration
    #[serde(default)]
    pub external: ExternalConfig,
    /// Startup seeding configuration
    #[serde(default)]
    pub seed: SeedConfig,
}

impl GatewayConfig {
    /// Build configuration from `PLAZA_*` environment variables
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("PLAZA_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("PLAZA_PORT") {
            config.server.port = port.parse().map_err(|e| {
                crate::utils::error::PlazaError::config(format!("Invalid PLAZA_PORT: {}", e))
            })?;
        }
        if let Ok(secret) = std::env::var("PLAZA_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Ok(expiration) = std::env::var("PLAZA_JWT_EXPIRATION") {
            config.auth.jwt_expiration = expiration.parse().map_err(|e| {
                crate::utils::error::PlazaError::config(format!(
                    "Invalid PLAZA_JWT_EXPIRATION: {}",
                    e
                ))
            })?;
        }
        if let Ok(key) = std::env::var("PLAZA_EXTERNAL_API_KEY") {
            config.auth.external_api_key = key;
        }
        if let Ok(url) = std::env::var("PLAZA_SYSTEM_OWNER_URL") {
            config.external.system_owner_url = url;
        }
        if let Ok(key) = std::env::var("PLAZA_SYSTEM_OWNER_API_KEY") {
            config.external.system_owner_api_key = key;
        }
        if let Ok(url) = std::env::var("PLAZA_STORE_MANAGEMENT_URL") {
            config.external.store_management_url = url;
        }
        if let Ok(key) = std::env::var("PLAZA_STORE_MANAGEMENT_API_KEY") {
            config.external.store_management_api_key = key;
        }
        if let Ok(enabled) = std::env::var("PLAZA_SEED_ENABLED") {
            config.seed.enabled = matches!(enabled.as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }
}

/// Startup seeding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Populate empty tables with the demo catalog at startup
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
