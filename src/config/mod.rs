//! Configuration management for the gateway
//!
//! This module handles loading and validation of all gateway configuration.
//! Configuration is loaded once at startup and passed by constructor
//! injection; there is no global mutable configuration state.

pub mod models;

pub use models::*;

use crate::utils::error::{PlazaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PlazaError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| PlazaError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let gateway = GatewayConfig::from_env()?;
        let config = Self { gateway };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.gateway.auth
    }

    /// Get sibling service configuration
    pub fn external(&self) -> &ExternalConfig {
        &self.gateway.external
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| PlazaError::Config(format!("Server config error: {}", e)))?;

        self.gateway
            .auth
            .validate()
            .map_err(|e| PlazaError::Config(format!("Auth config error: {}", e)))?;

        self.gateway
            .server
            .cors
            .validate()
            .map_err(|e| PlazaError::Config(format!("CORS config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_config_from_file() {
        let config_content = r#"
gateway:
  server:
    host: "127.0.0.1"
    port: 9090
    cors:
      enabled: true
  auth:
    jwt_secret: "test-secret-that-is-at-least-32-characters-long"
    jwt_expiration: 3600
    external_api_key: "sibling-shared-secret"
  external:
    system_owner_url: "http://localhost:8082"
    store_management_url: "http://localhost:8090"
  seed:
    enabled: false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::from_file(temp_file.path()).await.unwrap();

        assert_eq!(config.server().host, "127.0.0.1");
        assert_eq!(config.server().port, 9090);
        assert_eq!(config.auth().jwt_expiration, 3600);
        assert_eq!(config.auth().external_api_key, "sibling-shared-secret");
        assert!(!config.gateway.seed.enabled);
    }

    #[tokio::test]
    async fn test_config_from_file_rejects_weak_secret() {
        let config_content = r#"
gateway:
  auth:
    jwt_secret: "short"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        assert!(Config::from_file(temp_file.path()).await.is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }
}
