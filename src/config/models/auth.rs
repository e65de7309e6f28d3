//! Authentication configuration

use super::*;
use crate::utils::crypto::generate_token;
use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// Header name carrying the machine-to-machine API key
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    /// Shared secret expected on external machine routes
    #[serde(default)]
    pub external_api_key: String,
    /// RBAC configuration
    #[serde(default)]
    pub rbac: RbacConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_secret(),
            jwt_expiration: default_jwt_expiration(),
            api_key_header: default_api_key_header(),
            external_api_key: generate_secure_secret(),
            rbac: RbacConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long for security".to_string());
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err(
                "JWT secret must not use default values. Please generate a secure random secret."
                    .to_string(),
            );
        }

        if self.jwt_expiration < 300 {
            return Err("JWT expiration should be at least 5 minutes (300 seconds)".to_string());
        }

        if self.jwt_expiration > 86400 * 30 {
            return Err(
                "JWT expiration should not exceed 30 days for security reasons".to_string(),
            );
        }

        if self.api_key_header.is_empty() {
            return Err("API key header name cannot be empty".to_string());
        }

        Ok(())
    }
}

/// RBAC configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Default role for new users
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Roles treated as administrative
    #[serde(default = "default_admin_roles")]
    pub admin_roles: Vec<String>,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            default_role: default_role(),
            admin_roles: default_admin_roles(),
        }
    }
}

/// Generate a secure random secret
fn generate_secure_secret() -> String {
    generate_token(64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AuthConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = AuthConfig {
            jwt_secret: "too-short".to_string(),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_placeholder_secret_rejected() {
        let config = AuthConfig {
            jwt_secret: "change-me".to_string(),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expiration_bounds() {
        let mut config = AuthConfig::default();

        config.jwt_expiration = 60;
        assert!(config.validate().is_err());

        config.jwt_expiration = 86400 * 60;
        assert!(config.validate().is_err());

        config.jwt_expiration = 3600;
        assert!(config.validate().is_ok());
    }
}
