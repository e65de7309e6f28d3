//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

pub mod auth;
pub mod external;
pub mod gateway;
pub mod server;

// Re-export all configuration types
pub use auth::*;
pub use external::*;
pub use gateway::*;
pub use server::*;

/// Default server host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default JWT expiration in seconds
pub fn default_jwt_expiration() -> u64 {
    86400 // 24 hours
}

/// Default API key header for machine-to-machine routes
pub fn default_api_key_header() -> String {
    "X-API-KEY".to_string()
}

/// Default role for newly created users
pub fn default_role() -> String {
    "EMPLOYEE_GENERAL".to_string()
}

/// Roles treated as administrative
pub fn default_admin_roles() -> Vec<String> {
    vec!["MANAGER".to_string(), "ADMIN".to_string()]
}

/// Default system-owner service URL
pub fn default_system_owner_url() -> String {
    "http://localhost:8082".to_string()
}

/// Default store-management service URL
pub fn default_store_management_url() -> String {
    "http://localhost:8090".to_string()
}

pub(crate) fn default_true() -> bool {
    true
}
