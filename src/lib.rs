//! # Plaza Gateway
//!
//! Multi-tenant plaza (shopping-center) management backend: JWT
//! authentication, role-based authorization, tenant-scoped CRUD for plazas,
//! users, stores, bulletins and products, and shared-secret gated machine
//! routes proxying the sibling system-owner and store-management services.
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use plaza_gateway::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config).await?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use auth::jwt::TokenError;
pub use auth::{AuthSystem, Principal};
pub use config::Config;
pub use utils::error::{PlazaError, Result};

use tracing::info;

/// A minimal plaza gateway instance
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting Plaza Gateway");
        info!("Listening on {}", self.config.server().address());

        self.server.start().await?;

        Ok(())
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, "plaza-gateway");
    }
}
