//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{PlazaError, Result};
use tracing::{info, warn};

/// Default configuration file location
const CONFIG_PATH: &str = "config/gateway.yaml";

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| PlazaError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
///
/// Tries `config/gateway.yaml` first, then the `PLAZA_*` environment
/// variables. A missing file is not fatal; an invalid one is.
pub async fn run_server() -> Result<()> {
    info!("Starting plaza gateway");

    let config = if std::path::Path::new(CONFIG_PATH).exists() {
        info!("Loading configuration file: {}", CONFIG_PATH);
        Config::from_file(CONFIG_PATH).await?
    } else {
        warn!(
            "Configuration file {} not found, falling back to environment variables",
            CONFIG_PATH
        );
        Config::from_env()?
    };

    let server = HttpServer::new(&config).await?;
    info!(
        "Server starting at: http://{}",
        config.server().address()
    );

    server.start().await
}
