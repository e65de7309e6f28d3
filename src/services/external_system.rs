//! Client for the sibling system-owner service
//!
//! The system owner holds the module catalog that plazas subscribe to. Module
//! lookups are best-effort: callers degrade to an empty list on failure so a
//! dead sibling never breaks the login flow.

use crate::config::ExternalConfig;
use crate::utils::error::{PlazaError, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP client for the system-owner service
#[derive(Debug, Clone)]
pub struct ExternalSystemClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl ExternalSystemClient {
    /// Create a new client from sibling service configuration
    pub fn new(config: &ExternalConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: config.system_owner_url.trim_end_matches('/').to_string(),
            api_key: if config.system_owner_api_key.is_empty() {
                None
            } else {
                Some(config.system_owner_api_key.clone())
            },
            http,
        })
    }

    /// Fetch the modules available to a plaza
    ///
    /// With an external plaza id the plaza-specific listing is requested;
    /// without one the full catalog is returned.
    pub async fn get_plaza_modules(
        &self,
        plaza_external_id: Option<&str>,
    ) -> Result<Vec<serde_json::Value>> {
        let url = match plaza_external_id {
            Some(external_id) if !external_id.is_empty() => {
                format!("{}/api/modulos/plaza/{}", self.base_url, external_id)
            }
            _ => format!("{}/api/modulos", self.base_url),
        };
        debug!("Fetching modules from: {}", url);

        let mut request = self.http.get(&url);
        if let Some(api_key) = &self.api_key {
            request = request.header("X-API-KEY", api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            warn!(
                "System-owner service returned {} for {}",
                response.status(),
                url
            );
            return Err(PlazaError::external(format!(
                "System-owner service returned {}",
                response.status()
            )));
        }

        let modules: Vec<serde_json::Value> = response.json().await?;
        info!("Fetched {} modules from system owner", modules.len());
        Ok(modules)
    }
}
