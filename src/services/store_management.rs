//! Client for the sibling store-management service
//!
//! Stores and store-owner profiles created here are mirrored into the
//! store-management system. Callers treat failures as non-fatal: the local
//! record is the source of truth and the mirror call is retried by hand when
//! needed.

use crate::config::ExternalConfig;
use crate::utils::error::{PlazaError, Result};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the store-management service
#[derive(Debug, Clone)]
pub struct StoreManagementClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl StoreManagementClient {
    /// Create a new client from sibling service configuration
    pub fn new(config: &ExternalConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: config
                .store_management_url
                .trim_end_matches('/')
                .to_string(),
            api_key: if config.store_management_api_key.is_empty() {
                None
            } else {
                Some(config.store_management_api_key.clone())
            },
            http,
        })
    }

    /// Mirror a newly created store into the store-management system
    ///
    /// Returns the sibling's response body; a present `externalId` field is
    /// the sibling's key for the store.
    pub async fn create_store(&self, store_data: &serde_json::Value) -> Result<serde_json::Value> {
        let url = format!("{}/api/Locales", self.base_url);
        self.post_json(&url, store_data).await
    }

    /// Mirror a store-owner profile into the store-management system
    pub async fn create_store_owner_profile(
        &self,
        store_external_id: &str,
        owner_data: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let url = format!("{}/api/stores/{}/owner", self.base_url, store_external_id);
        self.post_json(&url, owner_data).await
    }

    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        debug!("Posting to store management: {}", url);

        let mut request = self.http.post(url).json(body);
        if let Some(api_key) = &self.api_key {
            request = request.header("X-API-KEY", api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            warn!(
                "Store-management service returned {} for {}",
                response.status(),
                url
            );
            return Err(PlazaError::external(format!(
                "Store-management service returned {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}
