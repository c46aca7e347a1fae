use super::SourceGateway;
use crate::config::{DEFAULT_SEED, DEFAULT_SOURCE_URL};
use crate::core::{DeckError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// RandomUser directory connection settings
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// API root, without the trailing slash
    pub base_url: String,

    /// Fixed seed so that the same page always yields the same records
    pub seed: String,

    /// Field groups the directory should leave out of each record
    pub excluded_fields: Vec<String>,

    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SOURCE_URL.to_string(),
            seed: DEFAULT_SEED.to_string(),
            excluded_fields: vec!["login".into(), "registered".into(), "nat".into()],
            timeout: Duration::from_secs(10),
        }
    }
}

impl SourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the seed
    pub fn seed(mut self, seed: &str) -> Self {
        self.seed = seed.to_string();
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn page_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    fn page_query(&self, page: u32, page_size: u32) -> Vec<(&'static str, String)> {
        vec![
            ("page", page.to_string()),
            ("results", page_size.to_string()),
            ("seed", self.seed.clone()),
            ("exc", self.excluded_fields.join(",")),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct PageEnvelope {
    results: Vec<Value>,
}

/// [`SourceGateway`] backed by the RandomUser HTTP API.
pub struct RandomUserSource {
    client: reqwest::Client,
    config: SourceConfig,
}

impl RandomUserSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeckError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }
}

#[async_trait]
impl SourceGateway for RandomUserSource {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<Value>> {
        if page == 0 {
            return Err(DeckError::InvalidRequest("page numbers start at 1".to_string()));
        }
        if page_size == 0 {
            return Err(DeckError::InvalidRequest("page size must be positive".to_string()));
        }

        debug!(page, page_size, "requesting user page");
        let response = self
            .client
            .get(self.config.page_url())
            .query(&self.config.page_query(page, page_size))
            .send()
            .await
            .map_err(|e| DeckError::SourceUnavailable(format!("Request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| DeckError::SourceUnavailable(format!("Directory responded with error: {}", e)))?;

        let envelope: PageEnvelope = response
            .json()
            .await
            .map_err(|e| DeckError::MalformedPayload(format!("Failed to decode page body: {}", e)))?;
        Ok(envelope.results)
    }
}
