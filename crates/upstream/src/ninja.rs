//! Taxonomy lookup against the API Ninjas `/v1/animals` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use menagerie_core::taxonomy::{find_exact_match, LookupError, TaxonomyLookup, TaxonomyRecord};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "X-Api-Key";

/// Client for the animal-data source.
pub struct NinjaClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl NinjaClient {
    /// Build a client for `url` (the full `/v1/animals` endpoint) with a
    /// per-request timeout.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        })
    }

    async fn fetch_candidates(&self, name: &str) -> Result<Vec<serde_json::Value>, LookupError> {
        let response = self
            .client
            .get(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("name", name)])
            .send()
            .await
            .map_err(|e| LookupError(format!("API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError(format!("API response code {}", status.as_u16())));
        }

        response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| LookupError(format!("API response could not be decoded: {e}")))
    }
}

#[async_trait]
impl TaxonomyLookup for NinjaClient {
    async fn lookup(&self, name: &str) -> Result<Option<TaxonomyRecord>, LookupError> {
        let candidates = self.fetch_candidates(name).await?;
        tracing::debug!(name, candidates = candidates.len(), "Taxonomy lookup answered");
        Ok(find_exact_match(&candidates, name).map(|animal| TaxonomyRecord::from(&animal)))
    }
}
