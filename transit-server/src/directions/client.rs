//! Google Directions HTTP client.
//!
//! Provides an async method for requesting alternative transit routes.
//! Each call is bounded by the configured timeout and never retried.

use std::time::Duration;

use tracing::debug;

use crate::planner::DirectionsProvider;

use super::error::DirectionsError;
use super::types::{DirectionsQuery, DirectionsResponse};

/// Default endpoint for the Directions API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Endpoint URL (defaults to production Google Directions)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Directions API client.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DirectionsClient {
    /// Create a new directions client with the given configuration.
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Fetch alternative routes for a query.
    ///
    /// Returns the provider's response whatever its `status` field says;
    /// only transport failures and non-2xx HTTP responses are errors here.
    pub async fn get_routes(
        &self,
        query: &DirectionsQuery,
    ) -> Result<DirectionsResponse, DirectionsError> {
        debug!(origin = %query.origin, destination = %query.destination, "requesting directions");

        let mut params = query.params();
        params.push(("key", self.api_key.clone()));

        let response = self.http.get(&self.base_url).query(&params).send().await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl DirectionsProvider for DirectionsClient {
    async fn fetch_alternatives(
        &self,
        query: &DirectionsQuery,
    ) -> Result<DirectionsResponse, DirectionsError> {
        self.get_routes(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = DirectionsConfig::new("test-key")
            .with_base_url("http://localhost:8080/directions")
            .with_timeout(3);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080/directions");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn config_defaults() {
        let config = DirectionsConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation() {
        let client = DirectionsClient::new(DirectionsConfig::new("test-key"));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn unreachable_provider_is_error() {
        // Nothing listens on port 9 (discard) on a test machine
        let config = DirectionsConfig::new("test-key")
            .with_base_url("http://127.0.0.1:9/directions")
            .with_timeout(2);
        let client = DirectionsClient::new(config).unwrap();

        let result = client
            .get_routes(&DirectionsQuery::transit("a", "b"))
            .await;

        assert!(matches!(result, Err(DirectionsError::Http(_))));
    }
}
