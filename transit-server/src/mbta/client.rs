//! MBTA v3 API client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::MbtaError;
use super::models::{Alert, Station, Vehicle};
use super::types::{
    AlertAttributes, Document, PredictionAttributes, Resource, StopAttributes, VehicleAttributes,
};

/// Default base URL for the MBTA v3 API.
const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Route types covered: 0 = light rail (Green Line), 1 = subway.
const SUBWAY_ROUTE_TYPES: &str = "0,1";

/// Rapid transit routes tracked on the live map.
const TRACKED_ROUTES: &str = "Red,Orange,Blue,Green-B,Green-C,Green-D,Green-E";

/// Configuration for the MBTA client.
#[derive(Debug, Clone)]
pub struct MbtaConfig {
    /// API key for the x-api-key header; empty means anonymous (rate-limited)
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MbtaConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
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

/// Client for the MBTA v3 API.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
}

impl MbtaClient {
    /// Create a new MBTA client.
    pub fn new(config: MbtaConfig) -> Result<Self, MbtaError> {
        let mut headers = HeaderMap::new();

        if !config.api_key.is_empty() {
            let key = HeaderValue::from_str(&config.api_key).map_err(|_| MbtaError::InvalidApiKey)?;
            headers.insert(HeaderName::from_static("x-api-key"), key);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch all subway and light rail stops.
    pub async fn stations(&self) -> Result<Vec<Station>, MbtaError> {
        let stops: Vec<Resource<StopAttributes>> = self
            .fetch(
                "stops",
                &[
                    ("filter[route_type]", SUBWAY_ROUTE_TYPES),
                    ("include", "parent_station"),
                ],
            )
            .await?;

        Ok(stops.iter().map(Station::from_resource).collect())
    }

    /// Fetch raw upcoming predictions for a stop, soonest first.
    ///
    /// Left unshaped because the minutes countdown depends on when the
    /// prediction is read, not when it was fetched.
    pub async fn raw_predictions(
        &self,
        stop_id: &str,
    ) -> Result<Vec<Resource<PredictionAttributes>>, MbtaError> {
        self.fetch(
            "predictions",
            &[
                ("filter[stop]", stop_id),
                ("include", "route"),
                ("sort", "arrival_time"),
                ("page[limit]", "5"),
            ],
        )
        .await
    }

    /// Fetch active alerts affecting boarding or riding the subway.
    pub async fn alerts(&self) -> Result<Vec<Alert>, MbtaError> {
        let alerts: Vec<Resource<AlertAttributes>> = self
            .fetch(
                "alerts",
                &[
                    ("filter[activity]", "BOARD,RIDE"),
                    ("filter[route_type]", SUBWAY_ROUTE_TYPES),
                ],
            )
            .await?;

        Ok(alerts.iter().map(Alert::from_resource).collect())
    }

    /// Fetch live positions of rapid transit vehicles.
    pub async fn vehicles(&self) -> Result<Vec<Vehicle>, MbtaError> {
        let vehicles: Vec<Resource<VehicleAttributes>> = self
            .fetch(
                "vehicles",
                &[("filter[route]", TRACKED_ROUTES), ("include", "route")],
            )
            .await?;

        Ok(vehicles.iter().map(Vehicle::from_resource).collect())
    }

    async fn fetch<A: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<Resource<A>>, MbtaError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "requesting MBTA resource");

        let response = self.http.get(&url).query(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MbtaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let document: Document<A> =
            serde_json::from_str(&body).map_err(|e| MbtaError::Json {
                message: e.to_string(),
            })?;

        Ok(document.data)
    }
}
