//! Caching layer for MBTA API responses.
//!
//! The stop list barely changes, so it is held for an hour. Predictions go
//! stale quickly and are held per stop for a few seconds, stored unshaped so
//! each read recomputes the minutes countdown against the current instant.
//! Alerts and vehicles are always fetched fresh.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::mbta::{
    Alert, MbtaClient, MbtaError, Prediction, PredictionAttributes, Resource, Station, Vehicle,
    reshape_predictions,
};

/// Cached raw predictions for one stop.
type PredictionEntry = Arc<Vec<Resource<PredictionAttributes>>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the station list.
    pub stations_ttl: Duration,

    /// TTL for per-stop predictions.
    pub predictions_ttl: Duration,

    /// Maximum number of stops with cached predictions.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stations_ttl: Duration::from_secs(60 * 60),
            predictions_ttl: Duration::from_secs(20),
            max_capacity: 1000,
        }
    }
}

/// Cache for MBTA API responses.
pub struct MbtaCache {
    /// The full station list, under a single key.
    stations: MokaCache<(), Arc<Vec<Station>>>,

    /// Raw predictions keyed by stop ID.
    predictions: MokaCache<String, PredictionEntry>,
}

impl MbtaCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let stations = MokaCache::builder()
            .time_to_live(config.stations_ttl)
            .max_capacity(1)
            .build();

        let predictions = MokaCache::builder()
            .time_to_live(config.predictions_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            stations,
            predictions,
        }
    }

    pub async fn get_stations(&self) -> Option<Arc<Vec<Station>>> {
        self.stations.get(&()).await
    }

    pub async fn insert_stations(&self, stations: Arc<Vec<Station>>) {
        self.stations.insert((), stations).await;
    }

    pub async fn get_predictions(&self, stop_id: &str) -> Option<PredictionEntry> {
        self.predictions.get(stop_id).await
    }

    pub async fn insert_predictions(&self, stop_id: String, entry: PredictionEntry) {
        self.predictions.insert(stop_id, entry).await;
    }
}

/// MBTA client with caching.
///
/// Wraps an `MbtaClient` and caches stations and predictions.
pub struct CachedMbtaClient {
    client: MbtaClient,
    cache: MbtaCache,
}

impl CachedMbtaClient {
    /// Create a new cached client.
    pub fn new(client: MbtaClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: MbtaCache::new(cache_config),
        }
    }

    /// Get all stations, using the cache if available.
    pub async fn stations(&self) -> Result<Arc<Vec<Station>>, MbtaError> {
        if let Some(cached) = self.cache.get_stations().await {
            return Ok(cached);
        }

        let stations = Arc::new(self.client.stations().await?);
        debug!(count = stations.len(), "cached station list");
        self.cache.insert_stations(stations.clone()).await;

        Ok(stations)
    }

    /// Get predictions for a stop relative to `now`, using the cache if
    /// available.
    pub async fn predictions(
        &self,
        stop_id: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<Prediction>, MbtaError> {
        if let Some(cached) = self.cache.get_predictions(stop_id).await {
            return Ok(reshape_predictions(&cached, now));
        }

        let raw = Arc::new(self.client.raw_predictions(stop_id).await?);
        self.cache
            .insert_predictions(stop_id.to_string(), raw.clone())
            .await;

        Ok(reshape_predictions(&raw, now))
    }

    /// Get active alerts (never cached).
    pub async fn alerts(&self) -> Result<Vec<Alert>, MbtaError> {
        self.client.alerts().await
    }

    /// Get live vehicle positions (never cached).
    pub async fn vehicles(&self) -> Result<Vec<Vehicle>, MbtaError> {
        self.client.vehicles().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mbta::MbtaConfig;
    use chrono::TimeZone;
    use serde_json::json;

    fn station(id: &str) -> Station {
        Station {
            id: id.to_string(),
            name: "Park Street".to_string(),
            lat: 42.356,
            lng: -71.062,
            routes: vec!["Red".to_string()],
        }
    }

    fn unreachable_client() -> CachedMbtaClient {
        let client = MbtaClient::new(
            MbtaConfig::new("")
                .with_base_url("http://127.0.0.1:9")
                .with_timeout(1),
        )
        .unwrap();
        CachedMbtaClient::new(client, &CacheConfig::default())
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.stations_ttl, Duration::from_secs(3600));
        assert_eq!(config.predictions_ttl, Duration::from_secs(20));
        assert_eq!(config.max_capacity, 1000);
    }

    #[tokio::test]
    async fn cached_stations_served_without_upstream() {
        let cached = unreachable_client();
        cached
            .cache
            .insert_stations(Arc::new(vec![station("place-pktrm")]))
            .await;

        let stations = cached.stations().await.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "place-pktrm");
    }

    #[tokio::test]
    async fn cached_predictions_recounted_on_read() {
        let cached = unreachable_client();
        let raw: Resource<PredictionAttributes> = serde_json::from_value(json!({
            "id": "pred-1",
            "attributes": {"arrival_time": "2023-11-14T17:10:00-05:00", "direction_id": 0}
        }))
        .unwrap();
        cached
            .cache
            .insert_predictions("70075".to_string(), Arc::new(vec![raw]))
            .await;

        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let early = tz.with_ymd_and_hms(2023, 11, 14, 17, 0, 0).unwrap();
        let later = tz.with_ymd_and_hms(2023, 11, 14, 17, 4, 0).unwrap();

        assert_eq!(cached.predictions("70075", early).await.unwrap()[0].minutes, 10);
        assert_eq!(cached.predictions("70075", later).await.unwrap()[0].minutes, 6);
    }

    #[tokio::test]
    async fn cache_miss_goes_upstream() {
        let cached = unreachable_client();
        let result = cached.predictions("70075", chrono::Local::now().fixed_offset()).await;
        assert!(matches!(result, Err(MbtaError::Http(_))));
    }
}
