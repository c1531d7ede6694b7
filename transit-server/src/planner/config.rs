//! Ranking configuration for the itinerary engine.

use chrono::Duration;

use crate::domain::SpeedTable;

/// Configuration parameters for itinerary ranking.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct RankConfig {
    /// Walking speed for each profile.
    pub speeds: SpeedTable,

    /// Walking speed the directions provider assumes (m/s).
    /// Used to back the provider's own walk estimate out of its durations.
    pub baseline_speed: f64,

    /// Safety margin required between reaching the platform and the
    /// vehicle's scheduled departure (seconds).
    pub boarding_buffer_secs: i64,

    /// Maximum number of itineraries to return.
    pub max_results: usize,

    /// Qualifier appended to free-text locations (e.g. "Boston, MA").
    pub region: String,
}

impl RankConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        speeds: SpeedTable,
        baseline_speed: f64,
        boarding_buffer_secs: i64,
        max_results: usize,
        region: impl Into<String>,
    ) -> Self {
        Self {
            speeds,
            baseline_speed,
            boarding_buffer_secs,
            max_results,
            region: region.into(),
        }
    }

    /// Set the region qualifier.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Returns the boarding buffer as a Duration.
    pub fn boarding_buffer(&self) -> Duration {
        Duration::seconds(self.boarding_buffer_secs)
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            speeds: SpeedTable::default(),
            baseline_speed: 1.4,
            boarding_buffer_secs: 60,
            max_results: 3,
            region: "Boston, MA".to_string(),
        }
    }
}
