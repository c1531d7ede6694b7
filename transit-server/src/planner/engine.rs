//! Itinerary feasibility and ranking engine.
//!
//! Asks the directions provider for alternative transit itineraries, drops
//! those the caller cannot catch at their walking speed, recomputes arrival
//! times for the rest, and returns the earliest arrivals first.

use std::future::Future;

use chrono::{DateTime, FixedOffset};
use tracing::{debug, info, warn};

use crate::directions::{DirectionsError, DirectionsQuery, DirectionsResponse, convert_routes};
use crate::domain::{DomainError, Itinerary, Location, SpeedProfile};

use super::arrival::ArrivalEstimate;
use super::config::RankConfig;
use super::feasibility::{Approach, FeasibilityDecision};
use super::format;
use super::rank::{RankedItinerary, rank_by_arrival};

/// Error from itinerary ranking.
#[derive(Debug, thiserror::Error)]
pub enum RankError {
    /// Origin or destination could not be turned into a query
    #[error("invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    /// Provider answered with a non-success status (e.g. `ZERO_RESULTS`)
    #[error("directions provider returned {status}")]
    ProviderStatus {
        status: String,
        message: Option<String>,
    },

    /// Provider could not be reached, timed out, or sent garbage
    #[error("directions provider unavailable: {0}")]
    ProviderUnavailable(#[from] DirectionsError),
}

/// Source of candidate itineraries.
///
/// This abstraction allows the engine to be tested with canned responses.
pub trait DirectionsProvider {
    /// Fetch alternative itineraries for a query.
    ///
    /// Implementations make at most one attempt and never retry.
    fn fetch_alternatives(
        &self,
        query: &DirectionsQuery,
    ) -> impl Future<Output = Result<DirectionsResponse, DirectionsError>> + Send;
}

/// Request for itinerary ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankRequest {
    pub origin: Location,
    pub destination: Location,
    pub profile: SpeedProfile,
}

impl RankRequest {
    /// Create a new ranking request.
    pub fn new(origin: Location, destination: Location, profile: SpeedProfile) -> Self {
        Self {
            origin,
            destination,
            profile,
        }
    }

    /// Render the provider query, validating both endpoints.
    pub fn to_query(&self, region: &str) -> Result<DirectionsQuery, DomainError> {
        let origin = self.origin.to_query(region)?;
        let destination = self.destination.to_query(region)?;
        Ok(DirectionsQuery::transit(origin, destination))
    }
}

/// Itinerary ranker backed by a directions provider.
pub struct ItineraryRanker<'a, P: DirectionsProvider> {
    provider: &'a P,
    config: &'a RankConfig,
}

impl<'a, P: DirectionsProvider + Sync> ItineraryRanker<'a, P> {
    /// Create a new ranker.
    pub fn new(provider: &'a P, config: &'a RankConfig) -> Self {
        Self { provider, config }
    }

    /// Rank the catchable itineraries between two locations.
    ///
    /// `now` is the request instant; it decides which vehicles are still
    /// catchable and is the base for all recomputed times. Returns at most
    /// `max_results` itineraries, earliest arrival first. An empty result is
    /// a success: the provider answered, but nothing was catchable.
    pub async fn rank_feasible_itineraries(
        &self,
        request: &RankRequest,
        now: DateTime<FixedOffset>,
    ) -> Result<Vec<RankedItinerary>, RankError> {
        let query = request.to_query(&self.config.region)?;

        info!(
            origin = %query.origin,
            destination = %query.destination,
            profile = %request.profile,
            "ranking itineraries"
        );

        let response = self.provider.fetch_alternatives(&query).await?;

        if !response.is_ok() {
            return Err(RankError::ProviderStatus {
                status: response.status,
                message: response.error_message,
            });
        }

        let candidates = convert_routes(&response);
        let ranked = rank_candidates(&candidates, request.profile, self.config, now);

        info!(
            candidates = response.routes.len(),
            returned = ranked.len(),
            "ranked itineraries"
        );

        Ok(ranked)
    }
}

/// Filter, recompute and rank already-converted candidates.
pub fn rank_candidates(
    candidates: &[Itinerary],
    profile: SpeedProfile,
    config: &RankConfig,
    now: DateTime<FixedOffset>,
) -> Vec<RankedItinerary> {
    let admitted = candidates
        .iter()
        .filter_map(|it| evaluate_itinerary(it, profile, config, now))
        .collect();

    rank_by_arrival(admitted, config.max_results)
}

/// Evaluate one candidate: `None` if it cannot be caught, otherwise the
/// itinerary with recomputed timing and display text.
pub fn evaluate_itinerary(
    itinerary: &Itinerary,
    profile: SpeedProfile,
    config: &RankConfig,
    now: DateTime<FixedOffset>,
) -> Option<RankedItinerary> {
    let Some(approach) = Approach::plan(itinerary, profile, &config.speeds, now) else {
        warn!(route = itinerary.index, "dropping itinerary with unrepresentable walk time");
        return None;
    };

    if approach.assess(config.boarding_buffer()) == FeasibilityDecision::Reject {
        debug!(
            route = itinerary.index,
            walk_secs = approach.walk_seconds,
            boarding_point = approach.boarding_point(),
            "dropping uncatchable itinerary"
        );
        return None;
    }

    let Some(estimate) =
        ArrivalEstimate::compute(itinerary, &approach, config.baseline_speed, now)
    else {
        warn!(route = itinerary.index, "dropping itinerary with unrepresentable arrival");
        return None;
    };
    let duration_mins = estimate.duration_mins();

    Some(RankedItinerary {
        index: itinerary.index,
        arrival: estimate.arrival,
        duration_mins,
        summary: format::summary(itinerary),
        distance: itinerary.distance_text.clone(),
        duration: format::duration_text(duration_mins),
        time_range: format::time_range(&estimate.arrival),
        countdown: format::countdown(approach.scheduled_departure(), now),
        station_eta: format::station_eta(approach.boarding_point(), &approach.platform_arrival),
        steps: format::steps(itinerary),
        path: format::decode_path(itinerary.polyline.as_deref()),
    })
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
