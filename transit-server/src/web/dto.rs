//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Location, PathPoint, SpeedProfile};
use crate::planner::{RankRequest, RankedItinerary};

/// Request to rank transit itineraries.
#[derive(Debug, Deserialize)]
pub struct DirectionsRequest {
    /// Place name or `{lat, lng}`
    pub origin: Option<Location>,

    /// Place name or `{lat, lng}`
    pub destination: Option<Location>,

    /// `slow`, `normal` or `fast` (anything else means normal)
    pub walking_speed: Option<String>,
}

impl DirectionsRequest {
    /// Convert to an engine request, rejecting missing endpoints.
    pub fn into_rank_request(self) -> Result<RankRequest, DomainError> {
        let origin = self.origin.ok_or(DomainError::MissingLocation("origin"))?;
        let destination = self
            .destination
            .ok_or(DomainError::MissingLocation("destination"))?;
        let profile = SpeedProfile::parse_or_default(self.walking_speed.as_deref());

        Ok(RankRequest::new(origin, destination, profile))
    }
}

/// Success envelope: `{"success": true, "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure envelope: `{"success": false, "error": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub error: String,
}

impl ApiFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Bare error body, used by the speech endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// A single instruction line.
#[derive(Debug, Serialize)]
pub struct StepResult {
    /// May contain HTML markup from the directions provider
    pub instruction: String,
}

/// A ranked route option.
#[derive(Debug, Serialize)]
pub struct RouteOption {
    /// Position among the provider's alternatives
    pub id: usize,
    pub summary: String,
    pub distance: String,
    pub duration: String,
    pub time_range: String,
    pub countdown: String,
    pub station_eta: String,
    pub steps: Vec<StepResult>,
    pub path: Vec<PathPoint>,
}

impl RouteOption {
    pub fn from_ranked(ranked: RankedItinerary) -> Self {
        Self {
            id: ranked.index,
            summary: ranked.summary,
            distance: ranked.distance,
            duration: ranked.duration,
            time_range: ranked.time_range,
            countdown: ranked.countdown,
            station_eta: ranked.station_eta,
            steps: ranked
                .steps
                .into_iter()
                .map(|instruction| StepResult { instruction })
                .collect(),
            path: ranked.path,
        }
    }
}

/// Request to speak a phrase.
#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: String,
}
