//! Mock directions client for running without an API key.
//!
//! Loads a sample directions response from a JSON file and serves it for
//! every query. Transit timestamps in the file are offsets in seconds from
//! the moment of the request, so the sample stays catchable however long
//! ago it was recorded.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;

use crate::planner::DirectionsProvider;

use super::error::DirectionsError;
use super::types::{DirectionsQuery, DirectionsResponse, TimeValue};

/// Mock directions client that serves a canned response.
#[derive(Debug, Clone)]
pub struct MockDirectionsClient {
    response: Arc<DirectionsResponse>,
}

impl MockDirectionsClient {
    /// Load a canned response from a JSON file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DirectionsError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| {
            DirectionsError::MockData(format!("failed to read {}: {e}", path.display()))
        })?;

        let response: DirectionsResponse = serde_json::from_str(&json).map_err(|e| {
            DirectionsError::MockData(format!("failed to parse {}: {e}", path.display()))
        })?;

        Ok(Self::from_response(response))
    }

    /// Serve an already-parsed response.
    pub fn from_response(response: DirectionsResponse) -> Self {
        Self {
            response: Arc::new(response),
        }
    }

    /// The canned response with transit times shifted to start at `now_secs`.
    pub fn response_at(&self, now_secs: i64) -> DirectionsResponse {
        let mut response = (*self.response).clone();

        let shift = |t: &mut Option<TimeValue>| {
            if let Some(t) = t {
                t.value += now_secs;
            }
        };

        for leg in response.routes.iter_mut().flat_map(|r| r.legs.iter_mut()) {
            for details in leg.steps.iter_mut().filter_map(|s| s.transit_details.as_mut()) {
                shift(&mut details.departure_time);
                shift(&mut details.arrival_time);
            }
        }

        response
    }
}

impl DirectionsProvider for MockDirectionsClient {
    async fn fetch_alternatives(
        &self,
        _query: &DirectionsQuery,
    ) -> Result<DirectionsResponse, DirectionsError> {
        Ok(self.response_at(Utc::now().timestamp()))
    }
}
