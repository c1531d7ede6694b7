//! Directions provider client.
//!
//! This module provides an HTTP client for the Google Directions API,
//! which the ranking engine treats as a black-box source of candidate
//! transit itineraries.
//!
//! Key characteristics of the provider:
//! - A request with `alternatives=true` returns several candidate routes,
//!   ordered by the provider's own preference, not by arrival time
//! - Failures such as `ZERO_RESULTS` arrive as HTTP 200 with a non-`OK`
//!   `status` field
//! - Transit step times are epoch seconds

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{DirectionsClient, DirectionsConfig};
pub use convert::{ConversionError, convert_route, convert_routes};
pub use error::DirectionsError;
pub use mock::MockDirectionsClient;
pub use types::{
    DirectionsQuery, DirectionsResponse, LineDto, PolylineDto, RouteDto, RouteLegDto, StepDto,
    StopDto, TextValue, TimeValue, TransitDetailsDto,
};

use crate::planner::DirectionsProvider;

/// The directions source selected at startup.
#[derive(Debug, Clone)]
pub enum DirectionsBackend {
    /// Live Google Directions API.
    Live(DirectionsClient),
    /// Canned response from disk.
    Mock(MockDirectionsClient),
}

impl DirectionsProvider for DirectionsBackend {
    async fn fetch_alternatives(
        &self,
        query: &DirectionsQuery,
    ) -> Result<DirectionsResponse, DirectionsError> {
        match self {
            DirectionsBackend::Live(client) => client.fetch_alternatives(query).await,
            DirectionsBackend::Mock(client) => client.fetch_alternatives(query).await,
        }
    }
}
