//! Directions API request and response DTOs.
//!
//! The response types map directly to the Google Directions JSON API.
//! They use `Option` liberally because the provider omits fields that do
//! not apply (a walking step has no `transit_details`, for example).
//!
//! Naming follows the provider: a *route* is one alternative itinerary, a
//! route *leg* spans origin to destination, and a *step* is what the rest
//! of this crate calls a leg.

use serde::Deserialize;

/// Outbound query for transit itineraries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionsQuery {
    /// Rendered origin (`"lat,lng"` or qualified place name).
    pub origin: String,

    /// Rendered destination.
    pub destination: String,

    /// Travel mode, always `transit` for the ranking engine.
    pub mode: &'static str,

    /// Preferred transit sub-mode.
    pub transit_mode: &'static str,

    /// Whether to ask for more than one candidate route.
    pub alternatives: bool,
}

impl DirectionsQuery {
    /// Query for subway-preferring transit routes with alternatives.
    pub fn transit(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            mode: "transit",
            transit_mode: "subway",
            alternatives: true,
        }
    }

    /// Query-string parameters, without the API key.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("origin", self.origin.clone()),
            ("destination", self.destination.clone()),
            ("mode", self.mode.to_string()),
            ("transit_mode", self.transit_mode.to_string()),
            ("alternatives", self.alternatives.to_string()),
        ]
    }
}

/// Top-level directions response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// `"OK"` on success, otherwise e.g. `"ZERO_RESULTS"`, `"REQUEST_DENIED"`.
    pub status: String,

    /// Alternative routes, empty unless `status` is `"OK"`.
    #[serde(default)]
    pub routes: Vec<RouteDto>,

    /// Human-readable detail accompanying a failure status.
    pub error_message: Option<String>,
}

impl DirectionsResponse {
    /// Whether the provider reported success.
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// One alternative route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    #[serde(default)]
    pub legs: Vec<RouteLegDto>,

    pub overview_polyline: Option<PolylineDto>,
}

/// Origin-to-destination span of a route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteLegDto {
    pub distance: Option<TextValue<f64>>,

    pub duration: Option<TextValue<i64>>,

    #[serde(default)]
    pub steps: Vec<StepDto>,
}

/// A single step within a route leg.
#[derive(Debug, Clone, Deserialize)]
pub struct StepDto {
    /// `"WALKING"` or `"TRANSIT"`.
    pub travel_mode: String,

    pub distance: Option<TextValue<f64>>,

    /// Instruction text, may contain HTML markup.
    pub html_instructions: Option<String>,

    /// Present on transit steps only.
    pub transit_details: Option<TransitDetailsDto>,
}

/// Transit boarding/alighting details for a step.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitDetailsDto {
    pub line: Option<LineDto>,

    pub departure_stop: Option<StopDto>,

    pub arrival_stop: Option<StopDto>,

    pub departure_time: Option<TimeValue>,

    pub arrival_time: Option<TimeValue>,

    pub num_stops: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineDto {
    pub name: Option<String>,
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopDto {
    pub name: String,
}

/// A value with its display text, e.g. `{"text": "1.2 km", "value": 1203}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue<T> {
    pub text: String,
    pub value: T,
}

/// A scheduled instant, `value` in epoch seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeValue {
    pub value: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolylineDto {
    pub points: String,
}
