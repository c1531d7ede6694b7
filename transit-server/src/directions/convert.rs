//! Conversion from directions DTOs to domain itineraries.
//!
//! Each provider route becomes one `Itinerary`. A route missing a field the
//! ranking engine depends on is rejected on its own; the rest of the
//! response is still usable.

use tracing::warn;

use crate::domain::{Itinerary, Leg, TransitDetails, TravelMode};

use super::types::{DirectionsResponse, RouteDto, StepDto, TransitDetailsDto};

/// Line name used when the provider gives neither a name nor a short name.
const FALLBACK_LINE_NAME: &str = "Transit";

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Step travel mode the engine does not understand
    #[error("unsupported travel mode: {0}")]
    UnsupportedMode(String),

    /// Walking distance that is negative or not a number
    #[error("invalid walking distance: {0}")]
    InvalidDistance(f64),
}

/// Convert every route in a successful response, skipping malformed ones.
///
/// The returned itineraries keep the provider's order and their original
/// index among the alternatives.
pub fn convert_routes(response: &DirectionsResponse) -> Vec<Itinerary> {
    let mut results = Vec::with_capacity(response.routes.len());

    for (index, route) in response.routes.iter().enumerate() {
        match convert_route(index, route) {
            Ok(itinerary) => results.push(itinerary),
            Err(e) => {
                warn!(route = index, error = %e, "skipping malformed route");
            }
        }
    }

    results
}

/// Convert a single provider route.
///
/// Only the route's first leg is used: transit queries carry no waypoints,
/// so the provider returns exactly one origin-to-destination leg.
pub fn convert_route(index: usize, route: &RouteDto) -> Result<Itinerary, ConversionError> {
    let leg = route
        .legs
        .first()
        .ok_or(ConversionError::MissingField("legs"))?;

    let duration_secs = leg
        .duration
        .as_ref()
        .ok_or(ConversionError::MissingField("duration"))?
        .value;

    let distance_text = leg
        .distance
        .as_ref()
        .map(|d| d.text.clone())
        .ok_or(ConversionError::MissingField("distance"))?;

    let mut legs = Vec::with_capacity(leg.steps.len());
    let mut boarded = false;
    for step in &leg.steps {
        let converted = convert_step(step, boarded)?;
        boarded |= converted.transit().is_some();
        legs.push(converted);
    }

    Ok(Itinerary {
        index,
        legs,
        duration_secs,
        distance_text,
        polyline: route.overview_polyline.as_ref().map(|p| p.points.clone()),
    })
}

/// Convert a single step into a domain leg.
///
/// A walking step's distance feeds the catchability check only until the
/// first vehicle is boarded, so once `boarded` is set a missing distance
/// counts as zero.
pub fn convert_step(step: &StepDto, boarded: bool) -> Result<Leg, ConversionError> {
    let mode = TravelMode::parse(&step.travel_mode)
        .ok_or_else(|| ConversionError::UnsupportedMode(step.travel_mode.clone()))?;

    match mode {
        TravelMode::Walking => {
            let distance_meters = match (&step.distance, boarded) {
                (Some(distance), _) => distance.value,
                (None, true) => 0.0,
                (None, false) => return Err(ConversionError::MissingField("distance")),
            };
            if !distance_meters.is_finite() || distance_meters < 0.0 {
                return Err(ConversionError::InvalidDistance(distance_meters));
            }
            let instruction = step
                .html_instructions
                .clone()
                .ok_or(ConversionError::MissingField("html_instructions"))?;
            Ok(Leg::Walk {
                distance_meters,
                instruction,
            })
        }
        TravelMode::Transit => {
            let details = step
                .transit_details
                .as_ref()
                .ok_or(ConversionError::MissingField("transit_details"))?;
            Ok(Leg::Transit(convert_transit(details)?))
        }
    }
}

fn convert_transit(details: &TransitDetailsDto) -> Result<TransitDetails, ConversionError> {
    let line_name = details
        .line
        .as_ref()
        .and_then(|line| line.name.clone().or_else(|| line.short_name.clone()))
        .unwrap_or_else(|| FALLBACK_LINE_NAME.to_string());

    let departure_stop = details
        .departure_stop
        .as_ref()
        .ok_or(ConversionError::MissingField("departure_stop"))?
        .name
        .clone();

    let arrival_stop = details
        .arrival_stop
        .as_ref()
        .ok_or(ConversionError::MissingField("arrival_stop"))?
        .name
        .clone();

    let departure_time = details
        .departure_time
        .as_ref()
        .ok_or(ConversionError::MissingField("departure_time"))?
        .value;

    Ok(TransitDetails {
        line_name,
        departure_stop,
        arrival_stop,
        num_stops: details.num_stops.unwrap_or(0),
        departure_time,
        arrival_time: details.arrival_time.as_ref().map(|t| t.value),
    })
}
