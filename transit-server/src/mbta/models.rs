//! Client-facing shapes for MBTA data.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::warn;

use super::types::{
    AlertAttributes, PredictionAttributes, Resource, StopAttributes, VehicleAttributes,
};

/// Maximum predictions returned per stop.
pub const MAX_PREDICTIONS: usize = 5;

/// Route shown when a prediction carries no route relationship.
const DEFAULT_ROUTE: &str = "Subway";

/// Status shown when the feed gives none.
const DEFAULT_STATUS: &str = "On Time";

/// A subway or light rail stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Line colors serving the stop.
    pub routes: Vec<String>,
}

/// An upcoming departure at a stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub id: String,
    pub route: String,
    /// `Outbound` or `Inbound`.
    pub destination: String,
    pub minutes: i64,
    pub status: String,
}

/// An active service alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: String,
    pub header: String,
    pub description: Option<String>,
    pub severity: i64,
}

/// A live vehicle position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub bearing: Option<f64>,
    pub route: Option<String>,
    pub status: Option<String>,
}

/// Guess a stop's line color from its description.
///
/// Stops whose description names no heavy rail line are Green Line stops.
/// Mattapan trolley stops are shown as Red, the line they connect to.
pub fn line_color(description: &str) -> &'static str {
    if description.contains("Red") {
        "Red"
    } else if description.contains("Orange") {
        "Orange"
    } else if description.contains("Blue") {
        "Blue"
    } else if description.contains("Mattapan") {
        "Red"
    } else {
        "Green"
    }
}

impl Station {
    pub fn from_resource(stop: &Resource<StopAttributes>) -> Self {
        let color = line_color(stop.attributes.description.as_deref().unwrap_or_default());
        Self {
            id: stop.id.clone(),
            name: stop.attributes.name.clone(),
            lat: stop.attributes.latitude,
            lng: stop.attributes.longitude,
            routes: vec![color.to_string()],
        }
    }
}

impl Prediction {
    /// Reshape a raw prediction relative to `now`.
    pub fn from_resource(pred: &Resource<PredictionAttributes>, now: DateTime<FixedOffset>) -> Self {
        let attrs = &pred.attributes;
        let target = attrs
            .arrival_time
            .as_deref()
            .or(attrs.departure_time.as_deref());

        Self {
            id: pred.id.clone(),
            route: pred.route_id().unwrap_or(DEFAULT_ROUTE).to_string(),
            destination: direction_name(attrs.direction_id).to_string(),
            minutes: target.map(|t| minutes_until(t, now)).unwrap_or(0),
            status: attrs
                .status
                .clone()
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        }
    }
}

/// Reshape raw predictions, keeping at most [`MAX_PREDICTIONS`].
pub fn reshape_predictions(
    raw: &[Resource<PredictionAttributes>],
    now: DateTime<FixedOffset>,
) -> Vec<Prediction> {
    raw.iter()
        .take(MAX_PREDICTIONS)
        .map(|p| Prediction::from_resource(p, now))
        .collect()
}

fn direction_name(direction_id: Option<u8>) -> &'static str {
    match direction_id {
        Some(0) => "Outbound",
        _ => "Inbound",
    }
}

/// Whole minutes from `now` until an ISO-8601 instant, never negative.
fn minutes_until(timestamp: &str, now: DateTime<FixedOffset>) -> i64 {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(t) => t.signed_duration_since(now).num_minutes().max(0),
        Err(e) => {
            warn!(timestamp, error = %e, "unparseable prediction time");
            0
        }
    }
}

impl Alert {
    pub fn from_resource(alert: &Resource<AlertAttributes>) -> Self {
        Self {
            id: alert.id.clone(),
            header: alert.attributes.header.clone(),
            description: alert.attributes.description.clone(),
            severity: alert.attributes.severity,
        }
    }
}

impl Vehicle {
    pub fn from_resource(vehicle: &Resource<VehicleAttributes>) -> Self {
        Self {
            id: vehicle.id.clone(),
            lat: vehicle.attributes.latitude,
            lng: vehicle.attributes.longitude,
            bearing: vehicle.attributes.bearing,
            route: vehicle.route_id().map(str::to_string),
            status: vehicle.attributes.current_status.clone(),
        }
    }
}
