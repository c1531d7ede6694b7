//! Display text for ranked itineraries.
//!
//! Clock times are rendered in the offset of the instant passed in, as
//! `h:MM AM/PM` without a leading zero on the hour.

use chrono::{DateTime, FixedOffset, Utc};
use tracing::warn;

use crate::domain::{Itinerary, Leg, PathPoint};

/// Summary used when no transit leg is involved.
pub const WALK_ONLY_SUMMARY: &str = "Walking Route";

/// Precision of provider-encoded polylines.
const POLYLINE_PRECISION: u32 = 5;

/// Format an instant as a 12-hour clock time, e.g. `9:05 AM`.
pub fn clock_time(t: &DateTime<FixedOffset>) -> String {
    t.format("%-I:%M %p").to_string()
}

/// Countdown to the first vehicle's departure.
///
/// Whole minutes are truncated, so a departure less than a minute away, or
/// one already gone, reads `Now`. Walk-only itineraries also read `Now`.
pub fn countdown(departure: Option<DateTime<Utc>>, now: DateTime<FixedOffset>) -> String {
    let minutes = departure
        .map(|d| d.signed_duration_since(now).num_minutes())
        .unwrap_or(0);

    if minutes > 0 {
        format!("Departs in {minutes} min")
    } else {
        "Now".to_string()
    }
}

/// When the pedestrian reaches the boarding point.
pub fn station_eta(boarding_point: &str, platform_arrival: &DateTime<FixedOffset>) -> String {
    format!("Reach {} by {}", boarding_point, clock_time(platform_arrival))
}

pub fn duration_text(minutes: i64) -> String {
    format!("{minutes} min")
}

/// Span from leaving now to arriving at the destination.
pub fn time_range(arrival: &DateTime<FixedOffset>) -> String {
    format!("Leave Now – {}", clock_time(arrival))
}

/// Route summary naming the transit lines used, e.g. `Via Red Line & Green Line D`.
pub fn summary(itinerary: &Itinerary) -> String {
    let lines = itinerary.transit_lines();
    if lines.is_empty() {
        WALK_ONLY_SUMMARY.to_string()
    } else {
        format!("Via {}", lines.join(" & "))
    }
}

/// Step-by-step instructions.
///
/// Each transit leg becomes a boarding instruction followed by a ride
/// instruction; walking legs keep the provider's text as-is.
pub fn steps(itinerary: &Itinerary) -> Vec<String> {
    let mut steps = Vec::with_capacity(itinerary.legs.len() + 2);

    for leg in &itinerary.legs {
        match leg {
            Leg::Transit(details) => {
                steps.push(format!(
                    "Board <b>{}</b> at {}",
                    details.line_name, details.departure_stop
                ));
                steps.push(format!("Ride {} stops", details.num_stops));
            }
            Leg::Walk { instruction, .. } => steps.push(instruction.clone()),
        }
    }

    steps
}

/// Decode an encoded overview polyline into points.
///
/// An undecodable polyline yields an empty path: the map line is
/// decoration, not worth failing the itinerary over.
pub fn decode_path(encoded: Option<&str>) -> Vec<PathPoint> {
    let Some(encoded) = encoded else {
        return Vec::new();
    };

    match polyline::decode_polyline(encoded, POLYLINE_PRECISION) {
        Ok(line) => line
            .coords()
            .map(|c| PathPoint { lat: c.y, lng: c.x })
            .collect(),
        Err(e) => {
            warn!(error = %e, "failed to decode route polyline");
            Vec::new()
        }
    }
}
