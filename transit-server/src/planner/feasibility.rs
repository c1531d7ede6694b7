//! Catchability test for candidate itineraries.
//!
//! A candidate is only worth showing if a pedestrian walking at the chosen
//! speed reaches the first boarding point before the vehicle leaves, with a
//! safety margin to spare.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::domain::{Itinerary, SpeedProfile, SpeedTable, TransitDetails};

/// Boarding point name shown for itineraries with no transit leg.
pub const WALK_ONLY_BOARDING_POINT: &str = "Destination";

/// Verdict for one candidate itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeasibilityDecision {
    Admit,
    Reject,
}

/// The walk from the origin to the first vehicle.
#[derive(Debug, Clone)]
pub struct Approach<'a> {
    /// Walking distance before the first transit leg (meters).
    pub walk_meters: f64,

    /// Time to cover that distance at the chosen speed.
    pub walk_seconds: i64,

    /// When the pedestrian reaches the boarding point.
    pub platform_arrival: DateTime<FixedOffset>,

    /// The first transit leg, if the itinerary has one.
    pub boarding: Option<&'a TransitDetails>,
}

impl<'a> Approach<'a> {
    /// Work out the approach walk for an itinerary starting at `now`.
    ///
    /// Returns `None` when the walk would end past the representable range
    /// of timestamps.
    pub fn plan(
        itinerary: &'a Itinerary,
        profile: SpeedProfile,
        speeds: &SpeedTable,
        now: DateTime<FixedOffset>,
    ) -> Option<Self> {
        let walk_meters = itinerary.approach_distance();
        let walk_seconds = speeds.walk_seconds(profile, walk_meters);
        let platform_arrival = now.checked_add_signed(Duration::try_seconds(walk_seconds)?)?;

        Some(Self {
            walk_meters,
            walk_seconds,
            platform_arrival,
            boarding: itinerary.first_transit(),
        })
    }

    /// Name of the stop being walked to.
    pub fn boarding_point(&self) -> &str {
        self.boarding
            .map(|b| b.departure_stop.as_str())
            .unwrap_or(WALK_ONLY_BOARDING_POINT)
    }

    /// Scheduled departure of the first vehicle.
    pub fn scheduled_departure(&self) -> Option<DateTime<Utc>> {
        self.boarding
            .and_then(|b| DateTime::from_timestamp(b.departure_time, 0))
    }

    /// Decide whether the first vehicle can be caught.
    ///
    /// Walk-only itineraries are always admitted. Otherwise the pedestrian
    /// must reach the platform no later than `buffer` before departure.
    pub fn assess(&self, buffer: Duration) -> FeasibilityDecision {
        if self.boarding.is_none() {
            return FeasibilityDecision::Admit;
        }

        // An unrepresentable timestamp cannot be planned around
        let Some(latest) = self
            .scheduled_departure()
            .and_then(|departure| departure.checked_sub_signed(buffer))
        else {
            return FeasibilityDecision::Reject;
        };

        if self.platform_arrival.with_timezone(&Utc) > latest {
            FeasibilityDecision::Reject
        } else {
            FeasibilityDecision::Admit
        }
    }
}
