//! Ranking of admitted itineraries.
//!
//! Orders admitted itineraries by when the caller actually reaches the
//! destination, ignoring the provider's own preference order.

use chrono::{DateTime, FixedOffset};

use crate::domain::PathPoint;

/// An admitted itinerary with recomputed timing and display text.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedItinerary {
    /// Position among the provider's alternatives.
    pub index: usize,

    /// Recomputed arrival at the destination.
    pub arrival: DateTime<FixedOffset>,

    /// Recomputed trip duration in whole minutes.
    pub duration_mins: i64,

    /// e.g. "Via Red Line & Green Line D"
    pub summary: String,

    /// Provider's total distance text.
    pub distance: String,

    /// e.g. "24 min"
    pub duration: String,

    /// e.g. "Leave Now – 9:30 AM"
    pub time_range: String,

    /// e.g. "Departs in 5 min"
    pub countdown: String,

    /// e.g. "Reach Park Street by 9:10 AM"
    pub station_eta: String,

    /// Step-by-step instructions (may contain HTML).
    pub steps: Vec<String>,

    /// Decoded route geometry.
    pub path: Vec<PathPoint>,
}

/// Rank itineraries by recomputed arrival, earliest first, keeping at most
/// `max_results`.
///
/// The sort is stable: itineraries arriving at the same instant keep the
/// provider's order.
pub fn rank_by_arrival(
    mut itineraries: Vec<RankedItinerary>,
    max_results: usize,
) -> Vec<RankedItinerary> {
    itineraries.sort_by_key(|it| it.arrival);
    itineraries.truncate(max_results);
    itineraries
}
