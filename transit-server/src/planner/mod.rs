//! Itinerary feasibility and ranking.
//!
//! This module answers: "Of the transit routes the directions provider
//! suggests, which can I actually catch at my walking pace, and which gets
//! me there first?"
//!
//! Each candidate is checked against its first departure, its arrival is
//! recomputed for the caller's speed, and the survivors are ranked by
//! arrival rather than by the provider's preference.

mod arrival;
mod config;
mod engine;
mod feasibility;
mod format;
mod rank;

pub use arrival::ArrivalEstimate;
pub use config::RankConfig;
pub use engine::{
    DirectionsProvider, ItineraryRanker, RankError, RankRequest, evaluate_itinerary,
    rank_candidates,
};
pub use feasibility::{Approach, FeasibilityDecision, WALK_ONLY_BOARDING_POINT};
pub use format::{WALK_ONLY_SUMMARY, clock_time};
pub use rank::{RankedItinerary, rank_by_arrival};
