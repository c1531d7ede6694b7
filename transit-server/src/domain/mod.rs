//! Domain types for the transit directions aggregator.
//!
//! This module contains the request-scoped model the ranking engine works
//! on: trip endpoints, walking speed profiles, and candidate itineraries.
//! Validation happens at construction, so code that receives these types
//! can trust them.

mod error;
mod itinerary;
mod location;
mod speed;

pub use error::DomainError;
pub use itinerary::{Itinerary, Leg, PathPoint, TransitDetails, TravelMode};
pub use location::Location;
pub use speed::{SpeedProfile, SpeedTable, walk_seconds};
