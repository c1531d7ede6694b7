//! MBTA v3 API client.
//!
//! Thin fetch-and-reshape access to the Boston subway feed: stops,
//! predictions, alerts and live vehicles. Responses follow JSON:API, with
//! the interesting fields under `attributes` and related IDs under
//! `relationships`.

mod client;
mod error;
mod models;
mod types;

pub use client::{MbtaClient, MbtaConfig};
pub use error::MbtaError;
pub use models::{
    Alert, MAX_PREDICTIONS, Prediction, Station, Vehicle, line_color, reshape_predictions,
};
pub use types::{
    AlertAttributes, Document, PredictionAttributes, Resource, StopAttributes, VehicleAttributes,
};
