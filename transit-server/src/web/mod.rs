//! Web layer for the transit directions server.
//!
//! Provides the JSON API consumed by the client app: ranked directions,
//! MBTA stations, predictions, alerts and vehicles, plus speech synthesis.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
