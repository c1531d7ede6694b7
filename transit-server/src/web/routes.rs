//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::mbta::{Alert, MbtaError, Prediction, Station, Vehicle};
use crate::planner::{ItineraryRanker, RankError};
use crate::tts::TtsError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/directions", post(directions))
        .route("/api/mbta/stations", get(stations))
        .route("/api/mbta/predictions/:stop_id", get(predictions))
        .route("/api/mbta/alerts", get(alerts))
        .route("/api/mbta/vehicles", get(vehicles))
        .route(
            "/api/favorites",
            get(favorites).post(favorites).delete(favorites),
        )
        .route("/stream-tts", post(stream_tts))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Rank catchable itineraries between two locations.
async fn directions(
    State(state): State<AppState>,
    payload: Result<Json<DirectionsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<RouteOption>>>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;
    let request = req.into_rank_request().map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let ranker = ItineraryRanker::new(state.directions.as_ref(), state.rank_config.as_ref());
    let ranked = ranker
        .rank_feasible_itineraries(&request, Local::now().fixed_offset())
        .await?;

    let routes = ranked.into_iter().map(RouteOption::from_ranked).collect();
    Ok(Json(ApiResponse::ok(routes)))
}

/// All subway and light rail stops.
async fn stations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Station>>>, AppError> {
    let stations = state.mbta.stations().await?;
    Ok(Json(ApiResponse::ok(stations.as_ref().clone())))
}

/// Upcoming departures at a stop.
async fn predictions(
    State(state): State<AppState>,
    Path(stop_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Prediction>>>, AppError> {
    let predictions = state
        .mbta
        .predictions(&stop_id, Local::now().fixed_offset())
        .await?;
    Ok(Json(ApiResponse::ok(predictions)))
}

/// Active service alerts.
async fn alerts(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Alert>>>, AppError> {
    let alerts = state.mbta.alerts().await?;
    Ok(Json(ApiResponse::ok(alerts)))
}

/// Live vehicle positions.
async fn vehicles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let vehicles = state.mbta.vehicles().await?;
    Ok(Json(ApiResponse::ok(vehicles)))
}

/// Favorites are not stored; every method answers with an empty list.
async fn favorites() -> Json<ApiResponse<Vec<serde_json::Value>>> {
    Json(ApiResponse::ok(Vec::new()))
}

/// Speak a phrase as MP3 audio.
async fn stream_tts(
    State(state): State<AppState>,
    payload: Result<Json<SpeechRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(e) => return speech_error(StatusCode::BAD_REQUEST, &e.body_text()),
    };
    let Some(tts) = state.tts.as_ref() else {
        return speech_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Text-to-speech is not configured",
        );
    };

    match tts.speak(&req.text).await {
        Ok(audio) => ([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response(),
        Err(TtsError::EmptyText) => speech_error(StatusCode::BAD_REQUEST, "No text provided"),
        Err(TtsError::Upstream { status }) => {
            warn!(status, "speech synthesis failed upstream");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            speech_error(status, "Failed to fetch from ElevenLabs")
        }
        Err(TtsError::Http(e)) => {
            warn!(error = %e, "speech synthesis unreachable");
            speech_error(StatusCode::BAD_GATEWAY, "Failed to fetch from ElevenLabs")
        }
        Err(e) => {
            error!(error = %e, "speech synthesis failed");
            speech_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn speech_error(status: StatusCode, message: &str) -> Response {
    let body = Json(ErrorResponse {
        error: message.to_string(),
    });
    (status, body).into_response()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<RankError> for AppError {
    fn from(e: RankError) -> Self {
        match e {
            RankError::InvalidInput(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            RankError::ProviderStatus { .. } | RankError::ProviderUnavailable(_) => {
                AppError::BadGateway {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<MbtaError> for AppError {
    fn from(e: MbtaError) -> Self {
        match e {
            MbtaError::InvalidApiKey => AppError::Internal {
                message: e.to_string(),
            },
            _ => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ApiFailure::new(message))).into_response()
    }
}
