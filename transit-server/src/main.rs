use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transit_server::cache::{CacheConfig, CachedMbtaClient};
use transit_server::directions::{
    DirectionsBackend, DirectionsClient, DirectionsConfig, MockDirectionsClient,
};
use transit_server::mbta::{MbtaClient, MbtaConfig};
use transit_server::planner::RankConfig;
use transit_server::tts::{AudioCache, TtsClient, TtsConfig, TtsService};
use transit_server::web::{AppState, create_router};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";
const DEFAULT_TTS_CACHE_DIR: &str = "audio_cache";

/// Read an optional environment variable, treating empty as unset.
fn env_var(name: &str) -> Option<String> {
    non_blank(std::env::var(name).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("transit_server=info,tower_http=info")),
        )
        .init();

    // Directions: a canned file takes precedence over the live API
    let directions = match env_var("DIRECTIONS_MOCK_FILE") {
        Some(path) => {
            info!(%path, "serving directions from mock file");
            DirectionsBackend::Mock(
                MockDirectionsClient::new(&path).expect("Failed to load mock directions"),
            )
        }
        None => {
            let api_key = env_var("GOOGLE_DIRECTIONS_API_KEY").unwrap_or_else(|| {
                warn!("GOOGLE_DIRECTIONS_API_KEY not set. Directions requests will fail.");
                String::new()
            });
            DirectionsBackend::Live(
                DirectionsClient::new(DirectionsConfig::new(api_key))
                    .expect("Failed to create directions client"),
            )
        }
    };

    let mut rank_config = RankConfig::default();
    if let Some(region) = env_var("REGION_QUALIFIER") {
        rank_config = rank_config.with_region(region);
    }

    let mbta_key = env_var("MBTA_API_KEY").unwrap_or_else(|| {
        warn!("MBTA_API_KEY not set. MBTA requests will be rate-limited.");
        String::new()
    });
    let mbta_client =
        MbtaClient::new(MbtaConfig::new(mbta_key)).expect("Failed to create MBTA client");
    let mbta = CachedMbtaClient::new(mbta_client, &CacheConfig::default());

    let tts = match env_var("ELEVENLABS_API_KEY") {
        Some(api_key) => {
            let dir = env_var("TTS_CACHE_DIR").unwrap_or_else(|| DEFAULT_TTS_CACHE_DIR.to_string());
            let cache = AudioCache::open(&dir)
                .await
                .expect("Failed to open audio cache");
            let client =
                TtsClient::new(TtsConfig::new(api_key)).expect("Failed to create TTS client");
            info!(%dir, "text-to-speech enabled");
            Some(TtsService::new(client, cache))
        }
        None => {
            warn!("ELEVENLABS_API_KEY not set. /stream-tts will answer 503.");
            None
        }
    };

    let state = AppState::new(directions, rank_config, mbta, tts);
    let app = create_router(state);

    let addr: SocketAddr = env_var("BIND_ADDR")
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .expect("BIND_ADDR must be a socket address, e.g. 0.0.0.0:5001");

    info!("Transit directions server listening on http://{addr}");
    info!("API Endpoints:");
    info!("  GET  /api/health");
    info!("  POST /api/directions");
    info!("  GET  /api/mbta/stations");
    info!("  GET  /api/mbta/predictions/:stop_id");
    info!("  GET  /api/mbta/alerts");
    info!("  GET  /api/mbta/vehicles");
    info!("  *    /api/favorites");
    info!("  POST /stream-tts");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
