//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedMbtaClient;
use crate::directions::DirectionsBackend;
use crate::planner::RankConfig;
use crate::tts::TtsService;

/// Shared application state.
///
/// Contains all the services needed to handle requests. Everything is
/// read-only after startup apart from the caches inside the MBTA client.
#[derive(Clone)]
pub struct AppState {
    /// Source of candidate itineraries
    pub directions: Arc<DirectionsBackend>,

    /// Itinerary ranking configuration
    pub rank_config: Arc<RankConfig>,

    /// Cached MBTA API client
    pub mbta: Arc<CachedMbtaClient>,

    /// Speech synthesis, absent when no API key is configured
    pub tts: Option<Arc<TtsService>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        directions: DirectionsBackend,
        rank_config: RankConfig,
        mbta: CachedMbtaClient,
        tts: Option<TtsService>,
    ) -> Self {
        Self {
            directions: Arc::new(directions),
            rank_config: Arc::new(rank_config),
            mbta: Arc::new(mbta),
            tts: tts.map(Arc::new),
        }
    }
}
