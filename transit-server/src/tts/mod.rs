//! Text-to-speech proxy.
//!
//! Spoken directions are synthesized by ElevenLabs and kept on disk, so a
//! phrase is only ever paid for once.

mod cache;
mod client;
mod error;

pub use cache::AudioCache;
pub use client::{TtsClient, TtsConfig};
pub use error::TtsError;

use tracing::{debug, info, warn};

/// Synthesis client fronted by the audio cache.
#[derive(Debug, Clone)]
pub struct TtsService {
    client: TtsClient,
    cache: AudioCache,
}

impl TtsService {
    pub fn new(client: TtsClient, cache: AudioCache) -> Self {
        Self { client, cache }
    }

    /// MP3 audio for `text`, from the cache or freshly synthesized.
    pub async fn speak(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        if text.trim().is_empty() {
            return Err(TtsError::EmptyText);
        }

        if let Some(audio) = self.cache.get(text).await? {
            debug!(key = %AudioCache::key(text), "serving cached audio");
            return Ok(audio);
        }

        info!(chars = text.len(), "synthesizing new audio");
        let audio = self.client.synthesize(text).await?;
        Ok(self.remember(text, audio).await)
    }

    /// Store freshly synthesized audio, returning it whether or not the
    /// write succeeded.
    async fn remember(&self, text: &str, audio: Vec<u8>) -> Vec<u8> {
        if let Err(e) = self.cache.put(text, &audio).await {
            warn!(key = %AudioCache::key(text), error = %e, "failed to cache audio");
        }
        audio
    }
}
