//! ElevenLabs text-to-speech client.

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use tracing::debug;

use super::error::TtsError;

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// "Rachel", a stock ElevenLabs voice.
const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

/// Turbo model, chosen for latency.
const DEFAULT_MODEL_ID: &str = "eleven_turbo_v2";

/// Configuration for the synthesis client.
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// API key for the xi-api-key header
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    pub voice_id: String,
    pub model_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TtsConfig {
    /// Create a new config with the given API key and default voice.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            stability: 0.5,
            similarity_boost: 0.5,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// Client for the ElevenLabs synthesis endpoint.
#[derive(Debug, Clone)]
pub struct TtsClient {
    http: reqwest::Client,
    url: String,
    model_id: String,
    stability: f32,
    similarity_boost: f32,
}

impl TtsClient {
    /// Create a new synthesis client.
    pub fn new(config: TtsConfig) -> Result<Self, TtsError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key).map_err(|_| TtsError::InvalidApiKey)?;
        headers.insert(HeaderName::from_static("xi-api-key"), key);
        headers.insert(ACCEPT, HeaderValue::from_static("audio/mpeg"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: format!("{}/v1/text-to-speech/{}", config.base_url, config.voice_id),
            model_id: config.model_id,
            stability: config.stability,
            similarity_boost: config.similarity_boost,
        })
    }

    /// Synthesize `text` to MP3 bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        debug!(chars = text.len(), "requesting speech synthesis");

        let body = SynthesisRequest {
            text,
            model_id: &self.model_id,
            voice_settings: VoiceSettings {
                stability: self.stability,
                similarity_boost: self.similarity_boost,
            },
        };

        let response = self.http.post(&self.url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(TtsError::Upstream {
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
