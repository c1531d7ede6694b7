//! Text-to-speech error types.

/// Errors from speech synthesis or the audio cache.
#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    /// Nothing to say
    #[error("no text provided")]
    EmptyText,

    /// API key contains characters that cannot go in a header
    #[error("invalid ElevenLabs API key format")]
    InvalidApiKey,

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Synthesis service returned an error status
    #[error("ElevenLabs returned {status}")]
    Upstream { status: u16 },

    /// Reading or writing the audio cache failed
    #[error("audio cache error: {0}")]
    Io(#[from] std::io::Error),
}
