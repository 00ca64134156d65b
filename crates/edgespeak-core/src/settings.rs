//! Client settings and validation.
//!
//! Pure domain types; the CLI fills them from flags and environment
//! variables, the HTTP adapter reads them.

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_VOICE, MAX_SPEED, MIN_SPEED};

/// Default address of the TTS server.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:9001";

/// Default request timeout. Long texts can take well over a minute.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Default retry budget for idempotent requests.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Settings for talking to the TTS server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL, possibly with a path prefix (e.g. `https://host/tts`).
    pub server_url: String,

    /// Voice used when none is given.
    pub default_voice: String,

    /// Speed used when none is given.
    pub default_speed: f64,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Retries for idempotent requests (0-10).
    pub max_retries: u32,
}

impl ClientSettings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            default_voice: DEFAULT_VOICE.to_string(),
            default_speed: 1.0,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("Server URL must start with http:// or https://, got '{0}'")]
    InvalidServerUrl(String),

    #[error("Default voice cannot be empty")]
    EmptyVoice,

    #[error("Default speed must be between 0.5 and 4.0, got {0}")]
    InvalidSpeed(f64),

    #[error("Request timeout must be between 1 and 3600 seconds, got {0}")]
    InvalidTimeout(u64),

    #[error("Max retries must be between 0 and 10, got {0}")]
    InvalidRetries(u32),
}

/// Validate settings values.
pub fn validate_settings(settings: &ClientSettings) -> Result<(), SettingsError> {
    let url = settings.server_url.trim();
    let host = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"));
    if host.is_none_or(str::is_empty) {
        return Err(SettingsError::InvalidServerUrl(settings.server_url.clone()));
    }

    if settings.default_voice.trim().is_empty() {
        return Err(SettingsError::EmptyVoice);
    }

    let speed = settings.default_speed;
    if !speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(SettingsError::InvalidSpeed(speed));
    }

    if !(1..=3600).contains(&settings.request_timeout_secs) {
        return Err(SettingsError::InvalidTimeout(settings.request_timeout_secs));
    }

    if settings.max_retries > 10 {
        return Err(SettingsError::InvalidRetries(settings.max_retries));
    }

    Ok(())
}
