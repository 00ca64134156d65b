//! Synthesis backend port.
//!
//! The orchestrator talks to the text-to-speech server only through this
//! trait, so the HTTP adapter can be swapped for a mock in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{SynthesisRequest, Voice};

/// Errors reported by a synthesis backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The server answered with an error status and message.
    #[error("{message} (HTTP {status})")]
    Rejected { status: u16, message: String },

    /// The requested resource does not exist (e.g. expired audio).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server could not be reached or the connection failed.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with something we could not understand.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// The server's answer to a successful synthesis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisOutcome {
    /// Identifier used to fetch the audio.
    pub audio_id: String,

    #[serde(default)]
    pub message: Option<String>,

    /// Audio size in bytes.
    #[serde(default)]
    pub file_size: u64,

    /// Extra playback acceleration the player must apply (1.0 = none).
    #[serde(default = "default_playback_rate")]
    pub browser_playback_rate: f64,

    /// Rate passed to the synthesis engine, e.g. `+50%`.
    #[serde(default)]
    pub synthesis_rate: Option<String>,

    #[serde(default)]
    pub requested_speed: Option<f64>,

    /// Seconds the server spent synthesizing, when reported.
    #[serde(default)]
    pub synthesis_time: Option<f64>,

    #[serde(default)]
    pub text_length: Option<usize>,

    /// Server-measured characters per second.
    #[serde(default)]
    pub processing_speed: Option<f64>,
}

const fn default_playback_rate() -> f64 {
    1.0
}

impl SynthesisOutcome {
    /// Whether the player must speed audio up beyond what was synthesized.
    pub fn needs_player_acceleration(&self) -> bool {
        self.browser_playback_rate > 1.0
    }

    /// Playback rate to apply, never below 1.0.
    pub fn playback_rate(&self) -> f64 {
        if self.browser_playback_rate.is_finite() {
            self.browser_playback_rate.max(1.0)
        } else {
            1.0
        }
    }
}

/// Server health report from `/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerHealth {
    pub status: String,

    #[serde(default)]
    pub timestamp: Option<f64>,

    /// Audio files currently cached on the server.
    #[serde(default)]
    pub temp_files: Option<u64>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub url_prefix: Option<String>,
}

impl ServerHealth {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// A text-to-speech backend.
///
/// One synthesis request is in flight at a time; an issued synthesis is
/// never cancelled.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    /// List the voices the server offers.
    async fn list_voices(&self) -> Result<Vec<Voice>, BackendError>;

    /// Synthesize `request` and return where to fetch the audio.
    async fn synthesize(&self, request: &SynthesisRequest)
    -> Result<SynthesisOutcome, BackendError>;

    /// Download the synthesized audio (MP3 bytes).
    async fn fetch_audio(&self, audio_id: &str) -> Result<Vec<u8>, BackendError>;

    /// Query server health.
    async fn health(&self) -> Result<ServerHealth, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_server_json() {
        let json = r#"{
            "audio_id": "5b0b7c1e-8d7e-4c59-b3c1-6f7e0e5b9a10",
            "message": "Speech generated successfully",
            "file_size": 48213,
            "browser_playback_rate": 1.25,
            "synthesis_rate": "+100%",
            "requested_speed": 2.5,
            "synthesis_time": 1.87,
            "text_length": 240,
            "processing_speed": 128.3
        }"#;
        let outcome: SynthesisOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(outcome.file_size, 48213);
        assert_eq!(outcome.synthesis_time, Some(1.87));
        assert!(outcome.needs_player_acceleration());
        assert!((outcome.playback_rate() - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_outcome_minimal_json() {
        let outcome: SynthesisOutcome = serde_json::from_str(r#"{"audio_id": "abc"}"#).unwrap();
        assert!((outcome.browser_playback_rate - 1.0).abs() < f64::EPSILON);
        assert_eq!(outcome.synthesis_time, None);
        assert!(!outcome.needs_player_acceleration());
    }

    #[test]
    fn test_health_status() {
        let health: ServerHealth =
            serde_json::from_str(r#"{"status": "healthy", "temp_files": 3}"#).unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.temp_files, Some(3));
    }
}
