//! Synthesis request validation and text statistics.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::speed::{MAX_SPEED, MIN_SPEED};
use crate::estimate::EstimateRequest;

/// The server refuses texts longer than this many characters.
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Voice used when the user has not picked one.
pub const DEFAULT_VOICE: &str = "en-US-AvaNeural";

/// Why a request was rejected before reaching the backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("Please enter some text to convert to speech.")]
    EmptyText,

    #[error("Text too long ({len} characters, max {max})")]
    TextTooLong { len: usize, max: usize },

    #[error("Voice cannot be empty")]
    EmptyVoice,

    #[error("Speed must be between 0.5x and 4x, got {0}")]
    InvalidSpeed(f64),
}

/// A validated request: trimmed non-empty text, a voice and a speed.
///
/// Serializes to the `/api/synthesize` request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisRequest {
    text: String,
    voice: String,
    speed: f64,
}

impl SynthesisRequest {
    pub fn new(
        text: impl AsRef<str>,
        voice: impl Into<String>,
        speed: f64,
    ) -> Result<Self, RequestError> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(RequestError::EmptyText);
        }
        let len = text.chars().count();
        if len > MAX_TEXT_CHARS {
            return Err(RequestError::TextTooLong {
                len,
                max: MAX_TEXT_CHARS,
            });
        }
        let voice = voice.into();
        if voice.trim().is_empty() {
            return Err(RequestError::EmptyVoice);
        }
        if !speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(RequestError::InvalidSpeed(speed));
        }
        Ok(Self {
            text: text.to_string(),
            voice,
            speed,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Length in characters, the unit throughput is measured in.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// The subset of this request the estimator looks at.
    pub fn estimate_request(&self) -> EstimateRequest<'_> {
        EstimateRequest::new(self.char_count(), &self.voice, self.speed)
    }
}

/// Word and character counts shown under the text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
}

impl TextStats {
    /// Words are counted on the trimmed text; characters on the raw input.
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            characters: text.chars().count(),
        }
    }
}

impl fmt::Display for TextStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} words • {} characters", self.words, self.characters)
    }
}
