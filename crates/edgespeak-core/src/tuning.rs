//! Tuned constants for the latency model and the loading controller.
//!
//! The numbers here were chosen empirically against the Edge TTS backend.
//! They are grouped into plain structs so callers can override any of them
//! without touching the algorithms that consume them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Conservative starting throughput (characters per second of synthesis).
pub const DEFAULT_THROUGHPUT: f64 = 120.0;

/// Starting estimate of round-trip overhead not attributable to synthesis.
pub const DEFAULT_NETWORK_LATENCY_MS: f64 = 2000.0;

/// Scale applied to every learned throughput, biasing estimates toward
/// slight pessimism so a countdown rarely expires before the audio is ready.
pub const CONSERVATIVE_FACTOR: f64 = 0.9;

/// Fraction of the extra playback speed that is charged as extra
/// processing time (1.5x costs 15% more, 2.0x costs 30% more).
pub const SPEED_PENALTY_RATE: f64 = 0.3;

/// Knobs for [`PerformanceModel`](crate::perf::PerformanceModel) and
/// [`EstimationEngine`](crate::estimate::EstimationEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelTuning {
    /// Throughput used before anything has been learned.
    pub default_throughput: f64,

    /// Network latency used before anything has been learned.
    pub default_network_latency_ms: f64,

    /// Maximum number of samples kept in the global history.
    pub recent_sample_cap: usize,

    /// Maximum number of samples kept per voice.
    pub voice_sample_cap: usize,

    /// How many of the most recent samples feed the global throughput.
    pub throughput_window: usize,

    /// Global samples required before the default throughput is replaced.
    pub min_samples_for_average: usize,

    /// Per-voice samples required before a voice's own throughput is trusted.
    pub min_samples_for_voice: usize,

    /// See [`CONSERVATIVE_FACTOR`].
    pub conservative_factor: f64,

    /// See [`SPEED_PENALTY_RATE`].
    pub speed_penalty_rate: f64,

    /// Multiplier producing the optimistic end of the estimate band.
    pub low_band_factor: f64,

    /// Multiplier producing the headline estimate.
    pub center_band_factor: f64,

    /// Multiplier producing the pessimistic end of the estimate band.
    pub high_band_factor: f64,
}

impl ModelTuning {
    /// Tuning with the stock constants.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            default_throughput: DEFAULT_THROUGHPUT,
            default_network_latency_ms: DEFAULT_NETWORK_LATENCY_MS,
            recent_sample_cap: 15,
            voice_sample_cap: 5,
            throughput_window: 10,
            min_samples_for_average: 3,
            min_samples_for_voice: 2,
            conservative_factor: CONSERVATIVE_FACTOR,
            speed_penalty_rate: SPEED_PENALTY_RATE,
            low_band_factor: 0.9,
            center_band_factor: 1.15,
            high_band_factor: 1.4,
        }
    }
}

impl Default for ModelTuning {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Knobs for [`LoadingController`](crate::loading::LoadingController).
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingTuning {
    /// Estimates longer than this (seconds) show the loading UI immediately.
    pub show_threshold_secs: f64,

    /// Texts longer than this (characters) show the loading UI immediately.
    pub long_text_chars: usize,

    /// Delay before revealing the loading UI for short requests.
    pub reveal_delay: Duration,

    /// Countdown refresh period.
    pub tick_interval: Duration,

    /// Once shown, the loading UI stays up at least this long.
    pub min_visible: Duration,

    /// Remaining time (seconds) at or below which the numeric countdown is
    /// replaced by the "almost ready" label.
    pub almost_ready_secs: f64,
}

impl LoadingTuning {
    /// Tuning with the stock constants.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            show_threshold_secs: 2.0,
            long_text_chars: 100,
            reveal_delay: Duration::from_millis(800),
            tick_interval: Duration::from_millis(500),
            min_visible: Duration::from_millis(1200),
            almost_ready_secs: 3.0,
        }
    }
}

impl Default for LoadingTuning {
    fn default() -> Self {
        Self::with_defaults()
    }
}
