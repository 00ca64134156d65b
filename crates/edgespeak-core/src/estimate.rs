//! Synthesis time prediction.
//!
//! Turns a pending request (text length, voice, speed) into a `{low, center,
//! high}` band in whole seconds, using the throughput and latency learned by
//! [`PerformanceModel`](crate::perf::PerformanceModel).

use std::fmt;

use serde::Serialize;

use crate::perf::PerformanceState;
use crate::tuning::ModelTuning;

/// What the estimator needs to know about a pending request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateRequest<'a> {
    /// Characters of input text.
    pub text_length: usize,
    pub voice: &'a str,
    pub speed_multiplier: f64,
}

impl<'a> EstimateRequest<'a> {
    pub const fn new(text_length: usize, voice: &'a str, speed_multiplier: f64) -> Self {
        Self {
            text_length,
            voice,
            speed_multiplier,
        }
    }
}

/// Predicted synthesis time. Always `1 <= low <= center <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    /// Optimistic bound, seconds.
    pub low: u32,
    /// Headline prediction, seconds.
    pub center: u32,
    /// Pessimistic bound, seconds.
    pub high: u32,
    /// `center` before rounding up, for comparisons finer than a second.
    pub center_exact: f64,
}

impl Estimate {
    /// A band with the given headline, as used by tests and manual overrides.
    pub fn around(low: u32, center: u32, high: u32) -> Self {
        let center = center.max(1);
        let low = low.clamp(1, center);
        Self {
            low,
            center,
            high: high.max(center),
            center_exact: f64::from(center),
        }
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Est: {}-{}s", self.low, self.high)
    }
}

/// Converts requests into time ranges.
#[derive(Debug, Clone, Default)]
pub struct EstimationEngine {
    tuning: ModelTuning,
}

impl EstimationEngine {
    pub const fn new(tuning: ModelTuning) -> Self {
        Self { tuning }
    }

    pub const fn tuning(&self) -> &ModelTuning {
        &self.tuning
    }

    /// Throughput to predict with: the voice's own once it has enough
    /// samples, otherwise the global average.
    pub fn base_speed(&self, state: &PerformanceState, voice: &str) -> f64 {
        state
            .voice_stats(voice)
            .filter(|stats| stats.sample_count() >= self.tuning.min_samples_for_voice)
            .map_or(state.average_throughput(), |stats| stats.throughput())
    }

    /// Processing cost multiplier for faster playback speeds.
    ///
    /// Speeds at or below 1.0 cost nothing extra; above that the extra speed
    /// is charged at a damped rate.
    pub fn speed_penalty(&self, speed_multiplier: f64) -> f64 {
        if !speed_multiplier.is_finite() || speed_multiplier <= 1.0 {
            1.0
        } else {
            (speed_multiplier - 1.0).mul_add(self.tuning.speed_penalty_rate, 1.0)
        }
    }

    /// Seconds of pure synthesis predicted for the request.
    pub fn processing_secs(&self, state: &PerformanceState, request: &EstimateRequest<'_>) -> f64 {
        // Zero-length text still costs a round trip.
        let chars = request.text_length.max(1) as f64;
        chars / self.base_speed(state, request.voice) * self.speed_penalty(request.speed_multiplier)
    }

    pub fn estimate(&self, state: &PerformanceState, request: &EstimateRequest<'_>) -> Estimate {
        let total = self.processing_secs(state, request) + state.network_latency_ms() / 1000.0;
        let center_exact = total * self.tuning.center_band_factor;

        let low = whole_seconds(total * self.tuning.low_band_factor);
        let center = whole_seconds(center_exact);
        let high = whole_seconds(total * self.tuning.high_band_factor);

        Estimate {
            low: low.min(center),
            center,
            high: high.max(center),
            center_exact,
        }
    }
}

/// Round up to whole seconds, never below one.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(secs: f64) -> u32 {
    if !secs.is_finite() {
        return u32::MAX;
    }
    secs.ceil().clamp(1.0, f64::from(u32::MAX)) as u32
}
