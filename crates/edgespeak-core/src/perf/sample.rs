//! A single timed synthesis observation.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timing observed for one completed synthesis request.
///
/// Samples are immutable once built; the model only ever appends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSample {
    text_length: usize,
    client_elapsed_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    server_elapsed_sec: Option<f64>,
    voice: String,
    speed_multiplier: f64,
    captured_at: DateTime<Utc>,
}

impl PerformanceSample {
    /// Capture a sample now.
    ///
    /// A server timing that is not a positive finite number is dropped, and a
    /// non-positive speed is recorded as 1.0.
    pub fn new(
        text_length: usize,
        client_elapsed: Duration,
        server_elapsed_sec: Option<f64>,
        voice: impl Into<String>,
        speed_multiplier: f64,
    ) -> Self {
        Self {
            text_length,
            client_elapsed_ms: u64::try_from(client_elapsed.as_millis()).unwrap_or(u64::MAX),
            server_elapsed_sec: server_elapsed_sec.filter(|s| s.is_finite() && *s > 0.0),
            voice: voice.into(),
            speed_multiplier: if speed_multiplier.is_finite() && speed_multiplier > 0.0 {
                speed_multiplier
            } else {
                1.0
            },
            captured_at: Utc::now(),
        }
    }

    /// Override the capture timestamp.
    #[must_use]
    pub fn captured_at_time(mut self, at: DateTime<Utc>) -> Self {
        self.captured_at = at;
        self
    }

    pub const fn text_length(&self) -> usize {
        self.text_length
    }

    pub const fn client_elapsed_ms(&self) -> u64 {
        self.client_elapsed_ms
    }

    pub fn client_elapsed_secs(&self) -> f64 {
        self.client_elapsed_ms as f64 / 1000.0
    }

    pub const fn server_elapsed_sec(&self) -> Option<f64> {
        self.server_elapsed_sec
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub const fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub const fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// The longer of the server and client timings, in seconds.
    pub fn effective_elapsed_secs(&self) -> f64 {
        let client = self.client_elapsed_secs();
        self.server_elapsed_sec.map_or(client, |server| server.max(client))
    }

    /// Time spent outside synthesis (client minus server), never negative.
    ///
    /// `None` when the server did not report its own timing.
    pub fn network_overhead_ms(&self) -> Option<f64> {
        self.server_elapsed_sec
            .map(|server| (self.client_elapsed_ms as f64 - server * 1000.0).max(0.0))
    }

    /// Whether a deserialized sample still satisfies construction rules.
    pub(crate) fn is_well_formed(&self) -> bool {
        self.speed_multiplier.is_finite()
            && self.speed_multiplier > 0.0
            && self
                .server_elapsed_sec
                .is_none_or(|s| s.is_finite() && s > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_server_timing_is_dropped() {
        let zero = PerformanceSample::new(10, Duration::from_millis(500), Some(0.0), "v", 1.0);
        assert_eq!(zero.server_elapsed_sec(), None);

        let nan = PerformanceSample::new(10, Duration::from_millis(500), Some(f64::NAN), "v", 1.0);
        assert_eq!(nan.server_elapsed_sec(), None);
    }

    #[test]
    fn test_invalid_speed_defaults_to_one() {
        let sample = PerformanceSample::new(10, Duration::ZERO, None, "v", -2.0);
        assert!((sample.speed_multiplier() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_effective_elapsed_takes_longer_timing() {
        let sample = PerformanceSample::new(1000, Duration::from_secs(9), Some(7.0), "v", 1.0);
        assert!((sample.effective_elapsed_secs() - 9.0).abs() < 1e-9);

        let slow_server = PerformanceSample::new(1000, Duration::from_secs(2), Some(3.5), "v", 1.0);
        assert!((slow_server.effective_elapsed_secs() - 3.5).abs() < 1e-9);

        let client_only = PerformanceSample::new(1000, Duration::from_millis(4200), None, "v", 1.0);
        assert!((client_only.effective_elapsed_secs() - 4.2).abs() < 1e-9);
    }

    #[test]
    fn test_network_overhead_clamped_at_zero() {
        let sample = PerformanceSample::new(10, Duration::from_millis(1000), Some(1.5), "v", 1.0);
        assert_eq!(sample.network_overhead_ms(), Some(0.0));

        let sample = PerformanceSample::new(10, Duration::from_millis(9000), Some(7.0), "v", 1.0);
        assert_eq!(sample.network_overhead_ms(), Some(2000.0));
    }

    #[test]
    fn test_serializes_camel_case() {
        let sample = PerformanceSample::new(42, Duration::from_millis(1500), Some(1.2), "v1", 1.5);
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["textLength"], 42);
        assert_eq!(json["clientElapsedMs"], 1500);
        assert_eq!(json["voice"], "v1");
        assert!(json.get("capturedAt").is_some());
    }
}
