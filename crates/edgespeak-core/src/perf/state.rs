//! The persisted throughput/latency state.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use super::sample::PerformanceSample;
use crate::tuning::ModelTuning;

/// Learned statistics for one voice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceStats {
    pub(crate) samples: VecDeque<PerformanceSample>,
    pub(crate) throughput: f64,
}

impl VoiceStats {
    pub(crate) const fn seeded(throughput: f64) -> Self {
        Self {
            samples: VecDeque::new(),
            throughput,
        }
    }

    /// Samples recorded for this voice, oldest first.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = &PerformanceSample> {
        self.samples.iter()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Characters per second, always strictly positive.
    pub const fn throughput(&self) -> f64 {
        self.throughput
    }
}

/// Everything the latency model knows, as persisted between sessions.
///
/// Invariants:
/// - `average_throughput` and every voice throughput are finite and `> 0`
/// - `network_latency_ms` is finite and `>= 0`
/// - sample sequences never exceed their caps (oldest evicted first)
///
/// Only [`PerformanceModel::record`](super::PerformanceModel::record) mutates
/// a live state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceState {
    pub(crate) average_throughput: f64,
    pub(crate) recent_samples: VecDeque<PerformanceSample>,
    pub(crate) network_latency_ms: f64,
    pub(crate) per_voice_stats: BTreeMap<String, VoiceStats>,
}

impl PerformanceState {
    /// Fresh state seeded from the tuning defaults.
    #[must_use]
    pub const fn seeded(tuning: &ModelTuning) -> Self {
        Self {
            average_throughput: tuning.default_throughput,
            recent_samples: VecDeque::new(),
            network_latency_ms: tuning.default_network_latency_ms,
            per_voice_stats: BTreeMap::new(),
        }
    }

    pub const fn average_throughput(&self) -> f64 {
        self.average_throughput
    }

    pub const fn network_latency_ms(&self) -> f64 {
        self.network_latency_ms
    }

    /// Global sample history, oldest first.
    pub fn recent_samples(&self) -> impl ExactSizeIterator<Item = &PerformanceSample> {
        self.recent_samples.iter()
    }

    pub fn sample_count(&self) -> usize {
        self.recent_samples.len()
    }

    pub fn voice_stats(&self, voice: &str) -> Option<&VoiceStats> {
        self.per_voice_stats.get(voice)
    }

    /// All voices with learned statistics, in name order.
    pub fn voices(&self) -> impl Iterator<Item = (&str, &VoiceStats)> {
        self.per_voice_stats.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check the invariants a deserialized state must satisfy.
    ///
    /// Returns a description of the first violation found.
    pub(crate) fn check_invariants(&self, tuning: &ModelTuning) -> Result<(), String> {
        if !is_positive(self.average_throughput) {
            return Err(format!(
                "average throughput {} is not positive",
                self.average_throughput
            ));
        }
        if !self.network_latency_ms.is_finite() || self.network_latency_ms < 0.0 {
            return Err(format!(
                "network latency {} is negative or not finite",
                self.network_latency_ms
            ));
        }
        if self.recent_samples.len() > tuning.recent_sample_cap {
            return Err(format!(
                "{} recent samples exceed cap {}",
                self.recent_samples.len(),
                tuning.recent_sample_cap
            ));
        }
        if !self.recent_samples.iter().all(PerformanceSample::is_well_formed) {
            return Err("recent samples contain an invalid entry".to_string());
        }
        for (voice, stats) in &self.per_voice_stats {
            if !is_positive(stats.throughput) {
                return Err(format!(
                    "throughput {} for voice '{voice}' is not positive",
                    stats.throughput
                ));
            }
            if stats.samples.len() > tuning.voice_sample_cap {
                return Err(format!(
                    "{} samples for voice '{voice}' exceed cap {}",
                    stats.samples.len(),
                    tuning.voice_sample_cap
                ));
            }
            if !stats.samples.iter().all(PerformanceSample::is_well_formed) {
                return Err(format!("samples for voice '{voice}' contain an invalid entry"));
            }
        }
        Ok(())
    }
}

impl Default for PerformanceState {
    fn default() -> Self {
        Self::seeded(&ModelTuning::default())
    }
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Append `item`, evicting from the front until `cap` holds.
pub(crate) fn push_bounded<T>(queue: &mut VecDeque<T>, item: T, cap: usize) {
    queue.push_back(item);
    while queue.len() > cap {
        queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_state_matches_tuning() {
        let state = PerformanceState::default();
        assert!((state.average_throughput() - 120.0).abs() < f64::EPSILON);
        assert!((state.network_latency_ms() - 2000.0).abs() < f64::EPSILON);
        assert_eq!(state.sample_count(), 0);
        assert_eq!(state.voices().count(), 0);
    }

    #[test]
    fn test_push_bounded_evicts_oldest() {
        let mut queue = VecDeque::new();
        for i in 0..7 {
            push_bounded(&mut queue, i, 5);
        }
        assert_eq!(queue, VecDeque::from(vec![2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_invariants_reject_zero_throughput() {
        let mut state = PerformanceState::default();
        state.average_throughput = 0.0;
        assert!(state.check_invariants(&ModelTuning::default()).is_err());
    }

    #[test]
    fn test_invariants_reject_negative_latency() {
        let mut state = PerformanceState::default();
        state.network_latency_ms = -5.0;
        assert!(state.check_invariants(&ModelTuning::default()).is_err());
    }

    #[test]
    fn test_invariants_reject_bad_voice_throughput() {
        let mut state = PerformanceState::default();
        state
            .per_voice_stats
            .insert("v1".to_string(), VoiceStats::seeded(f64::NAN));
        let err = state.check_invariants(&ModelTuning::default()).unwrap_err();
        assert!(err.contains("v1"));
    }

    #[test]
    fn test_state_json_uses_persisted_field_names() {
        let json = serde_json::to_value(PerformanceState::default()).unwrap();
        assert!(json.get("averageThroughput").is_some());
        assert!(json.get("recentSamples").is_some());
        assert!(json.get("networkLatencyMs").is_some());
        assert!(json.get("perVoiceStats").is_some());
    }
}
