//! Loading, updating and persisting the [`PerformanceState`].

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use super::sample::PerformanceSample;
use super::state::{PerformanceState, VoiceStats, is_positive, push_bounded};
use crate::ports::{StateStore, StoreError};
use crate::tuning::ModelTuning;

/// Storage key the serialized state lives under.
pub const PERFORMANCE_STATE_KEY: &str = "tts-performance-data";

/// Why a persisted state was discarded.
#[derive(Debug, Error)]
pub enum MalformedStateError {
    #[error("unparseable state: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("state violates invariants: {0}")]
    Invariant(String),
}

/// Parse a persisted state and check it against `tuning`.
pub fn decode_state(json: &str, tuning: &ModelTuning) -> Result<PerformanceState, MalformedStateError> {
    let state: PerformanceState = serde_json::from_str(json)?;
    state
        .check_invariants(tuning)
        .map_err(MalformedStateError::Invariant)?;
    Ok(state)
}

/// Owner of the learned performance state.
///
/// The model is the only writer of its state: [`record`](Self::record)
/// applies one sample and persists the result. Everything else reads.
pub struct PerformanceModel {
    state: PerformanceState,
    store: Arc<dyn StateStore>,
    tuning: ModelTuning,
}

impl PerformanceModel {
    /// Restore the state from `store`.
    ///
    /// Never fails: a missing, unreadable or malformed record yields the
    /// seeded defaults.
    pub async fn load(store: Arc<dyn StateStore>, tuning: ModelTuning) -> Self {
        let state = match store.read(PERFORMANCE_STATE_KEY).await {
            Ok(Some(json)) => decode_state(&json, &tuning).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding persisted performance data");
                PerformanceState::seeded(&tuning)
            }),
            Ok(None) => {
                debug!("No persisted performance data, using defaults");
                PerformanceState::seeded(&tuning)
            }
            Err(e) => {
                warn!(error = %e, "Failed to read performance data, using defaults");
                PerformanceState::seeded(&tuning)
            }
        };

        Self {
            state,
            store,
            tuning,
        }
    }

    pub const fn state(&self) -> &PerformanceState {
        &self.state
    }

    pub const fn tuning(&self) -> &ModelTuning {
        &self.tuning
    }

    /// Fold one observation into the state, then persist it.
    ///
    /// The in-memory update always happens; only persistence can fail.
    pub async fn record(&mut self, sample: PerformanceSample) -> Result<(), StoreError> {
        self.apply(sample);
        self.persist().await
    }

    /// Forget everything learned and persist the defaults.
    pub async fn reset(&mut self) -> Result<(), StoreError> {
        self.state = PerformanceState::seeded(&self.tuning);
        self.persist().await
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.state)?;
        self.store.write(PERFORMANCE_STATE_KEY, &json).await
    }

    fn apply(&mut self, sample: PerformanceSample) {
        let tuning = &self.tuning;
        let state = &mut self.state;

        if sample.server_elapsed_sec().is_some() {
            let seed = state.average_throughput;
            let stats = state
                .per_voice_stats
                .entry(sample.voice().to_string())
                .or_insert_with(|| VoiceStats::seeded(seed));
            push_bounded(&mut stats.samples, sample.clone(), tuning.voice_sample_cap);

            let (chars, secs) = stats.samples.iter().fold((0.0, 0.0), |(c, s), x| {
                (
                    c + x.text_length() as f64,
                    s + x.server_elapsed_sec().unwrap_or(0.0),
                )
            });
            if let Some(throughput) = scaled_rate(chars, secs, tuning.conservative_factor) {
                stats.throughput = throughput;
            }

            let overhead = sample.network_overhead_ms().unwrap_or(0.0);
            state.network_latency_ms = f64::midpoint(state.network_latency_ms, overhead);
        }

        push_bounded(
            &mut state.recent_samples,
            sample,
            tuning.recent_sample_cap,
        );

        if state.recent_samples.len() >= tuning.min_samples_for_average {
            let window = state
                .recent_samples
                .iter()
                .rev()
                .take(tuning.throughput_window);
            let (chars, secs) = window.fold((0.0, 0.0), |(c, s), x| {
                (c + x.text_length() as f64, s + x.effective_elapsed_secs())
            });
            if let Some(throughput) = scaled_rate(chars, secs, tuning.conservative_factor) {
                state.average_throughput = throughput;
            }
        }

        debug!(
            samples = state.recent_samples.len(),
            average_throughput = state.average_throughput,
            network_latency_ms = state.network_latency_ms,
            "Recorded performance sample"
        );
    }
}

/// `chars / secs * factor`, or `None` when that is not a usable throughput.
fn scaled_rate(chars: f64, secs: f64, factor: f64) -> Option<f64> {
    if secs <= 0.0 {
        return None;
    }
    Some(chars / secs * factor).filter(|rate| is_positive(*rate))
}
