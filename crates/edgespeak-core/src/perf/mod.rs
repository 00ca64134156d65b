//! Self-calibrating synthesis throughput and latency model.

mod model;
mod sample;
mod state;

pub use model::{MalformedStateError, PERFORMANCE_STATE_KEY, PerformanceModel, decode_state};
pub use sample::PerformanceSample;
pub use state::{PerformanceState, VoiceStats};
