//! Core of the edgespeak text-to-speech client.
//!
//! - [`perf`]: learned synthesis throughput and latency, persisted between runs
//! - [`estimate`]: turns a pending request into a `{low, center, high}` band
//! - [`loading`]: the loading indicator state machine and its timers
//! - [`services`]: the orchestrator tying these to a synthesis backend
//!
//! Infrastructure is reached only through [`ports`]; adapters live in other
//! crates (HTTP) or in [`store`] (key-value persistence).
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod estimate;
pub mod events;
pub mod loading;
pub mod paths;
pub mod perf;
pub mod ports;
pub mod services;
pub mod settings;
pub mod store;
pub mod tuning;

// Re-export commonly used types for convenience
pub use domain::{
    DEFAULT_VOICE, MAX_TEXT_CHARS, Notification, NotificationKind, RequestError, SpeedPlan,
    SynthesisRequest, TextStats, Voice, VoiceCatalog,
};
pub use estimate::{Estimate, EstimateRequest, EstimationEngine};
pub use events::OrchestratorEvent;
pub use loading::{
    LoadingController, LoadingDisplay, LoadingError, LoadingPhase, LoadingView, TeardownKind,
};
pub use paths::{PathError, data_root, resolve_data_root};
pub use perf::{
    MalformedStateError, PERFORMANCE_STATE_KEY, PerformanceModel, PerformanceSample,
    PerformanceState, VoiceStats,
};
pub use ports::{
    BackendError, CoreError, ServerHealth, StateStore, StoreError, SynthesisBackend,
    SynthesisOutcome,
};
pub use services::{SynthesisOrchestrator, SynthesisResult};
pub use settings::{ClientSettings, SettingsError, validate_settings};
pub use store::{FileStateStore, MemoryStateStore};
pub use tuning::{LoadingTuning, ModelTuning};
