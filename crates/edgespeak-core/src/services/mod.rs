//! Application services built on the ports.

mod orchestrator;

pub use orchestrator::{SynthesisOrchestrator, SynthesisResult};
