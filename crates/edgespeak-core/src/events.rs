//! Events emitted by the synthesis orchestrator.

use std::time::Duration;

use crate::domain::Notification;
use crate::estimate::Estimate;

/// Something the UI shell should react to.
#[derive(Debug, Clone, PartialEq)]
pub enum OrchestratorEvent {
    /// Show this notification, replacing any visible one.
    Notification(Notification),

    /// A synthesis request was issued.
    SynthesisStarted { estimate: Estimate, text_length: usize },

    /// The backend answered (successfully or not) after `elapsed`.
    SynthesisFinished { elapsed: Duration, success: bool },
}
