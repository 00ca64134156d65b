//! The loading indicator state machine.
//!
//! ```text
//! Idle → PendingDecision → Showing → TearingDown → Idle
//!            └──────────→ Idle   (ended before the reveal)
//! ```
//!
//! A session ended during `PendingDecision` is suppressed: nothing was
//! shown, so it returns straight to `Idle` and [`LoadingController::end`]
//! reports [`TeardownKind::Suppressed`].

mod controller;
mod display;
mod timer;

pub use controller::{LoadingController, LoadingError, LoadingPhase, LoadingView, TeardownKind};
pub use display::{LABEL_WIDTH, LoadingDisplay};
