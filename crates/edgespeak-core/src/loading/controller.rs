use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;

use super::display::LoadingDisplay;
use super::timer::TimerHandle;
use crate::estimate::{Estimate, EstimateRequest, EstimationEngine};
use crate::perf::PerformanceState;
use crate::tuning::LoadingTuning;

/// Lifecycle phase of the loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingPhase {
    #[default]
    Idle,
    /// Waiting to see whether a short request finishes before the reveal.
    PendingDecision,
    Showing,
    /// Request finished, indicator held up for its minimum visible time.
    TearingDown,
}

/// Read-only snapshot published to observers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadingView {
    pub phase: LoadingPhase,
    pub display: LoadingDisplay,
    pub estimate: Option<Estimate>,
    /// Identifies the session this view belongs to.
    pub session: u64,
}

/// How [`LoadingController::end`] tore the session down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownKind {
    /// No session was active.
    NotActive,
    /// Ended before the delayed reveal; the indicator never appeared.
    Suppressed,
    /// Visible long enough already; hidden now.
    Immediate,
    /// Hidden after the remaining minimum visible time.
    Deferred(Duration),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadingError {
    #[error("A loading session is already active")]
    SessionActive,
}

struct ActiveSession {
    id: u64,
    started_at: Instant,
    countdown: Option<TimerHandle>,
    pending_show: Option<TimerHandle>,
}

impl ActiveSession {
    fn cancel_timers(&mut self) {
        if let Some(timer) = self.countdown.take() {
            timer.cancel();
        }
        if let Some(timer) = self.pending_show.take() {
            timer.cancel();
        }
    }
}

/// Decides when the loading indicator appears, drives its countdown and
/// hides it without flicker.
///
/// One session at a time: `begin()` while a session is active or still
/// tearing down fails with [`LoadingError::SessionActive`]. Observers read
/// the current [`LoadingView`] through [`subscribe`](Self::subscribe); timer
/// handles never leave the controller.
///
/// Must be used from within a tokio runtime.
pub struct LoadingController {
    engine: EstimationEngine,
    tuning: LoadingTuning,
    view: Arc<watch::Sender<LoadingView>>,
    session: Option<ActiveSession>,
    teardown: Option<TimerHandle>,
    next_session: u64,
}

impl LoadingController {
    pub fn new(engine: EstimationEngine, tuning: LoadingTuning) -> Self {
        let (view, _) = watch::channel(LoadingView::default());
        Self {
            engine,
            tuning,
            view: Arc::new(view),
            session: None,
            teardown: None,
            next_session: 1,
        }
    }

    pub const fn tuning(&self) -> &LoadingTuning {
        &self.tuning
    }

    /// Estimate `request` against `state` and start a session for it.
    pub fn begin(
        &mut self,
        state: &PerformanceState,
        request: &EstimateRequest<'_>,
    ) -> Result<Estimate, LoadingError> {
        let estimate = self.engine.estimate(state, request);
        self.begin_with_estimate(request.text_length, estimate)?;
        Ok(estimate)
    }

    /// Start a session with an estimate computed elsewhere.
    pub fn begin_with_estimate(
        &mut self,
        text_length: usize,
        estimate: Estimate,
    ) -> Result<(), LoadingError> {
        if self.session.is_some() || self.view.borrow().phase != LoadingPhase::Idle {
            return Err(LoadingError::SessionActive);
        }
        // Any finished teardown timer is stale by now.
        self.teardown = None;

        let id = self.next_session;
        self.next_session += 1;
        let started_at = Instant::now();
        let center = f64::from(estimate.center);
        let almost_ready = self.tuning.almost_ready_secs;

        let show_now = center > self.tuning.show_threshold_secs
            || text_length > self.tuning.long_text_chars;

        self.view.send_replace(LoadingView {
            phase: if show_now {
                LoadingPhase::Showing
            } else {
                LoadingPhase::PendingDecision
            },
            display: if show_now {
                LoadingDisplay::Processing {
                    low: estimate.low,
                    high: estimate.high,
                }
            } else {
                LoadingDisplay::Hidden
            },
            estimate: Some(estimate),
            session: id,
        });
        debug!(
            session = id,
            text_length,
            center = estimate.center,
            show_now,
            "Loading session started"
        );

        let pending_show = (!show_now).then(|| {
            let view = Arc::clone(&self.view);
            TimerHandle::once(self.tuning.reveal_delay, move || {
                view.send_if_modified(|v| {
                    if v.session != id || v.phase != LoadingPhase::PendingDecision {
                        return false;
                    }
                    let remaining = center - started_at.elapsed().as_secs_f64();
                    v.phase = LoadingPhase::Showing;
                    v.display = LoadingDisplay::for_remaining(remaining, almost_ready);
                    true
                });
            })
        });

        let view = Arc::clone(&self.view);
        let countdown = TimerHandle::repeating(self.tuning.tick_interval, move || {
            view.send_if_modified(|v| {
                if v.session != id || v.phase != LoadingPhase::Showing {
                    return false;
                }
                let remaining = center - started_at.elapsed().as_secs_f64();
                let next = v
                    .display
                    .advance(LoadingDisplay::for_remaining(remaining, almost_ready));
                let changed = next != v.display;
                v.display = next;
                changed
            });
        });

        self.session = Some(ActiveSession {
            id,
            started_at,
            countdown: Some(countdown),
            pending_show,
        });
        Ok(())
    }

    /// Finish the current session. Safe to call any number of times.
    ///
    /// Both timers are cancelled on every path. A session that became
    /// visible stays up until `min_visible` has passed since it started.
    pub fn end(&mut self) -> TeardownKind {
        let Some(mut session) = self.session.take() else {
            return TeardownKind::NotActive;
        };
        session.cancel_timers();

        let elapsed = session.started_at.elapsed();
        let min_visible = self.tuning.min_visible;
        let mut kind = TeardownKind::NotActive;

        self.view.send_if_modified(|v| {
            if v.session != session.id {
                return false;
            }
            match v.phase {
                LoadingPhase::PendingDecision => {
                    v.phase = LoadingPhase::Idle;
                    kind = TeardownKind::Suppressed;
                }
                LoadingPhase::Showing if elapsed >= min_visible => {
                    v.phase = LoadingPhase::Idle;
                    v.display = LoadingDisplay::Hidden;
                    kind = TeardownKind::Immediate;
                }
                LoadingPhase::Showing => {
                    v.phase = LoadingPhase::TearingDown;
                    kind = TeardownKind::Deferred(min_visible - elapsed);
                }
                _ => return false,
            }
            true
        });

        if let TeardownKind::Deferred(delay) = kind {
            let view = Arc::clone(&self.view);
            let id = session.id;
            self.teardown = Some(TimerHandle::once(delay, move || {
                view.send_if_modified(|v| {
                    if v.session != id || v.phase != LoadingPhase::TearingDown {
                        return false;
                    }
                    v.phase = LoadingPhase::Idle;
                    v.display = LoadingDisplay::Hidden;
                    true
                });
            }));
        }

        debug!(session = session.id, ?kind, ?elapsed, "Loading session ended");
        kind
    }

    /// Current view snapshot.
    pub fn view(&self) -> LoadingView {
        self.view.borrow().clone()
    }

    /// Receiver that observes every view change.
    pub fn subscribe(&self) -> watch::Receiver<LoadingView> {
        self.view.subscribe()
    }

    pub fn is_idle(&self) -> bool {
        self.session.is_none() && self.view.borrow().phase == LoadingPhase::Idle
    }

    /// Wait until any deferred teardown has finished.
    pub async fn settled(&self) {
        let mut rx = self.view.subscribe();
        if rx.wait_for(|v| v.phase == LoadingPhase::Idle).await.is_err() {
            debug!("Loading view closed while waiting to settle");
        }
    }

    /// Timers that can still fire.
    pub fn pending_timer_count(&self) -> usize {
        let session_timers = self.session.as_ref().map_or(0, |s| {
            usize::from(s.countdown.as_ref().is_some_and(TimerHandle::is_pending))
                + usize::from(s.pending_show.as_ref().is_some_and(TimerHandle::is_pending))
        });
        session_timers + usize::from(self.teardown.as_ref().is_some_and(TimerHandle::is_pending))
    }
}
