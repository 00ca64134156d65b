//! Integration tests for the `LoadingController` state machine.
//!
//! All tests run on tokio's paused clock, so timer behaviour is exact and
//! instant. Samples are taken 100ms after a whole second to stay clear of
//! the 500ms tick instants.

use std::time::Duration;

use edgespeak_core::{
    Estimate, EstimationEngine, LoadingController, LoadingDisplay, LoadingPhase, LoadingTuning,
    PerformanceState, TeardownKind,
};
use edgespeak_core::estimate::EstimateRequest;
use tokio::time::{Instant, sleep_until};

// ── Helpers ────────────────────────────────────────────────────────

fn controller() -> LoadingController {
    LoadingController::new(EstimationEngine::default(), LoadingTuning::default())
}

/// Sleep until `ms` after `start` and return the display at that moment.
async fn display_at(ctl: &LoadingController, start: Instant, ms: u64) -> LoadingDisplay {
    sleep_until(start + Duration::from_millis(ms)).await;
    ctl.view().display
}

// ── Countdown ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn countdown_never_negative_or_increasing() {
    let mut ctl = controller();
    let start = Instant::now();
    ctl.begin_with_estimate(400, Estimate::around(9, 10, 14)).unwrap();

    let t1 = display_at(&ctl, start, 1_100).await;
    let t4 = display_at(&ctl, start, 4_100).await;
    let t6 = display_at(&ctl, start, 6_100).await;
    let t7 = display_at(&ctl, start, 7_100).await;
    let t9 = display_at(&ctl, start, 9_100).await;
    let t11 = display_at(&ctl, start, 11_100).await;

    let (LoadingDisplay::Remaining(at1), LoadingDisplay::Remaining(at4)) = (t1, t4) else {
        panic!("expected numeric countdowns, got {t1:?} and {t4:?}");
    };
    assert_eq!(at1, 9);
    assert_eq!(at4, 6);
    assert!(at4 < at1);

    // Four seconds left is still above the almost-ready band.
    assert_eq!(t6, LoadingDisplay::Remaining(4));
    assert_eq!(t7, LoadingDisplay::AlmostReady);
    assert!(matches!(t9, LoadingDisplay::AlmostReady | LoadingDisplay::Finalizing));
    assert_eq!(t11, LoadingDisplay::Finalizing);

    ctl.end();
}

#[tokio::test(start_paused = true)]
async fn countdown_is_monotonic_at_every_tick() {
    let mut ctl = controller();
    let start = Instant::now();
    ctl.begin_with_estimate(400, Estimate::around(5, 6, 8)).unwrap();

    let mut last = ctl.view().display;
    for step in 1..=20 {
        let now = display_at(&ctl, start, step * 500 + 100).await;
        assert_eq!(last.advance(now), now, "regressed from {last:?} to {now:?}");
        last = now;
    }
    assert_eq!(last, LoadingDisplay::Finalizing);
    ctl.end();
}

// ── Short requests ─────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn fast_short_request_never_shows() {
    let mut ctl = controller();
    let mut rx = ctl.subscribe();

    ctl.begin_with_estimate(20, Estimate::around(1, 1, 2)).unwrap();
    assert_eq!(rx.borrow_and_update().phase, LoadingPhase::PendingDecision);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(ctl.end(), TeardownKind::Suppressed);
    assert_eq!(rx.borrow_and_update().phase, LoadingPhase::Idle);
    assert_eq!(ctl.pending_timer_count(), 0);

    // Well past the reveal delay: nothing changed after the teardown.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!rx.has_changed().unwrap());
    assert_eq!(ctl.view().display, LoadingDisplay::Hidden);
}

#[tokio::test(start_paused = true)]
async fn short_estimate_from_learned_state() {
    let mut ctl = controller();
    let state = PerformanceState::default();

    // 20 chars still costs the default 2s latency, so the band exceeds 2s
    // and the indicator shows at once.
    let estimate = ctl
        .begin(&state, &EstimateRequest::new(20, "en-US-AvaNeural", 1.0))
        .unwrap();
    assert_eq!(estimate.center, 3);
    assert_eq!(ctl.view().phase, LoadingPhase::Showing);
    assert_eq!(ctl.view().estimate, Some(estimate));
    ctl.end();
}

// ── Teardown ───────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn minimum_visible_duration_is_enforced() {
    let mut ctl = controller();
    let start = Instant::now();
    ctl.begin_with_estimate(500, Estimate::around(4, 5, 7)).unwrap();
    assert_eq!(ctl.view().phase, LoadingPhase::Showing);

    sleep_until(start + Duration::from_millis(300)).await;
    assert_eq!(ctl.end(), TeardownKind::Deferred(Duration::from_millis(900)));

    sleep_until(start + Duration::from_millis(1_150)).await;
    let view = ctl.view();
    assert_eq!(view.phase, LoadingPhase::TearingDown);
    assert!(view.display.is_visible());

    sleep_until(start + Duration::from_millis(1_250)).await;
    let view = ctl.view();
    assert_eq!(view.phase, LoadingPhase::Idle);
    assert_eq!(view.display, LoadingDisplay::Hidden);
}

#[tokio::test(start_paused = true)]
async fn delayed_reveal_counts_minimum_from_start() {
    let mut ctl = controller();
    let start = Instant::now();
    ctl.begin_with_estimate(20, Estimate::around(1, 2, 3)).unwrap();

    sleep_until(start + Duration::from_millis(900)).await;
    assert_eq!(ctl.view().phase, LoadingPhase::Showing);

    assert_eq!(ctl.end(), TeardownKind::Deferred(Duration::from_millis(300)));
    ctl.settled().await;
    assert_eq!(Instant::now() - start, Duration::from_millis(1_200));
}

#[tokio::test(start_paused = true)]
async fn repeated_cycles_leave_no_timers() {
    let mut ctl = controller();
    for cycle in 0..25u64 {
        let estimate = if cycle % 2 == 0 {
            Estimate::around(1, 1, 2)
        } else {
            Estimate::around(4, 5, 7)
        };
        ctl.settled().await;
        ctl.begin_with_estimate(20, estimate).unwrap();
        tokio::time::sleep(Duration::from_millis(cycle * 97 % 1_700)).await;
        ctl.end();
        assert!(ctl.pending_timer_count() <= 1, "cycle {cycle}");
        assert_eq!(ctl.end(), TeardownKind::NotActive);
    }

    ctl.settled().await;
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(ctl.pending_timer_count(), 0);
    assert!(ctl.is_idle());
}
