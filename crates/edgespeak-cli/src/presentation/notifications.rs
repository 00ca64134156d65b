//! Terminal rendering of orchestrator events.

use edgespeak_core::{Notification, NotificationKind, OrchestratorEvent};

/// One-line rendering of a notification.
pub fn format_notification(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Error => "✗",
        NotificationKind::Success => "✓",
        NotificationKind::Info => "ℹ",
    };
    format!("{marker} {}", notification.message)
}

/// Print the notification the UI would be showing after `events`.
///
/// There is one notification slot, so only the last one counts. Errors are
/// skipped: the failing command returns them and `main` prints them.
pub fn print_events(events: &[OrchestratorEvent]) {
    match visible_notification(events) {
        Some(n) if n.kind != NotificationKind::Error => println!("{}", format_notification(n)),
        _ => {}
    }
}

fn visible_notification(events: &[OrchestratorEvent]) -> Option<&Notification> {
    events.iter().rev().find_map(|event| match event {
        OrchestratorEvent::Notification(n) => Some(n),
        _ => None,
    })
}
