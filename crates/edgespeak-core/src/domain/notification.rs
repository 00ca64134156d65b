//! Transient user-facing messages.
//!
//! The UI has a single notification slot: showing a new notification
//! replaces whatever was visible.

use std::time::Duration;

use serde::Serialize;

/// Notification severity, which also decides how long it stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Error,
    Success,
    Info,
}

impl NotificationKind {
    /// How long the notification stays visible before fading out.
    pub const fn display_duration(self) -> Duration {
        match self {
            Self::Error => Duration::from_millis(5000),
            Self::Success => Duration::from_millis(3000),
            Self::Info => Duration::from_millis(4000),
        }
    }
}

/// A message for the notification slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    pub const fn display_duration(&self) -> Duration {
        self.kind.display_duration()
    }
}
