//! Playback position formatting.

use std::fmt;

/// Placeholder shown while no audio is loaded.
pub const EMPTY_CLOCK: &str = "--:-- / --:--";

/// Format whole seconds as `m:ss`. Negative and non-finite input reads `0:00`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Position of the player within the current audio.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackProgress {
    pub position_secs: f64,
    pub duration_secs: f64,
}

impl PlaybackProgress {
    pub const fn new(position_secs: f64, duration_secs: f64) -> Self {
        Self {
            position_secs,
            duration_secs,
        }
    }

    fn has_duration(&self) -> bool {
        self.duration_secs.is_finite() && self.duration_secs > 0.0
    }

    /// Completion in percent, `0.0..=100.0`.
    pub fn percent(&self) -> f64 {
        if !self.has_duration() {
            return 0.0;
        }
        (self.position_secs / self.duration_secs * 100.0).clamp(0.0, 100.0)
    }
}

impl fmt::Display for PlaybackProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_duration() {
            return f.write_str(EMPTY_CLOCK);
        }
        write!(
            f,
            "{} / {}",
            format_clock(self.position_secs),
            format_clock(self.duration_secs)
        )
    }
}
