//! Playback speed presets and how a speed is split between the server and
//! the player.
//!
//! The backend can only synthesize up to 2x (`+100%`). Faster speeds are
//! synthesized at 2x and the remainder is applied as a playback rate.

use std::fmt;

/// Slowest accepted speed.
pub const MIN_SPEED: f64 = 0.5;

/// Fastest accepted speed.
pub const MAX_SPEED: f64 = 4.0;

/// Fastest speed the server can synthesize natively.
pub const MAX_SYNTHESIS_SPEED: f64 = 2.0;

/// Speeds offered by the speed picker, ascending.
pub const SPEED_PRESETS: [f64; 9] = [0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0, 2.5, 3.0];

/// Next preset above `current`, or the last preset when already at the top.
pub fn step_up(current: f64) -> f64 {
    SPEED_PRESETS
        .iter()
        .copied()
        .find(|&preset| preset > current + f64::EPSILON)
        .unwrap_or(SPEED_PRESETS[SPEED_PRESETS.len() - 1])
}

/// Next preset below `current`, or the first preset when already at the bottom.
pub fn step_down(current: f64) -> f64 {
    SPEED_PRESETS
        .iter()
        .rev()
        .copied()
        .find(|&preset| preset < current - f64::EPSILON)
        .unwrap_or(SPEED_PRESETS[0])
}

/// Whether `speed` needs player-side acceleration.
pub fn needs_acceleration(speed: f64) -> bool {
    speed > MAX_SYNTHESIS_SPEED
}

/// Server synthesis rate plus player playback rate for a requested speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedPlan {
    /// Synthesis rate adjustment in percent, `-50..=100`.
    pub synthesis_rate_percent: i32,

    /// Playback rate in thousandths (1000 = normal speed).
    playback_rate_milli: u32,
}

impl SpeedPlan {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn for_speed(speed: f64) -> Self {
        if speed <= MAX_SYNTHESIS_SPEED {
            let percent = ((speed - 1.0) * 100.0).round() as i32;
            Self {
                synthesis_rate_percent: percent.clamp(-50, 100),
                playback_rate_milli: 1000,
            }
        } else {
            Self {
                synthesis_rate_percent: 100,
                playback_rate_milli: (speed / MAX_SYNTHESIS_SPEED * 1000.0).round() as u32,
            }
        }
    }

    pub fn playback_rate(&self) -> f64 {
        f64::from(self.playback_rate_milli) / 1000.0
    }

    /// The rate argument understood by the synthesis engine, e.g. `+50%`.
    pub fn rate_label(&self) -> String {
        if self.synthesis_rate_percent >= 0 {
            format!("+{}%", self.synthesis_rate_percent)
        } else {
            format!("{}%", self.synthesis_rate_percent)
        }
    }
}

impl fmt::Display for SpeedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "synthesis {} × playback {:.2}", self.rate_label(), self.playback_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_up_through_presets() {
        assert!((step_up(1.0) - 1.25).abs() < f64::EPSILON);
        assert!((step_up(2.0) - 2.5).abs() < f64::EPSILON);
        assert!((step_up(3.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_step_down_through_presets() {
        assert!((step_down(1.0) - 0.75).abs() < f64::EPSILON);
        assert!((step_down(0.5) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_step_snaps_off_preset_values() {
        assert!((step_up(1.1) - 1.25).abs() < f64::EPSILON);
        assert!((step_down(1.1) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_plan_within_native_range() {
        let plan = SpeedPlan::for_speed(1.5);
        assert_eq!(plan.synthesis_rate_percent, 50);
        assert!((plan.playback_rate() - 1.0).abs() < f64::EPSILON);
        assert_eq!(plan.rate_label(), "+50%");

        let slow = SpeedPlan::for_speed(0.5);
        assert_eq!(slow.rate_label(), "-50%");

        assert_eq!(SpeedPlan::for_speed(1.0).rate_label(), "+0%");
    }

    #[test]
    fn test_plan_beyond_native_range_uses_player() {
        let plan = SpeedPlan::for_speed(3.0);
        assert_eq!(plan.synthesis_rate_percent, 100);
        assert!((plan.playback_rate() - 1.5).abs() < f64::EPSILON);
        assert!(needs_acceleration(3.0));
        assert!(!needs_acceleration(2.0));
    }
}
