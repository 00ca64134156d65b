//! What the loading indicator shows.

use std::fmt;

/// Labels are padded to this many columns so the indicator does not reflow
/// as the text changes.
pub const LABEL_WIDTH: usize = 16;

/// The rendered state of the loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingDisplay {
    #[default]
    Hidden,
    /// Shown before the first countdown tick.
    Processing { low: u32, high: u32 },
    /// Whole seconds left, always above the almost-ready band.
    Remaining(u32),
    AlmostReady,
    Finalizing,
}

impl LoadingDisplay {
    /// Pick the band for `remaining_secs` left on the estimate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn for_remaining(remaining_secs: f64, almost_ready_secs: f64) -> Self {
        let remaining = remaining_secs.max(0.0);
        if remaining <= 0.0 {
            Self::Finalizing
        } else if remaining <= almost_ready_secs {
            Self::AlmostReady
        } else {
            Self::Remaining(remaining.ceil().min(f64::from(u32::MAX)) as u32)
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Hidden => 0,
            Self::Processing { .. } => 1,
            Self::Remaining(_) => 2,
            Self::AlmostReady => 3,
            Self::Finalizing => 4,
        }
    }

    /// The display after `next`, never moving backwards.
    ///
    /// Bands only progress toward `Finalizing`, and a numeric countdown
    /// only goes down.
    #[must_use]
    pub fn advance(self, next: Self) -> Self {
        match (self, next) {
            (Self::Remaining(current), Self::Remaining(next)) => Self::Remaining(current.min(next)),
            _ if next.rank() < self.rank() => self,
            _ => next,
        }
    }

    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Unpadded label text. Empty when hidden.
    pub fn label(self) -> String {
        match self {
            Self::Hidden => String::new(),
            Self::Processing { low, high } => format!("Est: {low}-{high}s"),
            Self::Remaining(secs) => format!("~{secs}s remaining"),
            Self::AlmostReady => "Almost ready...".to_string(),
            Self::Finalizing => "Finalizing...".to_string(),
        }
    }
}

impl fmt::Display for LoadingDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<width$}", self.label(), width = LABEL_WIDTH)
    }
}
