//! Domain types for the synthesis client.
//!
//! Pure data and validation, no I/O.

pub mod notification;
pub mod playback;
pub mod request;
pub mod speed;
pub mod voice;

pub use notification::{Notification, NotificationKind};
pub use playback::{EMPTY_CLOCK, PlaybackProgress, format_clock};
pub use request::{DEFAULT_VOICE, MAX_TEXT_CHARS, RequestError, SynthesisRequest, TextStats};
pub use speed::{
    MAX_SPEED, MIN_SPEED, SPEED_PRESETS, SpeedPlan, needs_acceleration, step_down, step_up,
};
pub use voice::{LocaleGroup, Voice, VoiceCatalog};
