//! Subcommands of the `edgespeak` binary.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Where the text to synthesize comes from.
///
/// Neither given means standard input.
#[derive(Args, Debug, Clone, Default)]
pub struct TextSource {
    /// Text to speak
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize text and save the audio as MP3
    Speak {
        #[command(flatten)]
        source: TextSource,

        /// Voice short name (e.g. "en-US-AvaNeural")
        #[arg(long, env = "EDGESPEAK_VOICE")]
        voice: Option<String>,

        /// Playback speed, 0.5 to 4.0
        #[arg(short, long, env = "EDGESPEAK_SPEED")]
        speed: Option<f64>,

        /// Output file (default: speech_<id>.mp3)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List available voices grouped by locale
    Voices {
        /// Only show locales starting with this prefix (e.g. "en", "de-DE")
        #[arg(long)]
        locale: Option<String>,
    },

    /// Predict synthesis time without contacting the server
    Estimate {
        #[command(flatten)]
        source: TextSource,

        /// Voice short name
        #[arg(long, env = "EDGESPEAK_VOICE")]
        voice: Option<String>,

        /// Playback speed, 0.5 to 4.0
        #[arg(short, long, env = "EDGESPEAK_SPEED")]
        speed: Option<f64>,
    },

    /// Show learned synthesis performance
    Stats,

    /// Forget learned synthesis performance
    ResetStats,

    /// Check that the server is up
    Health,
}
