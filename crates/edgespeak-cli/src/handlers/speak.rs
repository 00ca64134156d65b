//! Speak command handler.

use std::path::{Path, PathBuf};

use anyhow::Result;
use edgespeak_core::domain::{format_clock, needs_acceleration};
use edgespeak_core::{SpeedPlan, SynthesisResult, TextStats, VoiceCatalog};
use tracing::{debug, warn};

use crate::bootstrap::CliContext;
use crate::commands::TextSource;
use crate::error::CliError;
use crate::handlers::input::read_text;
use crate::presentation::{LoadingSpinner, print_events};

/// Bit rate of the MP3 the server produces (48 kbit/s mono).
const AUDIO_BYTES_PER_SEC: f64 = 48_000.0 / 8.0;

/// Arguments for the speak command.
pub struct SpeakArgs<'a> {
    pub source: &'a TextSource,
    pub voice: Option<&'a str>,
    pub speed: Option<f64>,
    pub out: Option<&'a Path>,
}

/// Execute the speak command.
pub async fn execute(ctx: &mut CliContext, args: SpeakArgs<'_>) -> Result<()> {
    let text = read_text(args.source)?;
    let voice = match args.voice {
        Some(voice) => voice.to_string(),
        None => configured_voice(ctx).await,
    };
    let speed = args.speed.unwrap_or(ctx.settings.default_speed);

    println!("{}", TextStats::of(&text));
    if needs_acceleration(speed) {
        eprintln!(
            "⚠️  Speeds above 2x are synthesized at 2x; the rest must be applied at playback."
        );
    }

    let spinner = LoadingSpinner::follow(ctx.orchestrator.loading_view());
    let result = ctx.orchestrator.speak(&text, &voice, speed).await;
    // Let the indicator finish its minimum visible time before printing.
    ctx.orchestrator.loading().settled().await;
    spinner.finish().await;

    print_events(&ctx.drain_events());
    let result = result.map_err(CliError::from)?;

    let path = args
        .out
        .map_or_else(|| default_output_path(&result.outcome.audio_id), Path::to_path_buf);
    tokio::fs::write(&path, &result.audio)
        .await
        .map_err(|e| CliError::Io(format!("Failed to write {}: {e}", path.display())))?;
    debug!(path = %path.display(), bytes = result.audio.len(), "Wrote audio");

    print_summary(&path, &result, speed);
    Ok(())
}

/// The configured default voice, or the server's first voice when the
/// server does not offer it.
async fn configured_voice(ctx: &mut CliContext) -> String {
    let preferred = ctx.settings.default_voice.clone();
    let catalog = ctx.orchestrator.voices().await;
    // A failed listing leaves an error notification; synthesis reports its own.
    ctx.drain_events();
    match catalog {
        Ok(catalog) => {
            let voice = resolve_voice(&catalog, &preferred);
            if voice != preferred {
                eprintln!("Voice '{preferred}' is not available, using '{voice}'.");
            }
            voice
        }
        Err(e) => {
            warn!(error = %e, "Could not list voices, keeping '{preferred}'");
            preferred
        }
    }
}

fn resolve_voice(catalog: &VoiceCatalog, preferred: &str) -> String {
    catalog
        .resolve(preferred)
        .map_or_else(|| preferred.to_string(), |v| v.short_name.clone())
}

/// `speech_<audio_id>.mp3` in the current directory.
fn default_output_path(audio_id: &str) -> PathBuf {
    let id: String = audio_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect();
    PathBuf::from(format!("speech_{id}.mp3"))
}

/// Approximate listening time of `bytes` of audio at normal speed.
fn audio_duration_secs(bytes: usize) -> f64 {
    bytes as f64 / AUDIO_BYTES_PER_SEC
}

fn print_summary(path: &Path, result: &SynthesisResult, speed: f64) {
    let plan = SpeedPlan::for_speed(speed);
    let playback_rate = result.outcome.playback_rate();

    println!();
    println!("Saved:     {}", path.display());
    println!(
        "Audio:     {} bytes, ~{}",
        result.audio.len(),
        format_clock(audio_duration_secs(result.audio.len()) / playback_rate)
    );
    println!(
        "Took:      {:.1}s (estimated {}s)",
        result.elapsed.as_secs_f64(),
        result.estimate.center
    );
    if let Some(server_secs) = result.outcome.synthesis_time {
        println!("Server:    {server_secs:.2}s");
    }
    println!("Speed:     {speed}x ({plan})");
    if result.outcome.needs_player_acceleration() {
        println!("Playback:  play at {playback_rate:.2}x to hear {speed}x");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgespeak_core::Voice;

    fn voice(short_name: &str) -> Voice {
        Voice {
            short_name: short_name.to_string(),
            name: String::new(),
            friendly_name: None,
            locale: Some("en-US".to_string()),
            gender: None,
        }
    }

    #[test]
    fn test_configured_voice_kept_when_offered() {
        let catalog = VoiceCatalog::new(vec![voice("en-US-AndrewNeural"), voice("en-US-AvaNeural")]);
        assert_eq!(resolve_voice(&catalog, "en-US-AvaNeural"), "en-US-AvaNeural");
    }

    #[test]
    fn test_missing_voice_falls_back_to_first_offered() {
        let catalog = VoiceCatalog::new(vec![voice("en-US-AndrewNeural"), voice("en-US-AvaNeural")]);
        assert_eq!(resolve_voice(&catalog, "xx-XX-GoneNeural"), "en-US-AndrewNeural");
    }

    #[test]
    fn test_empty_catalog_keeps_configured_voice() {
        assert_eq!(
            resolve_voice(&VoiceCatalog::default(), "en-US-AvaNeural"),
            "en-US-AvaNeural"
        );
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path("3f2a-91"),
            PathBuf::from("speech_3f2a-91.mp3")
        );
        assert_eq!(
            default_output_path("../etc/passwd"),
            PathBuf::from("speech_etcpasswd.mp3")
        );
    }

    #[test]
    fn test_audio_duration() {
        assert!((audio_duration_secs(60_000) - 10.0).abs() < f64::EPSILON);
        assert!(audio_duration_secs(0).abs() < f64::EPSILON);
    }
}
