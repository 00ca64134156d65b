//! Estimate command handler.

use anyhow::Result;
use edgespeak_core::{SpeedPlan, SynthesisRequest, TextStats};

use crate::bootstrap::CliContext;
use crate::commands::TextSource;
use crate::error::CliError;
use crate::handlers::input::read_text;

/// Execute the estimate command.
///
/// Uses only the learned performance data; the server is not contacted.
pub fn execute(
    ctx: &CliContext,
    source: &TextSource,
    voice: Option<&str>,
    speed: Option<f64>,
) -> Result<()> {
    let text = read_text(source)?;
    let voice = voice.unwrap_or(&ctx.settings.default_voice);
    let speed = speed.unwrap_or(ctx.settings.default_speed);

    let request = SynthesisRequest::new(&text, voice, speed)
        .map_err(|e| CliError::Arguments(e.to_string()))?;
    let estimate = ctx.orchestrator().estimate(&request);

    println!("{}", TextStats::of(&text));
    println!("Voice:  {}", request.voice());
    println!("Speed:  {}x ({})", request.speed(), SpeedPlan::for_speed(speed));
    println!();
    println!("Low:    {}s", estimate.low);
    println!("Center: {}s", estimate.center);
    println!("High:   {}s", estimate.high);
    Ok(())
}
