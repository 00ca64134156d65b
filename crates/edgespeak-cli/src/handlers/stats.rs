//! Stats and reset-stats command handlers.

use anyhow::Result;
use edgespeak_core::PERFORMANCE_STATE_KEY;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{print_events, print_separator};

/// Execute the stats command.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let state = ctx.orchestrator().performance();

    println!(
        "Data file:   {}",
        ctx.data_dir
            .join(format!("{PERFORMANCE_STATE_KEY}.json"))
            .display()
    );
    println!("Throughput:  {:.1} chars/s", state.average_throughput());
    println!("Latency:     {:.0} ms", state.network_latency_ms());
    println!("Samples:     {}", state.sample_count());

    let voices: Vec<_> = state.voices().collect();
    if voices.is_empty() {
        return Ok(());
    }

    println!();
    println!("{:<32} {:>10} {:>8}", "Voice", "chars/s", "Samples");
    print_separator(52);
    for (voice, stats) in voices {
        println!(
            "{voice:<32} {:>10.1} {:>8}",
            stats.throughput(),
            stats.sample_count()
        );
    }
    Ok(())
}

/// Execute the reset-stats command.
pub async fn reset(ctx: &mut CliContext) -> Result<()> {
    let result = ctx.orchestrator.reset_performance().await;
    print_events(&ctx.drain_events());
    result.map_err(CliError::from)?;
    Ok(())
}
