//! Health command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the health command.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let health = ctx
        .orchestrator()
        .health()
        .await
        .map_err(CliError::from)?;

    println!("Server:     {}", ctx.settings.server_url);
    println!("Status:     {}", health.status);
    if let Some(version) = &health.version {
        println!("Version:    {version}");
    }
    if let Some(count) = health.temp_files {
        println!("Temp files: {count}");
    }

    if !health.is_healthy() {
        return Err(CliError::Unavailable(format!("server reports '{}'", health.status)).into());
    }
    Ok(())
}
