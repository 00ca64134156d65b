//! Command handlers that delegate to the orchestrator.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &mut CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call orchestrator methods
//!   3. Format output for the terminal

pub mod estimate;
pub mod health;
pub mod input;
pub mod speak;
pub mod stats;
pub mod voices;
