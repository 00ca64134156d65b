//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the edgespeak text-to-speech client.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "edgespeak")]
#[command(about = "Turn text into speech with live wait estimates")]
#[command(version)]
pub struct Cli {
    /// TTS server base URL (may include a path prefix)
    #[arg(long = "server", global = true, env = "EDGESPEAK_SERVER_URL")]
    pub server: Option<String>,

    /// Directory for learned performance data
    #[arg(long = "data-dir", global = true, env = "EDGESPEAK_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
