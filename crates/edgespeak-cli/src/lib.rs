//! Command-line adapter for edgespeak.
//!
//! - [`parser`] / [`commands`]: clap argument definitions
//! - [`bootstrap`]: the composition root building a [`CliContext`]
//! - [`handlers`]: one module per command
//! - [`presentation`]: terminal rendering of the loading display and notifications
#![deny(unused_crate_dependencies)]

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, TextSource};
pub use error::{CliError, exit_code_for};
pub use parser::Cli;

// Used only by the binary target.
use dotenvy as _;
use tracing_subscriber as _;
