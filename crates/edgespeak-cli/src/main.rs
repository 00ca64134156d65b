//! CLI entry point.
//!
//! Infrastructure is wired together only in `bootstrap`; command dispatch
//! routes to handlers which delegate to the orchestrator.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use edgespeak_cli::handlers::speak::SpeakArgs;
use edgespeak_cli::{Cli, CliConfig, Commands, bootstrap, exit_code_for, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Environment overrides from .env, before clap reads `env` arguments
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = CliConfig::with_overrides(cli.server.as_deref(), cli.data_dir.as_deref())?;
    let mut ctx = bootstrap(config).await?;

    match command {
        Commands::Speak {
            source,
            voice,
            speed,
            out,
        } => {
            handlers::speak::execute(
                &mut ctx,
                SpeakArgs {
                    source: &source,
                    voice: voice.as_deref(),
                    speed,
                    out: out.as_deref(),
                },
            )
            .await?;
        }
        Commands::Voices { locale } => {
            handlers::voices::execute(&ctx, locale.as_deref()).await?;
        }
        Commands::Estimate {
            source,
            voice,
            speed,
        } => {
            handlers::estimate::execute(&ctx, &source, voice.as_deref(), speed)?;
        }
        Commands::Stats => handlers::stats::execute(&ctx)?,
        Commands::ResetStats => handlers::stats::reset(&mut ctx).await?,
        Commands::Health => handlers::health::execute(&ctx).await?,
    }

    Ok(())
}
