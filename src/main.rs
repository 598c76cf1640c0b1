// ABOUTME: Entry point for the halyard CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use halyard::config;
use halyard::error::Result;
use halyard::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    if let Err(e) = run(cli, output.clone()).await {
        output.error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    match cli.command {
        Commands::Init {
            repository,
            deploy_path,
            force,
        } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, repository.as_deref(), deploy_path.as_deref(), force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Deploy { target, revision } => {
            let config = commands::load_config(&target, revision.as_deref())?;
            commands::deploy(config, output).await
        }
        Commands::Rollback { target } => {
            let config = commands::load_config(&target, None)?;
            commands::rollback(config, output).await
        }
        Commands::Releases { target } => {
            let config = commands::load_config(&target, None)?;
            commands::releases(config, output).await
        }
    }
}
